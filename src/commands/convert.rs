use chrono::Utc;

use crate::models::ConversionRequest;
use crate::services::convert_service;
use crate::services::convert_service::ConvertError;
use crate::utils::format::format_amount;
use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64, args: &[&str]) -> Result<(), String> {
    // Both `/convert 1 BTC ETH` and the documented `/convert 1 BTC to ETH`
    // are accepted.
    let (raw_amount, from, to) = match args {
        [amount, from, to] => (*amount, *from, *to),
        [amount, from, kw, to] if kw.eq_ignore_ascii_case("to") => (*amount, *from, *to),
        _ => {
            return Err("❌ Invalid format. Example: `/convert 1 BTC to ETH`".to_string());
        }
    };

    let amount: f64 = raw_amount
        .parse()
        .map_err(|_| "❌ Invalid amount. Please provide a valid number.".to_string())?;

    let _ = ctx.telegram.send_chat_action(chat_id, "typing").await;

    let request = ConversionRequest {
        amount,
        from_asset: from.to_string(),
        to_asset: to.to_string(),
    };

    let result = convert_service::convert(&request, &ctx.coingecko)
        .await
        .map_err(|e| match e {
            ConvertError::InvalidRequest(reason) => format!("❌ {}", reason),
            ConvertError::RateUnavailable { .. } => format!(
                "❌ Could not find a rate for {}/{}. Please check the symbols.",
                from.to_uppercase(),
                to.to_uppercase()
            ),
            ConvertError::Upstream(msg) => {
                format!("There was an error fetching the conversion rate: {}", msg)
            }
        })?;

    let age_minutes = (Utc::now() - result.as_of).num_minutes().max(0);
    let message = format!(
        "{} {} is equal to *{} {}*\nRate: {} (as of {} min ago)",
        format_amount(amount),
        from.to_uppercase(),
        format_amount(result.converted_amount),
        to.to_uppercase(),
        format_amount(result.rate_used),
        age_minutes,
    );

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
