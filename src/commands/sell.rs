use crate::api::binance::TradeType;
use crate::models::QuoteRequest;
use crate::services::{p2p_service, quote_service};
use crate::services::quote_service::QuoteError;
use crate::utils::format::format_number;
use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64, args: &[&str]) -> Result<(), String> {
    let Some(&raw_amount) = args.first() else {
        return Err(format!(
            "❌ Usage: `/sell <amount>` — how much {} you want to sell. Example: `/sell 120`",
            ctx.config.asset
        ));
    };

    let amount: f64 = raw_amount
        .parse()
        .map_err(|_| "❌ Invalid amount. Please provide a valid number.".to_string())?;

    let _ = ctx.telegram.send_chat_action(chat_id, "typing").await;

    let mut offers = p2p_service::fetch_offers(
        &ctx.binance,
        &ctx.config.asset,
        &ctx.config.fiat,
        TradeType::Sell,
        ctx.config.rows,
        None,
    )
    .await?;

    // Best rate for the seller first; the upstream order usually already
    // is, but the fill walk depends on it.
    offers.sort_by(|a, b| b.price.total_cmp(&a.price));

    let request = QuoteRequest {
        amount,
        base_asset: ctx.config.asset.clone(),
        quote_currency: ctx.config.fiat.clone(),
    };

    let message = match quote_service::compute_sell_quote(&request, &offers, &ctx.config.reliability)
    {
        Ok(quote) => {
            let mut lines = format!(
                "*Sell {} {}*\n\
                 You would receive: *{} {}*\n\
                 Blended rate: *{} {}/{}*\n\n\
                 Fill breakdown:\n",
                format_number(amount),
                ctx.config.asset,
                format_number(quote.effective_total),
                ctx.config.fiat,
                format_number(quote.rate_used),
                ctx.config.fiat,
                ctx.config.asset,
            );
            for fill in &quote.fills {
                lines.push_str(&format!(
                    "• {} {} @ {} ({})\n",
                    format_number(fill.amount_filled),
                    ctx.config.asset,
                    format_number(fill.price),
                    fill.merchant
                ));
            }
            lines.push_str("\n_Unreliable offers are skipped to avoid frozen trades._");
            lines
        }
        Err(QuoteError::InsufficientLiquidity {
            filled_total,
            unfilled,
            ..
        }) => {
            if filled_total > 0.0 {
                format!(
                    "⚠️ Not enough reliable offers to sell {} {}.\n\
                     Only {} {} could be filled (worth {} {}); {} {} would be left over.\n\
                     Try a smaller amount.",
                    format_number(amount),
                    ctx.config.asset,
                    format_number(amount - unfilled),
                    ctx.config.asset,
                    format_number(filled_total),
                    ctx.config.fiat,
                    format_number(unfilled),
                    ctx.config.asset,
                )
            } else {
                format!(
                    "⚠️ No reliable {}/{} offers available right now. Please try again later.",
                    ctx.config.asset, ctx.config.fiat
                )
            }
        }
        Err(QuoteError::InvalidRequest(reason)) => {
            return Err(format!("❌ {}", reason));
        }
    };

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
