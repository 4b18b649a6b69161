use crate::services::coin_service;
use crate::utils::format::{format_amount, format_number};
use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64, args: &[&str]) -> Result<(), String> {
    let Some(&symbol) = args.first() else {
        return Err("❌ Please provide a coin symbol. Example: `/coin BTC`".to_string());
    };

    let _ = ctx.telegram.send_chat_action(chat_id, "typing").await;

    let info = coin_service::get_coin_info(&ctx.coingecko, symbol).await?;

    let price = info
        .price_usd
        .map(|p| format!("${}", format_amount(p)))
        .unwrap_or_else(|| "N/A".to_string());
    let market_cap = info
        .market_cap_usd
        .map(|m| format!("${}", format_number(m)))
        .unwrap_or_else(|| "N/A".to_string());
    let change = info
        .change_24h
        .map(|c| format!("{:+.2}%", c))
        .unwrap_or_else(|| "N/A".to_string());

    let message = format!(
        "*{} ({})*\n\
         `Current Price:` {}\n\
         `Market Cap:` {}\n\
         `24h Change:` {}\n\
         _Data provided by CoinGecko._",
        info.name, info.symbol, price, market_cap, change,
    );

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
