use tracing::info;

use crate::services::chart_service;
use crate::BotContext;

const CHART_WIDTH: u32 = 1024;
const CHART_HEIGHT: u32 = 768;

pub async fn execute(ctx: &BotContext, chat_id: i64, args: &[&str]) -> Result<(), String> {
    let Some(&symbol) = args.first() else {
        return Err("❌ Usage: `/chart <coin_symbol> [days]`. Example: `/chart BTC 30`".to_string());
    };

    let days = chart_service::parse_chart_days(args.get(1).copied())?;

    let _ = ctx.telegram.send_chat_action(chat_id, "upload_photo").await;

    info!("Generating {}d chart for {}", days, symbol);
    let png_data = chart_service::generate_chart(
        &ctx.coingecko,
        symbol,
        "usd",
        days,
        CHART_WIDTH,
        CHART_HEIGHT,
    )
    .await?;

    if png_data.is_empty() {
        return Err("❌ Chart generation failed: produced empty image data".to_string());
    }
    info!("Chart generated: {} bytes", png_data.len());

    let filename = format!("chart_{}_{}d.png", symbol.to_lowercase(), days);
    let caption = format!("{} price, last {} days (CoinGecko)", symbol.to_uppercase(), days);

    ctx.telegram
        .send_photo(chat_id, png_data, filename, Some(caption))
        .await
        .map_err(|e| format!("Failed to send chart: {}", e))?;

    Ok(())
}
