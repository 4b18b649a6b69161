use crate::api::binance::TradeType;
use crate::services::p2p_service;
use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64, _args: &[&str]) -> Result<(), String> {
    let _ = ctx.telegram.send_chat_action(chat_id, "typing").await;

    let offers = p2p_service::fetch_offers(
        &ctx.binance,
        &ctx.config.asset,
        &ctx.config.fiat,
        TradeType::Buy,
        ctx.config.rows,
        None,
    )
    .await?;

    if offers.is_empty() {
        return Err(format!(
            "❌ No P2P offers found for {}/{} right now. Please try again later.",
            ctx.config.asset, ctx.config.fiat
        ));
    }

    let message = format!(
        "*Current Top P2P Rates (Buy {})*\n{}",
        ctx.config.asset,
        p2p_service::format_offer_listing(&offers, &ctx.config.fiat)
    );

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
