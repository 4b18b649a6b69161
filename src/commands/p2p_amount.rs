use crate::api::binance::TradeType;
use crate::services::p2p_service;
use crate::utils::format::format_number;
use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64, args: &[&str]) -> Result<(), String> {
    if args.len() < 2 {
        return Err(format!(
            "❌ Please provide an amount and currency. Example: `/p2p_amount 5000 {}` or `/p2p_amount 50 {}`",
            ctx.config.fiat, ctx.config.asset
        ));
    }

    let amount: f64 = args[0]
        .parse()
        .map_err(|_| "❌ Invalid amount. Please provide a valid number.".to_string())?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err("❌ Amount must be positive.".to_string());
    }

    let currency = args[1].to_uppercase();

    let _ = ctx.telegram.send_chat_action(chat_id, "typing").await;

    // The search endpoint filters by fiat amount only. An asset amount is
    // first estimated into fiat from the current best rate.
    let fiat_amount = if currency == ctx.config.fiat {
        amount
    } else if currency == ctx.config.asset {
        p2p_service::estimate_fiat_amount(
            &ctx.binance,
            &ctx.config.asset,
            &ctx.config.fiat,
            TradeType::Buy,
            amount,
        )
        .await?
    } else {
        return Err(format!(
            "❌ Unknown currency '{}'. Use {} or {}.",
            currency, ctx.config.fiat, ctx.config.asset
        ));
    };

    let offers = p2p_service::fetch_offers(
        &ctx.binance,
        &ctx.config.asset,
        &ctx.config.fiat,
        TradeType::Buy,
        ctx.config.rows,
        Some(fiat_amount),
    )
    .await?;

    if offers.is_empty() {
        return Err(format!(
            "❌ No P2P offers found for {} {}.",
            format_number(amount),
            currency
        ));
    }

    let message = format!(
        "*Top P2P Rates for {} {}*\n{}",
        format_number(amount),
        currency,
        p2p_service::format_offer_listing(&offers, &ctx.config.fiat)
    );

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
