pub mod chart;
pub mod coin;
pub mod convert;
pub mod p2p;
pub mod p2p_amount;
pub mod sell;
pub mod start;

use tracing::{debug, info, warn};

use crate::api::binance::TradeType;
use crate::api::telegram::models::{InlineQuery, InlineQueryResultArticle, Message, Update};
use crate::models::ConversionRequest;
use crate::services::{convert_service, p2p_service};
use crate::utils;
use crate::utils::format::{format_amount, format_number};
use crate::BotContext;

pub async fn handle_update(ctx: &BotContext, update: Update) {
    if let Some(message) = update.message {
        handle_message(ctx, message).await;
    } else if let Some(query) = update.inline_query {
        handle_inline_query(ctx, query).await;
    }
}

async fn handle_message(ctx: &BotContext, msg: Message) {
    let Some(text) = msg.text else {
        return;
    };
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return;
    }

    let chat_id = msg.chat.id;
    let user_id = msg.from.as_ref().map(|u| u.id).unwrap_or(chat_id);

    // Parse command and arguments
    let parts: Vec<&str> = text.split_whitespace().collect();
    let Some(&first) = parts.first() else {
        return;
    };
    if !first.starts_with('/') {
        return;
    }

    // Strip the @botname suffix used in group chats
    let command = first.split('@').next().unwrap_or(first);
    let args = &parts[1..];

    // Drop the update entirely when the bot-wide send budget is exhausted;
    // replying would only make it worse.
    if let Err(remaining_ms) = utils::check_global_rate_limit().await {
        warn!(
            "Global rate limit hit, dropping {} ({} ms until window frees)",
            command, remaining_ms
        );
        return;
    }

    if let Err((remaining, should_warn)) = utils::check_cooldown(user_id, command).await {
        if should_warn {
            let _ = ctx
                .telegram
                .send_message(
                    chat_id,
                    &format!(
                        "⏳ Please wait {} seconds before using {} again.",
                        remaining, command
                    ),
                    None,
                )
                .await;
        }
        return;
    }

    info!("Command {} from user {} with args: {:?}", command, user_id, args);

    let result = match command {
        "/start" | "/help" => start::execute(ctx, chat_id).await,
        "/p2p" => p2p::execute(ctx, chat_id, args).await,
        "/p2p_amount" => p2p_amount::execute(ctx, chat_id, args).await,
        "/sell" => sell::execute(ctx, chat_id, args).await,
        "/convert" => convert::execute(ctx, chat_id, args).await,
        "/coin" => coin::execute(ctx, chat_id, args).await,
        "/chart" => chart::execute(ctx, chat_id, args).await,
        _ => return,
    };

    if let Err(e) = result {
        warn!("❌ Error executing command {}: {}", command, e);

        let clean_error = utils::extract_clean_error(&e);

        // Determine error type and create user-friendly message
        let user_message = if e.contains("429") || e.contains("Rate Limited") {
            "⚠️ An upstream service is rate limiting us. Please try again in a moment.".to_string()
        } else if e.contains("Request Error") {
            "⚠️ Network trouble reaching the exchange. Please try again.".to_string()
        } else if clean_error.starts_with('❌') || clean_error.starts_with('⚠') {
            clean_error
        } else if !clean_error.is_empty() {
            format!("❌ {}", clean_error)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        let _ = ctx.telegram.send_message(chat_id, &user_message, None).await;
    }
}

/// Inline queries answer with a conversion when the query parses as
/// `<amount> <from> [to] <to>`, and with the current top P2P rate
/// otherwise.
async fn handle_inline_query(ctx: &BotContext, query: InlineQuery) {
    let results = build_inline_results(ctx, query.query.trim()).await;

    if let Err(e) = ctx.telegram.answer_inline_query(&query.id, results, 30).await {
        warn!("Failed to answer inline query: {}", e);
    }
}

async fn build_inline_results(ctx: &BotContext, text: &str) -> Vec<InlineQueryResultArticle> {
    let words: Vec<&str> = text.split_whitespace().collect();

    let conversion = match words.as_slice() {
        [amount, from, to] => inline_conversion(ctx, amount, from, to).await,
        [amount, from, kw, to] if kw.eq_ignore_ascii_case("to") => {
            inline_conversion(ctx, amount, from, to).await
        }
        _ => None,
    };
    if let Some(article) = conversion {
        return vec![article];
    }

    match p2p_service::fetch_offers(
        &ctx.binance,
        &ctx.config.asset,
        &ctx.config.fiat,
        TradeType::Buy,
        1,
        None,
    )
    .await
    {
        Ok(offers) => match offers.first() {
            Some(best) => {
                let message = format!(
                    "1 {} = {} {} on Binance P2P (top offer by {})",
                    ctx.config.asset,
                    format_number(best.price),
                    ctx.config.fiat,
                    best.merchant
                );
                vec![InlineQueryResultArticle::new(
                    "p2p-top",
                    format!(
                        "Top {}/{} rate: {}",
                        ctx.config.asset,
                        ctx.config.fiat,
                        format_number(best.price)
                    ),
                    message,
                )
                .with_description("Current best Binance P2P offer".to_string())]
            }
            None => Vec::new(),
        },
        Err(e) => {
            warn!("Inline rate lookup failed: {}", e);
            Vec::new()
        }
    }
}

async fn inline_conversion(
    ctx: &BotContext,
    amount: &str,
    from: &str,
    to: &str,
) -> Option<InlineQueryResultArticle> {
    let amount: f64 = amount.parse().ok()?;
    let request = ConversionRequest {
        amount,
        from_asset: from.to_string(),
        to_asset: to.to_string(),
    };

    match convert_service::convert(&request, &ctx.coingecko).await {
        Ok(result) => {
            let message = format!(
                "{} {} = {} {}",
                format_amount(amount),
                from.to_uppercase(),
                format_amount(result.converted_amount),
                to.to_uppercase()
            );
            Some(
                InlineQueryResultArticle::new("convert", message.clone(), message)
                    .with_description(format!("Rate: {}", format_amount(result.rate_used))),
            )
        }
        Err(e) => {
            debug!("Inline conversion failed: {}", e);
            None
        }
    }
}
