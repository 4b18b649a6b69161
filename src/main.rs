use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod models;
mod services;
mod utils;

use api::binance::BinanceP2pClient;
use api::coingecko::CoinGeckoClient;
use api::telegram::{TelegramClient, TelegramError};
use services::quote_service::CompletionRatePolicy;

/// Immutable runtime configuration, read from the environment at startup.
pub struct BotConfig {
    /// Base asset of the P2P pair
    pub asset: String,
    /// Fiat side of the P2P pair
    pub fiat: String,
    /// How many offers to fetch per search
    pub rows: u32,
    /// Thresholds for the sell-quote reliability filter
    pub reliability: CompletionRatePolicy,
}

impl BotConfig {
    fn from_env() -> Self {
        let defaults = CompletionRatePolicy::default();

        Self {
            asset: std::env::var("P2P_ASSET").unwrap_or_else(|_| "USDT".to_string()),
            fiat: std::env::var("P2P_FIAT").unwrap_or_else(|_| "ETB".to_string()),
            rows: env_parsed("P2P_ROWS", 10),
            reliability: CompletionRatePolicy {
                min_completion_rate: env_parsed(
                    "MIN_COMPLETION_RATE",
                    defaults.min_completion_rate,
                ),
                min_month_orders: env_parsed("MIN_MONTH_ORDERS", defaults.min_month_orders),
            },
        }
    }
}

fn env_parsed<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}='{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Shared handles every command handler works with.
pub struct BotContext {
    pub telegram: TelegramClient,
    pub binance: BinanceP2pClient,
    pub coingecko: CoinGeckoClient,
    pub config: BotConfig,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("birrbot=debug".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("🤖 Starting birrbot...");
    info!("  ____  _____ ____  ____  ____   ___ _____ ");
    info!(" | __ )|_   _|  _ \\|  _ \\| __ ) / _ \\_   _|");
    info!(" |  _ \\  | | | |_) | |_) |  _ \\| | | || |  ");
    info!(" | |_) | | | |  _ <|  _ <| |_) | |_| || |  ");
    info!(" |____/ |___||_| \\_\\_| \\_\\____/ \\___/ |_|  ");
    info!("  birrbot - Binance P2P rates on Telegram");
    info!("");

    let token = match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(t) => t,
        Err(_) => {
            error!("TELEGRAM_BOT_TOKEN environment variable is not set. The bot cannot start.");
            return;
        }
    };

    let config = BotConfig::from_env();
    info!(
        "Configured pair {}/{}, {} rows, reliability floor {:.0}% / {} orders",
        config.asset,
        config.fiat,
        config.rows,
        config.reliability.min_completion_rate * 100.0,
        config.reliability.min_month_orders
    );

    let ctx = Arc::new(BotContext {
        telegram: TelegramClient::new(&token),
        binance: BinanceP2pClient::new(),
        coingecko: CoinGeckoClient::new(),
        config,
    });

    info!("Bot started and listening for updates...");

    // Long polling loop: each update is handled on its own task so a slow
    // chart render does not block the poll.
    let mut offset: Option<i64> = None;
    loop {
        match ctx.telegram.get_updates(offset, 30).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);

                    let ctx = Arc::clone(&ctx);
                    tokio::spawn(async move {
                        commands::handle_update(&ctx, update).await;
                    });
                }
            }
            Err(TelegramError::RateLimited { retry_after }) => {
                warn!("getUpdates rate limited, sleeping {} s", retry_after);
                tokio::time::sleep(Duration::from_secs(retry_after.max(1) as u64)).await;
            }
            Err(e) => {
                warn!("getUpdates failed: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}
