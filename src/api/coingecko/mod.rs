pub mod client;
pub mod models;

pub use client::{resolve_coin_id, CoinGeckoClient};
pub use models::{CoinDetail, CoinGeckoError, MarketChart};
