pub mod client;
pub mod models;

pub use client::BinanceP2pClient;
pub use models::{AdEntry, AdSearchRequest, BinanceError, TradeType};
