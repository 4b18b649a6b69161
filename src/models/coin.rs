//! Coin info models

/// Market snapshot for a single coin, as displayed by `/coin`.
#[derive(Debug, Clone)]
pub struct CoinInfo {
    pub name: String,
    /// Upper-cased ticker symbol.
    pub symbol: String,
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    /// 24h price change, percent.
    pub change_24h: Option<f64>,
}
