use serde::Deserialize;
use std::collections::HashMap;

/// Response of `GET /coins/{id}`, reduced to the fields the bot displays
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetail {
    pub name: String,
    pub symbol: String,
    pub market_data: Option<MarketData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
}

/// Response of `GET /coins/{id}/market_chart`
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    /// `[timestamp_ms, price]` pairs
    pub prices: Vec<(f64, f64)>,
}

/// `GET /simple/price` returns a map of coin id to a map of
/// vs-currency (plus `last_updated_at`) to value.
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Comprehensive error type for CoinGecko operations
#[derive(Debug, Clone)]
pub enum CoinGeckoError {
    /// 404, unknown coin id
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited,
    /// Other non-2xx HTTP responses
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for CoinGeckoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinGeckoError::NotFound(id) => write!(f, "Not Found: {}", id),
            CoinGeckoError::RateLimited => write!(f, "Rate Limited"),
            CoinGeckoError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            CoinGeckoError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            CoinGeckoError::DeserializationError(msg) => {
                write!(f, "Deserialization Error: {}", msg)
            }
        }
    }
}
