use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use super::models::{CoinDetail, CoinGeckoError, MarketChart, SimplePriceResponse};

/// Well-known ticker aliases so users can type `/coin BTC` instead of the
/// CoinGecko id. Anything not listed is passed through lower-cased.
const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("usdt", "tether"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("xrp", "ripple"),
    ("ada", "cardano"),
    ("doge", "dogecoin"),
    ("ton", "the-open-network"),
    ("dot", "polkadot"),
];

/// Map a user-typed symbol to a CoinGecko coin id.
pub fn resolve_coin_id(symbol_or_id: &str) -> String {
    let lowered = symbol_or_id.to_lowercase();
    SYMBOL_ALIASES
        .iter()
        .find(|(sym, _)| *sym == lowered)
        .map(|(_, id)| id.to_string())
        .unwrap_or(lowered)
}

/// Client for the public CoinGecko v3 API
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CoinGeckoError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CoinGeckoError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                404 => CoinGeckoError::NotFound(path.to_string()),
                429 => CoinGeckoError::RateLimited,
                code => CoinGeckoError::HttpError(code as i32, body_text),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CoinGeckoError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /simple/price
    ///
    /// Returns spot prices for `ids` in each of `vs_currencies`, with a
    /// `last_updated_at` unix timestamp per coin.
    pub async fn simple_price(
        &self,
        ids: &[&str],
        vs_currencies: &[&str],
    ) -> Result<SimplePriceResponse, CoinGeckoError> {
        let query = [
            ("ids", ids.join(",")),
            ("vs_currencies", vs_currencies.join(",")),
            ("include_last_updated_at", "true".to_string()),
        ];
        self.get("/simple/price", &query).await
    }

    /// GET /coins/{id}
    pub async fn coin_info(&self, id: &str) -> Result<CoinDetail, CoinGeckoError> {
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
        ];
        self.get(&format!("/coins/{}", id), &query).await
    }

    /// GET /coins/{id}/market_chart
    pub async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, CoinGeckoError> {
        let query = [
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
        ];
        self.get(&format!("/coins/{}/market_chart", id), &query).await
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_symbols() {
        assert_eq!(resolve_coin_id("BTC"), "bitcoin");
        assert_eq!(resolve_coin_id("ton"), "the-open-network");
    }

    #[test]
    fn passes_through_unknown_ids() {
        assert_eq!(resolve_coin_id("Bitcoin"), "bitcoin");
        assert_eq!(resolve_coin_id("some-obscure-coin"), "some-obscure-coin");
    }
}
