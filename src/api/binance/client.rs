use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{AdEntry, AdSearchRequest, AdSearchResponse, BinanceError};

/// Client for the public Binance P2P advertisement search endpoint
pub struct BinanceP2pClient {
    http_client: HttpClient,
    base_url: String,
}

impl BinanceP2pClient {
    const DEFAULT_BASE_URL: &'static str = "https://p2p.binance.com";
    const SEARCH_PATH: &'static str = "/bapi/c2c/v2/friendly/c2c/adv/search";
    // The endpoint rejects requests without a browser-looking user agent
    const BROWSER_USER_AGENT: &'static str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

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

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::BROWSER_USER_AGENT));
        headers
    }

    /// POST the advertisement search and return the matching ads.
    ///
    /// An empty list is a valid result (no offers for the filters), not an
    /// error.
    pub async fn search_ads(&self, request: &AdSearchRequest) -> Result<Vec<AdEntry>, BinanceError> {
        let url = format!("{}{}", self.base_url, Self::SEARCH_PATH);

        let response = self
            .http_client
            .post(&url)
            .headers(Self::create_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| BinanceError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_text = response.text().await.unwrap_or_default();
            warn!("P2P search returned {}: {}", status, body_text);
            return Err(BinanceError::HttpError(status as i32, body_text));
        }

        let parsed = response
            .json::<AdSearchResponse>()
            .await
            .map_err(|e| BinanceError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if parsed.success == Some(false) {
            return Err(BinanceError::Api(
                parsed.message.unwrap_or_else(|| "search rejected".to_string()),
            ));
        }

        Ok(parsed.data.unwrap_or_default())
    }
}

impl Default for BinanceP2pClient {
    fn default() -> Self {
        Self::new()
    }
}
