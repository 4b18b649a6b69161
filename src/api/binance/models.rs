use serde::{Deserialize, Serialize};

/// Which side of the book the search targets, from the taker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    /// Taker buys the asset (ads from selling merchants)
    Buy,
    /// Taker sells the asset (ads from buying merchants)
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

/// Request body for the P2P advertisement search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSearchRequest {
    pub pro_merchant_ads: bool,
    pub page: u32,
    pub rows: u32,
    pub pay_types: Vec<String>,
    pub asset: String,
    pub fiat: String,
    pub trade_type: String,
    /// Fiat amount to filter transactable ads; serialized as `null` when absent
    pub amount: Option<f64>,
}

impl AdSearchRequest {
    pub fn new(asset: &str, fiat: &str, trade_type: TradeType, rows: u32, amount: Option<f64>) -> Self {
        Self {
            pro_merchant_ads: false,
            page: 1,
            rows,
            pay_types: Vec::new(),
            asset: asset.to_string(),
            fiat: fiat.to_string(),
            trade_type: trade_type.as_str().to_string(),
            amount,
        }
    }
}

/// Response envelope of the search endpoint
#[derive(Debug, Deserialize)]
pub struct AdSearchResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub data: Option<Vec<AdEntry>>,
    pub total: Option<i64>,
    pub success: Option<bool>,
}

/// One advertisement: the ad itself plus its advertiser profile
#[derive(Debug, Clone, Deserialize)]
pub struct AdEntry {
    pub adv: Adv,
    pub advertiser: Advertiser,
}

/// Advertisement terms. Numeric fields arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adv {
    pub price: String,
    /// Remaining tradable asset quantity
    pub surplus_amount: String,
    /// Per-transaction bounds in fiat
    pub min_single_trans_amount: String,
    pub max_single_trans_amount: String,
    pub asset: Option<String>,
    pub fiat_unit: Option<String>,
}

/// Advertiser profile and trust signals
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertiser {
    pub nick_name: String,
    pub month_order_count: i64,
    /// Completed-order ratio over the last 30 days, 0.0..=1.0
    pub month_finish_rate: f64,
    /// "merchant" for verified merchants, "user" otherwise
    pub user_type: Option<String>,
}

/// Comprehensive error type for P2P search operations
#[derive(Debug, Clone)]
pub enum BinanceError {
    /// Non-2xx HTTP response
    HttpError(i32, String),
    /// 2xx response with `success: false`
    Api(String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for BinanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinanceError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            BinanceError::Api(msg) => write!(f, "API Error: {}", msg),
            BinanceError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            BinanceError::DeserializationError(msg) => {
                write!(f, "Deserialization Error: {}", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let body = r#"{
            "code": "000000",
            "message": null,
            "data": [
                {
                    "adv": {
                        "price": "145.50",
                        "surplusAmount": "812.34",
                        "minSingleTransAmount": "1000.00",
                        "maxSingleTransAmount": "50000.00",
                        "asset": "USDT",
                        "fiatUnit": "ETB"
                    },
                    "advertiser": {
                        "nickName": "AddisTrader",
                        "monthOrderCount": 412,
                        "monthFinishRate": 0.987,
                        "userType": "merchant"
                    }
                }
            ],
            "total": 1,
            "success": true
        }"#;

        let parsed: AdSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.success, Some(true));
        let ads = parsed.data.unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].adv.price, "145.50");
        assert_eq!(ads[0].advertiser.nick_name, "AddisTrader");
        assert_eq!(ads[0].advertiser.month_order_count, 412);
    }

    #[test]
    fn request_serializes_null_amount() {
        let req = AdSearchRequest::new("USDT", "ETB", TradeType::Buy, 10, None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["tradeType"], "BUY");
        assert!(json["amount"].is_null());
        assert_eq!(json["rows"], 10);
    }
}
