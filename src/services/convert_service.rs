//! Currency conversion over an injected spot-rate source
//!
//! The converter itself is a pure computation: same asset is identity, a
//! direct rate is used when the source has one, otherwise the rate is
//! composed through one hop over the reference asset. Freshness is the
//! rate source's problem; nothing is cached here.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use thiserror::Error;
use tracing::debug;

use crate::api::coingecko::{resolve_coin_id, CoinGeckoClient, CoinGeckoError};
use crate::models::{ConversionRequest, ConversionResult, SpotRate};

/// Common reference asset for composed rates. The upstream price source
/// quotes every listed coin against it.
pub const REFERENCE_ASSET: &str = "usdt";

/// Typed failures of a conversion, all non-fatal.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("No rate available for {from}/{to}")]
    RateUnavailable { from: String, to: String },
    /// The price source itself failed (network, 5xx). Distinct from
    /// `RateUnavailable` so callers can word the reply differently.
    #[error("Price source error: {0}")]
    Upstream(String),
}

/// Capability to look up a spot rate for a currency pair.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Spot rate quoted as `to`-units per one `from`-unit.
    ///
    /// # Errors
    ///
    /// `ConvertError::RateUnavailable` when the pair is not quoted,
    /// `ConvertError::Upstream` on transport failures.
    async fn spot_rate(&self, from: &str, to: &str) -> Result<SpotRate, ConvertError>;
}

/// Convert an amount between two assets using `source` for rates.
///
/// # Errors
///
/// - `ConvertError::InvalidRequest` if the amount is not a positive finite
///   number
/// - `ConvertError::RateUnavailable` if neither a direct rate nor a
///   one-hop path through [`REFERENCE_ASSET`] exists
pub async fn convert(
    request: &ConversionRequest,
    source: &dyn RateSource,
) -> Result<ConversionResult, ConvertError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ConvertError::InvalidRequest(
            "amount must be positive".to_string(),
        ));
    }

    let from = request.from_asset.to_lowercase();
    let to = request.to_asset.to_lowercase();

    if from == to {
        return Ok(ConversionResult {
            converted_amount: request.amount,
            rate_used: 1.0,
            as_of: Utc::now(),
        });
    }

    match source.spot_rate(&from, &to).await {
        Ok(spot) => Ok(ConversionResult {
            converted_amount: request.amount * spot.rate,
            rate_used: spot.rate,
            as_of: spot.as_of,
        }),
        Err(ConvertError::RateUnavailable { .. }) => {
            debug!("No direct {}/{} rate, composing via {}", from, to, REFERENCE_ASSET);
            convert_via_reference(request, source, &from, &to).await
        }
        Err(e) => Err(e),
    }
}

/// One-hop fallback: `rate = rate(from -> ref) / rate(to -> ref)`.
async fn convert_via_reference(
    request: &ConversionRequest,
    source: &dyn RateSource,
    from: &str,
    to: &str,
) -> Result<ConversionResult, ConvertError> {
    let pair_unavailable = || ConvertError::RateUnavailable {
        from: from.to_string(),
        to: to.to_string(),
    };

    let from_ref = source
        .spot_rate(from, REFERENCE_ASSET)
        .await
        .map_err(|e| match e {
            ConvertError::RateUnavailable { .. } => pair_unavailable(),
            other => other,
        })?;
    let to_ref = source
        .spot_rate(to, REFERENCE_ASSET)
        .await
        .map_err(|e| match e {
            ConvertError::RateUnavailable { .. } => pair_unavailable(),
            other => other,
        })?;

    if to_ref.rate <= 0.0 {
        return Err(pair_unavailable());
    }

    let rate = from_ref.rate / to_ref.rate;
    Ok(ConversionResult {
        converted_amount: request.amount * rate,
        rate_used: rate,
        // The composed rate is only as fresh as its older leg.
        as_of: from_ref.as_of.min(to_ref.as_of),
    })
}

#[async_trait]
impl RateSource for CoinGeckoClient {
    async fn spot_rate(&self, from: &str, to: &str) -> Result<SpotRate, ConvertError> {
        let from_id = resolve_coin_id(from);
        let vs = to.to_lowercase();

        let prices = self
            .simple_price(&[from_id.as_str()], &[vs.as_str()])
            .await
            .map_err(|e| match e {
                CoinGeckoError::NotFound(_) => ConvertError::RateUnavailable {
                    from: from.to_string(),
                    to: to.to_string(),
                },
                other => ConvertError::Upstream(other.to_string()),
            })?;

        let quotes = prices.get(&from_id).ok_or_else(|| ConvertError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        let rate = *quotes.get(&vs).ok_or_else(|| ConvertError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        let as_of = quotes
            .get("last_updated_at")
            .and_then(|ts| Utc.timestamp_opt(*ts as i64, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(SpotRate { rate, as_of })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticRates {
        rates: HashMap<(String, String), f64>,
    }

    impl StaticRates {
        fn new(entries: &[(&str, &str, f64)]) -> Self {
            let rates = entries
                .iter()
                .map(|(f, t, r)| ((f.to_string(), t.to_string()), *r))
                .collect();
            Self { rates }
        }
    }

    #[async_trait]
    impl RateSource for StaticRates {
        async fn spot_rate(&self, from: &str, to: &str) -> Result<SpotRate, ConvertError> {
            self.rates
                .get(&(from.to_string(), to.to_string()))
                .map(|&rate| SpotRate {
                    rate,
                    as_of: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
                })
                .ok_or_else(|| ConvertError::RateUnavailable {
                    from: from.to_string(),
                    to: to.to_string(),
                })
        }
    }

    fn request(amount: f64, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest {
            amount,
            from_asset: from.to_string(),
            to_asset: to.to_string(),
        }
    }

    #[tokio::test]
    async fn same_asset_is_identity() {
        let source = StaticRates::new(&[]);

        let result = convert(&request(42.5, "BTC", "btc"), &source).await.unwrap();

        assert_eq!(result.converted_amount, 42.5);
        assert_eq!(result.rate_used, 1.0);
    }

    #[tokio::test]
    async fn direct_rate_is_applied() {
        let source = StaticRates::new(&[("usdt", "etb", 145.0)]);

        let result = convert(&request(50.0, "USDT", "ETB"), &source).await.unwrap();

        assert!((result.converted_amount - 7250.0).abs() < 1e-9);
        assert_eq!(result.rate_used, 145.0);
    }

    #[tokio::test]
    async fn falls_back_to_reference_hop() {
        // No direct btc/eth, both quoted against usdt.
        let source = StaticRates::new(&[("btc", "usdt", 60_000.0), ("eth", "usdt", 3_000.0)]);

        let result = convert(&request(2.0, "BTC", "ETH"), &source).await.unwrap();

        assert!((result.rate_used - 20.0).abs() < 1e-9);
        assert!((result.converted_amount - 40.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn composed_path_matches_direct_path() {
        // Consistent rates: direct btc/eth equals the usdt composition.
        let direct = StaticRates::new(&[("btc", "eth", 20.0)]);
        let composed = StaticRates::new(&[("btc", "usdt", 60_000.0), ("eth", "usdt", 3_000.0)]);

        let a = convert(&request(1.5, "btc", "eth"), &direct).await.unwrap();
        let b = convert(&request(1.5, "btc", "eth"), &composed).await.unwrap();

        assert!((a.converted_amount - b.converted_amount).abs() < 1e-9);
    }

    #[tokio::test]
    async fn non_positive_amount_is_invalid_request() {
        let source = StaticRates::new(&[("usdt", "etb", 145.0)]);

        for bad in [0.0, -1.0] {
            let result = convert(&request(bad, "USDT", "ETB"), &source).await;
            assert!(matches!(result, Err(ConvertError::InvalidRequest(_))));
        }
    }

    #[tokio::test]
    async fn unresolvable_pair_is_rate_unavailable() {
        let source = StaticRates::new(&[("btc", "usdt", 60_000.0)]);

        let result = convert(&request(1.0, "btc", "xyz"), &source).await;

        match result {
            Err(ConvertError::RateUnavailable { from, to }) => {
                assert_eq!(from, "btc");
                assert_eq!(to, "xyz");
            }
            other => panic!("expected RateUnavailable, got {:?}", other),
        }
    }
}
