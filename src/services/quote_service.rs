//! Offer selection and sell quote calculation
//!
//! Given a sell amount and the current P2P offers for a pair, compute the
//! best achievable total while skipping offers an injected reliability
//! policy considers unfillable. Both the filter and the fill walk are pure
//! functions of their inputs.

use thiserror::Error;
use tracing::debug;

use crate::models::{Offer, OfferFill, QuoteRequest, QuoteResult};

/// Remainders below this are rounding noise, not missing liquidity.
const AMOUNT_EPSILON: f64 = 1e-9;

/// Typed failures of the quote calculation, all non-fatal.
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The reliable offers could not absorb the full amount. Carries the
    /// partial fill so callers can present it or tell the user to reduce
    /// the amount.
    #[error("Insufficient liquidity: {unfilled} of the requested amount unfilled")]
    InsufficientLiquidity {
        filled_total: f64,
        unfilled: f64,
        fills: Vec<OfferFill>,
    },
}

/// Decides whether an offer is trustworthy enough to quote against.
///
/// Injected into the selector so the policy can evolve without touching the
/// fill algorithm. The policy should be conservative: a borderline offer is
/// better excluded than quoted and stuck on a frozen merchant.
pub trait ReliabilityPolicy {
    fn is_reliable(&self, offer: &Offer) -> bool;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Excludes offers whose merchant signals fall below configured floors.
///
/// Thresholds come from configuration; defaults are a 95% month completion
/// rate and 20 orders in the last month.
#[derive(Debug, Clone)]
pub struct CompletionRatePolicy {
    pub min_completion_rate: f64,
    pub min_month_orders: i64,
}

impl Default for CompletionRatePolicy {
    fn default() -> Self {
        Self {
            min_completion_rate: 0.95,
            min_month_orders: 20,
        }
    }
}

impl ReliabilityPolicy for CompletionRatePolicy {
    fn is_reliable(&self, offer: &Offer) -> bool {
        offer.reliability.completion_rate >= self.min_completion_rate
            && offer.reliability.month_orders >= self.min_month_orders
    }

    fn name(&self) -> &'static str {
        "CompletionRate"
    }
}

/// Like [`CompletionRatePolicy`] but additionally requires the advertiser
/// to be a verified merchant.
#[derive(Debug, Clone, Default)]
pub struct ProMerchantPolicy {
    pub base: CompletionRatePolicy,
}

impl ReliabilityPolicy for ProMerchantPolicy {
    fn is_reliable(&self, offer: &Offer) -> bool {
        offer.reliability.pro_merchant && self.base.is_reliable(offer)
    }

    fn name(&self) -> &'static str {
        "ProMerchant"
    }
}

/// Compute a sell quote by cascading through `offers` best-price-first.
///
/// `offers` are expected sorted by price descending (best rate for the
/// seller first), which is how the upstream search returns them. Each
/// reliable offer is filled up to `min(available_amount, remaining,
/// max_limit / price)`; offers whose minimum transaction exceeds what we
/// would take from them are skipped.
///
/// # Errors
///
/// - `QuoteError::InvalidRequest` if the requested amount is not a positive
///   finite number
/// - `QuoteError::InsufficientLiquidity` if the reliable offers are
///   exhausted before the amount is filled, carrying the partial total
pub fn compute_sell_quote(
    request: &QuoteRequest,
    offers: &[Offer],
    policy: &dyn ReliabilityPolicy,
) -> Result<QuoteResult, QuoteError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(QuoteError::InvalidRequest(
            "sell amount must be positive".to_string(),
        ));
    }

    let mut remaining = request.amount;
    let mut effective_total = 0.0;
    let mut fills: Vec<OfferFill> = Vec::new();

    for offer in offers {
        if remaining <= AMOUNT_EPSILON {
            break;
        }

        if !policy.is_reliable(offer) {
            debug!(
                "Skipping offer from {} at {} ({} policy)",
                offer.merchant,
                offer.price,
                policy.name()
            );
            continue;
        }

        if offer.price <= 0.0 || offer.available_amount <= 0.0 {
            continue;
        }

        // An offer cannot fill past its own per-transaction ceiling.
        let limit_cap = offer.max_limit / offer.price;
        let fill = offer.available_amount.min(remaining).min(limit_cap);

        // Too small a slice to clear the offer's minimum transaction.
        if fill <= 0.0 || fill * offer.price < offer.min_limit {
            continue;
        }

        effective_total += fill * offer.price;
        remaining -= fill;
        fills.push(OfferFill {
            merchant: offer.merchant.clone(),
            price: offer.price,
            amount_filled: fill,
        });
    }

    if remaining > AMOUNT_EPSILON {
        return Err(QuoteError::InsufficientLiquidity {
            filled_total: effective_total,
            unfilled: remaining,
            fills,
        });
    }

    Ok(QuoteResult {
        effective_total,
        rate_used: effective_total / request.amount,
        fills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MerchantReliability;

    fn make_offer(merchant: &str, price: f64, available: f64, reliable: bool) -> Offer {
        Offer {
            merchant: merchant.to_string(),
            price,
            available_amount: available,
            min_limit: 0.0,
            max_limit: f64::MAX,
            reliability: MerchantReliability {
                completion_rate: if reliable { 0.99 } else { 0.50 },
                month_orders: if reliable { 300 } else { 3 },
                pro_merchant: reliable,
            },
        }
    }

    fn request(amount: f64) -> QuoteRequest {
        QuoteRequest {
            amount,
            base_asset: "USDT".to_string(),
            quote_currency: "ETB".to_string(),
        }
    }

    #[test]
    fn skips_unreliable_offer_and_blends_rate() {
        let offers = vec![
            make_offer("a", 145.0, 100.0, true),
            make_offer("b", 144.0, 50.0, false),
            make_offer("c", 143.0, 200.0, true),
        ];

        let result =
            compute_sell_quote(&request(120.0), &offers, &CompletionRatePolicy::default()).unwrap();

        // 100 @ 145 + 20 @ 143
        assert_eq!(result.fills.len(), 2);
        assert_eq!(result.fills[0].merchant, "a");
        assert_eq!(result.fills[1].merchant, "c");
        assert!((result.effective_total - 17260.0).abs() < 1e-6);
        assert!((result.rate_used - 17260.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn blended_rate_is_bounded_by_consumed_prices() {
        let offers = vec![
            make_offer("a", 146.5, 40.0, true),
            make_offer("b", 145.0, 40.0, true),
            make_offer("c", 143.2, 40.0, true),
        ];

        let result =
            compute_sell_quote(&request(100.0), &offers, &CompletionRatePolicy::default()).unwrap();

        assert!(result.effective_total > 0.0);
        assert!(result.rate_used <= 146.5);
        assert!(result.rate_used >= 143.2);
    }

    #[test]
    fn empty_offer_list_is_insufficient_liquidity() {
        let result = compute_sell_quote(&request(10.0), &[], &CompletionRatePolicy::default());

        match result {
            Err(QuoteError::InsufficientLiquidity {
                filled_total,
                unfilled,
                fills,
            }) => {
                assert_eq!(filled_total, 0.0);
                assert_eq!(unfilled, 10.0);
                assert!(fills.is_empty());
            }
            other => panic!("expected InsufficientLiquidity, got {:?}", other),
        }
    }

    #[test]
    fn all_offers_filtered_out_is_insufficient_liquidity() {
        let offers = vec![
            make_offer("a", 145.0, 100.0, false),
            make_offer("b", 144.0, 100.0, false),
        ];

        let result = compute_sell_quote(&request(50.0), &offers, &CompletionRatePolicy::default());

        assert!(matches!(
            result,
            Err(QuoteError::InsufficientLiquidity { filled_total, .. }) if filled_total == 0.0
        ));
    }

    #[test]
    fn partial_fill_carries_progress() {
        let offers = vec![make_offer("a", 145.0, 30.0, true)];

        let result = compute_sell_quote(&request(100.0), &offers, &CompletionRatePolicy::default());

        match result {
            Err(QuoteError::InsufficientLiquidity {
                filled_total,
                unfilled,
                fills,
            }) => {
                assert!((filled_total - 30.0 * 145.0).abs() < 1e-6);
                assert!((unfilled - 70.0).abs() < 1e-9);
                assert_eq!(fills.len(), 1);
            }
            other => panic!("expected InsufficientLiquidity, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_amount_is_invalid_request() {
        let offers = vec![make_offer("a", 145.0, 100.0, true)];

        for bad in [0.0, -5.0, f64::NAN] {
            let result = compute_sell_quote(&request(bad), &offers, &CompletionRatePolicy::default());
            assert!(matches!(result, Err(QuoteError::InvalidRequest(_))));
        }
    }

    #[test]
    fn max_limit_caps_a_single_offer() {
        let mut capped = make_offer("a", 100.0, 1000.0, true);
        capped.max_limit = 5000.0; // at price 100 this caps the fill at 50
        let offers = vec![capped, make_offer("b", 99.0, 1000.0, true)];

        let result =
            compute_sell_quote(&request(80.0), &offers, &CompletionRatePolicy::default()).unwrap();

        assert_eq!(result.fills.len(), 2);
        assert!((result.fills[0].amount_filled - 50.0).abs() < 1e-9);
        assert!((result.fills[1].amount_filled - 30.0).abs() < 1e-9);
    }

    #[test]
    fn min_limit_skips_dust_slices() {
        // Offer b's minimum transaction is larger than the 10 units left.
        let mut strict = make_offer("b", 144.0, 500.0, true);
        strict.min_limit = 5000.0;
        let offers = vec![
            make_offer("a", 145.0, 90.0, true),
            strict,
            make_offer("c", 143.0, 500.0, true),
        ];

        let result =
            compute_sell_quote(&request(100.0), &offers, &CompletionRatePolicy::default()).unwrap();

        assert_eq!(result.fills.len(), 2);
        assert_eq!(result.fills[1].merchant, "c");
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let offers = vec![
            make_offer("a", 145.0, 100.0, true),
            make_offer("b", 143.0, 200.0, true),
        ];
        let req = request(150.0);
        let policy = CompletionRatePolicy::default();

        let first = compute_sell_quote(&req, &offers, &policy).unwrap();
        let second = compute_sell_quote(&req, &offers, &policy).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn pro_merchant_policy_is_stricter() {
        let mut offer = make_offer("a", 145.0, 100.0, true);
        offer.reliability.pro_merchant = false;

        assert!(CompletionRatePolicy::default().is_reliable(&offer));
        assert!(!ProMerchantPolicy::default().is_reliable(&offer));
    }
}
