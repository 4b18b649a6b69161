//! P2P advertisement models

/// A single P2P advertisement as seen by the selector.
///
/// Invariants (enforced when mapping from the wire format):
/// `price > 0`, `available_amount > 0`, `min_limit <= max_limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Display name of the merchant behind the ad.
    pub merchant: String,
    /// Quote-currency units per unit of base asset.
    pub price: f64,
    /// Maximum base-asset quantity this offer can fill.
    pub available_amount: f64,
    /// Lower bound of a single transaction, in quote currency.
    pub min_limit: f64,
    /// Upper bound of a single transaction, in quote currency.
    pub max_limit: f64,
    /// Trust signals consumed by the reliability policy.
    pub reliability: MerchantReliability,
}

/// Merchant trust signals.
///
/// The selector never interprets these directly; a reliability policy
/// decides what counts as trustworthy.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantReliability {
    /// Completed-order ratio over the last 30 days, 0.0..=1.0.
    pub completion_rate: f64,
    /// Number of orders over the last 30 days.
    pub month_orders: i64,
    /// Whether the exchange classifies the advertiser as a verified merchant.
    pub pro_merchant: bool,
}
