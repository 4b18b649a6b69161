//! Sell quote models

/// Immutable input to a sell computation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Base-asset quantity the user wants to sell.
    pub amount: f64,
    pub base_asset: String,
    pub quote_currency: String,
}

/// One offer's contribution to a filled quote.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferFill {
    pub merchant: String,
    /// Quote-currency units per base-asset unit for this slice.
    pub price: f64,
    /// Base-asset quantity taken from this offer.
    pub amount_filled: f64,
}

/// Result of a fully filled sell quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResult {
    /// Total quote-currency amount received.
    pub effective_total: f64,
    /// Blended rate: `effective_total / requested amount`.
    pub rate_used: f64,
    /// Contributing offers in fill order.
    pub fills: Vec<OfferFill>,
}
