//! Currency conversion models

use chrono::{DateTime, Utc};

/// Immutable input to a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_asset: String,
    pub to_asset: String,
}

/// A spot rate as returned by a rate source, `to`-units per one `from`-unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotRate {
    pub rate: f64,
    pub as_of: DateTime<Utc>,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub rate_used: f64,
    /// Freshness of the rate(s) behind this result. For composed rates this
    /// is the older of the two legs.
    pub as_of: DateTime<Utc>,
}
