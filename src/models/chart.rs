//! Chart data models

use chrono::{DateTime, Utc};

/// Chart data point with timestamp and price
#[derive(Debug, Clone)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
