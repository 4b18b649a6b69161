//! Data models for birrbot commands and services
//!
//! This module organizes the value objects passed between the API layer,
//! the quote/conversion services and the command handlers. All of them are
//! transient: built per request, never persisted.

pub mod chart;
pub mod coin;
pub mod convert;
pub mod offer;
pub mod quote;

// Re-export commonly used types for convenience
pub use chart::PricePoint;
pub use coin::CoinInfo;
pub use convert::{ConversionRequest, ConversionResult, SpotRate};
pub use offer::{MerchantReliability, Offer};
pub use quote::{OfferFill, QuoteRequest, QuoteResult};
