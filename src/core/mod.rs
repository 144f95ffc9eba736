//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod date;
pub mod log;
pub mod query;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::CurrencyCode;
pub use date::DateComponents;
pub use query::{DateSpec, RateQuery, RequestBuilder};
pub use rates::{RangeRates, RateProvider, SingleRates};
