//! Exchange rate provider abstractions

use super::query::RateQuery;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Currency code to rate, for one date.
pub type SingleRates = BTreeMap<String, f64>;

/// Date to (currency code to rate), for every date in a range.
pub type RangeRates = BTreeMap<String, BTreeMap<String, f64>>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rates for the single date in `query`.
    async fn fetch_single(&self, query: &RateQuery) -> Result<SingleRates>;

    /// Rates for every date between the two dates in `query`.
    async fn fetch_range(&self, query: &RateQuery) -> Result<RangeRates>;
}
