use anyhow::{Context, Result, anyhow, ensure};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::core::{RangeRates, RateProvider, RateQuery, RequestBuilder, SingleRates};

// ExchangeRatesProvider implementation for RateProvider
pub struct ExchangeRatesProvider {
    base_url: String,
    request_builder: RequestBuilder,
}

impl ExchangeRatesProvider {
    pub fn new(base_url: &str, request_builder: RequestBuilder) -> Self {
        ExchangeRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_builder,
        }
    }

    pub fn url_for(&self, query: &RateQuery) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.request_builder.path_and_query(query)
        )
    }

    async fn get_rates<T: DeserializeOwned>(&self, query: &RateQuery) -> Result<T> {
        let url = self.url_for(query);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("fxhist/0.1").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        debug!(response = ?response, "Received exchange rate response");

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        let data: RatesResponse<T> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {url}"))?;
        Ok(data.rates)
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse<T> {
    rates: T,
}

#[async_trait]
impl RateProvider for ExchangeRatesProvider {
    #[instrument(name = "RatesFetchSingle", skip(self), fields(base = %query.base))]
    async fn fetch_single(&self, query: &RateQuery) -> Result<SingleRates> {
        ensure!(!query.is_range(), "Expected a single date query, got a range");
        self.get_rates(query).await
    }

    #[instrument(name = "RatesFetchRange", skip(self), fields(base = %query.base))]
    async fn fetch_range(&self, query: &RateQuery) -> Result<RangeRates> {
        ensure!(query.is_range(), "Expected a date range query, got a single date");
        self.get_rates(query).await
    }
}
