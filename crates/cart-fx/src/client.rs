//! # Live Rate Client
//!
//! `RateSource` implementation backed by a CurrencyLayer-style live-rate
//! API. One GET per conversion; identity conversions never touch the
//! network.

use crate::config::FxConfig;
use async_trait::async_trait;
use cart_core::{CheckoutError, CheckoutResult, CurrencyCode, RateSource};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

/// Client for the live exchange-rate provider
pub struct RateClient {
    config: FxConfig,
    client: Client,
}

impl RateClient {
    /// Create a new rate client
    pub fn new(config: FxConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = FxConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Fetch the live multiplicative rate for a currency pair.
    async fn fetch_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> CheckoutResult<f64> {
        let url = format!("{}/live", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_key", self.config.access_key.as_str()),
                ("source", from.as_str()),
                ("currencies", to.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CheckoutError::RateProviderError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::RateProviderError(e.to_string()))?;

        if !status.is_success() {
            error!("Rate provider HTTP error: status={}, body={}", status, body);
            return Err(CheckoutError::RateProviderError(format!(
                "HTTP {}",
                status
            )));
        }

        let quotes: LiveQuotesResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::RateProviderError(format!("unparsable rate response: {}", e))
        })?;

        let pair = from.pair_key(to);

        if !quotes.success {
            error!("Rate provider reported failure for {}: {}", pair, body);
            return Err(CheckoutError::RateUnavailable { pair });
        }

        quotes
            .quotes
            .get(&pair)
            .copied()
            .ok_or(CheckoutError::RateUnavailable { pair })
    }
}

#[async_trait]
impl RateSource for RateClient {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn convert(
        &self,
        amount_minor: i64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> CheckoutResult<i64> {
        if from == to {
            debug!("identity conversion, skipping rate lookup");
            return Ok(amount_minor);
        }

        let rate = self.fetch_rate(from, to).await?;
        let converted = (amount_minor as f64 * rate).round() as i64;

        debug!(amount_minor, rate, converted, "converted amount");
        Ok(converted)
    }
}

/// CurrencyLayer `live` endpoint response shape
#[derive(Debug, Deserialize)]
struct LiveQuotesResponse {
    #[serde(default)]
    success: bool,
    /// Concatenated-pair keys ("USDEUR") to multiplicative rates
    #[serde(default)]
    quotes: HashMap<String, f64>,
}
