//! # Rate Provider Configuration
//!
//! Configuration for the CurrencyLayer-style live-rate API.
//! The access key is loaded from environment variables, never inlined.

use cart_core::CheckoutError;
use std::env;

/// Rate provider API configuration
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Provider access key
    pub access_key: String,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,
}

impl FxConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `FX_ACCESS_KEY`
    ///
    /// Optional:
    /// - `FX_API_BASE` (defaults to the live CurrencyLayer endpoint)
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let access_key = env::var("FX_ACCESS_KEY")
            .map_err(|_| CheckoutError::Configuration("FX_ACCESS_KEY not set".to_string()))?;

        if access_key.trim().is_empty() {
            return Err(CheckoutError::Configuration(
                "FX_ACCESS_KEY must not be empty".to_string(),
            ));
        }

        let api_base_url = env::var("FX_API_BASE")
            .unwrap_or_else(|_| "https://api.currencylayer.com".to_string());

        Ok(Self {
            access_key,
            api_base_url,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            api_base_url: "https://api.currencylayer.com".to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
