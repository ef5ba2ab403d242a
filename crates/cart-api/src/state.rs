//! # Application State
//!
//! Shared state for the Axum application. All configuration is resolved once
//! at startup and handed to the components; nothing reads ambient globals at
//! request time.

use cart_core::{CurrencyCode, DiscountTable, PricingEngine, RateSource};
use cart_fx::RateClient;
use cart_stripe::StripeCheckoutClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory of static assets served at the root
    pub public_dir: String,
    /// Base currency of incoming cart prices
    pub base_currency: CurrencyCode,
    /// Redirect target after successful payment
    pub success_url: String,
    /// Redirect target when the customer cancels
    pub cancel_url: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4400".to_string());

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4400),
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            base_currency: std::env::var("BASE_CURRENCY")
                .ok()
                .and_then(|c| CurrencyCode::parse(&c).ok())
                .unwrap_or_else(CurrencyCode::usd),
            success_url: std::env::var("SUCCESS_URL")
                .unwrap_or_else(|_| format!("{}/success.html", base_url)),
            cancel_url: std::env::var("CANCEL_URL")
                .unwrap_or_else(|_| format!("{}/cancel.html", base_url)),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Pricing engine for the configured base currency
    pub pricing: PricingEngine,
    /// Promo-code rules
    pub discounts: DiscountTable,
    /// Exchange-rate source
    pub rates: Arc<dyn RateSource>,
    /// Stripe coupon/session client
    pub stripe: Arc<StripeCheckoutClient>,
}

impl AppState {
    /// Create an AppState from the environment: live rate client, live
    /// Stripe client, discount rules from config or the standard table.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let discounts = load_discount_table()?;

        let rates = RateClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize rate client: {}", e))?;
        let stripe = StripeCheckoutClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_clients(
            config,
            discounts,
            Arc::new(rates),
            Arc::new(stripe),
        ))
    }

    /// Create an AppState with injected clients (for testing)
    pub fn with_clients(
        config: AppConfig,
        discounts: DiscountTable,
        rates: Arc<dyn RateSource>,
        stripe: Arc<StripeCheckoutClient>,
    ) -> Self {
        let pricing = PricingEngine::new(config.base_currency.clone());
        Self {
            config,
            pricing,
            discounts,
            rates,
            stripe,
        }
    }
}

/// Load discount rules from a config file, falling back to the standard
/// table when none is present.
fn load_discount_table() -> anyhow::Result<DiscountTable> {
    let config_paths = [
        "config/discounts.toml",
        "../config/discounts.toml",
        "../../config/discounts.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let table: DiscountTable = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded discount rules from {}", path);
            return Ok(table);
        }
    }

    tracing::info!("No discount config found, using standard rules");
    Ok(DiscountTable::standard())
}
