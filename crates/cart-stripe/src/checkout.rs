//! # Stripe Coupons & Checkout Sessions
//!
//! Creates single-use discount coupons and hosted Checkout Sessions via
//! Stripe's form-encoded REST API. When a discount applies, the flow is two
//! dependent round-trips: coupon first, then the session referencing it.

use crate::config::StripeConfig;
use cart_core::{CheckoutError, CheckoutResult, CurrencyCode, PricedLineItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// A checkout session created by Stripe. Opaque to this system: only the id
/// is returned to the caller.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
}

/// Client for Stripe's coupon and Checkout Session endpoints
pub struct StripeCheckoutClient {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutClient {
    /// Create a new Stripe checkout client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a single-use amount-off coupon for the given minor-unit amount.
    /// Returns the coupon id.
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn create_coupon(
        &self,
        amount_off_minor: i64,
        currency: &CurrencyCode,
    ) -> CheckoutResult<String> {
        let form_params: Vec<(String, String)> = vec![
            ("amount_off".to_string(), amount_off_minor.to_string()),
            ("currency".to_string(), currency.to_lowercase()),
            ("duration".to_string(), "once".to_string()),
        ];

        let body = self.post_form("/v1/coupons", &form_params).await?;

        let coupon: StripeCouponResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe coupon response: {}", e))
        })?;

        info!("Created Stripe coupon: id={}", coupon.id);
        Ok(coupon.id)
    }

    /// Create a hosted Checkout Session for the given line items.
    ///
    /// `coupon` references a previously created discount coupon; when absent
    /// the session carries no discount.
    #[instrument(skip(self, line_items, success_url, cancel_url), fields(items = line_items.len()))]
    pub async fn create_session(
        &self,
        line_items: &[PricedLineItem],
        coupon: Option<&str>,
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        if line_items.is_empty() {
            return Err(CheckoutError::InvalidCart(
                "session has no line items".to_string(),
            ));
        }

        debug!("Creating Stripe checkout session: {} items", line_items.len());

        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            (
                "billing_address_collection".to_string(),
                "required".to_string(),
            ),
        ];

        for (i, country) in self.config.allowed_shipping_countries.iter().enumerate() {
            form_params.push((
                format!("shipping_address_collection[allowed_countries][{}]", i),
                country.clone(),
            ));
        }

        for (i, item) in line_items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.currency.to_lowercase(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount_minor.to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            if let Some(ref img) = item.image_url {
                form_params.push((
                    format!("line_items[{}][price_data][product_data][images][0]", i),
                    img.clone(),
                ));
            }
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        if let Some(coupon_id) = coupon {
            form_params.push(("discounts[0][coupon]".to_string(), coupon_id.to_string()));
        }

        let body = self.post_form("/v1/checkout/sessions", &form_params).await?;

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe session response: {}", e))
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(CheckoutSession { id: session.id })
    }

    /// POST a form-encoded request to the Stripe API and return the raw
    /// success body. Non-2xx responses are mapped through Stripe's error
    /// envelope.
    async fn post_form(
        &self,
        path: &str,
        form_params: &[(String, String)],
    ) -> CheckoutResult<String> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::CheckoutService {
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::CheckoutService {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        Ok(body)
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCouponResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
