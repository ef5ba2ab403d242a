//! # Request Handlers
//!
//! Axum request handlers for the checkout API. The checkout pipeline runs as
//! an explicit sequence of typed stages: validate, aggregate, price (one rate
//! lookup), resolve discount, create coupon if needed, create session.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cart_core::{aggregate, validate_cart, CheckoutError, CurrencyCode, LineEntry};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout session request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    /// Cart lines to purchase
    #[serde(default)]
    pub items: Vec<LineEntry>,
    /// Promo code (optional)
    #[serde(default, rename = "promoCode")]
    pub promo_code: Option<String>,
    /// Target currency (optional, defaults to the base currency)
    #[serde(default)]
    pub currency: Option<String>,
}

/// Create checkout session response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutSessionResponse {
    /// Opaque checkout session identifier
    pub id: String,
}

/// Map a pipeline error onto the wire: validation failures carry their
/// message at 400, everything else collapses to generic 500-range text.
/// Diagnostic detail is logged, never returned.
fn error_to_response(err: CheckoutError) -> (StatusCode, String) {
    if err.is_client_error() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!("Checkout pipeline failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cart-session",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session for the submitted cart.
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<Json<CreateCheckoutSessionResponse>, (StatusCode, String)> {
    validate_cart(&request.items).map_err(error_to_response)?;

    let target = match request.currency.as_deref() {
        Some(code) => CurrencyCode::parse(code).map_err(error_to_response)?,
        None => state.config.base_currency.clone(),
    };

    let aggregated = aggregate(&request.items);

    let priced = state
        .pricing
        .price(state.rates.as_ref(), &aggregated, &target)
        .await
        .map_err(error_to_response)?;

    info!(
        "Priced cart: {} lines, total {} {}",
        priced.line_items.len(),
        priced.total_minor,
        priced.currency
    );

    let discount = state
        .discounts
        .resolve(request.promo_code.as_deref(), priced.total_minor);

    let coupon = if discount > 0 {
        let coupon_id = state
            .stripe
            .create_coupon(discount, &priced.currency)
            .await
            .map_err(error_to_response)?;
        info!("Applying discount of {} minor units, coupon {}", discount, coupon_id);
        Some(coupon_id)
    } else {
        None
    };

    let session = state
        .stripe
        .create_session(
            &priced.line_items,
            coupon.as_deref(),
            &state.config.success_url,
            &state.config.cancel_url,
        )
        .await
        .map_err(error_to_response)?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(CreateCheckoutSessionResponse { id: session.id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request: CreateCheckoutSessionRequest = serde_json::from_str(
            r#"{
                "items": [{"name": "Mug", "price": 10.0, "quantity": 2, "image": "https://cdn.example/mug.png"}],
                "promoCode": "FLAT5",
                "currency": "eur"
            }"#,
        )
        .unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].name, "Mug");
        assert_eq!(request.promo_code.as_deref(), Some("FLAT5"));
        assert_eq!(request.currency.as_deref(), Some("eur"));
    }

    #[test]
    fn test_request_optional_fields_default() {
        let request: CreateCheckoutSessionRequest =
            serde_json::from_str(r#"{"items": []}"#).unwrap();

        assert!(request.items.is_empty());
        assert!(request.promo_code.is_none());
        assert!(request.currency.is_none());
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let (status, body) =
            error_to_response(CheckoutError::InvalidCart("cart has no items".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("cart has no items"));
    }

    #[test]
    fn test_upstream_errors_are_generic() {
        let (status, body) = error_to_response(CheckoutError::CheckoutService {
            message: "secret upstream detail".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }
}
