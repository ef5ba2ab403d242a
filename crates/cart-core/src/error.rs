//! # Checkout Error Types
//!
//! Typed error handling for the cart-session checkout pipeline.
//! All pipeline operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cart failed boundary validation (empty item list, zero total,
    /// non-positive quantity, negative price)
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// Currency code is not a valid ISO 4217 shape
    #[error("Invalid currency code: {code}")]
    InvalidCurrency { code: String },

    /// Rate provider answered but had no usable rate for the pair
    #[error("Exchange rate unavailable for {pair}")]
    RateUnavailable { pair: String },

    /// Rate provider request failed (transport or unparsable response)
    #[error("Rate provider error: {0}")]
    RateProviderError(String),

    /// Coupon or session creation failed at the payment processor
    #[error("Checkout service error: {message}")]
    CheckoutService { message: String },

    /// Network/HTTP error communicating with an upstream
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidCart(_) => 400,
            CheckoutError::InvalidCurrency { .. } => 400,
            CheckoutError::RateUnavailable { .. } => 502,
            CheckoutError::RateProviderError(_) => 503,
            CheckoutError::CheckoutService { .. } => 502,
            CheckoutError::Network(_) => 503,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Returns true when the caller is at fault (boundary validation)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidCart("empty".into()).status_code(),
            400
        );
        assert_eq!(
            CheckoutError::RateUnavailable {
                pair: "USDEUR".into()
            }
            .status_code(),
            502
        );
        assert_eq!(CheckoutError::Network("timeout".into()).status_code(), 503);
    }

    #[test]
    fn test_client_error_split() {
        assert!(CheckoutError::InvalidCart("no items".into()).is_client_error());
        assert!(CheckoutError::InvalidCurrency { code: "EU".into() }.is_client_error());
        assert!(!CheckoutError::CheckoutService {
            message: "coupon rejected".into()
        }
        .is_client_error());
    }
}
