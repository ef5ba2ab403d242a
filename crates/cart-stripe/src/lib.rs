//! # cart-stripe
//!
//! Stripe integration for cart-session-rs.
//!
//! `StripeCheckoutClient` covers the two operations the checkout pipeline
//! needs:
//!
//! 1. **create_coupon** - a single-use amount-off coupon for a resolved
//!    promo discount
//! 2. **create_session** - a hosted Checkout Session for the priced line
//!    items, optionally referencing the coupon
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_stripe::StripeCheckoutClient;
//!
//! let client = StripeCheckoutClient::from_env()?;
//!
//! let coupon = client.create_coupon(500, &currency).await?;
//! let session = client
//!     .create_session(&line_items, Some(&coupon), success_url, cancel_url)
//!     .await?;
//!
//! // Hand session.id back to the storefront
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{CheckoutSession, StripeCheckoutClient};
pub use config::StripeConfig;
