//! # cart-core
//!
//! Core types and logic for the cart-session checkout pipeline.
//!
//! This crate provides:
//! - `LineEntry` / `AggregatedEntry` and cart aggregation
//! - `PricingEngine` for minor-unit pricing and currency conversion
//! - `RateSource` trait for exchange-rate providers
//! - `DiscountTable` for promo-code resolution
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{aggregate, validate_cart, CurrencyCode, DiscountTable, PricingEngine};
//!
//! validate_cart(&entries)?;
//! let aggregated = aggregate(&entries);
//!
//! let engine = PricingEngine::new(CurrencyCode::usd());
//! let priced = engine.price(&rate_client, &aggregated, &target).await?;
//!
//! let discount = DiscountTable::standard().resolve(promo_code.as_deref(), priced.total_minor);
//! ```

pub mod cart;
pub mod currency;
pub mod discount;
pub mod error;
pub mod pricing;

// Re-exports for convenience
pub use cart::{aggregate, validate_cart, AggregatedEntry, LineEntry};
pub use currency::{CurrencyCode, MINOR_UNITS_PER_MAJOR};
pub use discount::{DiscountRule, DiscountTable};
pub use error::{CheckoutError, CheckoutResult};
pub use pricing::{PricedCart, PricedLineItem, PricingEngine, RateSource};
