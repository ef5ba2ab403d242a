//! # cart-fx
//!
//! Live exchange-rate lookup for cart-session-rs.
//!
//! `RateClient` implements the `cart_core::RateSource` trait against a
//! CurrencyLayer-style `live` endpoint: one GET per conversion with the
//! access key, source currency, and target currency as query parameters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_fx::RateClient;
//! use cart_core::{CurrencyCode, RateSource};
//!
//! let client = RateClient::from_env()?;
//! let eur_minor = client
//!     .convert(2000, &CurrencyCode::usd(), &CurrencyCode::parse("EUR")?)
//!     .await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::RateClient;
pub use config::FxConfig;
