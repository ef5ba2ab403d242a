//! # cart-api
//!
//! HTTP API layer for cart-session-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout endpoint orchestrating pricing, discounts, and Stripe
//! - Static asset serving for the success/cancel landing pages
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-checkout-session` | Price cart, create Stripe session |
//! | GET | `/*` | Static assets from the public directory |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
