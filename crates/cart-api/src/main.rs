//! # Cart-Session RS
//!
//! Cart checkout service: prices a cart in a requested currency and hands
//! back a hosted Stripe Checkout Session id.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FX_ACCESS_KEY=...
//!
//! # Run the server
//! cart-session
//! ```

use cart_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();

    info!("Base currency: {}", state.config.base_currency);
    info!("Serving static assets from: {}", state.config.public_dir);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Cart-Session starting on http://{}", addr);
    info!("Checkout: POST http://{}/create-checkout-session", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
