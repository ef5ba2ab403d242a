//! # Cart Types & Aggregation
//!
//! Raw cart line entries from the request payload, boundary validation, and
//! aggregation of duplicate entries into unique-by-name lines.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// A raw cart line as submitted by the client.
///
/// Prices are in major units of the base currency (e.g. 10.00 USD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    /// Product name; the unique key within a cart
    pub name: String,

    /// Unit price in major units of the base currency
    pub price: f64,

    /// Quantity ordered
    pub quantity: u32,

    /// Optional product image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineEntry {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            image: None,
        }
    }

    /// Builder: set image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

/// A cart line with quantities summed across duplicate names.
///
/// Invariant: at most one `AggregatedEntry` per distinct name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedEntry {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: Option<String>,
}

/// Validate a cart at the request boundary.
///
/// Rejects an empty item list, empty names, non-positive quantities, and
/// negative or non-finite prices. Aggregation and pricing assume input that
/// has passed this check.
pub fn validate_cart(entries: &[LineEntry]) -> CheckoutResult<()> {
    if entries.is_empty() {
        return Err(CheckoutError::InvalidCart("cart has no items".to_string()));
    }

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(CheckoutError::InvalidCart(
                "item name must not be empty".to_string(),
            ));
        }
        if entry.quantity == 0 {
            return Err(CheckoutError::InvalidCart(format!(
                "item '{}' has zero quantity",
                entry.name
            )));
        }
        if !entry.price.is_finite() || entry.price < 0.0 {
            return Err(CheckoutError::InvalidCart(format!(
                "item '{}' has an invalid price",
                entry.name
            )));
        }
    }

    Ok(())
}

/// Collapse cart lines into unique-by-name entries.
///
/// Repeated names sum their quantities; the first-seen entry's price and
/// image win, and first-seen order is preserved.
pub fn aggregate(entries: &[LineEntry]) -> Vec<AggregatedEntry> {
    let mut aggregated: Vec<AggregatedEntry> = Vec::new();

    for entry in entries {
        match aggregated.iter_mut().find(|a| a.name == entry.name) {
            Some(existing) => existing.quantity += entry.quantity,
            None => aggregated.push(AggregatedEntry {
                name: entry.name.clone(),
                price: entry.price,
                quantity: entry.quantity,
                image: entry.image.clone(),
            }),
        }
    }

    aggregated
}
