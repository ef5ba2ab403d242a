//! # Pricing Engine
//!
//! Converts aggregated cart entries into integer minor-unit line items in a
//! target currency. The grand total is converted once through a `RateSource`
//! and each line is proportionally rescaled so the per-item prices stay
//! consistent with the converted total — one rate lookup per request, not
//! one per line.

use crate::cart::AggregatedEntry;
use crate::currency::{CurrencyCode, MINOR_UNITS_PER_MAJOR};
use crate::error::{CheckoutError, CheckoutResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seam for exchange-rate providers.
///
/// Implementations convert an integer minor-unit amount between currencies.
/// Identity conversion (`from == to`) must not touch the network.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Convert `amount_minor` from one currency to another, rounding to the
    /// nearest minor unit.
    async fn convert(
        &self,
        amount_minor: i64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> CheckoutResult<i64>;
}

/// A cart line priced in integer minor units of the target currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLineItem {
    /// Target currency code
    pub currency: CurrencyCode,

    /// Product name
    pub name: String,

    /// Optional product image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Unit amount in minor units of the target currency
    pub unit_amount_minor: i64,

    /// Quantity ordered
    pub quantity: u32,
}

/// The priced cart: final line items plus the converted grand total.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub line_items: Vec<PricedLineItem>,
    pub total_minor: i64,
    pub currency: CurrencyCode,
}

/// Prices aggregated entries in a configured base currency and converts the
/// total into a requested target currency.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    base_currency: CurrencyCode,
}

impl PricingEngine {
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self { base_currency }
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    /// Price a cart in `target` currency.
    ///
    /// Computes integer minor-unit amounts in the base currency, converts the
    /// grand total through `rates`, then rescales each line proportionally.
    /// A zero base total is rejected before any rate lookup, so the rescale
    /// division is always well defined.
    pub async fn price(
        &self,
        rates: &dyn RateSource,
        entries: &[AggregatedEntry],
        target: &CurrencyCode,
    ) -> CheckoutResult<PricedCart> {
        let unit_minor_base: Vec<i64> = entries
            .iter()
            .map(|e| (e.price * MINOR_UNITS_PER_MAJOR as f64).round() as i64)
            .collect();

        let total_minor_base: i64 = entries
            .iter()
            .zip(&unit_minor_base)
            .map(|(e, unit)| unit * e.quantity as i64)
            .sum();

        if total_minor_base == 0 {
            return Err(CheckoutError::InvalidCart(
                "cart total is zero".to_string(),
            ));
        }

        let total_minor_target = rates
            .convert(total_minor_base, &self.base_currency, target)
            .await?;

        debug!(
            total_minor_base,
            total_minor_target,
            %target,
            "converted cart total"
        );

        let line_items = entries
            .iter()
            .zip(&unit_minor_base)
            .map(|(entry, &unit_base)| {
                let rescaled = (unit_base as f64 * total_minor_target as f64
                    / total_minor_base as f64)
                    .round() as i64;
                PricedLineItem {
                    currency: target.clone(),
                    name: entry.name.clone(),
                    image_url: entry.image.clone(),
                    unit_amount_minor: rescaled,
                    quantity: entry.quantity,
                }
            })
            .collect();

        Ok(PricedCart {
            line_items,
            total_minor: total_minor_target,
            currency: target.clone(),
        })
    }
}
