//! # Discount Resolver
//!
//! Maps a promo code to a discount amount in minor units of the converted
//! total's currency. Rules are injected as configuration rather than inlined
//! at the call site; unknown and absent codes resolve to no discount.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountRule {
    /// Percentage of the converted total, rounded to the nearest minor unit
    Percent(u32),
    /// Flat amount in minor units of the target currency
    Flat(i64),
}

impl DiscountRule {
    /// Discount amount in minor units for a given converted total.
    pub fn amount(&self, converted_total_minor: i64) -> i64 {
        match self {
            DiscountRule::Percent(pct) => {
                (converted_total_minor as f64 * *pct as f64 / 100.0).round() as i64
            }
            DiscountRule::Flat(minor) => *minor,
        }
    }
}

/// Promo-code lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountTable {
    rules: HashMap<String, DiscountRule>,
}

impl DiscountTable {
    /// Empty table: every code resolves to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard promotion set: DISCOUNT10 (10% off) and FLAT5
    /// (500 minor units off).
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert("DISCOUNT10", DiscountRule::Percent(10));
        table.insert("FLAT5", DiscountRule::Flat(500));
        table
    }

    pub fn insert(&mut self, code: impl Into<String>, rule: DiscountRule) {
        self.rules.insert(code.into(), rule);
    }

    /// Resolve a promo code against a converted total.
    ///
    /// Unknown and absent codes yield 0; the resolved amount is never
    /// clamped to the total.
    pub fn resolve(&self, code: Option<&str>, converted_total_minor: i64) -> i64 {
        code.and_then(|c| self.rules.get(c))
            .map(|rule| rule.amount(converted_total_minor))
            .unwrap_or(0)
    }
}
