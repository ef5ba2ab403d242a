//! # Currency Codes
//!
//! ISO 4217 currency code handling. Input prices arrive in a fixed base
//! currency; the caller may request any well-formed target code, so this is
//! a validated string rather than a closed enum.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minor units per major unit in the base currency (cents).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A validated ISO 4217 currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a currency code: exactly three ASCII letters, case-insensitive.
    pub fn parse(code: &str) -> CheckoutResult<Self> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CheckoutError::InvalidCurrency {
                code: code.to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// US dollar, the fixed base currency of incoming cart prices.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, as the Stripe API expects currency params.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Concatenated pair key as the rate provider reports quotes
    /// (e.g. "USDEUR").
    pub fn pair_key(&self, target: &CurrencyCode) -> String {
        format!("{}{}", self.0, target.0)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CheckoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        let code = CurrencyCode::parse("eur").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert_eq!(code.to_lowercase(), "eur");
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(CurrencyCode::parse(" gbp ").unwrap().as_str(), "GBP");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(CurrencyCode::parse("EU").is_err());
        assert!(CurrencyCode::parse("EURO").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
        assert!(CurrencyCode::parse("").is_err());
    }

    #[test]
    fn test_pair_key() {
        let usd = CurrencyCode::usd();
        let eur = CurrencyCode::parse("EUR").unwrap();
        assert_eq!(usd.pair_key(&eur), "USDEUR");
    }
}
