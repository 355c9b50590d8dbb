//! Product price using decimal arithmetic.
//!
//! Prices carry no currency and no sign constraint. The decimal keeps the
//! scale it was written with, so `"12.50"` displays (and persists) as
//! `"12.50"` rather than `"12.5"`.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty (or only whitespace).
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),
}

/// A product price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Parse a price from user or database input.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] for blank input and
    /// [`PriceError::Invalid`] when the input is not a decimal literal.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_scale() {
        assert_eq!(Price::parse("12.50").unwrap().to_string(), "12.50");
        assert_eq!(Price::parse("9.99").unwrap().to_string(), "9.99");
        assert_eq!(Price::parse("3").unwrap().to_string(), "3");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Price::parse("  4.20\n").unwrap(), Price::parse("4.20").unwrap());
    }

    #[test]
    fn test_parse_allows_negative() {
        let price = Price::parse("-1.5").unwrap();
        assert!(price.amount().is_sign_negative());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Price::parse("ten"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("1,50"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_equal_amounts_with_different_scale_compare_equal() {
        assert_eq!(Price::parse("12.5").unwrap(), Price::parse("12.50").unwrap());
    }
}
