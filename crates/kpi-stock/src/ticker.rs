//! Ticker symbol normalization

use crate::error::{Result, StockError};
use std::fmt;

/// A normalized ticker symbol (trimmed, upper-cased)
///
/// Validity beyond "non-empty" is left to the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize a user-supplied symbol
    pub fn parse(input: &str) -> Result<Self> {
        let symbol = input.trim();
        if symbol.is_empty() {
            return Err(StockError::InvalidSymbol(input.to_string()));
        }
        Ok(Self(symbol.to_uppercase()))
    }

    /// The symbol as sent to the provider
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort display form of raw input, used in error messages when
    /// parsing itself failed
    pub fn display_form(input: &str) -> String {
        input.trim().to_uppercase()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let ticker = Ticker::parse("  aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(ticker.to_string(), "AAPL");
    }

    #[test]
    fn test_parse_keeps_exchange_suffix() {
        assert_eq!(Ticker::parse("brk-b").unwrap().as_str(), "BRK-B");
        assert_eq!(Ticker::parse("shop.to").unwrap().as_str(), "SHOP.TO");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Ticker::parse("   "), Err(StockError::InvalidSymbol(_))));
    }
}
