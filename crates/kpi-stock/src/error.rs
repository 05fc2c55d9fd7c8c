//! Error types for stock KPI lookups

use thiserror::Error;

/// Stock lookup errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Ticker unknown to the provider, or the provider returned nothing usable
    #[error("{reason}")]
    LookupFailed {
        symbol: String,
        reason: String,
    },

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StockError {
    /// Create a lookup failure for `symbol`
    pub fn lookup(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Whether the ticker itself could not be resolved.
    ///
    /// Provider outages, expired sessions and transport errors are not lookup
    /// failures: the ticker may well be valid.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LookupFailed { .. } | Self::InvalidSymbol(_))
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::InvalidSymbol(String::new());
        assert_eq!(err.to_string(), "Invalid symbol: \"\"");

        let err = StockError::lookup("ZZZZZZ123", "Quote not found for symbol: ZZZZZZ123");
        assert_eq!(err.to_string(), "Quote not found for symbol: ZZZZZZ123");
    }

    #[test]
    fn test_lookup_classification() {
        assert!(StockError::lookup("AAPL", "Quote not found").is_lookup_failure());
        assert!(StockError::InvalidSymbol(String::new()).is_lookup_failure());
        assert!(!StockError::YahooFinanceError("Invalid Crumb".to_string()).is_lookup_failure());
        assert!(!StockError::ConfigError("bad url".to_string()).is_lookup_failure());
    }
}
