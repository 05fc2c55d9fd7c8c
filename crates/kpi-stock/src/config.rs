//! Configuration for stock KPI lookups

use crate::error::{Result, StockError};
use reqwest::Url;
use std::time::Duration;

/// Default Yahoo Finance API host
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Host that hands out the session cookie the crumb endpoint requires
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Browser-like user agent; Yahoo rejects requests without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration for stock KPI lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockConfig {
    /// Base URL of the quoteSummary API
    pub base_url: String,

    /// URL visited once per client to obtain a session cookie
    pub cookie_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Request timeout duration
    pub request_timeout: Duration,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("base_url", &self.base_url), ("cookie_url", &self.cookie_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(StockError::ConfigError(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(StockError::ConfigError("user_agent must not be empty".to_string()));
        }

        Ok(())
    }

    /// quoteSummary endpoint for a symbol, without query string.
    ///
    /// The symbol is percent-encoded as a single path segment.
    pub fn quote_summary_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StockError::ConfigError(format!("invalid base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StockError::ConfigError("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v10", "finance", "quoteSummary", symbol]);
        Ok(url)
    }

    /// Crumb endpoint
    pub fn crumb_url(&self) -> String {
        format!("{}/v1/test/getcrumb", self.base_url.trim_end_matches('/'))
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    base_url: Option<String>,
    cookie_url: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
}

impl StockConfigBuilder {
    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the cookie URL
    pub fn cookie_url(mut self, url: impl Into<String>) -> Self {
        self.cookie_url = Some(url.into());
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Load overrides from `STOCK_KPI_*` environment variables.
    ///
    /// Values already set on the builder are kept.
    pub fn with_env(mut self) -> Self {
        if self.base_url.is_none() {
            self.base_url = env_var("STOCK_KPI_BASE_URL");
        }
        if self.cookie_url.is_none() {
            self.cookie_url = env_var("STOCK_KPI_COOKIE_URL");
        }
        if self.user_agent.is_none() {
            self.user_agent = env_var("STOCK_KPI_USER_AGENT");
        }
        if self.request_timeout.is_none() {
            self.request_timeout = env_var("STOCK_KPI_TIMEOUT_SECS")
                .and_then(|secs| secs.parse::<u64>().ok())
                .map(Duration::from_secs);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            cookie_url: self.cookie_url.unwrap_or(defaults.cookie_url),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .base_url("http://127.0.0.1:8080/")
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.quote_summary_url("AAPL").unwrap().as_str(),
            "http://127.0.0.1:8080/v10/finance/quoteSummary/AAPL"
        );
        assert_eq!(config.crumb_url(), "http://127.0.0.1:8080/v1/test/getcrumb");
    }

    #[test]
    fn test_quote_summary_url_escapes_symbol() {
        let config = StockConfig::default();

        let url = config.quote_summary_url("BRK/B?x#y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/BRK%2FB%3Fx%23y"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = config.quote_summary_url("BRK-B").unwrap();
        assert_eq!(url.path(), "/v10/finance/quoteSummary/BRK-B");
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = StockConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = StockConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(StockError::ConfigError(_))));
    }
}
