//! Application configuration

use serde::{Deserialize, Serialize};

/// Application-level settings shared by every front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name, used in log lines and banners
    pub app_name: String,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit logs as JSON lines instead of the human format
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-kpi".to_string(),
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Apply `STOCK_KPI_LOG` and `STOCK_KPI_LOG_JSON` on top of the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(filter) = std::env::var("STOCK_KPI_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }
        if let Ok(json) = std::env::var("STOCK_KPI_LOG_JSON") {
            config.json_logs = matches!(json.trim(), "1" | "true" | "yes");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "stock-kpi");
        assert_eq!(config.log_filter, "info");
        assert!(!config.json_logs);
    }
}
