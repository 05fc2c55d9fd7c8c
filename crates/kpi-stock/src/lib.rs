//! Stock KPI lookups for assistant clients
//!
//! This crate fetches per-ticker data from Yahoo Finance and renders it as
//! labeled text reports an AI assistant can read directly. It includes:
//!
//! - A provider boundary ([`QuoteProvider`]) with the Yahoo Finance client
//! - Typed field extraction over the loosely-typed provider bundle
//! - Currency, percentage, ratio, count and date formatting
//! - Eight per-category reports, a complete analysis and a static KPI catalog
//! - Tool wrappers so every query can be registered in a `ToolRegistry`
//!
//! # Example
//!
//! ```rust,ignore
//! use kpi_stock::{StockConfig, StockKpiService, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YahooFinanceClient::new(StockConfig::builder().with_env().build()?)?;
//!     let service = StockKpiService::new(Arc::new(client));
//!
//!     println!("{}", service.valuation_metrics("AAPL").await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod report;
pub mod service;
pub mod ticker;
pub mod tools;

// Re-export main types for convenience
pub use api::{QuoteProvider, YahooFinanceClient};
pub use bundle::StockBundle;
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use report::{OutputFormat, Report, ReportCategory};
pub use service::StockKpiService;
pub use ticker::Ticker;
pub use tools::{KpiQuery, KpiTool, register_kpi_tools};
