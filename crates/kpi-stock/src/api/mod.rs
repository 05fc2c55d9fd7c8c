//! Data provider boundary
//!
//! The KPI service only sees the [`QuoteProvider`] trait; the Yahoo Finance
//! client is the production implementation and tests substitute fakes.

pub mod yahoo;

use crate::bundle::StockBundle;
use crate::error::Result;
use crate::ticker::Ticker;
use async_trait::async_trait;

pub use yahoo::YahooFinanceClient;

/// Source of per-ticker field bundles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a fresh bundle for `ticker`.
    ///
    /// Fails with a lookup failure when the ticker is unknown or the provider
    /// cannot be reached.
    async fn fetch_bundle(&self, ticker: &Ticker) -> Result<StockBundle>;
}
