//! Yahoo Finance quoteSummary client

use super::QuoteProvider;
use crate::bundle::StockBundle;
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::ticker::Ticker;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// quoteSummary modules requested per lookup.
///
/// Order matters: when two modules carry the same field the earlier one wins.
pub const MODULES: [&str; 7] = [
    "price",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
    "assetProfile",
    "summaryProfile",
    "quoteType",
];

/// Yahoo Finance API client
///
/// Holds the HTTP client with its cookie jar and the session crumb, which is
/// fetched on first use.
pub struct YahooFinanceClient {
    client: Client,
    config: StockConfig,
    crumb: Mutex<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "quoteSummary", default)]
    quote_summary: Option<QuoteSummary>,
    #[serde(default)]
    finance: Option<FinanceBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct FinanceBlock {
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl ApiError {
    fn message(&self) -> String {
        match (self.code.is_empty(), self.description.is_empty()) {
            (_, false) => self.description.clone(),
            (false, true) => self.code.clone(),
            (true, true) => "unknown provider error".to_string(),
        }
    }
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: StockConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StockError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            crumb: Mutex::new(None),
        })
    }

    /// Session crumb, fetched once and reused
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = self.fetch_crumb().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_crumb(&self) -> Result<String> {
        debug!(url = %self.config.cookie_url, "Requesting Yahoo session cookie");
        // The consent host answers with an error status but still sets the cookie.
        let _ = self.client.get(self.config.cookie_url.as_str()).send().await?;

        let response = self.client.get(self.config.crumb_url()).send().await?;
        let status = response.status();
        let crumb = response.text().await?.trim().to_string();

        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(StockError::YahooFinanceError(format!(
                "could not obtain session crumb (HTTP {status})"
            )));
        }

        Ok(crumb)
    }

    /// Fetch and flatten the quoteSummary modules for a ticker
    pub async fn get_quote_summary(&self, ticker: &Ticker) -> Result<StockBundle> {
        let crumb = self.crumb().await?;
        let url = self.config.quote_summary_url(ticker.as_str())?;

        info!(symbol = %ticker, "Fetching quote summary");
        let response = self
            .client
            .get(url)
            .query(&[
                ("modules", MODULES.join(",")),
                ("formatted", "false".to_string()),
                ("crumb", crumb),
            ])
            .send()
            .await?;

        let status = response.status();
        self.track_session(status).await;

        let body = response.text().await?;
        parse_quote_summary(ticker, status, &body)
    }

    /// Drop the crumb on 401 so the next lookup starts a fresh session
    async fn track_session(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            debug!("Session rejected, clearing crumb");
            *self.crumb.lock().await = None;
        }
    }
}

/// Turn a quoteSummary response body into a bundle
///
/// A `quoteSummary.error` means the symbol is unknown. A `finance.error`
/// (e.g. "Invalid Crumb") or a bare error status is a provider-side failure.
pub fn parse_quote_summary(ticker: &Ticker, status: StatusCode, body: &str) -> Result<StockBundle> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
        StockError::YahooFinanceError(format!("unexpected response (HTTP {status}): {e}"))
    })?;

    if let Some(err) = envelope.quote_summary.as_ref().and_then(|qs| qs.error.as_ref()) {
        return Err(StockError::lookup(ticker.as_str(), err.message()));
    }

    if let Some(err) = envelope.finance.as_ref().and_then(|f| f.error.as_ref()) {
        return Err(StockError::YahooFinanceError(err.message()));
    }

    if !status.is_success() {
        return Err(StockError::YahooFinanceError(format!("HTTP {status}")));
    }

    let result = envelope
        .quote_summary
        .and_then(|qs| qs.result)
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| {
            StockError::lookup(ticker.as_str(), format!("No data found for ticker {ticker}"))
        })?;

    Ok(flatten_modules(&result))
}

/// Merge the requested modules into one flat bundle.
///
/// `{ "raw": x, "fmt": ".." }` wrappers collapse to `x`; empty wrappers mean
/// the field is absent.
pub fn flatten_modules(result: &Map<String, Value>) -> StockBundle {
    let mut bundle = StockBundle::new();
    for module in MODULES {
        let Some(Value::Object(fields)) = result.get(module) else {
            continue;
        };
        for (key, value) in fields {
            bundle.insert_if_absent(key.clone(), unwrap_raw(value));
        }
    }
    bundle
}

fn unwrap_raw(value: &Value) -> Value {
    match value {
        Value::Object(obj) if obj.is_empty() => Value::Null,
        Value::Object(obj) => obj.get("raw").cloned().unwrap_or_else(|| value.clone()),
        other => other.clone(),
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceClient {
    async fn fetch_bundle(&self, ticker: &Ticker) -> Result<StockBundle> {
        let bundle = self.get_quote_summary(ticker).await.inspect_err(|e| {
            warn!(symbol = %ticker, error = %e, "Quote summary lookup failed");
        })?;

        let bundle = require_fields(ticker, bundle)?;
        debug!(symbol = %ticker, fields = bundle.len(), "Quote summary fetched");
        Ok(bundle)
    }
}

/// A bundle without a single field is a lookup failure
fn require_fields(ticker: &Ticker, bundle: StockBundle) -> Result<StockBundle> {
    if bundle.is_empty() {
        return Err(StockError::lookup(
            ticker.as_str(),
            format!("No data found for ticker {ticker}"),
        ));
    }
    Ok(bundle)
}
