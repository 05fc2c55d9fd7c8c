//! KPI query functions
//!
//! [`StockKpiService`] is the boundary every caller goes through: each query
//! takes a raw ticker string, performs its provider lookup and always returns
//! text. Lookup failures become a one-line message naming the ticker; they are
//! never returned as errors.

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::QuoteProvider;
use crate::bundle::StockBundle;
use crate::catalog::KPI_CATALOG;
use crate::error::Result;
use crate::format::format_whole_currency;
use crate::report::categories;
use crate::report::{CategoryOutcome, OutputFormat, Report, ReportCategory, ReportFormatter};
use crate::ticker::Ticker;

/// Runs KPI queries against an injected provider
pub struct StockKpiService {
    provider: Arc<dyn QuoteProvider>,
    formatter: Box<dyn ReportFormatter>,
}

impl StockKpiService {
    /// Create a service rendering plain text
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_format(provider, OutputFormat::Text)
    }

    /// Create a service rendering in the given output format
    pub fn with_format(provider: Arc<dyn QuoteProvider>, format: OutputFormat) -> Self {
        Self {
            provider,
            formatter: format.formatter(),
        }
    }

    async fn fetch(&self, ticker: &Ticker) -> Result<StockBundle> {
        self.provider.fetch_bundle(ticker).await
    }

    /// Build the structured report for one category
    pub async fn report(&self, category: ReportCategory, ticker: &str) -> Result<Report> {
        let ticker = Ticker::parse(ticker)?;
        info!(symbol = %ticker, category = category.tool_name(), "Building report");
        let bundle = self.fetch(&ticker).await?;
        Ok(categories::build(category, &ticker, &bundle))
    }

    /// Render one category, converting lookup failures into a message
    pub async fn category_text(&self, category: ReportCategory, ticker: &str) -> String {
        match self.report(category, ticker).await {
            Ok(report) => self.formatter.format_report(&report),
            Err(err) => {
                let symbol = Ticker::display_form(ticker);
                warn!(symbol = %symbol, category = category.tool_name(), error = %err, "Report failed");
                self.formatter.format_error(category, &symbol, &err)
            },
        }
    }

    /// `get_company_overview`
    pub async fn company_overview(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Overview, ticker).await
    }

    /// `get_valuation_metrics`
    pub async fn valuation_metrics(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Valuation, ticker).await
    }

    /// `get_financial_health`
    pub async fn financial_health(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::FinancialHealth, ticker).await
    }

    /// `get_profitability_metrics`
    pub async fn profitability_metrics(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Profitability, ticker).await
    }

    /// `get_growth_metrics`
    pub async fn growth_metrics(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Growth, ticker).await
    }

    /// `get_dividend_metrics`
    pub async fn dividend_metrics(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Dividends, ticker).await
    }

    /// `get_trading_metrics`
    pub async fn trading_metrics(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Trading, ticker).await
    }

    /// `get_analyst_data`
    pub async fn analyst_data(&self, ticker: &str) -> String {
        self.category_text(ReportCategory::Analyst, ticker).await
    }

    /// `get_complete_stock_analysis`
    ///
    /// Runs every category in [`ReportCategory::AGGREGATE_ORDER`], one after
    /// the other. A category whose lookup fails is replaced by its own error
    /// line; the others are still reported.
    pub async fn complete_stock_analysis(&self, ticker: &str) -> String {
        let symbol = Ticker::display_form(ticker);
        let mut outcomes = Vec::with_capacity(ReportCategory::AGGREGATE_ORDER.len());

        for category in ReportCategory::AGGREGATE_ORDER {
            let result = self.report(category, ticker).await;
            if let Err(err) = &result {
                warn!(symbol = %symbol, category = category.tool_name(), error = %err, "Section failed");
            }
            outcomes.push(CategoryOutcome { category, result });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(symbol = %symbol, failed, "Complete analysis assembled");
        self.formatter.format_aggregate(&symbol, &outcomes)
    }

    /// `get_market_cap`
    pub async fn market_cap(&self, ticker: &str) -> String {
        let symbol = Ticker::display_form(ticker);
        let bundle = match Ticker::parse(ticker) {
            Ok(parsed) => self.fetch(&parsed).await,
            Err(err) => Err(err),
        };

        match bundle {
            Ok(bundle) => market_cap_sentence(&symbol, &bundle),
            Err(err) if err.is_lookup_failure() => {
                warn!(symbol = %symbol, "No market cap data; ticker likely invalid");
                format!(
                    "Could not find market cap data for {symbol}. Please ensure it's a valid stock ticker."
                )
            },
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "Market cap lookup failed");
                format!("An error occurred while trying to fetch data for {symbol}: {err}")
            },
        }
    }

    /// `list_available_kpis`
    pub fn list_available_kpis() -> &'static str {
        KPI_CATALOG
    }
}

fn market_cap_sentence(symbol: &str, bundle: &StockBundle) -> String {
    match bundle.number(&["marketCap"]).filter(|cap| *cap > 0.0) {
        Some(cap) => {
            info!(symbol, market_cap = cap, "Found market cap");
            format!("The market cap for {symbol} is: {}", format_whole_currency(cap))
        },
        None if bundle.number(&["regularMarketPrice", "currentPrice"]).is_some() => {
            warn!(symbol, "Ticker has a price but no market cap");
            format!(
                "Could not find market cap data for {symbol}, although it might be a valid ticker (e.g., an index or ETF)."
            )
        },
        None => format!(
            "Could not find market cap data for {symbol}. Please ensure it's a valid stock ticker."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockQuoteProvider;
    use crate::api::yahoo::parse_quote_summary;
    use crate::error::StockError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bundle(value: Value) -> StockBundle {
        match value {
            Value::Object(map) => StockBundle::from_map(map),
            _ => panic!("expected object"),
        }
    }

    fn apple() -> StockBundle {
        bundle(json!({
            "longName": "Apple Inc.",
            "sector": "Technology",
            "marketCap": 2_876_542_000_000_i64,
            "regularMarketPrice": 189.5,
            "trailingPE": 29.4,
            "profitMargins": 0.2845,
            "recommendationKey": "buy"
        }))
    }

    fn service_returning(result: fn() -> Result<StockBundle>) -> StockKpiService {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_bundle()
            .returning(move |_| result());
        StockKpiService::new(Arc::new(provider))
    }

    fn not_found() -> Result<StockBundle> {
        Err(StockError::lookup("ZZZZZZ123", "Quote not found for symbol: ZZZZZZ123"))
    }

    /// Fails only on the n-th call (0-based)
    struct FailNthProvider {
        calls: AtomicUsize,
        fail_on: usize,
    }

    #[async_trait]
    impl QuoteProvider for FailNthProvider {
        async fn fetch_bundle(&self, ticker: &Ticker) -> Result<StockBundle> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_on {
                Err(StockError::lookup(ticker.as_str(), "provider unavailable"))
            } else {
                Ok(apple())
            }
        }
    }

    #[tokio::test]
    async fn test_every_query_names_the_ticker() {
        let service = service_returning(|| Ok(apple()));
        let outputs = vec![
            service.company_overview("aapl").await,
            service.valuation_metrics("aapl").await,
            service.financial_health("aapl").await,
            service.profitability_metrics("aapl").await,
            service.growth_metrics("aapl").await,
            service.dividend_metrics("aapl").await,
            service.trading_metrics("aapl").await,
            service.analyst_data("aapl").await,
            service.market_cap("aapl").await,
            service.complete_stock_analysis("aapl").await,
        ];

        for output in outputs {
            assert!(!output.is_empty());
            assert!(output.contains("AAPL"), "{output}");
        }
    }

    #[tokio::test]
    async fn test_valuation_text() {
        let service = service_returning(|| Ok(apple()));
        let text = service.valuation_metrics("AAPL").await;

        assert!(text.starts_with("Valuation Metrics for AAPL:\n"));
        assert!(text.contains("Market Cap: $2,876,542,000,000.00"));
        assert!(text.contains("  • P/E Ratio (TTM): 29.40"));
        assert!(text.contains("  • PEG Ratio: N/A"));
    }

    #[tokio::test]
    async fn test_missing_fields_render_na() {
        let service = service_returning(|| Ok(bundle(json!({ "longName": "Tiny Co" }))));
        let text = service.profitability_metrics("TINY").await;

        assert!(text.contains("  • Profit Margin: N/A"));
        assert!(text.contains("  • EPS (TTM): N/A"));
    }

    #[tokio::test]
    async fn test_invalid_ticker_is_graceful() {
        let service = service_returning(not_found);

        let text = service.valuation_metrics("ZZZZZZ123").await;
        assert_eq!(
            text,
            "Error fetching valuation metrics for ZZZZZZ123: Quote not found for symbol: ZZZZZZ123"
        );

        let text = service.market_cap("zzzzzz123").await;
        assert_eq!(
            text,
            "Could not find market cap data for ZZZZZZ123. Please ensure it's a valid stock ticker."
        );
    }

    #[tokio::test]
    async fn test_empty_ticker_never_reaches_provider() {
        let mut provider = MockQuoteProvider::new();
        provider.expect_fetch_bundle().never();
        let service = StockKpiService::new(Arc::new(provider));

        let text = service.growth_metrics("   ").await;
        assert!(text.starts_with("Error fetching growth metrics for :"));
    }

    #[tokio::test]
    async fn test_provider_receives_normalized_ticker() {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_bundle()
            .withf(|ticker: &Ticker| ticker.as_str() == "MSFT")
            .times(1)
            .returning(|_| Ok(apple()));
        let service = StockKpiService::new(Arc::new(provider));

        let text = service.trading_metrics(" msft ").await;
        assert!(text.starts_with("Trading & Market Metrics for MSFT:"));
    }

    #[tokio::test]
    async fn test_market_cap_variants() {
        let service = service_returning(|| Ok(apple()));
        assert_eq!(
            service.market_cap("aapl").await,
            "The market cap for AAPL is: $2,876,542,000,000"
        );

        let service = service_returning(|| Ok(bundle(json!({ "regularMarketPrice": 5000.0 }))));
        assert!(
            service
                .market_cap("^gspc")
                .await
                .contains("although it might be a valid ticker")
        );

        let service = service_returning(|| Err(StockError::YahooFinanceError("HTTP 503".into())));
        assert_eq!(
            service.market_cap("aapl").await,
            "An error occurred while trying to fetch data for AAPL: Yahoo Finance error: HTTP 503"
        );
    }

    #[tokio::test]
    async fn test_market_cap_expired_session_is_not_invalid_ticker() {
        let service = service_returning(|| {
            let body = r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
            parse_quote_summary(&Ticker::parse("AAPL")?, StatusCode::UNAUTHORIZED, body)
        });

        assert_eq!(
            service.market_cap("aapl").await,
            "An error occurred while trying to fetch data for AAPL: Yahoo Finance error: Invalid Crumb"
        );
    }

    #[tokio::test]
    async fn test_market_cap_empty_ticker() {
        let mut provider = MockQuoteProvider::new();
        provider.expect_fetch_bundle().never();
        let service = StockKpiService::new(Arc::new(provider));

        assert_eq!(
            service.market_cap("  ").await,
            "Could not find market cap data for . Please ensure it's a valid stock ticker."
        );
    }

    #[tokio::test]
    async fn test_aggregate_isolates_failed_section() {
        // Valuation is the second category in the aggregate order.
        let provider = FailNthProvider {
            calls: AtomicUsize::new(0),
            fail_on: 1,
        };
        let service = StockKpiService::new(Arc::new(provider));
        let text = service.complete_stock_analysis("aapl").await;

        assert!(text.contains("Error fetching valuation metrics for AAPL: provider unavailable"));
        assert!(!text.contains("Valuation Metrics for AAPL:"));
        for category in ReportCategory::AGGREGATE_ORDER {
            if category != ReportCategory::Valuation {
                let title = format!("{} for AAPL:", category.title());
                assert!(text.contains(&title), "missing {title}");
            }
        }
    }

    #[tokio::test]
    async fn test_aggregate_order_and_one_lookup_per_section() {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_bundle()
            .times(ReportCategory::AGGREGATE_ORDER.len())
            .returning(|_| Ok(apple()));
        let service = StockKpiService::new(Arc::new(provider));
        let text = service.complete_stock_analysis("AAPL").await;

        let positions: Vec<usize> = ReportCategory::AGGREGATE_ORDER
            .iter()
            .map(|c| text.find(&format!("{} for AAPL:", c.title())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_json_output() {
        let mut provider = MockQuoteProvider::new();
        provider.expect_fetch_bundle().returning(|_| Ok(apple()));
        let service = StockKpiService::with_format(Arc::new(provider), OutputFormat::Json);

        let text = service.profitability_metrics("aapl").await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["sections"][1]["entries"][0]["value"]["display"], "28.45%");
    }

    #[test]
    fn test_catalog_is_static() {
        assert_eq!(
            StockKpiService::list_available_kpis(),
            StockKpiService::list_available_kpis()
        );
    }
}
