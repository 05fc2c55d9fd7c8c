//! Tool wrappers around [`StockKpiService`]

use async_trait::async_trait;
use kpi_tools::{Result as ToolResult, Tool, ToolError, ToolRegistry};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::report::ReportCategory;
use crate::service::StockKpiService;

/// The eleven KPI queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiQuery {
    MarketCap,
    Category(ReportCategory),
    CompleteAnalysis,
    ListKpis,
}

impl KpiQuery {
    /// Every query, in catalog order
    pub fn all() -> Vec<KpiQuery> {
        let mut queries = vec![KpiQuery::MarketCap];
        queries.extend(ReportCategory::AGGREGATE_ORDER.map(KpiQuery::Category));
        queries.push(KpiQuery::CompleteAnalysis);
        queries.push(KpiQuery::ListKpis);
        queries
    }

    /// Tool name
    pub fn name(self) -> &'static str {
        match self {
            Self::MarketCap => "get_market_cap",
            Self::Category(category) => category.tool_name(),
            Self::CompleteAnalysis => "get_complete_stock_analysis",
            Self::ListKpis => "list_available_kpis",
        }
    }

    /// Tool description shown to the assistant
    pub fn description(self) -> &'static str {
        match self {
            Self::MarketCap => "Retrieve the current market capitalization for a stock ticker.",
            Self::Category(category) => category.description(),
            Self::CompleteAnalysis => {
                "Get a comprehensive analysis combining all KPI categories: overview, valuation, \
                 profitability, growth, financial health, dividends, trading and analyst data."
            },
            Self::ListKpis => {
                "List all available KPIs and the functions that retrieve them. Takes no parameters."
            },
        }
    }

    /// Whether the query takes a `ticker` parameter
    pub fn takes_ticker(self) -> bool {
        !matches!(self, Self::ListKpis)
    }

    /// Look a query up by tool name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|q| q.name() == name)
    }
}

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

/// One KPI query exposed through the [`Tool`] trait
pub struct KpiTool {
    query: KpiQuery,
    service: Arc<StockKpiService>,
}

impl KpiTool {
    /// Create a tool for `query`
    pub fn new(query: KpiQuery, service: Arc<StockKpiService>) -> Self {
        Self { query, service }
    }

    /// Run the query; the output is always report text
    pub async fn run(&self, ticker: &str) -> String {
        let service = &self.service;
        match self.query {
            KpiQuery::MarketCap => service.market_cap(ticker).await,
            KpiQuery::Category(category) => service.category_text(category, ticker).await,
            KpiQuery::CompleteAnalysis => service.complete_stock_analysis(ticker).await,
            KpiQuery::ListKpis => StockKpiService::list_available_kpis().to_string(),
        }
    }
}

#[async_trait]
impl Tool for KpiTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        if !self.query.takes_ticker() {
            return Ok(Value::String(self.run("").await));
        }

        let params: TickerParams =
            serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters {
                tool: self.query.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Value::String(self.run(&params.ticker).await))
    }

    fn name(&self) -> &str {
        self.query.name()
    }

    fn description(&self) -> &str {
        self.query.description()
    }

    fn input_schema(&self) -> Value {
        if self.query.takes_ticker() {
            json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "Stock ticker symbol (e.g., 'AAPL', 'GOOGL', 'MSFT')"
                    }
                },
                "required": ["ticker"]
            })
        } else {
            json!({ "type": "object", "properties": {} })
        }
    }
}

/// Register all eleven KPI tools
pub fn register_kpi_tools(registry: &ToolRegistry, service: Arc<StockKpiService>) {
    for query in KpiQuery::all() {
        registry.register(Arc::new(KpiTool::new(query, Arc::clone(&service))));
    }
}
