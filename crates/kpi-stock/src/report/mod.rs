//! Structured reports and their rendering
//!
//! Every KPI query builds a [`Report`]: an ordered list of sections, each an
//! ordered list of labeled metrics. Text (the assistant-facing layout) and JSON
//! are two renderings of the same structure, see [`formatter`].

pub mod categories;
pub mod formatter;

use crate::format::MetricValue;
use crate::ticker::Ticker;
use serde::Serialize;

pub use formatter::{CategoryOutcome, JsonFormatter, OutputFormat, ReportFormatter, TextFormatter};

/// Report categories, one per per-category query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Overview,
    Valuation,
    Profitability,
    Growth,
    FinancialHealth,
    Dividends,
    Trading,
    Analyst,
}

impl ReportCategory {
    /// Order in which the complete analysis runs the categories
    pub const AGGREGATE_ORDER: [ReportCategory; 8] = [
        ReportCategory::Overview,
        ReportCategory::Valuation,
        ReportCategory::Profitability,
        ReportCategory::Growth,
        ReportCategory::FinancialHealth,
        ReportCategory::Dividends,
        ReportCategory::Trading,
        ReportCategory::Analyst,
    ];

    /// Tool name the category is exposed under
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Overview => "get_company_overview",
            Self::Valuation => "get_valuation_metrics",
            Self::Profitability => "get_profitability_metrics",
            Self::Growth => "get_growth_metrics",
            Self::FinancialHealth => "get_financial_health",
            Self::Dividends => "get_dividend_metrics",
            Self::Trading => "get_trading_metrics",
            Self::Analyst => "get_analyst_data",
        }
    }

    /// Title used on the first line of the report
    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Company Overview",
            Self::Valuation => "Valuation Metrics",
            Self::Profitability => "Profitability Metrics",
            Self::Growth => "Growth Metrics",
            Self::FinancialHealth => "Financial Health",
            Self::Dividends => "Dividend & Shareholder Returns",
            Self::Trading => "Trading & Market Metrics",
            Self::Analyst => "Analyst Data",
        }
    }

    /// Lower-case phrase used in error messages
    pub fn error_label(self) -> &'static str {
        match self {
            Self::Overview => "company overview",
            Self::Valuation => "valuation metrics",
            Self::Profitability => "profitability metrics",
            Self::Growth => "growth metrics",
            Self::FinancialHealth => "financial health",
            Self::Dividends => "dividend metrics",
            Self::Trading => "trading metrics",
            Self::Analyst => "analyst data",
        }
    }

    /// Short description for tool listings
    pub fn description(self) -> &'static str {
        match self {
            Self::Overview => {
                "Get basic company information: name, sector, industry, country, website, \
                 employee count and a business summary."
            },
            Self::Valuation => {
                "Get valuation metrics and ratios: market cap, enterprise value, P/E, P/B, \
                 P/S, PEG, EV/Revenue, EV/EBITDA and book value per share."
            },
            Self::Profitability => {
                "Get profitability and efficiency metrics: revenue, net income, EBITDA, \
                 margins, ROE, ROA and per-share earnings."
            },
            Self::Growth => {
                "Get growth metrics: revenue and earnings growth, quarterly growth and book value."
            },
            Self::FinancialHealth => {
                "Get financial health indicators: cash, debt, net cash, liquidity ratios, \
                 debt-to-equity, working capital and free cash flow."
            },
            Self::Dividends => {
                "Get dividend and shareholder return metrics: dividend rate and yield, payout \
                 ratio, dividend dates, share counts and short interest."
            },
            Self::Trading => {
                "Get trading metrics: current price, daily range, 52-week range, moving \
                 averages, volume, beta and 52-week change."
            },
            Self::Analyst => {
                "Get analyst recommendations, price targets and earnings estimates."
            },
        }
    }
}

/// One line inside a section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    /// `Label: value`
    Metric { label: String, value: MetricValue },
    /// Free text shown as-is
    Text { text: String },
}

/// An optionally headed group of entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub entries: Vec<Entry>,
}

impl Section {
    /// Section with a header; its metrics render as bullets
    pub fn titled(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            entries: Vec::new(),
        }
    }

    /// Section without a header; its metrics render as plain lines
    pub fn plain() -> Self {
        Self {
            header: None,
            entries: Vec::new(),
        }
    }

    /// Append a labeled metric
    pub fn metric(mut self, label: impl Into<String>, value: MetricValue) -> Self {
        self.entries.push(Entry::Metric {
            label: label.into(),
            value,
        });
        self
    }

    /// Append a block of free text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.entries.push(Entry::Text { text: text.into() });
        self
    }
}

/// A complete single-category report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub symbol: String,
    pub category: ReportCategory,
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    /// Empty report for `ticker`
    pub fn new(category: ReportCategory, ticker: &Ticker) -> Self {
        Self {
            symbol: ticker.to_string(),
            category,
            title: category.title().to_string(),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

#[cfg(test)]
impl Report {
    /// All metrics in display order
    pub(crate) fn metrics(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.sections.iter().flat_map(|s| &s.entries).filter_map(|entry| match entry {
            Entry::Metric { label, value } => Some((label.as_str(), value)),
            Entry::Text { .. } => None,
        })
    }

    /// Find a metric by label
    pub(crate) fn metric(&self, label: &str) -> Option<&MetricValue> {
        self.metrics().find(|(l, _)| *l == label).map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MetricKind;

    #[test]
    fn test_category_names_are_distinct() {
        let names: std::collections::BTreeSet<&str> = ReportCategory::AGGREGATE_ORDER
            .iter()
            .map(|c| c.tool_name())
            .collect();
        assert_eq!(names.len(), ReportCategory::AGGREGATE_ORDER.len());

        for category in ReportCategory::AGGREGATE_ORDER {
            assert!(category.tool_name().starts_with("get_"));
            assert!(!category.description().is_empty());
        }
    }

    #[test]
    fn test_report_metric_lookup() {
        let ticker = Ticker::parse("msft").unwrap();
        let report = Report::new(ReportCategory::Valuation, &ticker)
            .section(
                Section::plain()
                    .metric("Market Cap", MetricValue::number(MetricKind::Currency, Some(1.0))),
            )
            .section(Section::titled("Price Ratios").metric(
                "PEG Ratio",
                MetricValue::number(MetricKind::Ratio, None),
            ));

        assert_eq!(report.symbol, "MSFT");
        assert_eq!(report.title, "Valuation Metrics");
        assert_eq!(report.metrics().count(), 2);
        assert!(report.metric("PEG Ratio").unwrap().is_missing());
        assert!(report.metric("Nope").is_none());
    }
}
