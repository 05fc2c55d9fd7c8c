//! Report rendering

use super::{Entry, Report, ReportCategory};
use crate::error::StockError;
use serde_json::json;
use std::fmt::Write;

/// Separator under single-category titles
pub const SEPARATOR_WIDTH: usize = 50;

/// Separator around the complete analysis
pub const AGGREGATE_SEPARATOR_WIDTH: usize = 76;

const SEPARATOR_CHAR: char = '━';

/// Result of one category inside a complete analysis
#[derive(Debug)]
pub struct CategoryOutcome {
    pub category: ReportCategory,
    pub result: Result<Report, StockError>,
}

/// Renders reports and lookup failures into the string handed to the client
pub trait ReportFormatter: Send + Sync {
    fn format_report(&self, report: &Report) -> String;
    fn format_error(&self, category: ReportCategory, symbol: &str, error: &StockError) -> String;
    fn format_aggregate(&self, symbol: &str, outcomes: &[CategoryOutcome]) -> String;
}

/// Output format selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Build the formatter for this output format
    pub fn formatter(self) -> Box<dyn ReportFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

/// Assistant-facing text layout
///
/// ```text
/// Valuation Metrics for AAPL:
/// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
/// Market Cap: $2,876,542,000,000.00
///
/// Price Ratios:
///   • P/E Ratio (TTM): 28.12
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    fn separator(width: usize) -> String {
        std::iter::repeat_n(SEPARATOR_CHAR, width).collect()
    }
}

impl ReportFormatter for TextFormatter {
    fn format_report(&self, report: &Report) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} for {}:", report.title, report.symbol);
        out.push_str(&Self::separator(SEPARATOR_WIDTH));

        for (i, section) in report.sections.iter().enumerate() {
            out.push('\n');
            if i > 0 {
                out.push('\n');
            }

            let bullet = if let Some(header) = &section.header {
                let _ = write!(out, "{header}:");
                out.push('\n');
                "  • "
            } else {
                ""
            };

            let lines: Vec<String> = section
                .entries
                .iter()
                .map(|entry| match entry {
                    Entry::Metric { label, value } => format!("{bullet}{label}: {}", value.display()),
                    Entry::Text { text } => text.clone(),
                })
                .collect();
            out.push_str(&lines.join("\n"));
        }

        out
    }

    fn format_error(&self, category: ReportCategory, symbol: &str, error: &StockError) -> String {
        format!("Error fetching {} for {symbol}: {error}", category.error_label())
    }

    fn format_aggregate(&self, symbol: &str, outcomes: &[CategoryOutcome]) -> String {
        let separator = Self::separator(AGGREGATE_SEPARATOR_WIDTH);
        let mut out = format!("🏢 COMPLETE STOCK ANALYSIS: {symbol}\n{separator}");

        for outcome in outcomes {
            let body = match &outcome.result {
                Ok(report) => self.format_report(report),
                Err(err) => self.format_error(outcome.category, symbol, err),
            };
            out.push_str("\n\n");
            out.push_str(&body);
        }

        out.push_str("\n\n");
        out.push_str(&separator);
        out
    }
}

/// Machine-readable rendering of the same structure
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    fn error_value(category: ReportCategory, symbol: &str, error: &StockError) -> serde_json::Value {
        json!({
            "symbol": symbol,
            "category": category,
            "error": error.to_string(),
        })
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> String {
        format!("{:#}", json!(report))
    }

    fn format_error(&self, category: ReportCategory, symbol: &str, error: &StockError) -> String {
        format!("{:#}", Self::error_value(category, symbol, error))
    }

    fn format_aggregate(&self, symbol: &str, outcomes: &[CategoryOutcome]) -> String {
        let sections: Vec<_> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => json!(report),
                Err(err) => Self::error_value(outcome.category, symbol, err),
            })
            .collect();

        format!("{:#}", json!({ "symbol": symbol, "sections": sections }))
    }
}
