//! Per-category field tables
//!
//! Each builder picks its fields out of a [`StockBundle`] in a fixed order.
//! Candidate key lists cover fields the provider exposes under more than one
//! name; the first present one wins.

use super::{Report, ReportCategory, Section};
use crate::bundle::StockBundle;
use crate::format::{MetricKind, MetricValue, PercentScale};
use crate::ticker::Ticker;

/// Longest business summary kept in the overview, in characters
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Placeholder for a missing business summary
pub const NO_DESCRIPTION: &str = "No description available";

/// Build the report for `category` from one bundle
pub fn build(category: ReportCategory, ticker: &Ticker, bundle: &StockBundle) -> Report {
    let report = Report::new(category, ticker);
    match category {
        ReportCategory::Overview => overview(report, bundle),
        ReportCategory::Valuation => valuation(report, bundle),
        ReportCategory::Profitability => profitability(report, bundle),
        ReportCategory::Growth => growth(report, bundle),
        ReportCategory::FinancialHealth => financial_health(report, bundle),
        ReportCategory::Dividends => dividends(report, bundle),
        ReportCategory::Trading => trading(report, bundle),
        ReportCategory::Analyst => analyst(report, bundle),
    }
}

fn currency(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Currency, b.number(keys))
}

fn ratio(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Ratio, b.number(keys))
}

fn count(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Count, b.number(keys))
}

fn fraction(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Percent(PercentScale::Fraction), b.number(keys))
}

fn percent(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Percent(PercentScale::Percent), b.number(keys))
}

fn date(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::number(MetricKind::Date, b.number(keys))
}

fn text(b: &StockBundle, keys: &[&str]) -> MetricValue {
    MetricValue::text(b.text(keys))
}

/// First `max_chars` characters followed by `...`
fn truncate_summary(summary: &str, max_chars: usize) -> String {
    let truncated: String = summary.chars().take(max_chars).collect();
    format!("{truncated}...")
}

fn overview(report: Report, b: &StockBundle) -> Report {
    let summary = b
        .text(&["longBusinessSummary"])
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    report
        .section(
            Section::plain()
                .metric("Company Name", text(b, &["longName", "shortName"]))
                .metric("Sector", text(b, &["sector"]))
                .metric("Industry", text(b, &["industry"]))
                .metric("Country", text(b, &["country"]))
                .metric("Website", text(b, &["website"]))
                .metric("Employees", count(b, &["fullTimeEmployees"])),
        )
        .section(
            Section::titled("Business Summary").text(truncate_summary(&summary, SUMMARY_MAX_CHARS)),
        )
}

fn valuation(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::plain()
                .metric("Market Cap", currency(b, &["marketCap"]))
                .metric("Enterprise Value", currency(b, &["enterpriseValue"])),
        )
        .section(
            Section::titled("Price Ratios")
                .metric("P/E Ratio (TTM)", ratio(b, &["trailingPE"]))
                .metric("Forward P/E", ratio(b, &["forwardPE"]))
                .metric("P/B Ratio", ratio(b, &["priceToBook"]))
                .metric("P/S Ratio (TTM)", ratio(b, &["priceToSalesTrailing12Months"]))
                .metric("PEG Ratio", ratio(b, &["pegRatio", "trailingPegRatio"])),
        )
        .section(
            Section::titled("Enterprise Ratios")
                .metric("EV/Revenue", ratio(b, &["enterpriseToRevenue"]))
                .metric("EV/EBITDA", ratio(b, &["enterpriseToEbitda"])),
        )
        .section(Section::plain().metric("Book Value per Share", currency(b, &["bookValue"])))
}

fn financial_health(report: Report, b: &StockBundle) -> Report {
    let cash = b.number(&["totalCash"]);
    let debt = b.number(&["totalDebt"]);
    // A missing side counts as zero; with neither side there is nothing to net.
    let net_cash = match (cash, debt) {
        (None, None) => None,
        (cash, debt) => Some(cash.unwrap_or(0.0) - debt.unwrap_or(0.0)),
    };

    report
        .section(
            Section::titled("Balance Sheet")
                .metric("Total Cash", currency(b, &["totalCash"]))
                .metric("Total Debt", currency(b, &["totalDebt"]))
                .metric("Net Cash", MetricValue::number(MetricKind::Currency, net_cash)),
        )
        .section(
            Section::titled("Liquidity Ratios")
                .metric("Current Ratio", ratio(b, &["currentRatio"]))
                .metric("Quick Ratio", ratio(b, &["quickRatio"])),
        )
        .section(
            Section::titled("Debt Ratios")
                .metric("Debt-to-Equity", ratio(b, &["debtToEquity"]))
                .metric("Total Cash per Share", currency(b, &["totalCashPerShare"])),
        )
        .section(
            Section::titled("Other Metrics")
                .metric("Working Capital", currency(b, &["workingCapital"]))
                .metric("Free Cash Flow", currency(b, &["freeCashflow"])),
        )
}

fn profitability(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::titled("Revenue & Earnings")
                .metric("Total Revenue (TTM)", currency(b, &["totalRevenue"]))
                .metric("Net Income (TTM)", currency(b, &["netIncomeToCommon"]))
                .metric("EBITDA", currency(b, &["ebitda"])),
        )
        .section(
            Section::titled("Margins")
                .metric("Profit Margin", fraction(b, &["profitMargins"]))
                .metric("Operating Margin", fraction(b, &["operatingMargins"]))
                .metric("Gross Margin", fraction(b, &["grossMargins"]))
                .metric("EBITDA Margin", fraction(b, &["ebitdaMargins"])),
        )
        .section(
            Section::titled("Returns")
                .metric("Return on Equity (ROE)", fraction(b, &["returnOnEquity"]))
                .metric("Return on Assets (ROA)", fraction(b, &["returnOnAssets"])),
        )
        .section(
            Section::titled("Per Share Metrics")
                .metric("EPS (TTM)", currency(b, &["trailingEps"]))
                .metric("Forward EPS", currency(b, &["forwardEps"]))
                .metric("Revenue per Share", currency(b, &["revenuePerShare"])),
        )
}

fn growth(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::titled("Historical Growth")
                .metric("Revenue Growth (TTM)", fraction(b, &["revenueGrowth"]))
                .metric("Earnings Growth", fraction(b, &["earningsGrowth"]))
                .metric("Quarterly Revenue Growth", fraction(b, &["revenueQuarterlyGrowth"]))
                .metric("Quarterly Earnings Growth", fraction(b, &["earningsQuarterlyGrowth"])),
        )
        .section(
            Section::titled("Analyst Estimates")
                .metric("Next Year EPS Growth", fraction(b, &["earningsGrowth"]))
                .metric("Next 5 Years Growth", fraction(b, &["earningsGrowth"])),
        )
        .section(
            Section::titled("Book Value Growth")
                .metric("Book Value", currency(b, &["bookValue"]))
                .metric("Tangible Book Value", currency(b, &["tangibleBookValue"])),
        )
}

fn dividends(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::titled("Dividend Information")
                .metric(
                    "Annual Dividend Rate",
                    currency(b, &["dividendRate", "trailingAnnualDividendRate"]),
                )
                .metric(
                    "Dividend Yield",
                    fraction(b, &["dividendYield", "trailingAnnualDividendYield"]),
                )
                .metric("5-Year Avg Dividend Yield", percent(b, &["fiveYearAvgDividendYield"]))
                .metric("Payout Ratio", fraction(b, &["payoutRatio"]))
                .metric("Ex-Dividend Date", date(b, &["exDividendDate"]))
                .metric("Last Dividend Date", date(b, &["lastDividendDate"])),
        )
        .section(
            Section::titled("Share Information")
                .metric("Shares Outstanding", count(b, &["sharesOutstanding"]))
                .metric("Float", count(b, &["floatShares"]))
                .metric("Shares Short", count(b, &["sharesShort"]))
                .metric("Short Ratio", ratio(b, &["shortRatio"]))
                .metric("Short % of Float", fraction(b, &["shortPercentOfFloat"])),
        )
        .section(
            Section::titled("Share Buybacks")
                .metric("Shares Short Prior Month", count(b, &["sharesShortPriorMonth"])),
        )
}

fn trading(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::titled("Current Price Information")
                .metric("Current Price", currency(b, &["regularMarketPrice", "currentPrice"]))
                .metric(
                    "Previous Close",
                    currency(b, &["regularMarketPreviousClose", "previousClose"]),
                )
                .metric("Open", currency(b, &["regularMarketOpen", "open"]))
                .metric("Day High", currency(b, &["regularMarketDayHigh", "dayHigh"]))
                .metric("Day Low", currency(b, &["regularMarketDayLow", "dayLow"])),
        )
        .section(
            Section::titled("Price Ranges")
                .metric("52-Week High", currency(b, &["fiftyTwoWeekHigh"]))
                .metric("52-Week Low", currency(b, &["fiftyTwoWeekLow"]))
                .metric("50-Day Average", currency(b, &["fiftyDayAverage"]))
                .metric("200-Day Average", currency(b, &["twoHundredDayAverage"])),
        )
        .section(
            Section::titled("Volume & Liquidity")
                .metric("Volume", count(b, &["regularMarketVolume", "volume"]))
                .metric(
                    "Average Volume (10d)",
                    count(b, &["averageVolume10days", "averageDailyVolume10Day"]),
                )
                .metric("Average Volume (3m)", count(b, &["averageVolume"])),
        )
        .section(
            Section::titled("Risk Metrics")
                .metric("Beta", ratio(b, &["beta", "beta3Year"]))
                .metric("52-Week Change", fraction(b, &["52WeekChange"])),
        )
}

fn analyst(report: Report, b: &StockBundle) -> Report {
    report
        .section(
            Section::titled("Price Targets")
                .metric("Target High Price", currency(b, &["targetHighPrice"]))
                .metric("Target Low Price", currency(b, &["targetLowPrice"]))
                .metric("Target Mean Price", currency(b, &["targetMeanPrice"]))
                .metric("Target Median Price", currency(b, &["targetMedianPrice"])),
        )
        .section(
            Section::titled("Recommendations")
                .metric("Recommendation Mean", ratio(b, &["recommendationMean"]))
                .metric("Recommendation Key", text(b, &["recommendationKey"]))
                .metric("Number of Analyst Opinions", count(b, &["numberOfAnalystOpinions"])),
        )
        .section(
            Section::titled("Estimates")
                .metric("Current Quarter Estimate", fraction(b, &["earningsQuarterlyGrowth"]))
                .metric("Next Quarter Estimate", fraction(b, &["earningsGrowth"])),
        )
}
