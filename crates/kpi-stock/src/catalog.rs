//! Static catalog of the available KPIs and query functions

/// Text returned by `list_available_kpis`
pub const KPI_CATALOG: &str = "📊 AVAILABLE STOCK KPIs & METRICS
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

🏢 COMPANY OVERVIEW
• Company Name, Sector, Industry
• Country, Website, Employee Count
• Business Summary

💰 VALUATION METRICS
• Market Capitalization
• Enterprise Value
• P/E Ratio (Trailing & Forward)
• Price-to-Book Ratio
• Price-to-Sales Ratio
• PEG Ratio
• EV/Revenue, EV/EBITDA

📈 PROFITABILITY METRICS
• Total Revenue (TTM)
• Net Income
• EBITDA
• Profit Margins (Gross, Operating, Net, EBITDA)
• Return on Equity (ROE)
• Return on Assets (ROA)
• Earnings per Share (EPS)
• Revenue per Share

🚀 GROWTH METRICS
• Revenue Growth
• Earnings Growth
• Quarterly Growth Rates
• Book Value Growth

💎 FINANCIAL HEALTH
• Current Ratio
• Quick Ratio
• Debt-to-Equity Ratio
• Total Cash & Debt, Net Cash
• Working Capital
• Free Cash Flow

💸 DIVIDEND & SHAREHOLDER RETURNS
• Dividend Yield (Current & 5-Year Average)
• Dividend Rate
• Payout Ratio
• Ex-Dividend Date
• Shares Outstanding, Float
• Short Interest

📊 TRADING METRICS
• Current Price, Open, High, Low
• 52-Week High/Low
• Moving Averages (50-day, 200-day)
• Volume Metrics
• Beta (Volatility)

🎯 ANALYST DATA
• Price Targets (High, Low, Mean, Median)
• Analyst Recommendations
• Number of Analyst Opinions
• Earnings Estimates

🔧 AVAILABLE FUNCTIONS:
• get_market_cap(ticker) - Market capitalization in one sentence
• get_company_overview(ticker) - Company basic information
• get_valuation_metrics(ticker) - All valuation ratios
• get_financial_health(ticker) - Balance sheet & liquidity metrics
• get_profitability_metrics(ticker) - Profitability & efficiency ratios
• get_growth_metrics(ticker) - Growth rates & estimates
• get_dividend_metrics(ticker) - Dividend & shareholder return data
• get_trading_metrics(ticker) - Price & volume data
• get_analyst_data(ticker) - Analyst recommendations & targets
• get_complete_stock_analysis(ticker) - Comprehensive analysis with all KPIs
• list_available_kpis() - This function listing all available metrics

Each function provides detailed, formatted output for the specified category of metrics.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportCategory;

    #[test]
    fn test_catalog_lists_every_function() {
        let mut names: Vec<&str> = ReportCategory::AGGREGATE_ORDER
            .iter()
            .map(|c| c.tool_name())
            .collect();
        names.extend(["get_market_cap", "get_complete_stock_analysis", "list_available_kpis"]);

        assert_eq!(names.len(), 11);
        for name in names {
            assert!(KPI_CATALOG.contains(&format!("{name}(")), "missing {name}");
        }
    }
}
