//! Command-line interface for stock-kpi
//!
//! # Usage
//!
//! ```bash
//! stock-kpi get_valuation_metrics AAPL
//! stock-kpi get_complete_stock_analysis msft --format json
//! stock-kpi list_available_kpis
//! stock-kpi --list-tools
//! stock-kpi --list-tools --format json
//! ```

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use kpi_stock::{KpiQuery, OutputFormat, StockConfig, StockKpiService, YahooFinanceClient};
use kpi_tools::ToolRegistry;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stock-kpi")]
#[command(about = "Stock KPIs from Yahoo Finance, formatted for assistants", long_about = None)]
struct Args {
    /// Tool to run, e.g. get_valuation_metrics
    tool: Option<String>,

    /// Ticker symbol, e.g. AAPL
    ticker: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Request timeout in seconds (overrides STOCK_KPI_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// List the available tools and exit (JSON definitions with --format json)
    #[arg(long)]
    list_tools: bool,
}

fn build_registry(args: &Args) -> anyhow::Result<ToolRegistry> {
    let mut builder = StockConfig::builder();
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    let config = builder.with_env().build().context("invalid configuration")?;

    let client = YahooFinanceClient::new(config)?;
    let service = Arc::new(StockKpiService::with_format(Arc::new(client), args.format.into()));

    let registry = ToolRegistry::new();
    kpi_stock::register_kpi_tools(&registry, service);
    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = kpi_utils::Config::from_env();
    kpi_utils::init_tracing(&app_config);

    let args = Args::parse();
    let registry = build_registry(&args)?;

    if args.list_tools {
        let definitions = registry.definitions();
        match args.format {
            Format::Text => {
                for def in &definitions {
                    println!("{:<30} {}", def.name, def.description);
                }
            },
            Format::Json => {
                let listing: Vec<_> = definitions.iter().map(|def| def.to_json()).collect();
                println!("{:#}", json!({ "tools": listing }));
            },
        }
        return Ok(());
    }

    let Some(tool) = args.tool.as_deref() else {
        bail!("no tool given; run with --list-tools to see the available tools");
    };
    let Some(query) = KpiQuery::from_name(tool) else {
        bail!("unknown tool {tool:?}; run with --list-tools to see the available tools");
    };

    let params = match (&args.ticker, query.takes_ticker()) {
        (Some(ticker), true) => json!({ "ticker": ticker }),
        (None, true) => bail!("{tool} requires a ticker argument"),
        (_, false) => json!({}),
    };

    info!(app = %app_config.app_name, tool, "Running tool");
    let output = registry.call(tool, params).await?;
    match output.as_str() {
        Some(text) => println!("{text}"),
        None => println!("{output:#}"),
    }

    Ok(())
}
