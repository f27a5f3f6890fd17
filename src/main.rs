use std::path::Path;

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod models;
mod services;

use api::coingecko::{ApiError, CoinGeckoClient};
use services::chart_service::{self, ChartError};
use services::filter_service;
use services::stats_service::{self, StatsError};

const COIN_ID: &str = "ethereum";
const VS_CURRENCY: &str = "usd";
const LOOKBACK_DAYS: u32 = 365;
const CHART_PATH: &str = "ethereum_price_chart.svg";

/// Any stage failure is fatal; no partial results are emitted.
#[derive(Debug, Error)]
enum AppError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("Statistics failed: {0}")]
    Stats(#[from] StatsError),
    #[error("Chart failed: {0}")]
    Chart(#[from] ChartError),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("ethwatch=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    if let Err(e) = run().await {
        error!("Run aborted: {}", e);
        std::process::exit(1);
    }
}

/// Linear pipeline: fetch -> original stats -> filter -> filtered stats
/// -> render. Nothing is persisted between stages or across runs.
async fn run() -> Result<(), AppError> {
    info!("Fetching data from CoinGecko...");
    let client = CoinGeckoClient::new();
    let series = client
        .fetch_market_chart(COIN_ID, VS_CURRENCY, LOOKBACK_DAYS)
        .await?;
    info!("Fetched {} daily price points", series.len());

    let original_stats = stats_service::calculate_statistics(&series)?;
    println!("Original average Ethereum price: ${:.2}", original_stats.mean);
    println!("Original median Ethereum price:  ${:.2}", original_stats.median);

    let filtered = filter_service::filter_outliers(&series, &original_stats);
    let filtered_stats = stats_service::calculate_statistics(&filtered)?;
    println!();
    println!("After removing outliers:");
    println!("Filtered average Ethereum price: ${:.2}", filtered_stats.mean);
    println!("Filtered median Ethereum price:  ${:.2}", filtered_stats.median);

    let chart_path = Path::new(CHART_PATH);
    chart_service::render_chart(&series, &original_stats, &filtered_stats, chart_path)?;
    info!("Chart written to {}", chart_path.display());
    chart_service::open_in_viewer(chart_path);

    Ok(())
}
