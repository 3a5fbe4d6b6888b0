//! Fetch command implementation.

use anyhow::{Context, Result};
use tickerscope_config::AppConfig;
use tickerscope_core::traits::SeriesLoader;
use tickerscope_data::{CsvSeriesWriter, YahooChartLoader};
use tracing::{info, warn};

use super::yahoo_config;
use crate::cli::{normalize_tickers, FetchArgs};

pub async fn run(args: FetchArgs, config: AppConfig) -> Result<()> {
    let tickers = if args.tickers.is_empty() {
        normalize_tickers(&config.run.tickers)
    } else {
        normalize_tickers(&args.tickers)
    };
    if tickers.is_empty() {
        anyhow::bail!("No tickers given (use --tickers or run.tickers)");
    }

    let out_dir = args.out.unwrap_or_else(|| config.data.csv_dir.clone());
    let loader = YahooChartLoader::new(yahoo_config(&config.data))
        .context("Failed to create chart client")?;
    let writer = CsvSeriesWriter::new(&out_dir);

    info!("Fetching {} tickers into {:?}", tickers.len(), out_dir);

    let mut written = 0;
    for ticker in &tickers {
        let series = match loader.load(ticker).await {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "fetch failed");
                println!("{}: failed ({})", ticker, e);
                continue;
            }
        };

        match writer.write(&series) {
            Ok(path) => {
                println!("{}: {} bars -> {}", ticker, series.len(), path.display());
                written += 1;
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "write failed");
                println!("{}: failed ({})", ticker, e);
            }
        }
    }

    if written == 0 {
        anyhow::bail!("No ticker was fetched");
    }
    Ok(())
}
