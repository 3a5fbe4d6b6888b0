//! CLI command implementations.

pub mod analyze;
pub mod fetch;
pub mod validate;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tickerscope_config::{DataConfig, DataSourceKind};
use tickerscope_core::traits::SeriesLoader;
use tickerscope_data::{CsvSeriesLoader, YahooChartLoader, YahooConfig};

/// Chart API settings from the `data` section.
pub fn yahoo_config(data: &DataConfig) -> YahooConfig {
    YahooConfig {
        base_url: data.base_url.clone(),
        range: data.range.clone(),
        interval: data.interval,
        timeout: Duration::from_secs(data.timeout_secs),
    }
}

/// Build the configured series loader.
pub fn build_loader(data: &DataConfig) -> Result<Arc<dyn SeriesLoader>> {
    let loader: Arc<dyn SeriesLoader> = match data.source {
        DataSourceKind::Yahoo => Arc::new(
            YahooChartLoader::new(yahoo_config(data)).context("Failed to create chart client")?,
        ),
        DataSourceKind::Csv => Arc::new(CsvSeriesLoader::new(&data.csv_dir, data.interval)),
    };
    Ok(loader)
}
