//! CSV series loader and writer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tickerscope_core::error::DataError;
use tickerscope_core::traits::SeriesLoader;
use tickerscope_core::types::{Bar, Series, Timeframe};
use tracing::{debug, info};

/// CSV row format.
///
/// Written with the `Datetime,Open,High,Low,Close,Volume` header; read back
/// with the common lowercase and provider spellings too. Extra columns
/// (dividends, splits, ...) are ignored.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(
        rename = "Datetime",
        alias = "Date",
        alias = "date",
        alias = "datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(rename = "Open", alias = "open")]
    open: f64,
    #[serde(rename = "High", alias = "high")]
    high: f64,
    #[serde(rename = "Low", alias = "low")]
    low: f64,
    #[serde(rename = "Close", alias = "close")]
    close: f64,
    #[serde(rename = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Parse the timestamp spellings found in staged CSV files.
///
/// Offsets are honoured; naive values are taken as UTC. Bare integers are
/// Unix seconds, or milliseconds when longer than 10 digits.
pub fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt.timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Some(dt) = NaiveDate::parse_from_str(date_str, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::Malformed(format!(
        "Could not parse date: {}",
        date_str
    )))
}

/// Staged CSV file name for a symbol.
fn staged_file_name(symbol: &str) -> String {
    format!("{}_data.csv", symbol)
}

/// Loads `{symbol}_data.csv` (or `{symbol}.csv`) from a directory.
#[derive(Debug, Clone)]
pub struct CsvSeriesLoader {
    dir: PathBuf,
    timeframe: Timeframe,
}

impl CsvSeriesLoader {
    /// Create a loader over a directory of staged files.
    pub fn new(dir: impl Into<PathBuf>, timeframe: Timeframe) -> Self {
        Self {
            dir: dir.into(),
            timeframe,
        }
    }

    fn locate(&self, symbol: &str) -> Option<PathBuf> {
        let lower = symbol.to_lowercase();
        let candidates = [
            self.dir.join(staged_file_name(symbol)),
            self.dir.join(staged_file_name(&lower)),
            self.dir.join(format!("{}.csv", symbol)),
            self.dir.join(format!("{}.csv", lower)),
        ];
        candidates.into_iter().find(|p| p.is_file())
    }

    /// Load bars from a specific path.
    pub fn load_from_path(&self, symbol: &str, path: &Path) -> Result<Series, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::Malformed(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| {
                DataError::Malformed(format!("{}: {}", path.display(), e))
            })?;

            let timestamp = parse_timestamp(&record.date)?;

            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        debug!(symbol, path = %path.display(), bars = bars.len(), "Read CSV bars");

        Series::from_unordered(symbol, self.timeframe, bars)
    }
}

#[async_trait]
impl SeriesLoader for CsvSeriesLoader {
    async fn load(&self, symbol: &str) -> Result<Series, DataError> {
        let path = self.locate(symbol).ok_or(DataError::NoDataAvailable)?;
        self.load_from_path(symbol, &path)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Writes series to `{symbol}_data.csv` in a directory.
#[derive(Debug, Clone)]
pub struct CsvSeriesWriter {
    dir: PathBuf,
}

impl CsvSeriesWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a series, replacing any previous file for the symbol.
    pub fn write(&self, series: &Series) -> Result<PathBuf, DataError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(staged_file_name(series.symbol()));

        let mut writer = WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|e| DataError::Serialization(e.to_string()))?;

        let format = if series.timeframe().is_intraday() {
            "%Y-%m-%d %H:%M:%S%:z"
        } else {
            "%Y-%m-%d"
        };

        for bar in series.iter() {
            let record = CsvRecord {
                date: bar.datetime().format(format).to_string(),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            };
            writer
                .serialize(record)
                .map_err(|e| DataError::Serialization(e.to_string()))?;
        }
        writer.flush()?;

        info!(symbol = series.symbol(), path = %path.display(), bars = series.len(), "Wrote CSV bars");
        Ok(path)
    }
}
