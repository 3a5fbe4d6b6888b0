//! Yahoo Finance chart API loader.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tickerscope_core::error::DataError;
use tickerscope_core::traits::SeriesLoader;
use tickerscope_core::types::{Bar, Series, Timeframe};
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) tickerscope/0.1";

/// Chart API configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// API root, e.g. `https://query1.finance.yahoo.com`
    pub base_url: String,
    /// Lookback range, e.g. `1d`, `5d`, `1mo`
    pub range: String,
    /// Bar interval
    pub interval: Timeframe,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            range: "1mo".to_string(),
            interval: Timeframe::Minute30,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

fn required<'a>(
    column: &'a Option<Vec<Option<f64>>>,
    name: &str,
    len: usize,
) -> Result<&'a [Option<f64>], DataError> {
    let values = column
        .as_deref()
        .ok_or_else(|| DataError::Malformed(format!("missing {} prices", name)))?;
    if values.len() != len {
        return Err(DataError::Malformed(format!(
            "{} has {} values for {} timestamps",
            name,
            values.len(),
            len
        )));
    }
    Ok(values)
}

/// Turn a decoded chart response into a series.
///
/// Rows with any missing price are dropped. When the API repeats a
/// timestamp (the still-forming bar), the later row wins.
fn parse_chart(symbol: &str, timeframe: Timeframe, envelope: ChartEnvelope) -> Result<Series, DataError> {
    if let Some(error) = envelope.chart.error {
        return Err(if error.code.eq_ignore_ascii_case("not found") {
            DataError::SymbolNotFound(symbol.to_string())
        } else {
            DataError::Provider(format!("{}: {}", error.code, error.description))
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or(DataError::NoDataAvailable)?;

    let timestamps = match result.timestamp {
        Some(ts) if !ts.is_empty() => ts,
        _ => return Err(DataError::NoDataAvailable),
    };

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| DataError::Malformed("missing quote block".into()))?;

    let len = timestamps.len();
    let opens = required(&quote.open, "open", len)?;
    let highs = required(&quote.high, "high", len)?;
    let lows = required(&quote.low, "low", len)?;
    let closes = required(&quote.close, "close", len)?;
    let volumes = quote.volume.as_deref().unwrap_or(&[]);

    let mut bars: Vec<Bar> = Vec::with_capacity(len);
    let mut skipped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (opens[i], highs[i], lows[i], closes[i])
        else {
            skipped += 1;
            continue;
        };
        let volume = volumes.get(i).copied().flatten().unwrap_or(0.0);
        let bar = Bar::new(ts * 1000, open, high, low, close, volume);

        match bars.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            _ => bars.push(bar),
        }
    }

    if skipped > 0 {
        debug!(symbol, skipped, "Dropped incomplete chart rows");
    }

    Series::from_unordered(symbol, timeframe, bars)
}

/// Chart API client.
pub struct YahooChartLoader {
    config: YahooConfig,
    client: Client,
}

impl YahooChartLoader {
    /// Create a new chart client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

#[async_trait]
impl SeriesLoader for YahooChartLoader {
    async fn load(&self, symbol: &str) -> Result<Series, DataError> {
        let url = self.chart_url(symbol);
        debug!(symbol, url = %url, range = %self.config.range, interval = %self.config.interval, "Fetching chart");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("range", self.config.range.as_str()),
                ("interval", self.config.interval.chart_interval()),
            ])
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        // Error responses still carry a chart envelope with the reason.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if status == StatusCode::NOT_FOUND => {
                return Err(DataError::SymbolNotFound(symbol.to_string()))
            }
            Err(_) if !status.is_success() => {
                warn!(symbol, %status, "Chart request failed");
                return Err(DataError::Provider(format!("{}: {}", status, body)));
            }
            Err(e) => return Err(DataError::Malformed(e.to_string())),
        };

        let series = parse_chart(symbol, self.config.interval, envelope)?;
        info!(symbol, bars = series.len(), "Fetched chart data");
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
