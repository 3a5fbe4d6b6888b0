//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{datetime_from_millis, Timeframe};
use crate::error::DataError;

/// One sampled observation.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        datetime_from_millis(self.timestamp)
    }

    /// Check that every price field holds a finite number.
    #[inline]
    pub fn has_finite_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
    }
}

/// Ordered, immutable bar history for one ticker.
///
/// Construction enforces the series invariants: at least one bar, strictly
/// increasing timestamps and finite prices. Nothing downstream re-checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    symbol: String,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series from bars already ordered by ascending timestamp.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        if let Some(bad) = bars.iter().find(|b| !b.has_finite_prices()) {
            return Err(DataError::Malformed(format!(
                "{}: non-finite price at timestamp {}",
                symbol, bad.timestamp
            )));
        }

        if let Some(pair) = bars.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(DataError::Malformed(format!(
                "{}: timestamps not strictly increasing ({} then {})",
                symbol, pair[0].timestamp, pair[1].timestamp
            )));
        }

        Ok(Self {
            symbol,
            timeframe,
            bars,
        })
    }

    /// Build a series from bars in any order.
    ///
    /// Bars are sorted by timestamp; duplicated timestamps are still rejected.
    pub fn from_unordered(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        mut bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        bars.sort_by_key(|b| b.timestamp);
        Self::new(symbol, timeframe, bars)
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bar timeframe.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for slice-like ergonomics.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract timestamps as a vector.
    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
