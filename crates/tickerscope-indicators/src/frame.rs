//! Indicator columns aligned with a series.

use serde::Serialize;
use std::collections::BTreeMap;
use tickerscope_core::error::IndicatorError;
use tickerscope_core::traits::Indicator;
use tickerscope_core::types::Series;
use tracing::debug;

use crate::{Rsi, Sma};

/// Moving averages and RSI over a series' closes.
///
/// Every column has exactly one slot per bar. A slot is `None` until the
/// indicator has enough history; short series are not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    len: usize,
    moving_averages: BTreeMap<usize, Vec<Option<f64>>>,
    rsi_window: usize,
    rsi: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Compute one SMA per window and one RSI column.
    pub fn compute(
        series: &Series,
        ma_windows: &[usize],
        rsi_window: usize,
    ) -> Result<Self, IndicatorError> {
        if let Some(&zero) = ma_windows.iter().find(|&&w| w == 0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "moving average window must be greater than 0, got {}",
                zero
            )));
        }
        if rsi_window == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI window must be greater than 0".into(),
            ));
        }

        let closes = series.closes();

        let moving_averages: BTreeMap<usize, Vec<Option<f64>>> = ma_windows
            .iter()
            .map(|&window| (window, Sma::new(window).calculate_aligned(&closes)))
            .collect();
        let rsi = Rsi::new(rsi_window).calculate_aligned(&closes);

        debug!(
            symbol = series.symbol(),
            bars = closes.len(),
            ma_windows = ?ma_windows,
            rsi_window,
            "Computed indicator frame"
        );

        Ok(Self {
            len: closes.len(),
            moving_averages,
            rsi_window,
            rsi,
        })
    }

    /// Number of slots in every column.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// SMA column for a window, if that window was computed.
    pub fn moving_average(&self, window: usize) -> Option<&[Option<f64>]> {
        self.moving_averages.get(&window).map(Vec::as_slice)
    }

    /// RSI column.
    pub fn rsi(&self) -> &[Option<f64>] {
        &self.rsi
    }

    /// All columns keyed by name (`MA_5`, `RSI_14`, ...).
    pub fn columns(&self) -> BTreeMap<String, Vec<Option<f64>>> {
        let mut columns: BTreeMap<String, Vec<Option<f64>>> = self
            .moving_averages
            .iter()
            .map(|(window, values)| (format!("MA_{}", window), values.clone()))
            .collect();
        columns.insert(format!("RSI_{}", self.rsi_window), self.rsi.clone());
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerscope_core::types::{Bar, Timeframe};

    fn series_from_closes(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 3_600_000, c, c + 1.0, c - 1.0, c, 1000.0))
            .collect();
        Series::new("TEST", Timeframe::Hour1, bars).unwrap()
    }

    #[test]
    fn test_columns_are_aligned() {
        let closes: Vec<f64> = (0..70).map(|i| 100.0 + i as f64).collect();
        let frame = IndicatorFrame::compute(&series_from_closes(&closes), &[5, 30, 60], 14).unwrap();

        assert_eq!(frame.len(), 70);
        for window in [5, 30, 60] {
            let column = frame.moving_average(window).unwrap();
            assert_eq!(column.len(), 70);
            assert!(column[window - 2].is_none());
            assert!(column[window - 1].is_some());
        }
        assert_eq!(frame.rsi().len(), 70);
        assert!(frame.rsi()[13].is_none());
        assert_eq!(frame.rsi()[14], Some(100.0));
    }

    #[test]
    fn test_short_series_stays_absent() {
        let frame = IndicatorFrame::compute(&series_from_closes(&[1.0, 2.0, 3.0]), &[5, 30], 14).unwrap();

        assert!(frame.moving_average(5).unwrap().iter().all(Option::is_none));
        assert!(frame.moving_average(30).unwrap().iter().all(Option::is_none));
        assert!(frame.rsi().iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_window_rejected() {
        let series = series_from_closes(&[1.0, 2.0]);

        assert!(IndicatorFrame::compute(&series, &[0, 5], 14).is_err());
        assert!(IndicatorFrame::compute(&series, &[5], 0).is_err());
    }

    #[test]
    fn test_column_names() {
        let frame = IndicatorFrame::compute(&series_from_closes(&[1.0, 2.0]), &[60, 5], 14).unwrap();
        let names: Vec<String> = frame.columns().into_keys().collect();

        assert_eq!(names, vec!["MA_5", "MA_60", "RSI_14"]);
    }
}
