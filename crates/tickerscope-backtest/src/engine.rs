//! Per-ticker analysis engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tickerscope_core::error::{AnalysisError, AnalysisResult};
use tickerscope_core::types::{AnalysisReport, Series};
use tickerscope_indicators::IndicatorFrame;
use tickerscope_strategies::{CrossoverConfig, CrossoverSignals};
use tracing::{debug, info};

use crate::report::build_report;
use crate::statistics::evaluate_performance;
use crate::trades::extract_trades;

/// Analysis parameters shared by every ticker in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Moving average windows reported in the output
    pub ma_windows: Vec<usize>,
    /// Windows driving the crossover signals
    pub crossover: CrossoverConfig,
    /// RSI window
    pub rsi_window: usize,
    /// Starting cash balance for the performance replay
    pub starting_balance: Decimal,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            ma_windows: vec![5, 30, 60],
            crossover: CrossoverConfig::default(),
            rsi_window: 14,
            starting_balance: dec!(10000),
        }
    }
}

impl AnalysisSettings {
    /// Reported windows plus the crossover windows, sorted and deduplicated.
    pub fn all_ma_windows(&self) -> Vec<usize> {
        let mut windows = self.ma_windows.clone();
        windows.push(self.crossover.short_window);
        windows.push(self.crossover.long_window);
        windows.sort_unstable();
        windows.dedup();
        windows
    }

    /// Validate the settings.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.crossover.validate()?;
        if self.ma_windows.iter().any(|&w| w == 0) {
            return Err(AnalysisError::Config(
                "moving average windows must be greater than 0".into(),
            ));
        }
        if self.rsi_window == 0 {
            return Err(AnalysisError::Config(
                "RSI window must be greater than 0".into(),
            ));
        }
        if self.starting_balance <= Decimal::ZERO {
            return Err(AnalysisError::Config(format!(
                "starting balance must be positive, got {}",
                self.starting_balance
            )));
        }
        Ok(())
    }
}

/// Runs the full indicator -> signal -> trade -> performance pipeline.
///
/// Holds no per-ticker state, so one analyzer can be shared across tasks.
#[derive(Debug, Clone)]
pub struct TickerAnalyzer {
    settings: AnalysisSettings,
    windows: Vec<usize>,
    signals: CrossoverSignals,
}

impl TickerAnalyzer {
    /// Create an analyzer from validated settings.
    pub fn new(settings: AnalysisSettings) -> AnalysisResult<Self> {
        settings.validate()?;
        let signals = CrossoverSignals::new(settings.crossover)?;
        let windows = settings.all_ma_windows();
        Ok(Self {
            settings,
            windows,
            signals,
        })
    }

    /// Analyze one series.
    pub fn analyze(&self, series: &Series) -> AnalysisResult<AnalysisReport> {
        let longest = self.windows.last().copied().unwrap_or_default();
        if series.len() < longest {
            debug!(
                symbol = series.symbol(),
                bars = series.len(),
                longest_window = longest,
                "Insufficient history; early indicator values stay absent"
            );
        }

        let frame = IndicatorFrame::compute(series, &self.windows, self.settings.rsi_window)?;
        let scan = self.signals.generate(series, &frame)?;
        let trades = extract_trades(series, &scan.signals);
        let performance = evaluate_performance(&trades.deals, self.settings.starting_balance);

        info!(
            symbol = series.symbol(),
            bars = series.len(),
            deals = trades.deals.len(),
            open_position = trades.has_open_position(),
            trades = performance.total_trades,
            win_rate = performance.win_rate,
            profit = %performance.profit,
            "Analysis complete"
        );

        Ok(build_report(series, &frame, &scan.signals, &trades, performance))
    }
}
