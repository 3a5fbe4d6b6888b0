//! Moving Average Crossover signal generator.
//!
//! Enters when the short MA is at or above the long MA and exits when it
//! drops below. Equality keeps (or opens) the long position.

use serde::{Deserialize, Serialize};
use tickerscope_core::error::StrategyError;
use tickerscope_core::types::{PositionState, Series, Signal};
use tickerscope_indicators::IndicatorFrame;
use tracing::{debug, trace};

/// Relative slack under which two averages count as equal.
///
/// Averages over different window lengths accumulate different rounding
/// error, so a flat price can leave the long average a few ulps above the
/// short one.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Short average at or above the long one, treating near-equal values as a tie.
#[inline]
fn is_bullish(short: f64, long: f64) -> bool {
    short >= long - TIE_TOLERANCE * long.abs().max(1.0)
}

/// Configuration for the crossover signal generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverConfig {
    /// Short moving average window
    pub short_window: usize,
    /// Long moving average window
    pub long_window: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 30,
        }
    }
}

impl CrossoverConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.short_window == 0 {
            return Err(StrategyError::InvalidConfig(
                "Short window must be greater than 0".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(StrategyError::InvalidConfig(format!(
                "Short window ({}) must be less than long window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// Signals for every bar plus the position left open at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScan {
    pub signals: Vec<Signal>,
    pub final_state: PositionState,
}

/// Crossover state machine.
#[derive(Debug, Clone)]
pub struct CrossoverSignals {
    config: CrossoverConfig,
}

impl CrossoverSignals {
    /// Create a generator from a validated configuration.
    pub fn new(config: CrossoverConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// One transition of the state machine.
    ///
    /// | state | short vs long | signal   | next state |
    /// |-------|---------------|----------|------------|
    /// | Flat  | short >= long | Enter    | Long       |
    /// | Flat  | short <  long | Flat     | Flat       |
    /// | Long  | short >= long | HoldLong | Long       |
    /// | Long  | short <  long | Exit     | Flat       |
    ///
    /// Averages within [`TIE_TOLERANCE`] of each other compare as equal.
    /// A missing average yields `Flat` and leaves the state untouched.
    pub fn step(
        state: PositionState,
        short: Option<f64>,
        long: Option<f64>,
        timestamp: i64,
    ) -> (Signal, PositionState) {
        let (Some(short), Some(long)) = (short, long) else {
            return (Signal::Flat, state);
        };

        let bullish = is_bullish(short, long);
        match (state, bullish) {
            (PositionState::Flat, true) => (
                Signal::Enter,
                PositionState::Long {
                    entered_at: timestamp,
                },
            ),
            (PositionState::Flat, false) => (Signal::Flat, PositionState::Flat),
            (long_state @ PositionState::Long { .. }, true) => (Signal::HoldLong, long_state),
            (PositionState::Long { .. }, false) => (Signal::Exit, PositionState::Flat),
        }
    }

    /// Scan the series in timestamp order.
    ///
    /// The first bar has nothing to compare against and is always `Flat`.
    pub fn generate(
        &self,
        series: &Series,
        frame: &IndicatorFrame,
    ) -> Result<SignalScan, StrategyError> {
        let short = self.column(frame, self.config.short_window)?;
        let long = self.column(frame, self.config.long_window)?;

        if short.len() != series.len() || long.len() != series.len() {
            return Err(StrategyError::InvalidConfig(format!(
                "indicator frame has {} slots for a series of {} bars",
                short.len().min(long.len()),
                series.len()
            )));
        }

        let mut signals = Vec::with_capacity(series.len());
        let mut state = PositionState::Flat;

        for (index, bar) in series.iter().enumerate() {
            let signal = if index == 0 {
                Signal::Flat
            } else {
                let (signal, next) = Self::step(state, short[index], long[index], bar.timestamp);
                state = next;
                signal
            };

            if signal.is_transition() {
                trace!(
                    symbol = series.symbol(),
                    index,
                    timestamp = bar.timestamp,
                    signal = %signal,
                    "Crossover transition"
                );
            }
            signals.push(signal);
        }

        debug!(
            symbol = series.symbol(),
            entries = signals.iter().filter(|s| **s == Signal::Enter).count(),
            exits = signals.iter().filter(|s| **s == Signal::Exit).count(),
            open_at_end = state.is_long(),
            "Generated crossover signals"
        );

        Ok(SignalScan {
            signals,
            final_state: state,
        })
    }

    fn column<'a>(
        &self,
        frame: &'a IndicatorFrame,
        window: usize,
    ) -> Result<&'a [Option<f64>], StrategyError> {
        frame.moving_average(window).ok_or_else(|| {
            StrategyError::InvalidConfig(format!(
                "moving average window {} was not computed",
                window
            ))
        })
    }
}
