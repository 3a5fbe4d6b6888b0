//! Trading signal generation.
//!
//! This crate turns indicator columns into per-bar crossover signals:
//! - [`CrossoverConfig`] selects the short and long moving-average windows
//! - [`CrossoverSignals`] runs the Flat/Long state machine over a series

mod ma_crossover;

pub use ma_crossover::{CrossoverConfig, CrossoverSignals, SignalScan, TIE_TOLERANCE};
