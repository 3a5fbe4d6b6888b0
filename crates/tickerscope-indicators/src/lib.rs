//! Technical indicators over closing prices.
//!
//! This crate provides:
//! - Simple moving averages
//! - RSI using plain rolling means of gains and losses
//! - [`IndicatorFrame`], the per-series set of aligned indicator columns
//!
//! Gain/loss splitting uses SIMD lanes from the `wide` crate.

pub mod frame;
pub mod momentum;
pub mod moving_average;
pub mod simd;

pub use frame::IndicatorFrame;
pub use momentum::Rsi;
pub use moving_average::Sma;
