//! Core types and traits for ticker analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, Series, Timeframe)
//! - Crossover signals, position state, deals and hold periods
//! - The per-ticker analysis record handed to result sinks
//! - Core traits for indicators, series loaders and result sinks

pub mod types;
pub mod traits;
pub mod error;

pub use error::{AnalysisError, AnalysisResult};
pub use types::*;
pub use traits::*;
