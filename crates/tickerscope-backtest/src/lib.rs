//! Crossover backtesting for a single ticker.
//!
//! Pipeline: indicators -> signals -> deals -> performance -> report.

mod engine;
mod report;
mod statistics;
mod trades;

pub use engine::{AnalysisSettings, TickerAnalyzer};
pub use report::{build_report, summary, summary_table};
pub use statistics::evaluate_performance;
pub use trades::{extract_trades, TradeLog};
