//! Core data types for ticker analysis.

mod ohlcv;
mod position;
mod report;
mod signal;
mod timeframe;
mod trade;

pub use ohlcv::{Bar, Series};
pub use position::PositionState;
pub use report::{AnalysisReport, DealRecord, HoldRecord, PerformanceSummary};
pub use signal::Signal;
pub use timeframe::Timeframe;
pub use trade::{Action, Deal, HoldPeriod};

use chrono::{DateTime, Utc};

/// Timestamp layout of the persisted record (UTC, no offset).
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a Unix millisecond timestamp to a UTC datetime (epoch when out of range).
pub fn datetime_from_millis(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp).unwrap_or_default()
}

/// Format a Unix millisecond timestamp for the persisted record.
pub fn format_timestamp(timestamp: i64) -> String {
    datetime_from_millis(timestamp)
        .format(RECORD_TIMESTAMP_FORMAT)
        .to_string()
}
