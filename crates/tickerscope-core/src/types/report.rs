//! Per-ticker analysis record handed to result sinks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{format_timestamp, Action, Deal, HoldPeriod, Signal, Timeframe};

/// Performance of the realized (matched) buy/sell pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Matched buy/sell pairs
    pub total_trades: usize,
    /// Pairs with sell price >= buy price
    pub winning_trades: usize,
    /// winning_trades / total_trades, 0 when there are no pairs
    pub win_rate: f64,
    /// Ending balance minus starting balance, rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    /// profit * 100 / starting balance, rounded to 2 places
    #[serde(with = "rust_decimal::serde::float")]
    pub cumulative_return_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub starting_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ending_balance: Decimal,
    /// Trailing deals left out of the accounting (an open position at series end)
    pub unrealized_deals: usize,
}

impl PerformanceSummary {
    /// Summary for a run that never closed a position.
    pub fn flat(starting_balance: Decimal, unrealized_deals: usize) -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            win_rate: 0.0,
            profit: Decimal::ZERO.round_dp(2),
            cumulative_return_pct: Decimal::ZERO.round_dp(2),
            starting_balance,
            ending_balance: starting_balance,
            unrealized_deals,
        }
    }
}

/// Serialized form of a [`Deal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub date: String,
    pub action: Action,
    pub price: f64,
}

impl From<&Deal> for DealRecord {
    fn from(deal: &Deal) -> Self {
        Self {
            date: format_timestamp(deal.timestamp),
            action: deal.action,
            price: deal.price,
        }
    }
}

/// Serialized form of a [`HoldPeriod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldRecord {
    pub entry: String,
    pub exit: String,
}

impl From<&HoldPeriod> for HoldRecord {
    fn from(period: &HoldPeriod) -> Self {
        Self {
            entry: format_timestamp(period.entry),
            exit: format_timestamp(period.exit),
        }
    }
}

/// Everything computed for one ticker.
///
/// The JSON layout is the one the chart dashboard reads: closes under
/// `prices`, and every indicator column as a top-level key (`MA_5`, `MA_30`,
/// `RSI_14`, ...). Columns live in a sorted map so serialization order is
/// stable. Absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub timeframe: Timeframe,
    pub latest_close: f64,
    pub timestamps: Vec<String>,
    #[serde(rename = "prices", alias = "closes")]
    pub closes: Vec<f64>,
    pub signals: Vec<Signal>,
    pub deals: Vec<DealRecord>,
    pub hold_periods: Vec<HoldRecord>,
    #[serde(flatten)]
    pub performance: PerformanceSummary,
    /// Must stay after `performance`: it takes every key left over.
    #[serde(flatten)]
    pub indicators: BTreeMap<String, Vec<Option<f64>>>,
}

impl AnalysisReport {
    /// Export to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
