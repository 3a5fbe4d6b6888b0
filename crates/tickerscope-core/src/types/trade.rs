//! Deals and holding periods extracted from the signal scan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated execution direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "Buy"),
            Action::Sell => write!(f, "Sell"),
        }
    }
}

/// One simulated execution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Unix timestamp in milliseconds of the bar that triggered it
    pub timestamp: i64,
    pub action: Action,
    /// Execution price (bar open for buys, bar close for sells)
    pub price: f64,
}

impl Deal {
    pub fn buy(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            action: Action::Buy,
            price,
        }
    }

    pub fn sell(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            action: Action::Sell,
            price,
        }
    }
}

/// Entry and exit timestamps of one completed buy/sell cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldPeriod {
    pub entry: i64,
    pub exit: i64,
}
