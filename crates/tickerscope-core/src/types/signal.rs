//! Crossover signal emitted once per bar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-bar output of the crossover state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Flat -> Long transition; a buy is executed at the bar's open.
    Enter,
    /// Long -> Flat transition; a sell is executed at the bar's close.
    Exit,
    /// Staying long.
    HoldLong,
    /// No position, or no comparable indicator values yet.
    #[default]
    Flat,
}

impl Signal {
    /// Whether this signal changes the position and produces a deal.
    #[inline]
    pub fn is_transition(&self) -> bool {
        matches!(self, Signal::Enter | Signal::Exit)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Enter => "enter",
            Signal::Exit => "exit",
            Signal::HoldLong => "hold_long",
            Signal::Flat => "flat",
        };
        write!(f, "{}", s)
    }
}
