//! Position state carried through the signal scan.

use serde::{Deserialize, Serialize};

/// Whether the simulated strategy currently holds the ticker.
///
/// Passed by value into each scan step and returned updated; there is no
/// shared position flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PositionState {
    /// Not holding.
    #[default]
    Flat,
    /// Holding since `entered_at` (Unix milliseconds).
    Long { entered_at: i64 },
}

impl PositionState {
    /// Check if this is a long position.
    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long { .. })
    }

    /// Entry timestamp of the open position, if any.
    pub fn entered_at(&self) -> Option<i64> {
        match self {
            PositionState::Long { entered_at } => Some(*entered_at),
            PositionState::Flat => None,
        }
    }
}
