//! Position — one options position per strategy instance.

use serde::{Deserialize, Serialize};

/// Which side, if any, the strategy currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Flat,
    LongCall,
    LongPut,
}

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopHit,
    EndOfDay,
}

/// The strategy's single position slot.
///
/// Invariant: `entry_price`, `trail_extreme`, and `entry_bar` are `Some`
/// exactly when `state != Flat`. The trailing extreme is the running high
/// since a call entry or the running low since a put entry; it ratchets
/// toward the favorable direction and never loosens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub state: PositionState,
    pub entry_price: Option<f64>,
    pub trail_extreme: Option<f64>,
    pub entry_bar: Option<usize>,
}

impl Position {
    pub fn flat() -> Self {
        Position {
            state: PositionState::Flat,
            entry_price: None,
            trail_extreme: None,
            entry_bar: None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.state == PositionState::Flat
    }

    /// Open a position at the bar close; the trail seeds at the entry price.
    pub fn open(state: PositionState, price: f64, bar_index: usize) -> Self {
        Position {
            state,
            entry_price: Some(price),
            trail_extreme: Some(price),
            entry_bar: Some(bar_index),
        }
    }

    /// Check the defined-iff-open invariant. Used by tests and debug checks.
    pub fn invariant_holds(&self) -> bool {
        match self.state {
            PositionState::Flat => {
                self.entry_price.is_none()
                    && self.trail_extreme.is_none()
                    && self.entry_bar.is_none()
            }
            PositionState::LongCall | PositionState::LongPut => {
                self.entry_price.is_some()
                    && self.trail_extreme.is_some()
                    && self.entry_bar.is_some()
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::flat()
    }
}
