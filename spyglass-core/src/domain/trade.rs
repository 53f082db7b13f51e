//! Completed round-trip trades, paired from open/close intents.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::position::ExitReason;

/// Call or put, independent of open/close direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

/// One completed trade: an entry intent matched with its exit intent.
///
/// P&L is the directional move of the underlying scaled by quantity and
/// the contract multiplier — a deliberate proxy, since options pricing is
/// out of scope for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: OptionSide,
    pub quantity: u32,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub entry_price: f64,
    pub exit_price: f64,
    pub exit_reason: ExitReason,
}

impl TradeRecord {
    /// Signed underlying move in the trade's favor (per unit).
    pub fn favorable_move(&self) -> f64 {
        match self.side {
            OptionSide::Call => self.exit_price - self.entry_price,
            OptionSide::Put => self.entry_price - self.exit_price,
        }
    }

    /// Underlying-move P&L at the given contract multiplier.
    pub fn pnl(&self, contract_multiplier: f64) -> f64 {
        self.favorable_move() * f64::from(self.quantity) * contract_multiplier
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.exit_time - self.entry_time).num_minutes()
    }
}
