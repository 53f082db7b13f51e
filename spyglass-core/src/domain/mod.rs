//! Domain types: bars, auxiliary quotes, positions, intents, trades.

pub mod aux;
pub mod bar;
pub mod intent;
pub mod position;
pub mod trade;

pub use aux::AuxQuote;
pub use bar::Bar;
pub use intent::{IntentReason, IntentSide, OrderIntent};
pub use position::{ExitReason, Position, PositionState};
pub use trade::{OptionSide, TradeRecord};
