//! Order intents emitted on position transitions.
//!
//! Intents describe what the strategy wants done; routing them to a broker
//! is an external collaborator's job. The reference price is always the
//! close of the bar that produced the transition.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::position::ExitReason;
use super::trade::OptionSide;

/// The four intent legs a single-position call/put strategy can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentSide {
    OpenCall,
    OpenPut,
    CloseCall,
    ClosePut,
}

impl IntentSide {
    pub fn option_side(&self) -> OptionSide {
        match self {
            IntentSide::OpenCall | IntentSide::CloseCall => OptionSide::Call,
            IntentSide::OpenPut | IntentSide::ClosePut => OptionSide::Put,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, IntentSide::OpenCall | IntentSide::OpenPut)
    }
}

/// Why an intent was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentReason {
    EntrySignal,
    StopHit,
    EndOfDay,
}

impl From<ExitReason> for IntentReason {
    fn from(reason: ExitReason) -> Self {
        match reason {
            ExitReason::StopHit => IntentReason::StopHit,
            ExitReason::EndOfDay => IntentReason::EndOfDay,
        }
    }
}

/// An order intent produced by a position transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub side: IntentSide,
    pub quantity: u32,
    pub reference_price: f64,
    pub reason: IntentReason,
    pub timestamp: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn intent_side_classification() {
        assert!(IntentSide::OpenCall.is_open());
        assert!(!IntentSide::ClosePut.is_open());
        assert_eq!(IntentSide::ClosePut.option_side(), OptionSide::Put);
        assert_eq!(IntentSide::OpenCall.option_side(), OptionSide::Call);
    }

    #[test]
    fn exit_reason_maps_to_intent_reason() {
        assert_eq!(IntentReason::from(ExitReason::StopHit), IntentReason::StopHit);
        assert_eq!(
            IntentReason::from(ExitReason::EndOfDay),
            IntentReason::EndOfDay
        );
    }

    #[test]
    fn intent_serialization_roundtrip() {
        let intent = OrderIntent {
            side: IntentSide::OpenPut,
            quantity: 2,
            reference_price: 431.25,
            reason: IntentReason::EntrySignal,
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 5, 0)
                .unwrap(),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let deser: OrderIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, deser);
    }
}
