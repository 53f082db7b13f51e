//! Position and trailing-stop state machine.
//!
//! Exactly one position slot per strategy instance. Transitions once per
//! bar, current state first: an open position ratchets its trail with the
//! bar extreme, then checks the intrabar stop breach, then the end-of-day
//! cutoff. Entries happen only from a position that was already Flat when
//! the bar began, so an exit and a fresh entry can never share a bar.

use crate::clock::TimeWindowGate;
use crate::config::StrategyConfig;
use crate::domain::{
    Bar, ExitReason, IntentReason, IntentSide, OrderIntent, Position, PositionState,
};
use crate::signal::SignalState;

/// A position change produced by one bar.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PositionTransition {
    Entered {
        state: PositionState,
        price: f64,
    },
    Exited {
        state: PositionState,
        price: f64,
        reason: ExitReason,
    },
}

/// The single-position state machine.
#[derive(Debug, Clone, Default)]
pub struct PositionMachine {
    position: Position,
}

impl PositionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Advance one bar. Returns the transition and its order intent, if any.
    pub fn on_bar(
        &mut self,
        bar: &Bar,
        bar_index: usize,
        signal: &SignalState,
        gate: TimeWindowGate,
        config: &StrategyConfig,
    ) -> (Option<PositionTransition>, Option<OrderIntent>) {
        debug_assert!(self.position.invariant_holds());

        if self.position.is_flat() {
            self.try_enter(bar, bar_index, signal, gate, config)
        } else {
            self.manage_open(bar, gate, config)
        }
    }

    fn try_enter(
        &mut self,
        bar: &Bar,
        bar_index: usize,
        signal: &SignalState,
        gate: TimeWindowGate,
        config: &StrategyConfig,
    ) -> (Option<PositionTransition>, Option<OrderIntent>) {
        if !gate.entries_allowed() || !bar.close.is_finite() {
            return (None, None);
        }
        // Tie-break: simultaneous call and put signals mean no entry. The
        // evaluator already clears both, but the machine enforces it too so
        // the rule holds for any signal source.
        if signal.call_signal && signal.put_signal {
            return (None, None);
        }

        let (state, side) = if signal.call_signal {
            (PositionState::LongCall, IntentSide::OpenCall)
        } else if signal.put_signal {
            (PositionState::LongPut, IntentSide::OpenPut)
        } else {
            return (None, None);
        };

        self.position = Position::open(state, bar.close, bar_index);
        let transition = PositionTransition::Entered {
            state,
            price: bar.close,
        };
        let intent = OrderIntent {
            side,
            quantity: config.contracts,
            reference_price: bar.close,
            reason: IntentReason::EntrySignal,
            timestamp: bar.timestamp,
        };
        (Some(transition), Some(intent))
    }

    fn manage_open(
        &mut self,
        bar: &Bar,
        gate: TimeWindowGate,
        config: &StrategyConfig,
    ) -> (Option<PositionTransition>, Option<OrderIntent>) {
        let state = self.position.state;
        let trail = self
            .position
            .trail_extreme
            .or(self.position.entry_price)
            .unwrap_or(bar.close);

        // Ratchet the trail with this bar's extreme before the stop check;
        // f64::max/min ignore a NaN operand, so a void bar holds the trail.
        let (trail, stop_breached) = match state {
            PositionState::LongCall => {
                let trail = trail.max(bar.high);
                (trail, bar.low <= trail - config.stop_distance)
            }
            PositionState::LongPut => {
                let trail = trail.min(bar.low);
                (trail, bar.high >= trail + config.stop_distance)
            }
            PositionState::Flat => unreachable!("manage_open called while flat"),
        };

        let reason = if stop_breached {
            Some(ExitReason::StopHit)
        } else if !gate.before_cutoff {
            Some(ExitReason::EndOfDay)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                let price = if bar.close.is_finite() {
                    bar.close
                } else {
                    // Void close on a forced exit: fall back to the trail so
                    // the intent still carries a usable reference price.
                    trail
                };
                self.position = Position::flat();
                let side = match state {
                    PositionState::LongCall => IntentSide::CloseCall,
                    PositionState::LongPut => IntentSide::ClosePut,
                    PositionState::Flat => unreachable!(),
                };
                let transition = PositionTransition::Exited {
                    state,
                    price,
                    reason,
                };
                let intent = OrderIntent {
                    side,
                    quantity: config.contracts,
                    reference_price: price,
                    reason: IntentReason::from(reason),
                    timestamp: bar.timestamp,
                };
                (Some(transition), Some(intent))
            }
            None => {
                self.position.trail_extreme = Some(trail);
                (None, None)
            }
        }
    }
}
