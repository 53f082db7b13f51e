//! The per-bar pipeline: indicators → gate → signals → position transition.
//!
//! One `StrategyEngine` per strategy instance. All recursive state lives in
//! the instance, so any number of instances run in parallel with zero
//! shared mutable state. Bars are processed strictly in order; a bar's
//! full pipeline completes before the next bar is admitted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::TimeWindowGate;
use crate::config::{ConfigError, StrategyConfig};
use crate::domain::{AuxQuote, Bar, OrderIntent, Position};
use crate::signal::{IndicatorSnapshot, SignalEvaluator, SignalState};

use super::bank::IndicatorBank;
use super::machine::{PositionMachine, PositionTransition};

/// Everything one bar produced, for observability and downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarOutput {
    pub timestamp: NaiveDateTime,
    pub bar_index: usize,
    pub gate: TimeWindowGate,
    pub snapshot: IndicatorSnapshot,
    pub signal: SignalState,
    pub transition: Option<PositionTransition>,
    pub intent: Option<OrderIntent>,
    /// Position as of this bar's close.
    pub position: Position,
}

/// One strategy instance: config plus all recursive state.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    config: StrategyConfig,
    bank: IndicatorBank,
    evaluator: SignalEvaluator,
    machine: PositionMachine,
    bar_index: usize,
}

impl StrategyEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bank = IndicatorBank::new(&config);
        let evaluator = SignalEvaluator::new(&config);
        Ok(StrategyEngine {
            config,
            bank,
            evaluator,
            machine: PositionMachine::new(),
            bar_index: 0,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        self.machine.position()
    }

    pub fn bars_seen(&self) -> usize {
        self.bar_index
    }

    /// Process one bar through the full pipeline.
    pub fn on_bar(&mut self, bar: &Bar, aux: &AuxQuote) -> BarOutput {
        let gate = TimeWindowGate::evaluate(
            bar.timestamp,
            self.config.session_open,
            self.config.session_close,
            self.config.opening_range_minutes,
            self.config.close_buffer_secs,
        );

        let snapshot = self.bank.update(bar, aux);
        let signal = self.evaluator.evaluate(&self.config, &snapshot, gate);
        let (transition, intent) =
            self.machine
                .on_bar(bar, self.bar_index, &signal, gate, &self.config);

        let output = BarOutput {
            timestamp: bar.timestamp,
            bar_index: self.bar_index,
            gate,
            snapshot,
            signal,
            transition,
            intent,
            position: *self.machine.position(),
        };
        self.bar_index += 1;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PositionState;
    use crate::indicators::make_bars;

    #[test]
    fn pipeline_runs_in_order_and_counts_bars() {
        let mut engine = StrategyEngine::new(StrategyConfig::default()).unwrap();
        let bars = make_bars(&[100.0, 101.0, 100.5, 102.0]);
        for (i, bar) in bars.iter().enumerate() {
            let out = engine.on_bar(bar, &AuxQuote::default());
            assert_eq!(out.bar_index, i);
            assert!(out.position.invariant_holds());
        }
        assert_eq!(engine.bars_seen(), 4);
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = StrategyConfig {
            stop_distance: -1.0,
            ..Default::default()
        };
        assert!(StrategyEngine::new(config).is_err());
    }

    #[test]
    fn independent_instances_do_not_interact() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 103.0, 104.0]);
        let mut a = StrategyEngine::new(StrategyConfig::default()).unwrap();
        let mut b = StrategyEngine::new(StrategyConfig::default()).unwrap();
        // Feed b an extra divergent bar first; a must be unaffected.
        b.on_bar(&make_bars(&[500.0])[0], &AuxQuote::default());
        let mut c = StrategyEngine::new(StrategyConfig::default()).unwrap();
        for bar in &bars {
            let out_a = a.on_bar(bar, &AuxQuote::default());
            let out_c = c.on_bar(bar, &AuxQuote::default());
            b.on_bar(bar, &AuxQuote::default());
            assert_eq!(out_a.snapshot.ema_fast.to_bits(), out_c.snapshot.ema_fast.to_bits());
        }
    }

    #[test]
    fn engine_is_send() {
        fn require_send<T: Send>() {}
        require_send::<StrategyEngine>();
        require_send::<BarOutput>();
    }

    #[test]
    fn flat_engine_emits_no_intents_on_quiet_bars() {
        let mut engine = StrategyEngine::new(StrategyConfig::default()).unwrap();
        let bars = make_bars(&[100.0, 100.1, 100.0, 100.1]);
        for bar in &bars {
            let out = engine.on_bar(bar, &AuxQuote::default());
            assert!(out.intent.is_none());
            assert_eq!(out.position.state, PositionState::Flat);
        }
    }
}
