//! Composite signal evaluator — indicator readings in, call/put booleans out.
//!
//! The evaluator is recomputed every bar from the current indicator
//! snapshot; its only memory is what the crossover-within-window logic and
//! the ADX-rising comparison require. Any non-finite input fails the
//! affected filter — entries fail closed, they never propagate NaN.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::clock::TimeWindowGate;
use crate::config::{AdxRequirement, MomentumMode, StrategyConfig};
use crate::domain::OptionSide;

use super::crossover::CrossTracker;
use super::filters::Filter;
use super::IndicatorSnapshot;

/// Per-bar signal verdict plus diagnostics.
///
/// The filter-pass counters tally every active filter independently of the
/// boolean gate, for near-miss reporting; they never decide the signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalState {
    pub call_signal: bool,
    pub put_signal: bool,
    pub call_filters_passed: u8,
    pub put_filters_passed: u8,
    pub filters_total: u8,
    /// Both conjunctions held at once — a configuration ambiguity. The
    /// documented tie-break applies: neither signal fires.
    pub ambiguous: bool,
}

impl SignalState {
    pub fn quiet(filters_total: u8) -> Self {
        SignalState {
            call_signal: false,
            put_signal: false,
            call_filters_passed: 0,
            put_filters_passed: 0,
            filters_total,
            ambiguous: false,
        }
    }
}

/// Stateful evaluator: one per strategy instance.
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    macd_cross: CrossTracker,
    ema_cross: CrossTracker,
    /// ADX readings of strictly prior bars, most recent last.
    adx_history: VecDeque<f64>,
    adx_history_cap: usize,
}

impl SignalEvaluator {
    pub fn new(config: &StrategyConfig) -> Self {
        let adx_history_cap = match config.adx_requirement {
            AdxRequirement::Rising { lookback } => lookback,
            AdxRequirement::Threshold => 1,
        };
        SignalEvaluator {
            macd_cross: CrossTracker::new(config.crossover_window),
            ema_cross: CrossTracker::new(config.crossover_window),
            adx_history: VecDeque::with_capacity(adx_history_cap + 1),
            adx_history_cap,
        }
    }

    /// Evaluate one bar. Must be called exactly once per bar, in order —
    /// the crossover windows and ADX history advance here.
    pub fn evaluate(
        &mut self,
        config: &StrategyConfig,
        snap: &IndicatorSnapshot,
        gate: TimeWindowGate,
    ) -> SignalState {
        self.macd_cross.update(snap.macd_line, snap.macd_signal);
        self.ema_cross.update(snap.ema_fast, snap.ema_slow);

        let filters = Filter::active(config);
        let mut call_passed = 0u8;
        let mut put_passed = 0u8;
        let mut call_all = true;
        let mut put_all = true;

        for filter in &filters {
            let call_ok = self.passes(*filter, OptionSide::Call, config, snap);
            let put_ok = self.passes(*filter, OptionSide::Put, config, snap);
            call_passed += u8::from(call_ok);
            put_passed += u8::from(put_ok);
            call_all &= call_ok;
            put_all &= put_ok;
        }

        self.push_adx(snap.adx);

        // Tie-break: simultaneous call and put conjunctions mean the
        // configuration is ambiguous — prefer no entry over guessing.
        let ambiguous = call_all && put_all;
        let gated = gate.entries_allowed() && !ambiguous;

        SignalState {
            call_signal: call_all && gated,
            put_signal: put_all && gated,
            call_filters_passed: call_passed,
            put_filters_passed: put_passed,
            filters_total: filters.len() as u8,
            ambiguous,
        }
    }

    fn passes(
        &self,
        filter: Filter,
        side: OptionSide,
        config: &StrategyConfig,
        snap: &IndicatorSnapshot,
    ) -> bool {
        match filter {
            Filter::DirectionalBias => self.bias_ok(side, config, snap),
            Filter::TrendStrength => self.trend_strength_ok(config, snap),
            Filter::TrendDirection => match side {
                OptionSide::Call => finite_gt(snap.plus_di, snap.minus_di),
                OptionSide::Put => finite_gt(snap.minus_di, snap.plus_di),
            },
            Filter::Momentum => self.momentum_ok(side, config, snap),
            Filter::Exhaustion => match side {
                OptionSide::Call => finite_lt(snap.rsi, config.rsi_call_max),
                OptionSide::Put => finite_gt(snap.rsi, config.rsi_put_min),
            },
            Filter::VolumeConfirm => match config.volume_confirm {
                Some(mult) => snap.volume_ratio.is_finite() && snap.volume_ratio >= mult,
                None => true,
            },
        }
    }

    fn bias_ok(&self, side: OptionSide, config: &StrategyConfig, snap: &IndicatorSnapshot) -> bool {
        let mut ok = true;
        if config.use_vwap_bias {
            ok &= match side {
                OptionSide::Call => finite_gt(snap.close, snap.vwap),
                OptionSide::Put => finite_lt(snap.close, snap.vwap),
            };
        }
        let level = match side {
            OptionSide::Call => config.bull_level,
            OptionSide::Put => config.bear_level,
        };
        if let Some(level) = level {
            ok &= match side {
                OptionSide::Call => finite_gt(snap.close, level),
                OptionSide::Put => finite_lt(snap.close, level),
            };
        }
        ok
    }

    fn trend_strength_ok(&self, config: &StrategyConfig, snap: &IndicatorSnapshot) -> bool {
        if !snap.adx.is_finite() || snap.adx < config.adx_threshold {
            return false;
        }
        match config.adx_requirement {
            AdxRequirement::Threshold => true,
            AdxRequirement::Rising { lookback } => {
                // ADX must exceed its reading `lookback` bars ago; without
                // enough history the requirement fails closed.
                if self.adx_history.len() < lookback {
                    return false;
                }
                let past = self.adx_history[self.adx_history.len() - lookback];
                past.is_finite() && snap.adx > past
            }
        }
    }

    fn momentum_ok(
        &self,
        side: OptionSide,
        config: &StrategyConfig,
        snap: &IndicatorSnapshot,
    ) -> bool {
        match config.momentum {
            MomentumMode::MacdCross => match side {
                OptionSide::Call => self.macd_cross.crossed_above_within(),
                OptionSide::Put => self.macd_cross.crossed_below_within(),
            },
            MomentumMode::MacdHistogram => match side {
                OptionSide::Call => finite_gt(snap.macd_histogram, 0.0),
                OptionSide::Put => finite_lt(snap.macd_histogram, 0.0),
            },
            MomentumMode::EmaCross => match side {
                OptionSide::Call => self.ema_cross.crossed_above_within(),
                OptionSide::Put => self.ema_cross.crossed_below_within(),
            },
        }
    }

    fn push_adx(&mut self, adx: f64) {
        self.adx_history.push_back(adx);
        if self.adx_history.len() > self.adx_history_cap {
            self.adx_history.pop_front();
        }
    }
}

fn finite_gt(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && a > b
}

fn finite_lt(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && a < b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_gate() -> TimeWindowGate {
        TimeWindowGate {
            past_entry_start: true,
            before_cutoff: true,
        }
    }

    fn closed_gate() -> TimeWindowGate {
        TimeWindowGate {
            past_entry_start: false,
            before_cutoff: true,
        }
    }

    /// A snapshot where every call-side filter holds under the default
    /// config with histogram momentum.
    fn bullish_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 101.0,
            vwap: 100.0,
            ema_fast: 101.0,
            ema_slow: 100.0,
            macd_line: 0.5,
            macd_signal: 0.2,
            macd_histogram: 0.3,
            rsi: 55.0,
            plus_di: 30.0,
            minus_di: 10.0,
            adx: 30.0,
            atr: 0.8,
            volume: 2000.0,
            volume_avg: 1000.0,
            volume_ratio: 2.0,
            realized_vol: 0.12,
            implied_vol: 0.15,
        }
    }

    fn histogram_config() -> StrategyConfig {
        StrategyConfig {
            momentum: MomentumMode::MacdHistogram,
            ..Default::default()
        }
    }

    #[test]
    fn all_filters_aligned_fires_call() {
        let config = histogram_config();
        let mut eval = SignalEvaluator::new(&config);
        let state = eval.evaluate(&config, &bullish_snapshot(), open_gate());
        assert!(state.call_signal);
        assert!(!state.put_signal);
        assert_eq!(state.call_filters_passed, 5);
        assert_eq!(state.filters_total, 5);
        assert!(!state.ambiguous);
    }

    #[test]
    fn gate_closed_blocks_signal_but_counts_filters() {
        let config = histogram_config();
        let mut eval = SignalEvaluator::new(&config);
        let state = eval.evaluate(&config, &bullish_snapshot(), closed_gate());
        assert!(!state.call_signal);
        assert_eq!(state.call_filters_passed, 5);
    }

    #[test]
    fn nan_input_fails_closed() {
        let config = histogram_config();
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();
        snap.adx = f64::NAN;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);
        assert_eq!(state.call_filters_passed, 4);
    }

    #[test]
    fn weak_adx_blocks_entry() {
        let config = histogram_config();
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();
        snap.adx = 15.0;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);
    }

    #[test]
    fn adx_rising_requires_history() {
        let config = StrategyConfig {
            momentum: MomentumMode::MacdHistogram,
            adx_requirement: AdxRequirement::Rising { lookback: 1 },
            ..Default::default()
        };
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();

        // First bar: no prior ADX — trend strength fails closed.
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);

        // Rising ADX on the next bar passes.
        snap.adx = 32.0;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(state.call_signal);

        // Falling ADX fails even above the threshold.
        snap.adx = 28.0;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);
    }

    #[test]
    fn macd_cross_mode_tolerates_confirmation_lag() {
        let config = StrategyConfig {
            momentum: MomentumMode::MacdCross,
            ..Default::default()
        };
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();

        // Bar 1: MACD below signal — seeds the tracker.
        snap.macd_line = -0.2;
        snap.macd_signal = 0.1;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);

        // Bar 2: crossed above — fires.
        snap.macd_line = 0.3;
        snap.macd_signal = 0.1;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(state.call_signal);

        // Bar 3: no new cross, but still within the window — still fires.
        snap.macd_line = 0.4;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(state.call_signal);
    }

    #[test]
    fn volume_filter_counts_toward_total() {
        let config = StrategyConfig {
            momentum: MomentumMode::MacdHistogram,
            volume_confirm: Some(1.5),
            ..Default::default()
        };
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();
        snap.volume_ratio = 1.0; // below the multiplier
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);
        assert_eq!(state.filters_total, 6);
        assert_eq!(state.call_filters_passed, 5);
    }

    #[test]
    fn overbought_rsi_blocks_call() {
        let config = histogram_config();
        let mut eval = SignalEvaluator::new(&config);
        let mut snap = bullish_snapshot();
        snap.rsi = 75.0;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal);
    }

    #[test]
    fn direction_filters_keep_conjunctions_exclusive() {
        // Even with bias and trend strength degenerate (no VWAP, no levels,
        // zero ADX threshold), the DI ordering filter keeps the call and
        // put conjunctions from holding at once.
        let config = StrategyConfig {
            momentum: MomentumMode::MacdHistogram,
            use_vwap_bias: false,
            adx_threshold: 0.0,
            ..Default::default()
        };
        let mut eval = SignalEvaluator::new(&config);
        let state = eval.evaluate(&config, &bullish_snapshot(), open_gate());
        assert!(state.call_signal && !state.put_signal);
        assert!(!state.ambiguous);

        // Equal DI readings fail both sides rather than passing both.
        let mut snap = bullish_snapshot();
        snap.plus_di = 20.0;
        snap.minus_di = 20.0;
        let state = eval.evaluate(&config, &snap, open_gate());
        assert!(!state.call_signal && !state.put_signal);
    }
}
