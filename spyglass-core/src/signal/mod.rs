//! Composite signal evaluation: crossover windows, the filter set, and the
//! per-bar call/put verdict.

pub mod crossover;
pub mod evaluator;
pub mod filters;

pub use crossover::{Cross, CrossTracker};
pub use evaluator::{SignalEvaluator, SignalState};
pub use filters::Filter;

use serde::{Deserialize, Serialize};

/// Current-bar readings of every indicator the evaluator consumes.
///
/// Produced once per bar by the engine's indicator bank; purely a value
/// snapshot, so the evaluator stays a function of (state, snapshot, gate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub vwap: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub rsi: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub adx: f64,
    pub atr: f64,
    pub volume: f64,
    pub volume_avg: f64,
    pub volume_ratio: f64,
    pub realized_vol: f64,
    pub implied_vol: f64,
}
