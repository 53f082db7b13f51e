//! Spyglass Core — streaming intraday indicator and signal engine.
//!
//! The crate folds an ordered OHLCV bar stream through:
//! - a recursive indicator library (EMA, Wilder smoothing, DMI/ADX, MACD,
//!   RSI, session VWAP, realized volatility, volume surge)
//! - a composite signal evaluator (multi-filter AND gate with
//!   crossover-within-window tolerance and a documented call/put tie-break)
//! - a session time-window gate (post-opening-range, pre-close)
//! - a single-position trailing-stop state machine with intrabar stop
//!   breaches and a hard end-of-day cutoff
//!
//! Each strategy instance owns its entire recursive state, so instances
//! parallelize with no locking. Replaying the same bars through the same
//! config is bit-identical.

pub mod clock;
pub mod config;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod signal;
pub mod synthetic;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine and domain types are Send + Sync where
    /// parallel sweeps need them to be.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::AuxQuote>();
        require_sync::<domain::AuxQuote>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::OrderIntent>();
        require_sync::<domain::OrderIntent>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();

        require_send::<config::StrategyConfig>();
        require_sync::<config::StrategyConfig>();

        require_send::<signal::SignalState>();
        require_sync::<signal::SignalState>();
        require_send::<signal::IndicatorSnapshot>();
        require_sync::<signal::IndicatorSnapshot>();

        require_send::<engine::StrategyEngine>();
        require_send::<engine::BarOutput>();
        require_sync::<engine::BarOutput>();
        require_send::<engine::ReplayReport>();
    }
}
