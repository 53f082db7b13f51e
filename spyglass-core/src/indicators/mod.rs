//! Streaming indicator library.
//!
//! Every indicator is a small state machine: one struct holding exactly the
//! recursive memory the formula needs, advanced once per bar through an
//! `update` fold step. No indicator touches global state, so independent
//! strategy instances never share anything.
//!
//! Division guards are explicit throughout — zero ATR, zero down-move
//! average, zero cumulative volume all yield documented neutral defaults
//! instead of NaN or infinity.

pub mod dmi;
pub mod ema;
pub mod macd;
pub mod realized_vol;
pub mod rolling;
pub mod rsi;
pub mod vwap;
pub mod wilder;

pub use dmi::{Dmi, DmiOutput};
pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use realized_vol::RealizedVol;
pub use rolling::{RollingStats, VolumeSurge};
pub use rsi::Rsi;
pub use vwap::SessionVwap;
pub use wilder::{true_range, Atr, WilderAverage};

/// Create synthetic intraday bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first
/// bar), high = max(open, close) + 1.0, low = min(open, close) - 1.0,
/// volume = 1000, five-minute spacing from the session open.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::clock::Aggregation;
    use crate::domain::Bar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "TEST".to_string(),
                timestamp: base + chrono::Duration::minutes(5 * i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
                aggregation: Aggregation::M5,
            }
        })
        .collect()
}

/// Create synthetic bars from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::clock::Aggregation;
    use crate::domain::Bar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            symbol: "TEST".to_string(),
            timestamp: base + chrono::Duration::minutes(5 * i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
            aggregation: Aggregation::M5,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
