//! Wilder smoothing and true range.
//!
//! Wilder average: avg[t] = avg[t-1] + (x[t] - avg[t-1]) / period.
//! Seed: the simple average of the first `period` inputs — during warmup
//! the state holds the running mean of everything seen so far, which
//! degrades gracefully to "first value" when only one input exists.

use crate::domain::Bar;

/// Streaming Wilder-smoothed average.
#[derive(Debug, Clone)]
pub struct WilderAverage {
    period: usize,
    count: usize,
    avg: f64,
}

impl WilderAverage {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Wilder period must be >= 1");
        WilderAverage {
            period,
            count: 0,
            avg: 0.0,
        }
    }

    /// Advance one step and return the new smoothed value.
    pub fn update(&mut self, x: f64) -> f64 {
        self.count = self.count.saturating_add(1);
        let divisor = self.count.min(self.period) as f64;
        self.avg += (x - self.avg) / divisor;
        self.avg
    }

    /// Current value, if at least one input has been seen.
    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then_some(self.avg)
    }

    /// True once the seed window has filled.
    pub fn is_warm(&self) -> bool {
        self.count >= self.period
    }
}

/// True range of a bar given the previous close.
/// First bar (no previous close): high - low.
pub fn true_range(bar: &Bar, prev_close: Option<f64>) -> f64 {
    let range = bar.high - bar.low;
    match prev_close {
        None => range,
        Some(pc) => range
            .max((bar.high - pc).abs())
            .max((bar.low - pc).abs()),
    }
}

/// Average True Range: Wilder average over the true-range series.
#[derive(Debug, Clone)]
pub struct Atr {
    prev_close: Option<f64>,
    smoothed: WilderAverage,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Atr {
            prev_close: None,
            smoothed: WilderAverage::new(period),
        }
    }

    pub fn update(&mut self, bar: &Bar) -> f64 {
        let tr = true_range(bar, self.prev_close);
        if bar.close.is_finite() {
            self.prev_close = Some(bar.close);
        }
        self.smoothed.update(tr)
    }
}
