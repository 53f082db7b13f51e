//! Relative Strength Index — Wilder-averaged up/down moves.
//!
//! RSI = 100 when the average down-move is 0, else
//! 100 - 100 / (1 + avg_up / avg_down). Always within [0, 100].

use super::wilder::WilderAverage;

/// Streaming RSI state.
#[derive(Debug, Clone)]
pub struct Rsi {
    prev_close: Option<f64>,
    avg_up: WilderAverage,
    avg_down: WilderAverage,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Rsi {
            prev_close: None,
            avg_up: WilderAverage::new(period),
            avg_down: WilderAverage::new(period),
        }
    }

    /// Advance one close and return the current RSI.
    pub fn update(&mut self, close: f64) -> f64 {
        if let Some(prev) = self.prev_close {
            let change = close - prev;
            self.avg_up.update(change.max(0.0));
            self.avg_down.update((-change).max(0.0));
        }
        self.prev_close = Some(close);

        let up = self.avg_up.value().unwrap_or(0.0);
        let down = self.avg_down.value().unwrap_or(0.0);
        if down == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + up / down)
        }
    }
}
