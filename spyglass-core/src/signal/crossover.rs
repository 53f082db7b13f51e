//! Crossover tracking — "did A cross B within the last N bars".
//!
//! The multi-indicator AND gate tolerates one-bar confirmation lag: a
//! crossover counts if it happened on any of the last N bars, not only the
//! current one. This tracker records per-bar crossing events over a short
//! rolling window and answers membership queries.

use std::collections::VecDeque;

/// Crossing event on a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cross {
    None,
    /// A moved from below-or-equal B to strictly above.
    Above,
    /// A moved from above-or-equal B to strictly below.
    Below,
}

/// Rolling crossover window over a pair of series.
#[derive(Debug, Clone)]
pub struct CrossTracker {
    window: usize,
    prev_diff: Option<f64>,
    events: VecDeque<Cross>,
}

impl CrossTracker {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "crossover window must be >= 1");
        CrossTracker {
            window,
            prev_diff: None,
            events: VecDeque::with_capacity(window + 1),
        }
    }

    /// Record this bar's readings of the two series and return the event.
    ///
    /// Non-finite inputs clear the comparison state: no event is recorded
    /// and the next finite pair starts fresh, so a data gap can never
    /// manufacture a crossing.
    pub fn update(&mut self, a: f64, b: f64) -> Cross {
        let diff = a - b;
        if !diff.is_finite() {
            self.prev_diff = None;
            self.push(Cross::None);
            return Cross::None;
        }

        let event = match self.prev_diff {
            Some(prev) if prev < 0.0 && diff > 0.0 => Cross::Above,
            Some(prev) if prev > 0.0 && diff < 0.0 => Cross::Below,
            _ => Cross::None,
        };
        self.prev_diff = Some(diff);
        self.push(event);
        event
    }

    /// True if A crossed above B on any bar in the window.
    pub fn crossed_above_within(&self) -> bool {
        self.events.iter().any(|e| *e == Cross::Above)
    }

    /// True if A crossed below B on any bar in the window.
    pub fn crossed_below_within(&self) -> bool {
        self.events.iter().any(|e| *e == Cross::Below)
    }

    fn push(&mut self, event: Cross) {
        self.events.push_back(event);
        if self.events.len() > self.window {
            self.events.pop_front();
        }
    }
}
