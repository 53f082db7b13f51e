//! Fixed-capacity rolling window with mean and sample standard deviation.

use std::collections::VecDeque;

/// Rolling window over the last `capacity` values.
#[derive(Debug, Clone)]
pub struct RollingStats {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingStats {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "rolling window capacity must be >= 1");
        RollingStats {
            capacity,
            values: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn push(&mut self, x: f64) {
        self.values.push_back(x);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Mean of the window; 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sample standard deviation; 0 with fewer than two values.
    pub fn stdev(&self) -> f64 {
        let n = self.values.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / (n - 1) as f64;
        var.sqrt()
    }
}

/// Volume surge ratio: current volume over its rolling average.
///
/// Returns 1.0 while the average is zero so the ratio reads as "no surge"
/// rather than dividing by zero.
#[derive(Debug, Clone)]
pub struct VolumeSurge {
    window: RollingStats,
}

impl VolumeSurge {
    pub fn new(avg_length: usize) -> Self {
        VolumeSurge {
            window: RollingStats::new(avg_length),
        }
    }

    pub fn update(&mut self, volume: f64) -> f64 {
        let v = if volume.is_finite() && volume >= 0.0 {
            volume
        } else {
            0.0
        };
        self.window.push(v);
        let avg = self.window.mean();
        if avg == 0.0 {
            1.0
        } else {
            v / avg
        }
    }

    pub fn average(&self) -> f64 {
        self.window.mean()
    }
}
