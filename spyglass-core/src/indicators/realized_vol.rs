//! Realized volatility — annualized stdev of log close-to-close returns.

use crate::clock::Aggregation;

use super::rolling::RollingStats;

/// Streaming realized-volatility state.
///
/// Annualization uses sqrt(bars_per_year) where bars_per_year is derived
/// from the chart aggregation (390 bars/day at one minute down to 7 at
/// hourly, times 252 trading days).
#[derive(Debug, Clone)]
pub struct RealizedVol {
    prev_close: Option<f64>,
    returns: RollingStats,
    annualizer: f64,
}

impl RealizedVol {
    pub fn new(lookback: usize, aggregation: Aggregation) -> Self {
        RealizedVol {
            prev_close: None,
            returns: RollingStats::new(lookback),
            annualizer: f64::from(aggregation.bars_per_year()).sqrt(),
        }
    }

    /// Advance one close and return the current annualized volatility.
    /// Returns 0 until at least two returns have accumulated.
    pub fn update(&mut self, close: f64) -> f64 {
        if let Some(prev) = self.prev_close {
            if prev > 0.0 && close > 0.0 {
                self.returns.push((close / prev).ln());
            }
        }
        if close.is_finite() {
            self.prev_close = Some(close);
        }
        self.returns.stdev() * self.annualizer
    }
}
