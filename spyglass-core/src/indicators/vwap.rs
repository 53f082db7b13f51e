//! Session VWAP — cumulative typical-price volume average, reset daily.

use chrono::NaiveDate;

use crate::domain::Bar;

/// Streaming session VWAP state.
///
/// Resets when the bar's session date changes. While cumulative volume is
/// zero (a dead open, or a feed emitting zero-volume bars) the bar close is
/// returned instead of dividing by zero.
#[derive(Debug, Clone, Default)]
pub struct SessionVwap {
    session: Option<NaiveDate>,
    cum_pv: f64,
    cum_volume: f64,
}

impl SessionVwap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bar: &Bar) -> f64 {
        let date = bar.timestamp.date();
        if self.session != Some(date) {
            self.session = Some(date);
            self.cum_pv = 0.0;
            self.cum_volume = 0.0;
        }

        if bar.volume.is_finite() && bar.volume > 0.0 {
            self.cum_pv += bar.typical_price() * bar.volume;
            self.cum_volume += bar.volume;
        }

        if self.cum_volume == 0.0 {
            bar.close
        } else {
            self.cum_pv / self.cum_volume
        }
    }
}
