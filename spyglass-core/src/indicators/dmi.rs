//! DMI / ADX — directional movement and trend strength (Wilder).
//!
//! Per bar:
//! 1. +DM / -DM from consecutive highs/lows; only the larger of the
//!    up-move and down-move counts, and only when positive
//! 2. Wilder-smooth +DM, -DM, and true range over the same length
//! 3. +DI = 100 * smoothed(+DM) / ATR, -DI analogous (0 when ATR is 0)
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI) (0 when the sum is 0)
//! 5. ADX = Wilder average of DX

use crate::domain::Bar;

use super::wilder::{true_range, WilderAverage};

/// Per-bar DMI output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmiOutput {
    pub plus_di: f64,
    pub minus_di: f64,
    pub adx: f64,
}

/// Streaming DMI/ADX state.
#[derive(Debug, Clone)]
pub struct Dmi {
    prev: Option<(f64, f64, f64)>, // (high, low, close) of the previous bar
    smoothed_plus_dm: WilderAverage,
    smoothed_minus_dm: WilderAverage,
    smoothed_tr: WilderAverage,
    smoothed_dx: WilderAverage,
}

impl Dmi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "DMI period must be >= 1");
        Dmi {
            prev: None,
            smoothed_plus_dm: WilderAverage::new(period),
            smoothed_minus_dm: WilderAverage::new(period),
            smoothed_tr: WilderAverage::new(period),
            smoothed_dx: WilderAverage::new(period),
        }
    }

    /// Advance one bar and return the current +DI / -DI / ADX.
    pub fn update(&mut self, bar: &Bar) -> DmiOutput {
        let (plus_dm, minus_dm, tr) = match self.prev {
            None => (0.0, 0.0, true_range(bar, None)),
            Some((prev_high, prev_low, prev_close)) => {
                let up_move = bar.high - prev_high;
                let down_move = prev_low - bar.low;
                let plus = if up_move > down_move && up_move > 0.0 {
                    up_move
                } else {
                    0.0
                };
                let minus = if down_move > up_move && down_move > 0.0 {
                    down_move
                } else {
                    0.0
                };
                (plus, minus, true_range(bar, Some(prev_close)))
            }
        };
        self.prev = Some((bar.high, bar.low, bar.close));

        let atr = self.smoothed_tr.update(tr);
        let sp = self.smoothed_plus_dm.update(plus_dm);
        let sm = self.smoothed_minus_dm.update(minus_dm);

        let (plus_di, minus_di) = if atr == 0.0 {
            (0.0, 0.0)
        } else {
            (100.0 * sp / atr, 100.0 * sm / atr)
        };

        let di_sum = plus_di + minus_di;
        let dx = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        };

        DmiOutput {
            plus_di,
            minus_di,
            adx: self.smoothed_dx.update(dx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_ohlc_bars;

    #[test]
    fn adx_and_di_stay_in_bounds() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
            (105.0, 110.0, 103.0, 108.0),
            (108.0, 112.0, 106.0, 110.0),
            (110.0, 111.0, 104.0, 105.0),
            (105.0, 109.0, 103.0, 107.0),
            (107.0, 113.0, 105.0, 112.0),
        ]);
        let mut dmi = Dmi::new(3);
        for (i, bar) in bars.iter().enumerate() {
            let out = dmi.update(bar);
            assert!(
                (0.0..=100.0).contains(&out.adx),
                "ADX out of bounds at bar {i}: {}",
                out.adx
            );
            assert!(out.plus_di >= 0.0 && out.minus_di >= 0.0);
        }
    }

    #[test]
    fn strong_uptrend_favors_plus_di() {
        let data: Vec<(f64, f64, f64, f64)> = (0..20)
            .map(|i| {
                let base = 100.0 + i as f64 * 5.0;
                (base - 1.0, base + 3.0, base - 3.0, base + 2.0)
            })
            .collect();
        let bars = make_ohlc_bars(&data);
        let mut dmi = Dmi::new(5);
        let mut last = DmiOutput {
            plus_di: 0.0,
            minus_di: 0.0,
            adx: 0.0,
        };
        for bar in &bars {
            last = dmi.update(bar);
        }
        assert!(last.plus_di > last.minus_di);
        assert!(last.adx > 10.0, "ADX should be elevated in a trend: {}", last.adx);
    }

    #[test]
    fn flat_market_yields_zero_directional_movement() {
        // Identical bars: no up-move, no down-move, zero range.
        let data = vec![(100.0, 100.0, 100.0, 100.0); 10];
        let bars = make_ohlc_bars(&data);
        let mut dmi = Dmi::new(3);
        for bar in &bars {
            let out = dmi.update(bar);
            // Zero ATR guard: DI pinned to 0 rather than NaN.
            assert_eq!(out.plus_di, 0.0);
            assert_eq!(out.minus_di, 0.0);
            assert_eq!(out.adx, 0.0);
        }
    }

    #[test]
    fn first_bar_has_no_directional_movement() {
        let bars = make_ohlc_bars(&[(100.0, 105.0, 95.0, 102.0)]);
        let mut dmi = Dmi::new(3);
        let out = dmi.update(&bars[0]);
        assert_eq!(out.plus_di, 0.0);
        assert_eq!(out.minus_di, 0.0);
    }
}
