//! Indicator bank — the full recursive indicator set for one strategy.
//!
//! Owned exclusively by the engine instance processing the bar stream;
//! never shared across instances. Void bars (non-finite OHLC) do not touch
//! the recursive state — they produce a NaN snapshot that fails every
//! downstream filter instead of poisoning the smoothers.

use crate::config::StrategyConfig;
use crate::domain::{AuxQuote, Bar};
use crate::indicators::{Atr, Dmi, Ema, Macd, RealizedVol, Rsi, SessionVwap, VolumeSurge};
use crate::signal::IndicatorSnapshot;

#[derive(Debug, Clone)]
pub struct IndicatorBank {
    ema_fast: Ema,
    ema_slow: Ema,
    macd: Macd,
    rsi: Rsi,
    dmi: Dmi,
    atr: Atr,
    vwap: SessionVwap,
    volume: VolumeSurge,
    realized_vol: RealizedVol,
    default_iv: f64,
}

impl IndicatorBank {
    pub fn new(config: &StrategyConfig) -> Self {
        IndicatorBank {
            ema_fast: Ema::new(config.ema_fast),
            ema_slow: Ema::new(config.ema_slow),
            macd: Macd::new(config.macd_fast, config.macd_slow, config.macd_signal),
            rsi: Rsi::new(config.rsi_length),
            dmi: Dmi::new(config.adx_length),
            atr: Atr::new(config.atr_length),
            vwap: SessionVwap::new(),
            volume: VolumeSurge::new(config.volume_avg_length),
            realized_vol: RealizedVol::new(config.realized_vol_lookback, config.aggregation),
            default_iv: config.default_iv,
        }
    }

    /// Advance every indicator one bar and snapshot the results.
    pub fn update(&mut self, bar: &Bar, aux: &AuxQuote) -> IndicatorSnapshot {
        if bar.is_void() {
            return self.void_snapshot(bar, aux);
        }

        let macd = self.macd.update(bar.close);
        let dmi = self.dmi.update(bar);
        let volume_ratio = self.volume.update(bar.volume);

        IndicatorSnapshot {
            close: bar.close,
            vwap: self.vwap.update(bar),
            ema_fast: self.ema_fast.update(bar.close),
            ema_slow: self.ema_slow.update(bar.close),
            macd_line: macd.line,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
            rsi: self.rsi.update(bar.close),
            plus_di: dmi.plus_di,
            minus_di: dmi.minus_di,
            adx: dmi.adx,
            atr: self.atr.update(bar),
            volume: bar.volume,
            volume_avg: self.volume.average(),
            volume_ratio,
            realized_vol: self.realized_vol.update(bar.close),
            implied_vol: aux.resolve_implied_vol(self.default_iv),
        }
    }

    /// Snapshot for a void bar: price-derived fields are NaN (every filter
    /// fails closed), volume and implied vol keep their fallbacks.
    fn void_snapshot(&self, bar: &Bar, aux: &AuxQuote) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: f64::NAN,
            vwap: f64::NAN,
            ema_fast: f64::NAN,
            ema_slow: f64::NAN,
            macd_line: f64::NAN,
            macd_signal: f64::NAN,
            macd_histogram: f64::NAN,
            rsi: f64::NAN,
            plus_di: f64::NAN,
            minus_di: f64::NAN,
            adx: f64::NAN,
            atr: f64::NAN,
            volume: bar.volume,
            volume_avg: self.volume.average(),
            volume_ratio: f64::NAN,
            realized_vol: f64::NAN,
            implied_vol: aux.resolve_implied_vol(self.default_iv),
        }
    }
}
