//! Strategy configuration — every length, threshold, and variant toggle.
//!
//! Loaded once per engine instance and never mutated during a run.
//! Validation happens here, at load time: a config that would divide by a
//! zero length or gate on inverted thresholds is rejected before the first
//! bar, never discovered mid-stream.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Aggregation;

/// Trend-strength requirement variants.
///
/// The source strategies disagree on whether ADX must merely clear the
/// threshold or also be rising versus a few bars back; both behaviors are
/// preserved behind this toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdxRequirement {
    /// ADX >= threshold.
    Threshold,
    /// ADX >= threshold and above its value `lookback` bars ago.
    Rising { lookback: usize },
}

/// Which momentum reading gates an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumMode {
    /// MACD line crossed its signal line within the crossover window.
    MacdCross,
    /// Sign of the MACD histogram on the current bar.
    MacdHistogram,
    /// Fast EMA crossed the slow EMA within the crossover window.
    EmaCross,
}

/// Configuration errors surfaced at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be >= 1, got {value}")]
    NonPositiveLength { name: &'static str, value: usize },
    #[error("macd_fast ({fast}) must be shorter than macd_slow ({slow})")]
    MacdPeriodsInverted { fast: usize, slow: usize },
    #[error("ema_fast ({fast}) must be shorter than ema_slow ({slow})")]
    EmaPeriodsInverted { fast: usize, slow: usize },
    #[error("rsi thresholds inverted: put_min {put_min} must be below call_max {call_max}")]
    RsiThresholdsInverted { put_min: f64, call_max: f64 },
    #[error("rsi threshold {value} outside [0, 100]")]
    RsiThresholdOutOfRange { value: f64 },
    #[error("adx_threshold {0} outside [0, 100]")]
    AdxThresholdOutOfRange(f64),
    #[error("stop_distance must be positive, got {0}")]
    NonPositiveStopDistance(f64),
    #[error("contracts must be >= 1")]
    ZeroContracts,
    #[error("volume_confirm multiplier must be positive, got {0}")]
    NonPositiveVolumeMultiplier(f64),
    #[error("default_iv must be positive, got {0}")]
    NonPositiveDefaultIv(f64),
    #[error("session_open {open} must precede session_close {close}")]
    SessionInverted { open: NaiveTime, close: NaiveTime },
    #[error(
        "entry window is empty: opening range of {opening_range_minutes}m plus \
         {close_buffer_secs}s buffer leaves no room in the session"
    )]
    EmptyEntryWindow {
        opening_range_minutes: u32,
        close_buffer_secs: u32,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Immutable per-strategy parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub symbol: String,
    pub aggregation: Aggregation,

    // Position sizing
    pub contracts: u32,
    pub contract_multiplier: f64,

    // Indicator lengths
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_length: usize,
    pub adx_length: usize,
    pub atr_length: usize,
    pub volume_avg_length: usize,
    pub realized_vol_lookback: usize,

    // Filter thresholds and variant toggles
    pub adx_threshold: f64,
    pub adx_requirement: AdxRequirement,
    pub rsi_call_max: f64,
    pub rsi_put_min: f64,
    pub momentum: MomentumMode,
    pub crossover_window: usize,
    /// Volume-confirmation multiplier; `None` disables the filter.
    pub volume_confirm: Option<f64>,
    /// Require close above/below session VWAP for the directional bias.
    pub use_vwap_bias: bool,
    /// Manually entered upside reference level (gamma-wall proxy).
    pub bull_level: Option<f64>,
    /// Manually entered downside reference level.
    pub bear_level: Option<f64>,

    // Risk and session window
    pub stop_distance: f64,
    pub opening_range_minutes: u32,
    pub close_buffer_secs: u32,
    pub session_open: NaiveTime,
    pub session_close: NaiveTime,

    // Volatility fallback
    pub default_iv: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            symbol: "SPY".to_string(),
            aggregation: Aggregation::M5,
            contracts: 1,
            contract_multiplier: 100.0,
            ema_fast: 9,
            ema_slow: 21,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_length: 14,
            adx_length: 14,
            atr_length: 14,
            volume_avg_length: 20,
            realized_vol_lookback: 20,
            adx_threshold: 25.0,
            adx_requirement: AdxRequirement::Threshold,
            rsi_call_max: 70.0,
            rsi_put_min: 30.0,
            momentum: MomentumMode::MacdCross,
            crossover_window: 5,
            volume_confirm: None,
            use_vwap_bias: true,
            bull_level: None,
            bear_level: None,
            stop_distance: 1.5,
            opening_range_minutes: 15,
            close_buffer_secs: 300,
            session_open: NaiveTime::from_hms_opt(9, 30, 0).expect("valid session open"),
            session_close: NaiveTime::from_hms_opt(16, 0, 0).expect("valid session close"),
            default_iv: 0.15,
        }
    }
}

impl StrategyConfig {
    /// Parse a TOML config; unset keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: StrategyConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject impossible parameter sets before the first bar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("rsi_length", self.rsi_length),
            ("adx_length", self.adx_length),
            ("atr_length", self.atr_length),
            ("volume_avg_length", self.volume_avg_length),
            ("realized_vol_lookback", self.realized_vol_lookback),
            ("crossover_window", self.crossover_window),
        ];
        for (name, value) in lengths {
            if value == 0 {
                return Err(ConfigError::NonPositiveLength { name, value });
            }
        }
        if let AdxRequirement::Rising { lookback } = self.adx_requirement {
            if lookback == 0 {
                return Err(ConfigError::NonPositiveLength {
                    name: "adx_rising_lookback",
                    value: lookback,
                });
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::MacdPeriodsInverted {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        if self.ema_fast >= self.ema_slow {
            return Err(ConfigError::EmaPeriodsInverted {
                fast: self.ema_fast,
                slow: self.ema_slow,
            });
        }
        for value in [self.rsi_call_max, self.rsi_put_min] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::RsiThresholdOutOfRange { value });
            }
        }
        if self.rsi_put_min >= self.rsi_call_max {
            return Err(ConfigError::RsiThresholdsInverted {
                put_min: self.rsi_put_min,
                call_max: self.rsi_call_max,
            });
        }
        if !(0.0..=100.0).contains(&self.adx_threshold) {
            return Err(ConfigError::AdxThresholdOutOfRange(self.adx_threshold));
        }
        if !(self.stop_distance > 0.0) {
            return Err(ConfigError::NonPositiveStopDistance(self.stop_distance));
        }
        if self.contracts == 0 {
            return Err(ConfigError::ZeroContracts);
        }
        if let Some(mult) = self.volume_confirm {
            if !(mult > 0.0) {
                return Err(ConfigError::NonPositiveVolumeMultiplier(mult));
            }
        }
        if !(self.default_iv > 0.0) {
            return Err(ConfigError::NonPositiveDefaultIv(self.default_iv));
        }
        if self.session_open >= self.session_close {
            return Err(ConfigError::SessionInverted {
                open: self.session_open,
                close: self.session_close,
            });
        }
        let session_secs = (self.session_close - self.session_open).num_seconds();
        let consumed =
            i64::from(self.opening_range_minutes) * 60 + i64::from(self.close_buffer_secs);
        if consumed >= session_secs {
            return Err(ConfigError::EmptyEntryWindow {
                opening_range_minutes: self.opening_range_minutes,
                close_buffer_secs: self.close_buffer_secs,
            });
        }
        Ok(())
    }

    /// Count of filters the evaluator applies under this config.
    pub fn filters_total(&self) -> u8 {
        // Bias, trend strength, trend direction, momentum, exhaustion,
        // plus the optional volume confirmation.
        5 + u8::from(self.volume_confirm.is_some())
    }
}
