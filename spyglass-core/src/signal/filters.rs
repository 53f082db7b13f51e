//! The closed set of entry filters.
//!
//! Each entry signal is a conjunction of these filters, evaluated per
//! direction. Keeping them as a closed enum (rather than trait objects or
//! string keys) makes the dispatch exhaustive: adding a filter forces every
//! match site to handle it.

use crate::config::StrategyConfig;

/// One member of the entry conjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Close versus session VWAP and/or fixed reference levels.
    DirectionalBias,
    /// ADX above threshold, optionally also rising.
    TrendStrength,
    /// +DI / -DI ordering.
    TrendDirection,
    /// MACD crossover-within-window, histogram sign, or EMA crossover.
    Momentum,
    /// RSI not yet stretched in the entry direction.
    Exhaustion,
    /// Volume above a multiple of its rolling average (optional).
    VolumeConfirm,
}

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::DirectionalBias => "directional_bias",
            Filter::TrendStrength => "trend_strength",
            Filter::TrendDirection => "trend_direction",
            Filter::Momentum => "momentum",
            Filter::Exhaustion => "exhaustion",
            Filter::VolumeConfirm => "volume_confirm",
        }
    }

    /// The filters active under a given configuration, in evaluation order.
    pub fn active(config: &StrategyConfig) -> Vec<Filter> {
        let mut filters = vec![
            Filter::DirectionalBias,
            Filter::TrendStrength,
            Filter::TrendDirection,
            Filter::Momentum,
            Filter::Exhaustion,
        ];
        if config.volume_confirm.is_some() {
            filters.push(Filter::VolumeConfirm);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_filter_is_config_gated() {
        let base = StrategyConfig::default();
        assert_eq!(Filter::active(&base).len(), 5);
        let with_volume = StrategyConfig {
            volume_confirm: Some(2.0),
            ..base
        };
        let active = Filter::active(&with_volume);
        assert_eq!(active.len(), 6);
        assert!(active.contains(&Filter::VolumeConfirm));
    }

    #[test]
    fn active_count_matches_config_total() {
        let config = StrategyConfig {
            volume_confirm: Some(1.5),
            ..Default::default()
        };
        assert_eq!(Filter::active(&config).len() as u8, config.filters_total());
    }
}
