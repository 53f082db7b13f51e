//! Auxiliary reference series aligned to the bar stream.

use serde::{Deserialize, Serialize};

/// Optional per-bar reference readings: a volatility index level, its
/// short-dated counterpart, and a direct implied-volatility feed.
///
/// All fields are optional and may be non-numeric in a live feed; every
/// consumer goes through [`AuxQuote::resolve_implied_vol`] or checks
/// finiteness itself rather than trusting the raw values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AuxQuote {
    pub vix: Option<f64>,
    pub vix9d: Option<f64>,
    pub implied_vol: Option<f64>,
}

impl AuxQuote {
    /// Implied volatility with the documented fallback chain: the direct
    /// feed when finite and positive, else the volatility index level
    /// divided by 100, else its short-dated counterpart, else `default_iv`.
    pub fn resolve_implied_vol(&self, default_iv: f64) -> f64 {
        usable(self.implied_vol)
            .or_else(|| usable(self.vix).map(|v| v / 100.0))
            .or_else(|| usable(self.vix9d).map(|v| v / 100.0))
            .unwrap_or(default_iv)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
