//! Bar clock — aggregation mapping and the session time-window gate.
//!
//! Everything here is a pure function of the bar's own timestamp and the
//! configuration. The gate never consults wall-clock time, so replays are
//! reproducible regardless of when they run.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Chart aggregation period of the incoming bar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    M1,
    M2,
    M5,
    M10,
    M15,
    M30,
    H1,
}

impl Aggregation {
    /// Bar length in minutes.
    pub fn minutes(&self) -> u32 {
        match self {
            Aggregation::M1 => 1,
            Aggregation::M2 => 2,
            Aggregation::M5 => 5,
            Aggregation::M10 => 10,
            Aggregation::M15 => 15,
            Aggregation::M30 => 30,
            Aggregation::H1 => 60,
        }
    }

    /// Bars in a regular 6.5-hour cash session.
    ///
    /// The hourly count rounds the half bar up, matching how charting
    /// platforms emit a short final bar rather than dropping it.
    pub fn bars_per_day(&self) -> u32 {
        match self {
            Aggregation::M1 => 390,
            Aggregation::M2 => 195,
            Aggregation::M5 => 78,
            Aggregation::M10 => 39,
            Aggregation::M15 => 26,
            Aggregation::M30 => 13,
            Aggregation::H1 => 7,
        }
    }

    /// Bars per year, for annualizing per-bar return volatility.
    pub fn bars_per_year(&self) -> u32 {
        self.bars_per_day() * TRADING_DAYS_PER_YEAR
    }
}

/// Per-bar verdict of the session time window.
///
/// `past_entry_start` is false during the opening range; `before_cutoff`
/// turns false inside the end-of-day buffer and forces open positions out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindowGate {
    pub past_entry_start: bool,
    pub before_cutoff: bool,
}

impl TimeWindowGate {
    /// Evaluate the gate for a bar timestamp.
    pub fn evaluate(
        timestamp: NaiveDateTime,
        session_open: NaiveTime,
        session_close: NaiveTime,
        opening_range_minutes: u32,
        close_buffer_secs: u32,
    ) -> Self {
        let t = timestamp.time();
        let elapsed_secs = seconds_of_day(t) as i64 - seconds_of_day(session_open) as i64;
        let remaining_secs = seconds_of_day(session_close) as i64 - seconds_of_day(t) as i64;

        TimeWindowGate {
            past_entry_start: elapsed_secs >= i64::from(opening_range_minutes) * 60,
            before_cutoff: remaining_secs > i64::from(close_buffer_secs),
        }
    }

    /// New entries are permitted only after the opening range and before
    /// the end-of-day buffer.
    pub fn entries_allowed(&self) -> bool {
        self.past_entry_start && self.before_cutoff
    }
}

fn seconds_of_day(t: NaiveTime) -> u32 {
    t.num_seconds_from_midnight()
}
