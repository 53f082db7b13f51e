//! Seeded synthetic sessions — demo and bench data without a market feed.
//!
//! A simple random walk shaped into intraday OHLCV bars. Deterministic per
//! seed so replays, benches, and golden tests agree across runs.

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Aggregation;
use crate::domain::{AuxQuote, Bar};
use crate::engine::SessionRow;

/// Parameters for synthetic session generation.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub symbol: String,
    pub aggregation: Aggregation,
    pub start_date: NaiveDate,
    pub days: u32,
    pub start_price: f64,
    /// Per-bar noise amplitude in price units.
    pub noise: f64,
    /// Per-bar drift in price units.
    pub drift: f64,
    pub base_volume: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            symbol: "SPY".to_string(),
            aggregation: Aggregation::M5,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 11).expect("valid date"),
            days: 1,
            start_price: 500.0,
            noise: 0.45,
            drift: 0.01,
            base_volume: 250_000.0,
        }
    }
}

/// Generate seeded sessions of random-walk bars with aligned aux quotes.
pub fn synthetic_sessions(config: &SyntheticConfig, seed: u64) -> Vec<SessionRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let session_open = NaiveTime::from_hms_opt(9, 30, 0).expect("valid session open");
    let bar_minutes = i64::from(config.aggregation.minutes());
    let bars_per_day = config.aggregation.bars_per_day();

    let mut rows = Vec::with_capacity((bars_per_day * config.days) as usize);
    let mut price = config.start_price;
    let mut vix: f64 = 16.0;

    for day in 0..config.days {
        let date = config.start_date + Duration::days(i64::from(day) * 7 / 5);
        let mut timestamp = date.and_time(session_open);

        for _ in 0..bars_per_day {
            let open = price;
            let step = config.drift + config.noise * rng.gen_range(-1.0..1.0);
            let close = (open + step).max(1.0);
            let wiggle = config.noise * rng.gen_range(0.2..1.0);
            let high = open.max(close) + wiggle;
            let low = (open.min(close) - wiggle).max(0.5);
            let volume = config.base_volume * rng.gen_range(0.4..2.5);

            vix = (vix + rng.gen_range(-0.35..0.35)).clamp(9.0, 80.0);

            rows.push(SessionRow {
                bar: Bar {
                    symbol: config.symbol.clone(),
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                    volume,
                    aggregation: config.aggregation,
                },
                aux: AuxQuote {
                    vix: Some(vix),
                    vix9d: Some(vix * 0.97),
                    implied_vol: None,
                },
            });

            price = close;
            timestamp += Duration::minutes(bar_minutes);
        }
    }

    rows
}
