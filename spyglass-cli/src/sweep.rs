//! Parameter sweep — replay the same bars across a config grid in parallel.
//!
//! One engine instance per cell; instances share nothing, so the sweep is
//! embarrassingly parallel under rayon.

use anyhow::Result;
use rayon::prelude::*;

use spyglass_core::config::StrategyConfig;
use spyglass_core::engine::{replay, SessionRow};
use spyglass_core::fingerprint::config_fingerprint;

use crate::report::TradeSummary;

/// One evaluated grid cell.
#[derive(Debug, Clone)]
pub struct SweepCell {
    pub stop_distance: f64,
    pub adx_threshold: f64,
    pub fingerprint: String,
    pub summary: TradeSummary,
}

/// Run the stop-distance x ADX-threshold grid, sorted best-first by P&L.
pub fn run_sweep(
    base: &StrategyConfig,
    rows: &[SessionRow],
    stops: &[f64],
    adx_thresholds: &[f64],
) -> Result<Vec<SweepCell>> {
    let grid: Vec<(f64, f64)> = stops
        .iter()
        .flat_map(|&stop| adx_thresholds.iter().map(move |&adx| (stop, adx)))
        .collect();

    let mut cells = grid
        .par_iter()
        .map(|&(stop_distance, adx_threshold)| {
            let config = StrategyConfig {
                stop_distance,
                adx_threshold,
                ..base.clone()
            };
            let report = replay(&config, rows)?;
            Ok(SweepCell {
                stop_distance,
                adx_threshold,
                fingerprint: config_fingerprint(&config),
                summary: TradeSummary::from_trades(&report.trades, config.contract_multiplier),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    cells.sort_by(|a, b| {
        b.summary
            .total_pnl
            .partial_cmp(&a.summary.total_pnl)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(cells)
}
