//! Spyglass CLI — replay and sweep commands.
//!
//! Commands:
//! - `run` — replay a CSV bar file (or a seeded synthetic session) through
//!   one strategy config and print the trades and summary
//! - `sweep` — replay the same bars across a stop-distance x ADX-threshold
//!   grid in parallel and print a comparison table

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use spyglass_core::config::StrategyConfig;
use spyglass_core::domain::OptionSide;
use spyglass_core::engine::{replay, SessionRow};
use spyglass_core::fingerprint::config_fingerprint;
use spyglass_core::synthetic::{synthetic_sessions, SyntheticConfig};

mod input;
mod report;
mod sweep;

use report::TradeSummary;

#[derive(Parser)]
#[command(
    name = "spyglass",
    about = "Spyglass CLI — intraday options signal engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one config over a bar file or a synthetic session.
    Run {
        /// Path to a TOML strategy config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV bar file (timestamp,open,high,low,close,volume[,vix,vix9d,implied_vol]).
        #[arg(long)]
        bars: Option<PathBuf>,

        /// Synthetic session days when no bar file is given.
        #[arg(long, default_value_t = 5)]
        days: u32,

        /// Synthetic data seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Also print per-bar signal diagnostics for near-miss bars.
        #[arg(long, default_value_t = false)]
        signals: bool,
    },
    /// Replay a parameter grid in parallel and rank the cells.
    Sweep {
        /// Path to a TOML strategy config used as the grid base.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV bar file; synthetic data is used when omitted.
        #[arg(long)]
        bars: Option<PathBuf>,

        /// Synthetic session days when no bar file is given.
        #[arg(long, default_value_t = 20)]
        days: u32,

        /// Synthetic data seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop distances to sweep.
        #[arg(long, value_delimiter = ',', default_value = "1.0,1.5,2.0,3.0")]
        stops: Vec<f64>,

        /// ADX thresholds to sweep.
        #[arg(long, value_delimiter = ',', default_value = "20,25,30")]
        adx: Vec<f64>,
    },
}

fn load_config(path: Option<&Path>) -> Result<StrategyConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            StrategyConfig::from_toml_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))
        }
        None => Ok(StrategyConfig::default()),
    }
}

fn load_rows(
    bars: Option<&Path>,
    config: &StrategyConfig,
    days: u32,
    seed: u64,
) -> Result<Vec<SessionRow>> {
    match bars {
        Some(path) => input::read_bars(path, &config.symbol, config.aggregation),
        None => Ok(synthetic_sessions(
            &SyntheticConfig {
                symbol: config.symbol.clone(),
                aggregation: config.aggregation,
                days,
                ..Default::default()
            },
            seed,
        )),
    }
}

fn cmd_run(
    config_path: Option<PathBuf>,
    bars: Option<PathBuf>,
    days: u32,
    seed: u64,
    signals: bool,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let rows = load_rows(bars.as_deref(), &config, days, seed)?;

    println!(
        "{} | {} bars | run {}",
        config.symbol,
        rows.len(),
        &config_fingerprint(&config)[..12]
    );

    let report = replay(&config, &rows)?;

    if signals {
        // Near-miss diagnostics: bars where all but one filter agreed.
        let threshold = config.filters_total() - 1;
        for out in &report.outputs {
            let best = out.signal.call_filters_passed.max(out.signal.put_filters_passed);
            if best >= threshold {
                println!(
                    "{}  call {}/{}  put {}/{}{}{}",
                    out.timestamp,
                    out.signal.call_filters_passed,
                    out.signal.filters_total,
                    out.signal.put_filters_passed,
                    out.signal.filters_total,
                    if out.signal.call_signal || out.signal.put_signal {
                        "  SIGNAL"
                    } else {
                        ""
                    },
                    if out.signal.ambiguous { "  AMBIGUOUS" } else { "" },
                );
            }
        }
        println!();
    }

    if report.trades.is_empty() {
        println!("no trades");
    } else {
        println!(
            "{:<20} {:<5} {:>9} {:>9} {:>10} {:>9}",
            "entry", "side", "in", "out", "reason", "p&l"
        );
        for trade in &report.trades {
            println!(
                "{:<20} {:<5} {:>9.2} {:>9.2} {:>10} {:>9.2}",
                trade.entry_time.format("%Y-%m-%d %H:%M"),
                match trade.side {
                    OptionSide::Call => "call",
                    OptionSide::Put => "put",
                },
                trade.entry_price,
                trade.exit_price,
                format!("{:?}", trade.exit_reason).to_lowercase(),
                trade.pnl(config.contract_multiplier),
            );
        }
        println!();
        println!(
            "{}",
            TradeSummary::from_trades(&report.trades, config.contract_multiplier)
        );
    }

    if !report.open_position.is_flat() {
        println!("warning: position still open at end of feed");
    }
    Ok(())
}

fn cmd_sweep(
    config_path: Option<PathBuf>,
    bars: Option<PathBuf>,
    days: u32,
    seed: u64,
    stops: Vec<f64>,
    adx: Vec<f64>,
) -> Result<()> {
    let base = load_config(config_path.as_deref())?;
    let rows = load_rows(bars.as_deref(), &base, days, seed)?;

    println!(
        "{} | {} bars | {} cells",
        base.symbol,
        rows.len(),
        stops.len() * adx.len()
    );

    let cells = sweep::run_sweep(&base, &rows, &stops, &adx)?;

    println!(
        "{:>6} {:>6} {:>7} {:>7} {:>11} {:>7} {:>9}  {}",
        "stop", "adx", "trades", "win%", "p&l", "pf", "maxdd", "run"
    );
    for cell in &cells {
        println!(
            "{:>6.2} {:>6.1} {:>7} {:>6.1}% {:>11.2} {:>7.2} {:>9.2}  {}",
            cell.stop_distance,
            cell.adx_threshold,
            cell.summary.trades,
            cell.summary.win_rate(),
            cell.summary.total_pnl,
            cell.summary.profit_factor,
            cell.summary.max_drawdown,
            &cell.fingerprint[..12],
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            bars,
            days,
            seed,
            signals,
        } => cmd_run(config, bars, days, seed, signals),
        Commands::Sweep {
            config,
            bars,
            days,
            seed,
            stops,
            adx,
        } => cmd_sweep(config, bars, days, seed, stops, adx),
    }
}
