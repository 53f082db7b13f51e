//! Trade report — summary statistics over a replay's completed trades.

use std::fmt;

use spyglass_core::domain::{ExitReason, TradeRecord};

/// Aggregate performance of a set of trades.
#[derive(Debug, Clone)]
pub struct TradeSummary {
    pub trades: usize,
    pub wins: usize,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub avg_winner: f64,
    pub avg_loser: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub stop_exits: usize,
    pub eod_exits: usize,
    pub avg_duration_minutes: f64,
}

impl TradeSummary {
    pub fn from_trades(trades: &[TradeRecord], contract_multiplier: f64) -> Self {
        let pnls: Vec<f64> = trades.iter().map(|t| t.pnl(contract_multiplier)).collect();
        let total_pnl: f64 = pnls.iter().sum();
        let wins = pnls.iter().filter(|&&p| p > 0.0).count();

        let gross_profit: f64 = pnls.iter().filter(|&&p| p > 0.0).sum();
        let gross_loss: f64 = -pnls.iter().filter(|&&p| p <= 0.0).sum::<f64>();
        let losers = trades.len() - wins;

        // Running drawdown over the cumulative P&L curve.
        let mut equity = 0.0_f64;
        let mut peak = 0.0_f64;
        let mut max_drawdown = 0.0_f64;
        for &pnl in &pnls {
            equity += pnl;
            peak = peak.max(equity);
            max_drawdown = max_drawdown.max(peak - equity);
        }

        let profit_factor = if gross_loss == 0.0 {
            if gross_profit > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else {
            gross_profit / gross_loss
        };

        TradeSummary {
            trades: trades.len(),
            wins,
            total_pnl,
            avg_pnl: if trades.is_empty() {
                0.0
            } else {
                total_pnl / trades.len() as f64
            },
            avg_winner: if wins == 0 { 0.0 } else { gross_profit / wins as f64 },
            avg_loser: if losers == 0 {
                0.0
            } else {
                -gross_loss / losers as f64
            },
            profit_factor,
            max_drawdown,
            stop_exits: trades
                .iter()
                .filter(|t| t.exit_reason == ExitReason::StopHit)
                .count(),
            eod_exits: trades
                .iter()
                .filter(|t| t.exit_reason == ExitReason::EndOfDay)
                .count(),
            avg_duration_minutes: if trades.is_empty() {
                0.0
            } else {
                trades.iter().map(|t| t.duration_minutes() as f64).sum::<f64>()
                    / trades.len() as f64
            },
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.trades == 0 {
            0.0
        } else {
            self.wins as f64 / self.trades as f64 * 100.0
        }
    }
}

impl fmt::Display for TradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "trades:        {}", self.trades)?;
        writeln!(f, "win rate:      {:.1}%", self.win_rate())?;
        writeln!(f, "total p&l:     {:+.2}", self.total_pnl)?;
        writeln!(f, "avg p&l:       {:+.2}", self.avg_pnl)?;
        writeln!(f, "avg winner:    {:+.2}", self.avg_winner)?;
        writeln!(f, "avg loser:     {:+.2}", self.avg_loser)?;
        writeln!(f, "profit factor: {:.2}", self.profit_factor)?;
        writeln!(f, "max drawdown:  {:.2}", self.max_drawdown)?;
        writeln!(
            f,
            "exits:         {} stop / {} end-of-day",
            self.stop_exits, self.eod_exits
        )?;
        write!(f, "avg duration:  {:.0}m", self.avg_duration_minutes)
    }
}
