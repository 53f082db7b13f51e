//! CSV bar ingest.
//!
//! Expected columns: `timestamp,open,high,low,close,volume` with optional
//! `vix,vix9d,implied_vol` columns for the auxiliary series. Timestamps are
//! exchange-local `YYYY-MM-DD HH:MM[:SS]`.

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::Path;

use spyglass_core::clock::Aggregation;
use spyglass_core::domain::{AuxQuote, Bar};
use spyglass_core::engine::SessionRow;

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    #[serde(default)]
    vix: Option<f64>,
    #[serde(default)]
    vix9d: Option<f64>,
    #[serde(default)]
    implied_vol: Option<f64>,
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }
    bail!("unrecognized timestamp '{s}'")
}

/// Load a bar file, tagging every row with the symbol and aggregation.
pub fn read_bars(path: &Path, symbol: &str, aggregation: Aggregation) -> Result<Vec<SessionRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bar file {}", path.display()))?;

    let mut rows = Vec::new();
    let mut last_ts: Option<NaiveDateTime> = None;
    for (line, record) in reader.deserialize::<CsvRow>().enumerate() {
        let record = record.with_context(|| format!("bad bar record at row {}", line + 1))?;
        let timestamp = parse_timestamp(&record.timestamp)
            .with_context(|| format!("row {}", line + 1))?;
        if let Some(prev) = last_ts {
            if timestamp <= prev {
                bail!(
                    "bars out of order at row {}: {timestamp} follows {prev}",
                    line + 1
                );
            }
        }
        last_ts = Some(timestamp);

        rows.push(SessionRow {
            bar: Bar {
                symbol: symbol.to_string(),
                timestamp,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
                aggregation,
            },
            aux: AuxQuote {
                vix: record.vix,
                vix9d: record.vix9d,
                implied_vol: record.implied_vol,
            },
        });
    }

    if rows.is_empty() {
        bail!("bar file {} contained no rows", path.display());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("spyglass-{}-{name}.csv", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_bars_with_aux_columns() {
        let path = write_temp(
            "aux",
            "timestamp,open,high,low,close,volume,vix\n\
             2024-03-15 09:30,100,101,99.5,100.5,1000,16.5\n\
             2024-03-15 09:35,100.5,102,100,101.5,1200,16.4\n",
        );
        let rows = read_bars(&path, "SPY", Aggregation::M5).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bar.close, 100.5);
        assert_eq!(rows[0].aux.vix, Some(16.5));
        assert_eq!(rows[0].aux.implied_vol, None);
    }

    #[test]
    fn rejects_out_of_order_bars() {
        let path = write_temp(
            "order",
            "timestamp,open,high,low,close,volume\n\
             2024-03-15 09:35,100,101,99.5,100.5,1000\n\
             2024-03-15 09:30,100.5,102,100,101.5,1200\n",
        );
        let result = read_bars(&path, "SPY", Aggregation::M5);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_file() {
        let path = write_temp("empty", "timestamp,open,high,low,close,volume\n");
        let result = read_bars(&path, "SPY", Aggregation::M5);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
