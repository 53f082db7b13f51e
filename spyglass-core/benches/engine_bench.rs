//! Criterion benchmarks for the per-bar pipeline.
//!
//! Benchmarks:
//! 1. Full session replay (indicators + signals + position machine)
//! 2. Indicator bank updates in isolation via a quiet config

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spyglass_core::config::{MomentumMode, StrategyConfig};
use spyglass_core::engine::{replay, StrategyEngine};
use spyglass_core::synthetic::{synthetic_sessions, SyntheticConfig};

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for days in [1u32, 5, 20] {
        let rows = synthetic_sessions(
            &SyntheticConfig {
                days,
                ..Default::default()
            },
            42,
        );
        let config = StrategyConfig {
            momentum: MomentumMode::MacdHistogram,
            adx_threshold: 10.0,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(days), &rows, |b, rows| {
            b.iter(|| {
                let report = replay(black_box(&config), black_box(rows)).unwrap();
                black_box(report.trades.len())
            })
        });
    }
    group.finish();
}

fn bench_on_bar(c: &mut Criterion) {
    let rows = synthetic_sessions(
        &SyntheticConfig {
            days: 5,
            ..Default::default()
        },
        7,
    );
    c.bench_function("on_bar_stream", |b| {
        b.iter(|| {
            let mut engine = StrategyEngine::new(StrategyConfig::default()).unwrap();
            for row in &rows {
                black_box(engine.on_bar(&row.bar, &row.aux));
            }
            engine.bars_seen()
        })
    });
}

criterion_group!(benches, bench_replay, bench_on_bar);
criterion_main!(benches);
