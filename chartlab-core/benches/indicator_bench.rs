//! Criterion benchmarks for indicator hot paths.
//!
//! Benchmarks:
//! 1. Each calculator on its own over growing series
//! 2. Full enrichment with every default indicator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chartlab_core::components::Indicator;
use chartlab_core::data::synthetic_bars;
use chartlab_core::indicators::{Adx, Bollinger, Macd, Rsi, Sma, Stochastic};
use chartlab_core::pipeline::{enrich, ComputeOptions};
use chartlab_core::ParameterSet;

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_compute");

    for &bar_count in &[252, 1260, 5000] {
        let bars = synthetic_bars("bench", bar_count);
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(20)),
            Box::new(Rsi::new(14)),
            Box::new(Bollinger::new(20, 2.0)),
            Box::new(Macd::new(12, 26, 9)),
            Box::new(Stochastic::new(14, 3, 3)),
            Box::new(Adx::new(14)),
        ];
        for indicator in &indicators {
            group.bench_with_input(
                BenchmarkId::new(indicator.name(), bar_count),
                &bars,
                |b, bars| b.iter(|| indicator.compute(black_box(bars))),
            );
        }
    }

    group.finish();
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich_all");
    let params = ParameterSet::defaults().entries();
    let options = ComputeOptions::default();

    for &bar_count in &[252, 1260, 5000] {
        let bars = synthetic_bars("bench", bar_count);
        group.bench_with_input(BenchmarkId::from_parameter(bar_count), &bars, |b, bars| {
            b.iter(|| enrich(black_box(bars), &params, &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_enrich);
criterion_main!(benches);
