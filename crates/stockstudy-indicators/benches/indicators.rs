//! Benchmarks for indicator implementations.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stockstudy_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use stockstudy_core::types::Bar;
use stockstudy_indicators::{simd, IndicatorEngine, Kdj, Macd, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_test_bars(size: usize) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            Bar::new(
                start + Duration::days(i as i64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000_000.0,
            )
        })
        .collect()
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("running_sum", size), &data, |b, data| {
            let sma = Sma::new(60);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("resummed_simd", size), &data, |b, data| {
            b.iter(|| simd::sma_resummed(black_box(data), black_box(60)))
        });
    }

    group.finish();
}

fn benchmark_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("MACD");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            let macd = Macd::new();
            b.iter(|| macd.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_kdj(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDJ");

    for size in [1000, 10000, 100000].iter() {
        let bars = generate_test_bars(*size);

        group.bench_with_input(BenchmarkId::new("standard", size), &bars, |b, bars| {
            let kdj = Kdj::new();
            b.iter(|| kdj.calculate(black_box(bars)))
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    for size in [250, 1000, 10000].iter() {
        let bars = generate_test_bars(*size);
        let dividing_date = bars[size / 2].date;

        group.bench_with_input(BenchmarkId::new("compute_split", size), &bars, |b, bars| {
            let engine = IndicatorEngine::new();
            b.iter(|| engine.compute_split(black_box(bars), black_box(dividing_date)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sma, benchmark_macd, benchmark_kdj, benchmark_engine);
criterion_main!(benches);
