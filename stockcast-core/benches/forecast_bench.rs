//! Criterion benchmarks for the forecast hot path: fit + predict over a
//! multi-year daily history at each supported horizon.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{Duration, NaiveDate};
use stockcast_core::domain::{PriceBar, PriceSeries};
use stockcast_core::forecast;

fn make_series(n: usize) -> PriceSeries {
    let base_date = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.05).sin() * 10.0 + i as f64 * 0.02;
            PriceBar {
                date: base_date + Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000,
                adj_close: close,
            }
        })
        .collect();
    PriceSeries::new("SPY", bars)
}

fn bench_forecast(c: &mut Criterion) {
    let series = make_series(2_500); // roughly ten years of daily bars

    let mut group = c.benchmark_group("forecast");
    for years in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::new("fit_predict", years), &years, |b, &y| {
            b.iter(|| forecast::forecast(black_box(&series), y * 365).unwrap());
        });
    }
    group.finish();
}

fn bench_training_frame(c: &mut Criterion) {
    let series = make_series(2_500);
    c.bench_function("training_frame", |b| {
        b.iter(|| forecast::training_frame(black_box(&series)).unwrap());
    });
}

criterion_group!(benches, bench_forecast, bench_training_frame);
criterion_main!(benches);
