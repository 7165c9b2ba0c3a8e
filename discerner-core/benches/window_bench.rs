//! Criterion benchmarks for the event-window hot paths.
//!
//! Benchmarks:
//! 1. Gap resolution across long gap runs
//! 2. Full window construction over a year of calendar-daily prices
//! 3. Inflection counting and display ranking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use discerner_core::domain::{PriceSeries, ReturnPair};
use discerner_core::window::{build_window, resolve_non_gap, Direction};
use discerner_core::{count_inflections, rank_for_display};

// ── Helpers ──────────────────────────────────────────────────────────

fn calendar_series(days: usize) -> PriceSeries {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let prices = (0..days)
        .map(|i| {
            if i % 7 == 5 || i % 7 == 6 {
                None
            } else {
                Some(100.0 + (i as f64 * 0.1).sin() * 10.0)
            }
        })
        .collect();
    PriceSeries::new(start, prices)
}

fn gap_run_series(gap_len: usize) -> PriceSeries {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut prices = vec![Some(1.0)];
    prices.extend(std::iter::repeat(None).take(gap_len));
    prices.push(Some(2.0));
    PriceSeries::new(start, prices)
}

fn pairs(n: usize) -> Vec<ReturnPair> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            ReturnPair::new((x * 0.7).sin() * 0.05, (x * 1.3).cos() * 0.05)
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_non_gap");
    for gap_len in [10, 1_000, 100_000] {
        let series = gap_run_series(gap_len);
        group.bench_with_input(BenchmarkId::new("forward", gap_len), &series, |b, s| {
            b.iter(|| resolve_non_gap(black_box(s), 1, Direction::Forward))
        });
        group.bench_with_input(BenchmarkId::new("reverse", gap_len), &series, |b, s| {
            b.iter(|| resolve_non_gap(black_box(s), gap_len, Direction::Reverse))
        });
    }
    group.finish();
}

fn bench_build_window(c: &mut Criterion) {
    let series = calendar_series(366);
    c.bench_function("build_window_year", |b| {
        b.iter(|| {
            (14..352)
                .filter_map(|day| build_window(black_box(&series), day, 14).ok())
                .count()
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for n in [100, 10_000] {
        let data = pairs(n);
        group.bench_with_input(BenchmarkId::new("count_inflections", n), &data, |b, p| {
            b.iter(|| count_inflections(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("rank_for_display", n), &data, |b, p| {
            b.iter(|| rank_for_display(black_box(p)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_build_window, bench_classify);
criterion_main!(benches);
