//! Criterion benchmarks for aggregation and series assembly

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::path::PathBuf;

use seriesfill::loader::RecordLoader;
use seriesfill::services::{
    build_series, Aggregator, DateCodec, PeriodSequencer, SeriesAssembler, SeriesRequest,
};
use seriesfill::types::{Granularity, MetricFields, RawRecord};

/// Synthetic payments spread over two years, alternating date encodings
fn make_records(count: usize) -> Vec<RawRecord> {
    let origin = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let date = origin + Duration::days((i * 7 % 730) as i64);
            let date = if i % 2 == 0 {
                date.format("%Y-%m-%d").to_string()
            } else {
                date.format("%d-%m-%Y").to_string()
            };
            RawRecord::new(date)
                .with_metric("revenue", (i % 500) as f64)
                .with_metric("fees", (i % 17) as f64 * 0.29)
        })
        .collect()
}

fn metric_fields() -> MetricFields {
    ["revenue", "fees"].iter().map(|s| s.to_string()).collect()
}

fn bench_date_parse(c: &mut Criterion) {
    let codec = DateCodec::new();
    let mut group = c.benchmark_group("date_codec");

    for input in ["2024-03-05", "05-03-2024", "2024-03-05T18:42:10Z"] {
        group.bench_with_input(BenchmarkId::new("parse", input), &input, |b, s| {
            b.iter(|| codec.parse(black_box(s)));
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let fields = metric_fields();
    let mut group = c.benchmark_group("aggregate");

    for count in [1_000usize, 100_000] {
        let records = make_records(count);
        group.throughput(Throughput::Elements(count as u64));

        for granularity in [Granularity::Day, Granularity::Week, Granularity::Month] {
            group.bench_with_input(
                BenchmarkId::new(granularity.as_str(), count),
                &records,
                |b, records| {
                    b.iter(|| Aggregator::aggregate(black_box(records), granularity, &fields));
                },
            );
        }
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let fields = metric_fields();
    let records = make_records(10_000);
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let map = Aggregator::aggregate(&records, Granularity::Day, &fields).unwrap();

    c.bench_function("assemble_day_two_years", |b| {
        b.iter(|| {
            let periods = PeriodSequencer::generate(start, end, Granularity::Day).unwrap();
            SeriesAssembler::assemble(periods, black_box(&map), &fields)
        });
    });
}

fn bench_build_series_fixture(c: &mut Criterion) {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let inputs = vec![
        fixtures.join("payments.jsonl").to_string_lossy().into_owned(),
        fixtures.join("events.json").to_string_lossy().into_owned(),
    ];

    let records = match RecordLoader::new().load(&inputs) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Skipping build_series_fixture: {}", e);
            return;
        }
    };
    let request = SeriesRequest::new(Granularity::Week);

    c.bench_function("build_series_fixture", |b| {
        b.iter(|| build_series(black_box(&records), &request));
    });
}

criterion_group!(
    benches,
    bench_date_parse,
    bench_aggregate,
    bench_assemble,
    bench_build_series_fixture
);
criterion_main!(benches);
