//! Criterion microbenches for the batch codecs.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - batch output CSV decoding (from_output_csv_str, from_output_csv_slice)
//! - batch input CSV encoding (to_input_csv_string)
//! - multipart upload body construction (build_batch_body)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use census_geocoder::batch::{
    build_batch_body, from_input_csv_str, from_output_csv_slice, from_output_csv_str,
    to_input_csv_string, InputRow,
};

const OUTPUT_FIXTURE: &str = include_str!("../tests/fixtures/batch-output-geographies.csv");
const INPUT_FIXTURE: &str = include_str!("../tests/fixtures/batch-input.csv");

/// Repeats the fixture so a run looks like a realistic upload.
fn scaled(fixture: &str, times: usize) -> String {
    fixture.repeat(times)
}

fn bench_output_parse(c: &mut Criterion) {
    let csv = scaled(OUTPUT_FIXTURE, 200);
    let mut group = c.benchmark_group("output_parse");
    group.throughput(Throughput::Bytes(csv.len() as u64));

    group.bench_function("from_output_csv_str", |b| {
        b.iter(|| {
            let rows = from_output_csv_str(black_box(&csv)).unwrap();
            black_box(rows)
        })
    });

    group.bench_function("from_output_csv_slice", |b| {
        b.iter(|| {
            let rows = from_output_csv_slice(black_box(csv.as_bytes())).unwrap();
            black_box(rows)
        })
    });

    group.finish();
}

fn input_rows() -> Vec<InputRow> {
    from_input_csv_str(&scaled(INPUT_FIXTURE, 200)).expect("Failed to parse input fixture")
}

fn bench_input_write(c: &mut Criterion) {
    let rows = input_rows();

    let mut group = c.benchmark_group("input_write");
    group.throughput(Throughput::Elements(rows.len() as u64));

    group.bench_function("to_input_csv_string", |b| {
        b.iter(|| {
            let csv = to_input_csv_string(black_box(&rows)).unwrap();
            black_box(csv)
        })
    });

    group.finish();
}

fn bench_multipart(c: &mut Criterion) {
    let rows = input_rows();
    let fields = [("benchmark", "Public_AR_Current"), ("vintage", "Current_Current")];

    let mut group = c.benchmark_group("multipart");
    group.throughput(Throughput::Elements(rows.len() as u64));

    group.bench_function("build_batch_body", |b| {
        b.iter(|| {
            let body = build_batch_body(black_box(&rows), &fields).unwrap();
            black_box(body)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_output_parse, bench_input_write, bench_multipart);
criterion_main!(benches);
