use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rowbook_writer::{
    coerce, write_sheet, write_sheet_with_options, Record, StreamingPolicy, Value, WriteOptions,
};
use serde_json::json;

fn make_records(count: usize) -> Vec<Record> {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..count)
        .map(|i| {
            Record::new()
                .with("id", i as i64)
                .with("name", format!("row {i}"))
                .with("score", (i as f64) * 0.5)
                .with("active", i % 2 == 0)
                .with("day", day)
        })
        .collect()
}

fn bench_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");

    let int = Value::Int(42);
    let text = Value::String("hello world".to_string());
    let nested = Value::Nested(json!({"k": [1, 2, 3], "n": {"a": true}}));

    group.bench_function("int", |b| b.iter(|| coerce(black_box(&int), "f", "S")));
    group.bench_function("text", |b| b.iter(|| coerce(black_box(&text), "f", "S")));
    group.bench_function("nested", |b| {
        b.iter(|| coerce(black_box(&nested), "f", "S"))
    });

    group.finish();
}

fn bench_write_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_sheet");
    group.sample_size(10);
    let dir = tempfile::tempdir().unwrap();

    for size in &[1_000usize, 10_000] {
        let records = make_records(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("constant_memory", size), size, |b, _| {
            let path = dir.path().join("streamed.xlsx");
            b.iter(|| write_sheet(black_box(&records), &path, "Bench", None));
        });

        group.bench_with_input(BenchmarkId::new("in_memory", size), size, |b, _| {
            let path = dir.path().join("buffered.xlsx");
            let options =
                WriteOptions::default().with_streaming(StreamingPolicy::in_memory());
            b.iter(|| {
                write_sheet_with_options(black_box(&records), &path, "Bench", None, &options)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_coerce, bench_write_sheet);
criterion_main!(benches);
