use std::hint::black_box;
use std::io::Write;

use codebox_history::parse_history_log;
use codebox_history::store::{EntryStore, JsonFileStore};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Generate a synthetic `codebox-history` array with N entries
fn generate_log(num_entries: usize) -> Value {
    let entries: Vec<Value> = (0..num_entries)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "value": format!("fn snippet_{}() {{ println!(\"{}\"); }}", i, i),
                "createdAt": 1_700_000_000_000u64 + i as u64 * 1000,
                "from": if i % 2 == 0 { "github" } else { "stackoverflow" },
                "link": format!("https://example.com/{}", i),
                "tags": ["rust"],
            })
        })
        .collect();
    Value::Array(entries)
}

fn bench_parse_history_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_history_log");

    for size in [100, 1_000, 10_000].iter() {
        let log = generate_log(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_history_log(black_box(&log)).unwrap());
        });
    }

    group.finish();
}

fn bench_read_store_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_store_file");

    for size in [1_000, 10_000].iter() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!({ "codebox-history": generate_log(*size) })).unwrap();
        file.flush().unwrap();
        let store = JsonFileStore::open(file.path()).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(store.read().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_history_log, bench_read_store_file);
criterion_main!(benches);
