use std::hint::black_box;

use codebox_history::{Entry, HistoryController, MemoryStore, Paginator};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn generate_log(num_entries: usize) -> Vec<Entry> {
    (0..num_entries).map(|i| Entry::new(i.to_string(), format!("snippet {}", i))).collect()
}

fn bench_paginator_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginator_walk");

    for size in [1_000, 10_000, 100_000].iter() {
        let log = generate_log(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut paginator = Paginator::new(20);
                let mut loaded = paginator.current_page(black_box(&log)).len();
                while paginator.has_more() {
                    loaded += paginator.load_more(&log).len();
                }
                loaded
            });
        });
    }

    group.finish();
}

fn bench_controller_load_more(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_load_more");

    // Ten pages on top of the first one, re-filtering the loaded list each time
    for size in [1_000, 10_000].iter() {
        let log = generate_log(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut controller =
                    HistoryController::new(MemoryStore::with_entries(log.clone()), Paginator::new(20));
                controller.load().unwrap();
                controller.set_query("snippet 1");
                for _ in 0..10 {
                    controller.load_more();
                }
                black_box(controller.view().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_paginator_walk, bench_controller_load_more);
criterion_main!(benches);
