//! Record Store Benchmarks
//!
//! Single-threaded cost of each store operation, plus search throughput
//! under concurrent readers.
//!
//! ## Expectations
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | search | O(N) | full scan under the shared lock |
//! | add | O(k) amortized | append under the exclusive lock |
//! | update | O(k) | validate then write |
//! | delete | O(N + k log k) | one compaction pass |
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench store_ops
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqdb::{Record, RecordStore, StoreConfig};
use std::sync::Arc;
use std::thread;

// =============================================================================
// Test Utilities
// =============================================================================

fn populated(len: usize) -> RecordStore {
    RecordStore::populate(&StoreConfig::new(len, (len / 10).max(1) as i32).with_seed(7)).unwrap()
}

// =============================================================================
// Search
// =============================================================================

fn search_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for len in [10_000usize, 100_000, 1_000_000] {
        let store = populated(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("scan", len), &store, |b, store| {
            b.iter(|| black_box(store.search(black_box(42))));
        });
    }

    group.finish();
}

fn concurrent_search_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_concurrent");
    let store = Arc::new(populated(100_000));

    for readers in [1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("readers", readers), &readers, |b, &readers| {
            b.iter(|| {
                let handles: Vec<_> = (0..readers)
                    .map(|r| {
                        let store = Arc::clone(&store);
                        thread::spawn(move || store.search(r as i32).len())
                    })
                    .collect();
                for handle in handles {
                    black_box(handle.join().unwrap());
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Mutations
// =============================================================================

fn mutation_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_one", |b| {
        let store = RecordStore::new();
        b.iter(|| store.add(black_box(&[1])).unwrap());
    });

    group.bench_function("update_one", |b| {
        let store = populated(100_000);
        let records = [Record::new(50_000, 3)];
        b.iter(|| store.update(black_box(&records)).unwrap());
    });

    group.bench_function("delete_then_add", |b| {
        let store = populated(100_000);
        b.iter(|| {
            store.delete(black_box(&[0])).unwrap();
            store.add(&[0]).unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    search_benchmarks,
    concurrent_search_benchmarks,
    mutation_benchmarks
);
criterion_main!(benches);
