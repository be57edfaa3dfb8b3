//! # Memory Index Query Benchmarks
//!
//! Queries are linear scans, so cost should grow with the record count and
//! be roughly independent of how selective the filter is.
//!
//! | Group | Measures |
//! |-------|----------|
//! | `store_memory` | validate + verify + insert, in-memory backend |
//! | `query_scan` | `by_tag`, `by_tags`, `by_authority`, `count` at several sizes |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mi_01_record_store::{RecordSigner, RecordStoreApi};
use mi_02_query_engine::MemoryQueryApi;
use mi_tests::fixtures::{clocked_store, populate, signer};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const VOCABULARY: &[&str] = &[
    "rust", "agent", "notes", "todo", "research", "ipfs", "image", "audio", "draft", "archive",
];

fn bench_store_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_memory");
    group.measurement_time(Duration::from_secs(5));

    let (store, _clock, _queries) = clocked_store();
    let alice = signer(1);
    let mut rng = rand::thread_rng();
    let mut next = 0u64;

    group.throughput(Throughput::Elements(1));
    group.bench_function("single_write", |b| {
        b.iter(|| {
            next += 1;
            let tag_count = rng.gen_range(0..5);
            let record_tags = VOCABULARY
                .choose_multiple(&mut rng, tag_count)
                .map(|t| t.to_string())
                .collect();
            black_box(store.store_memory(&alice, format!("bafy-{next}"), record_tags))
        })
    });

    group.finish();
}

fn bench_query_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scan");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000] {
        let (store, _clock, queries) = clocked_store();
        let alice = signer(1);
        let bob = signer(2);
        if populate(&*store, &alice, size / 2, VOCABULARY, 3).is_err()
            || populate(&*store, &bob, size - size / 2, VOCABULARY, 2).is_err()
        {
            continue;
        }
        let authority = alice.authority();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("by_tag", size), &size, |b, _| {
            b.iter(|| black_box(queries.by_tag("rust")))
        });
        group.bench_with_input(BenchmarkId::new("by_tags", size), &size, |b, _| {
            b.iter(|| black_box(queries.by_tags(&["rust", "agent"])))
        });
        group.bench_with_input(BenchmarkId::new("by_authority", size), &size, |b, _| {
            b.iter(|| black_box(queries.by_authority(&authority)))
        });
        group.bench_with_input(BenchmarkId::new("count", size), &size, |b, _| {
            b.iter(|| black_box(queries.count()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_store_memory, bench_query_scan);
criterion_main!(benches);
