//! Benchmarks for distance kernels and exact k-NN search.
//!
//! Run with: `cargo bench -p proxima-index`
//!
//! Compare SIMD vs scalar: `cargo bench -p proxima-index --features scalar`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use proxima_index::distance::{dot_product, euclidean_distance_squared, DistanceMetric};
use proxima_index::ops::ExactKnn;
use proxima_index::store::{BatchMode, IndexStore};
use proxima_index::types::VectorRecord;

/// Generate a random vector of the specified dimension.
fn random_vector(dim: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Benchmark squared Euclidean distance across common embedding dimensions.
fn bench_euclidean_squared(c: &mut Criterion) {
    let mut group = c.benchmark_group("euclidean_distance_squared");

    for dim in [128, 384, 768, 1536] {
        let a = random_vector(dim);
        let b = random_vector(dim);

        group.throughput(Throughput::Elements(dim as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
            bench.iter(|| euclidean_distance_squared(black_box(&a), black_box(&b)));
        });
    }

    group.finish();
}

/// Benchmark dot product across common embedding dimensions.
fn bench_dot_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_product");

    for dim in [128, 384, 768, 1536] {
        let a = random_vector(dim);
        let b = random_vector(dim);

        group.throughput(Throughput::Elements(dim as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
            bench.iter(|| dot_product(black_box(&a), black_box(&b)));
        });
    }

    group.finish();
}

/// Benchmark exact k-NN over stores of increasing size.
fn bench_exact_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_knn");
    let dim = 128;

    for count in [1_000usize, 10_000] {
        let store = IndexStore::new();
        let batch: Vec<VectorRecord> = (0..count as i64)
            .map(|id| VectorRecord::new(id, random_vector(dim)).expect("valid record"))
            .collect();
        store.try_insert_batch(batch, BatchMode::InsertOnly).expect("seed batch");

        let snapshot = store.snapshot().expect("snapshot");
        let query = random_vector(dim);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| {
                ExactKnn::new(
                    black_box(&snapshot),
                    black_box(&query),
                    DistanceMetric::SquaredEuclidean,
                    10,
                )
                .expect("search")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_euclidean_squared, bench_dot_product, bench_exact_knn);
criterion_main!(benches);
