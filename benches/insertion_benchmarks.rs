//! Benchmarks for incremental Delaunay insertion.
//!
//! This suite measures:
//! - Building a mesh from scratch for growing point counts
//! - Single insertions into an already populated mesh
//! - Point location by linear scan
//! - The brute-force Delaunay check used by validation

#![allow(missing_docs)] // Allow missing docs for criterion-generated functions

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use incremental_delaunay::{
    DelaunayMesh, Rectangle, TriangulationOps, Vertex, util::generate_random_points,
};
use std::hint::black_box;

const AREA: Rectangle = Rectangle::new(0.0, 0.0, 100.0, 100.0);

fn populated_mesh(count: u32, seed: u64) -> DelaunayMesh {
    let mut mesh = DelaunayMesh::new();
    mesh.seed(AREA).expect("Failed to seed mesh");
    for point in generate_random_points(count, &AREA, seed) {
        mesh.insert(point).expect("Failed to insert point");
    }
    mesh
}

/// Benchmark building a mesh from a batch of random points
fn bench_mesh_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_construction");

    for count in [10_u32, 50, 100, 250, 500] {
        let points = generate_random_points(count, &AREA, 42);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("random", count), &points, |b, points| {
            b.iter(|| {
                let mut mesh = DelaunayMesh::new();
                mesh.seed(black_box(AREA)).expect("Failed to seed mesh");
                for &point in points {
                    black_box(mesh.insert(point).expect("Failed to insert point"));
                }
                mesh
            });
        });
    }
    group.finish();
}

/// Benchmark a single insertion into meshes of different sizes
fn bench_single_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_insertion");

    for size in [50_u32, 200, 800] {
        let mesh = populated_mesh(size, 7);
        let point = Vertex::new(50.5, 49.25);
        group.bench_with_input(BenchmarkId::new("into_mesh_of", size), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.clone(),
                |mut mesh| black_box(mesh.insert(black_box(point))),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Benchmark point location
fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for size in [50_u32, 200, 800] {
        let mesh = populated_mesh(size, 11);
        let queries = generate_random_points(64, &AREA, 99);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &mesh, |b, mesh| {
            b.iter(|| {
                for query in &queries {
                    black_box(mesh.locate(black_box(query)));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark the brute-force Delaunay check
fn bench_delaunay_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("delaunay_check");
    group.sample_size(20);

    for size in [50_u32, 200] {
        let mesh = populated_mesh(size, 3);
        group.bench_with_input(BenchmarkId::new("brute_force", size), &mesh, |b, mesh| {
            b.iter(|| black_box(mesh.is_delaunay(1e-9)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_mesh_construction,
    bench_single_insertion,
    bench_locate,
    bench_delaunay_check
);
criterion_main!(benches);
