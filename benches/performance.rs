// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyhull::{build_many, random_cube_points, random_sphere_points, HullConfig, QuickHull};

fn bench_random_cube(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_cube");

    for &n in &[1_000usize, 10_000, 100_000] {
        let points = random_cube_points(n, 1.0, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            let mut hull = QuickHull::new();
            b.iter(|| {
                hull.build(black_box(points)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_random_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_sphere");
    group.sample_size(20);

    for &n in &[1_000usize, 10_000, 100_000] {
        let points = random_sphere_points(n, 1.0, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            let mut hull = QuickHull::new();
            b.iter(|| {
                hull.build(black_box(points)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");

    let points = random_sphere_points(10_000, 1.0, 7);
    group.bench_function("sphere_10k", |b| {
        b.iter(|| {
            let mut hull = QuickHull::from_points(black_box(&points)).unwrap();
            hull.triangulate();
            hull
        });
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);

    let sets: Vec<_> = (0..16).map(|seed| random_cube_points(10_000, 1.0, seed)).collect();
    let config = HullConfig::default();
    group.bench_function("16x10k", |b| {
        b.iter(|| build_many(black_box(&sets), &config));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_random_cube,
    bench_random_sphere,
    bench_triangulate,
    bench_batch
);
criterion_main!(benches);
