/*
 * Boid Simulation Benchmark
 *
 * This file contains benchmarks for the flock simulation to identify performance bottlenecks.
 * It measures spawning, spatial partitioning, the per-boid force scan, and whole simulation
 * steps under each update policy.
 */

use boids3d::{
    compute_flocking_velocity_delta, PopulationFactory, SimulationParams, Simulator, SpatialGrid,
    UpdatePolicy,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const FLOCK_SIZES: [usize; 4] = [100, 500, 1000, 2000];

// Seeded parameters so every run measures the same flock
fn bench_params(num_boids: usize) -> SimulationParams {
    SimulationParams {
        num_boids,
        rng_seed: Some(7),
        ..SimulationParams::default()
    }
}

// Benchmark spawning a flock
fn bench_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("population");

    for &n in FLOCK_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let factory = PopulationFactory::new(&bench_params(n));
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(factory.create(n, &mut rng)));
        });
    }

    group.finish();
}

// Benchmark building the spatial grid and querying every boid's neighborhood
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for &n in FLOCK_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let params = bench_params(n);
            let boids = PopulationFactory::new(&params).create(n, &mut StdRng::seed_from_u64(7));

            b.iter(|| {
                let mut grid = SpatialGrid::from_positions(
                    params.neighbor_radius,
                    boids.iter().map(|boid| boid.position),
                );
                let candidates: usize = boids
                    .iter()
                    .map(|boid| grid.nearby_indices_cached(boid.position).len())
                    .sum();
                black_box(candidates)
            });
        });
    }

    group.finish();
}

// Benchmark the full-scan force calculation (alignment, cohesion, separation) for every boid
fn bench_force_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_calculations");

    for &n in FLOCK_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let params = bench_params(n);
            let mut boids =
                PopulationFactory::new(&params).create(n, &mut StdRng::seed_from_u64(7));

            b.iter(|| {
                for i in 0..boids.len() {
                    black_box(compute_flocking_velocity_delta(i, &mut boids, &params));
                }
            });
        });
    }

    group.finish();
}

// Benchmark whole steps for each update policy and neighbor search strategy
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    let variants = [
        ("synchronous", UpdatePolicy::Synchronous, false, false),
        ("synchronous_parallel", UpdatePolicy::Synchronous, true, false),
        ("synchronous_grid", UpdatePolicy::Synchronous, false, true),
        ("synchronous_parallel_grid", UpdatePolicy::Synchronous, true, true),
        ("sequential", UpdatePolicy::Sequential, false, false),
    ];

    for &n in FLOCK_SIZES.iter() {
        for (name, policy, parallel, grid) in variants {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                let params = SimulationParams {
                    update_policy: policy,
                    enable_parallel: parallel,
                    enable_spatial_grid: grid,
                    ..bench_params(n)
                };
                let mut simulator = match Simulator::new(params) {
                    Ok(simulator) => simulator,
                    Err(err) => panic!("benchmark parameters rejected: {err}"),
                };
                b.iter(|| {
                    simulator.advance();
                    black_box(simulator.world_transforms().len())
                });
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_population, bench_spatial_grid, bench_force_calculations, bench_update_loop
}

criterion_main!(benches);
