/*
 * Simulation Module
 *
 * The Simulator owns the flock, the transform cache handed to the renderer,
 * the parameter set and the random source. Each step:
 * 1. advances every position along its heading
 * 2. gathers the flocking, noise and center-pull contributions
 * 3. renormalizes the heading (speed is not simulated, only direction)
 * 4. rebuilds the boid's world transform
 *
 * Two update orders are supported. Synchronous advances all positions
 * first and computes every force from that shared snapshot, which allows the
 * neighbor scan to run in parallel and through the spatial grid. Sequential
 * processes boids one at a time in index order, so later boids see the
 * already-updated positions and headings of earlier ones.
 *
 * Random draws are made on the calling thread in index order under both
 * policies, so a seeded run is reproducible regardless of thread count.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::boid::Boid;
use crate::error::ParamsError;
use crate::forces::{
    center_pull, density_color, flocking_contribution, scan_and_recolor, FlockingContribution,
};
use crate::noise::RandomNoise;
use crate::orientation::{mesh_forward, world_transform};
use crate::params::{SimulationParams, UpdatePolicy};
use crate::population::{initial_transforms, PopulationFactory};
use crate::spatial_grid::SpatialGrid;

// Neighborhood summary of the most recent step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    // Directed pairs: a mutual neighborhood counts twice
    pub neighbor_pairs: usize,
    pub isolated: usize,
    pub mean_neighbors: f32,
}

impl StepStats {
    fn from_counts(counts: &[usize]) -> Self {
        if counts.is_empty() {
            return Self::default();
        }
        let neighbor_pairs: usize = counts.iter().sum();
        Self {
            neighbor_pairs,
            isolated: counts.iter().filter(|&&count| count == 0).count(),
            mean_neighbors: neighbor_pairs as f32 / counts.len() as f32,
        }
    }
}

pub struct Simulator {
    params: SimulationParams,
    boids: Vec<Boid>,
    transforms: Vec<Mat4>,
    rng: StdRng,
    stats: StepStats,
    steps: u64,
}

impl Simulator {
    // Validate `params` and spawn `params.num_boids` boids
    pub fn new(params: SimulationParams) -> Result<Self, ParamsError> {
        let mut simulator = Self::with_boids(params, Vec::new())?;
        simulator.reset();
        Ok(simulator)
    }

    // Start from a hand-built flock instead of a random one
    pub fn with_boids(params: SimulationParams, boids: Vec<Boid>) -> Result<Self, ParamsError> {
        params.validate()?;
        let rng = seeded_rng(params.rng_seed);
        let transforms = initial_transforms(&boids);
        Ok(Self {
            params,
            boids,
            transforms,
            rng,
            stats: StepStats::default(),
            steps: 0,
        })
    }

    // Replace the flock with `n` freshly spawned boids
    pub fn create(&mut self, n: usize) {
        let factory = PopulationFactory::new(&self.params);
        self.boids = factory.create(n, &mut self.rng);
        self.transforms = initial_transforms(&self.boids);
        self.stats = StepStats::default();
        self.steps = 0;
        info!(boids = n, extent = factory.spawn_extent, "created flock");
    }

    pub fn reset(&mut self) {
        self.create(self.params.num_boids);
    }

    // Swap in a new parameter set between steps. A changed seed restarts the
    // random stream; the flock itself is left alone.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ParamsError> {
        params.validate()?;
        if params.rng_seed != self.params.rng_seed {
            self.rng = seeded_rng(params.rng_seed);
        }
        info!(
            policy = ?params.update_policy,
            radius = params.neighbor_radius,
            time_step = params.time_step,
            "applied simulation parameters"
        );
        debug!(?params, "full parameter set");
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    // One transform per boid, valid until the next step
    pub fn world_transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    pub fn colors(&self) -> Vec<Vec3> {
        self.boids.iter().map(|boid| boid.color).collect()
    }

    pub fn last_stats(&self) -> StepStats {
        self.stats
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    // Advance by the configured time step
    pub fn advance(&mut self) {
        self.step(self.params.time_step);
    }

    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            warn!(dt, "ignoring step with a non-positive or non-finite time step");
            return;
        }
        if self.boids.is_empty() {
            self.stats = StepStats::default();
            return;
        }

        let counts = match self.params.update_policy {
            UpdatePolicy::Synchronous => self.step_synchronous(dt),
            UpdatePolicy::Sequential => self.step_sequential(dt),
        };

        self.stats = StepStats::from_counts(&counts);
        self.steps += 1;
        debug!(
            step = self.steps,
            boids = self.boids.len(),
            mean_neighbors = self.stats.mean_neighbors,
            isolated = self.stats.isolated,
            "advanced flock"
        );
    }

    fn step_synchronous(&mut self, dt: f32) -> Vec<usize> {
        for boid in &mut self.boids {
            boid.integrate(dt);
        }

        let noise = RandomNoise::new(&self.params);
        let rng = &mut self.rng;
        let noise_samples: Vec<Vec3> = (0..self.boids.len())
            .map(|_| noise.sample(&mut *rng))
            .collect();

        // Same per-boid scan as `scan_and_recolor`, run over one snapshot
        let contributions = scan_neighborhoods(&self.boids, &self.params);

        let params = &self.params;
        let mut counts = Vec::with_capacity(self.boids.len());
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let contribution = contributions[i];
            boid.color = density_color(contribution.neighbor_count, params);
            steer(boid, contribution.delta, noise_samples[i], params, dt);
            self.transforms[i] = world_transform(boid.position, boid.velocity);
            counts.push(contribution.neighbor_count);
        }
        counts
    }

    fn step_sequential(&mut self, dt: f32) -> Vec<usize> {
        let noise = RandomNoise::new(&self.params);
        let n = self.boids.len();
        let mut counts = Vec::with_capacity(n);

        for i in 0..n {
            self.boids[i].integrate(dt);
            let contribution = scan_and_recolor(i, &mut self.boids, &self.params);
            let noise_sample = noise.sample(&mut self.rng);

            let boid = &mut self.boids[i];
            steer(boid, contribution.delta, noise_sample, &self.params, dt);
            self.transforms[i] = world_transform(boid.position, boid.velocity);
            counts.push(contribution.neighbor_count);
        }
        counts
    }
}

// Flocking contributions for every boid against a fixed snapshot
fn scan_neighborhoods(boids: &[Boid], params: &SimulationParams) -> Vec<FlockingContribution> {
    let n = boids.len();

    if params.enable_spatial_grid {
        let grid = SpatialGrid::from_positions(
            params.neighbor_radius,
            boids.iter().map(|boid| boid.position),
        );
        if params.enable_parallel {
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let candidates = grid.nearby_indices(boids[i].position);
                    flocking_contribution(i, boids, candidates, params)
                })
                .collect()
        } else {
            let mut grid = grid;
            (0..n)
                .map(|i| {
                    let candidates = grid.nearby_indices_cached(boids[i].position);
                    flocking_contribution(i, boids, candidates.iter().copied(), params)
                })
                .collect()
        }
    } else if params.enable_parallel {
        (0..n)
            .into_par_iter()
            .map(|i| flocking_contribution(i, boids, 0..n, params))
            .collect()
    } else {
        (0..n)
            .map(|i| flocking_contribution(i, boids, 0..n, params))
            .collect()
    }
}

// Fold the three contributions into the heading and renormalize it
fn steer(boid: &mut Boid, flocking: Vec3, noise: Vec3, params: &SimulationParams, dt: f32) {
    let flocking = flocking * dt;
    // Noise is diffusive, so it scales with the square root of the step
    let noise = noise * dt.sqrt();
    let gravity = center_pull(boid.position, params) * dt;

    let accumulated = boid.velocity + flocking + noise + gravity;
    boid.velocity = unit_heading(accumulated, boid.velocity);
}

// Normalized `accumulated`, or the previous heading when the sum cancels out
fn unit_heading(accumulated: Vec3, previous: Vec3) -> Vec3 {
    let heading = accumulated.normalize_or_zero();
    if heading != Vec3::ZERO {
        return heading;
    }
    let previous = previous.normalize_or_zero();
    if previous != Vec3::ZERO {
        previous
    } else {
        mesh_forward()
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
