/*
 * Population Module
 *
 * Spawns a fresh flock: integer lattice positions around the origin and
 * random unit headings, every boid starting with the default color.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::boid::Boid;
use crate::noise::random_unit_vector;
use crate::params::SimulationParams;

#[derive(Clone, Copy, Debug)]
pub struct PopulationFactory {
    pub spawn_extent: i32,
}

impl PopulationFactory {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            spawn_extent: params.spawn_extent,
        }
    }

    // `n` new boids; position components and heading draws are integers in
    // [-spawn_extent, spawn_extent]
    pub fn create<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Boid> {
        let extent = self.spawn_extent.max(1);
        (0..n)
            .map(|_| {
                let position = vec3(
                    rng.gen_range(-extent..=extent) as f32,
                    rng.gen_range(-extent..=extent) as f32,
                    rng.gen_range(-extent..=extent) as f32,
                );
                let velocity = random_unit_vector(rng, extent);
                Boid::new(position, velocity)
            })
            .collect()
    }
}

// Starting transforms carry no rotation yet
pub fn initial_transforms(boids: &[Boid]) -> Vec<Mat4> {
    boids
        .iter()
        .map(|boid| Mat4::from_translation(boid.position))
        .collect()
}
