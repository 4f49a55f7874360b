/*
 * Noise Module
 *
 * Random heading perturbations. Each sample has a fixed magnitude and a
 * direction drawn from three bounded integer coordinates.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;

// Draw a non-zero integer lattice vector with components in [-extent, extent]
// and return it normalized. All-zero draws are discarded and redrawn.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R, extent: i32) -> Vec3 {
    let extent = extent.max(1);
    loop {
        let draw = vec3(
            rng.gen_range(-extent..=extent) as f32,
            rng.gen_range(-extent..=extent) as f32,
            rng.gen_range(-extent..=extent) as f32,
        );
        if draw != Vec3::ZERO {
            return draw.normalize();
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RandomNoise {
    pub coefficient: f32,
    pub extent: i32,
}

impl RandomNoise {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            coefficient: params.noise_coefficient,
            extent: params.noise_extent,
        }
    }

    // A vector of length `coefficient` pointing in a random direction. The
    // draw happens even for a zero coefficient so the random stream does not
    // depend on the noise setting.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        random_unit_vector(rng, self.extent) * self.coefficient
    }
}
