/*
 * Boid Module
 *
 * This module defines the Boid struct: a point in 3D space with a unit
 * heading and a color that tracks how crowded its neighborhood is.
 * Boids carry no behavior of their own; the simulation module moves them.
 */

use nannou::prelude::*;

// Color of a boid before it has ever seen a neighbor
#[inline]
pub fn default_color() -> Vec3 {
    vec3(0.0, 1.0, 0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    // Unit length at the end of every step
    pub velocity: Vec3,
    // RGB; the blue channel grows with neighbor count and is not clamped
    pub color: Vec3,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            color: default_color(),
        }
    }

    // Advance the position along the current heading
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}
