/*
 * Boid Flocking Simulation
 *
 * A 3D flock in which every boid steers by three local rules:
 * 1. Separation: a short-range push away from close neighbors
 * 2. Alignment: steer towards the average heading of neighbors
 * 3. Cohesion: steer towards the average position of neighbors
 * plus a random wobble and a weak pull toward the center of the scene.
 *
 * Usage: boids3d [params.json]
 * Set RUST_LOG (for example RUST_LOG=boids3d=debug) to see simulation logs.
 */

use boids3d::app;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() {
    init_tracing();
    nannou::app(app::model).update(app::update).run();
}
