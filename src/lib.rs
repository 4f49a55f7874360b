/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (params, boid, noise, forces, orientation, population,
 * spatial_grid, simulation) has no window or input dependencies and can be
 * driven headless. The remaining modules make up the nannou viewer that
 * renders the simulator's published transforms and colors.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::ParamsError;
pub use forces::{compute_flocking_velocity_delta, FlockingContribution};
pub use noise::RandomNoise;
pub use orientation::{rotation_aligning, world_transform};
pub use params::{SimulationParams, UpdatePolicy};
pub use population::PopulationFactory;
pub use simulation::{Simulator, StepStats};
pub use spatial_grid::SpatialGrid;
pub use app::Model;

// Simulation core
pub mod boid;
pub mod error;
pub mod forces;
pub mod noise;
pub mod orientation;
pub mod params;
pub mod population;
pub mod simulation;
pub mod spatial_grid;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;

// Length of a rendered arrow in world units
pub const BOID_SIZE: f32 = 1.5;
