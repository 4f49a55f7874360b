/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every constant
 * the force model, the noise source and the integrator read. A parameter set
 * is validated once and then treated as read-only for the duration of a run;
 * the viewer edits a copy and hands it back to the simulator between steps.
 */

use std::fs;
use std::path::Path;

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

// How agents observe each other within a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    // Every agent advances its position, then all forces are computed from
    // that shared snapshot.
    Synchronous,
    // Agents are updated one at a time in index order; later agents see the
    // already-updated state of earlier ones.
    Sequential,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        UpdatePolicy::Synchronous
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub neighbor_radius: f32,
    pub cohesion_weight: f32,
    pub noise_coefficient: f32,
    pub repulsion_amplitude: f32,
    pub repulsion_range: f32,
    pub center: [f32; 3],
    pub gravity: f32,
    pub color_change: f32,
    pub time_step: f32,
    // Bounds of the integer draws used for spawning and for noise directions
    pub spawn_extent: i32,
    pub noise_extent: i32,
    pub update_policy: UpdatePolicy,
    pub rng_seed: Option<u64>,
    // Performance settings
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
    // Viewer state
    pub show_debug: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 500,
            neighbor_radius: 4.0,
            cohesion_weight: 0.25,
            noise_coefficient: 0.1,
            repulsion_amplitude: 10.0,
            repulsion_range: 2.0,
            center: [0.0, 0.0, 0.0],
            gravity: 0.05,
            color_change: 0.25,
            time_step: 0.1,
            spawn_extent: 100,
            noise_extent: 50,
            update_policy: UpdatePolicy::Synchronous,
            rng_seed: None,
            enable_parallel: true,
            enable_spatial_grid: false,
            show_debug: false,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    pub fn center(&self) -> Vec3 {
        Vec3::from(self.center)
    }

    // Read a JSON parameter file; missing fields fall back to the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: SimulationParams =
            serde_json::from_str(&json).map_err(|source| ParamsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let finite = [
            ("neighbor_radius", self.neighbor_radius),
            ("cohesion_weight", self.cohesion_weight),
            ("noise_coefficient", self.noise_coefficient),
            ("repulsion_amplitude", self.repulsion_amplitude),
            ("repulsion_range", self.repulsion_range),
            ("center.x", self.center[0]),
            ("center.y", self.center[1]),
            ("center.z", self.center[2]),
            ("gravity", self.gravity),
            ("color_change", self.color_change),
            ("time_step", self.time_step),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { field, value });
            }
        }

        let positive = [
            ("neighbor_radius", self.neighbor_radius),
            ("repulsion_range", self.repulsion_range),
            ("time_step", self.time_step),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ParamsError::NotPositive { field, value });
            }
        }

        if self.noise_coefficient < 0.0 {
            return Err(ParamsError::Negative {
                field: "noise_coefficient",
                value: self.noise_coefficient,
            });
        }

        let extents = [
            ("spawn_extent", self.spawn_extent),
            ("noise_extent", self.noise_extent),
        ];
        for (field, value) in extents {
            if value < 1 {
                return Err(ParamsError::EmptyRange { field, value });
            }
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        0..=5000
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }

    pub fn get_noise_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_amplitude_range() -> std::ops::RangeInclusive<f32> {
        0.0..=50.0
    }

    pub fn get_repulsion_range_range() -> std::ops::RangeInclusive<f32> {
        0.1..=10.0
    }

    pub fn get_gravity_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_color_change_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_time_step_range() -> std::ops::RangeInclusive<f32> {
        0.01..=0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        SimulationParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_radius() {
        let params = SimulationParams {
            neighbor_radius: 0.0,
            ..SimulationParams::default()
        };
        match params.validate() {
            Err(ParamsError::NotPositive { field, .. }) => assert_eq!(field, "neighbor_radius"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_nan_weights_and_negative_noise() {
        let params = SimulationParams {
            cohesion_weight: f32::NAN,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::NonFinite { field: "cohesion_weight", .. })
        ));

        let params = SimulationParams {
            noise_coefficient: -0.1,
            ..SimulationParams::default()
        };
        assert!(matches!(params.validate(), Err(ParamsError::Negative { .. })));
    }

    #[test]
    fn rejects_empty_spawn_range() {
        let params = SimulationParams {
            spawn_extent: 0,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::EmptyRange { field: "spawn_extent", value: 0 })
        ));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "num_boids": 42, "gravity": 0.2, "update_policy": "sequential", "rng_seed": 7 }}"#
        )
        .unwrap();

        let params = SimulationParams::load(file.path()).unwrap();
        assert_eq!(params.num_boids, 42);
        assert_eq!(params.gravity, 0.2);
        assert_eq!(params.update_policy, UpdatePolicy::Sequential);
        assert_eq!(params.rng_seed, Some(7));
        assert_eq!(params.neighbor_radius, SimulationParams::default().neighbor_radius);
    }

    #[test]
    fn invalid_file_values_are_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "time_step": -1.0 }}"#).unwrap();
        assert!(matches!(
            SimulationParams::load(file.path()),
            Err(ParamsError::NotPositive { field: "time_step", .. })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            SimulationParams::load(&missing),
            Err(ParamsError::Io { .. })
        ));
    }
}
