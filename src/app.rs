/*
 * Application Module
 *
 * This module defines the viewer's model and per-frame update. The viewer is
 * a thin shell around the Simulator: it forwards parameter edits from the UI,
 * runs the simulation on a fixed timestep, and leaves drawing to the
 * renderer module.
 *
 * Fixed timestep: wall-clock time accumulates and the simulation advances
 * one step (of `time_step` simulated units) per 1/60 s, with a cap on the
 * number of catch-up steps per frame.
 */

use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::simulation::Simulator;
use crate::ui;

const PHYSICS_STEPS_PER_SECOND: u64 = 60;
const MAX_STEPS_PER_FRAME: usize = 5;

pub struct Model {
    pub simulator: Simulator,
    // Editable copy; pushed to the simulator when it changes
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
}

// Parameters from the JSON file named by the first argument, if any
fn load_params() -> SimulationParams {
    match std::env::args().nth(1) {
        Some(path) => match SimulationParams::load(&path) {
            Ok(params) => {
                info!(%path, "loaded simulation parameters");
                params
            }
            Err(err) => {
                warn!(%err, "falling back to default parameters");
                SimulationParams::default()
            }
        },
        None => SimulationParams::default(),
    }
}

pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("boids3d")
        .size(1024, 768)
        .view(renderer::view)
        .raw_event(input::raw_window_event)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .build()
        .expect("failed to build the main window");

    let window = app.window(window_id).expect("main window was just created");
    let egui = Egui::from_window(&window);

    let params = load_params();
    let simulator = match Simulator::new(params.clone()) {
        Ok(simulator) => simulator,
        Err(err) => {
            warn!(%err, "invalid parameters, using defaults");
            Simulator::new(SimulationParams::default()).expect("default parameters are valid")
        }
    };
    let params = simulator.params().clone();

    Model {
        simulator,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
        physics_accumulator: Duration::ZERO,
        physics_step_size: Duration::from_nanos(1_000_000_000 / PHYSICS_STEPS_PER_SECOND),
    }
}

// Push edited parameters to the simulator, rolling the UI back if rejected
fn apply_params(model: &mut Model) {
    if let Err(err) = model.simulator.set_params(model.params.clone()) {
        warn!(%err, "rejected parameter change");
        model.params = model.simulator.params().clone();
    }
}

// Respawn the flock and drop any pending simulation time with the old one
pub fn respawn_flock(simulator: &mut Simulator, physics_accumulator: &mut Duration) {
    simulator.reset();
    *physics_accumulator = Duration::ZERO;
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(update.since_last);
    model.egui.set_elapsed_time(update.since_start);

    let (should_reset_boids, num_boids_changed, ui_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if ui_changed {
        apply_params(model);
    }
    if should_reset_boids || num_boids_changed {
        respawn_flock(&mut model.simulator, &mut model.physics_accumulator);
    }

    input::fly_camera(app, model, update.since_last.as_secs_f32());

    if model.params.pause_simulation {
        model.debug_info.physics_updates_per_frame = 0;
        return;
    }

    model.physics_accumulator += update.since_last;
    let mut steps = 0;
    while model.physics_accumulator >= model.physics_step_size && steps < MAX_STEPS_PER_FRAME {
        let started = Instant::now();
        model.simulator.advance();
        model.debug_info.step_time = started.elapsed();
        model.physics_accumulator -= model.physics_step_size;
        steps += 1;
    }
    // Drop any backlog rather than spiral when steps fall behind
    if steps == MAX_STEPS_PER_FRAME {
        model.physics_accumulator = Duration::ZERO;
    }

    model.debug_info.physics_updates_per_frame = steps;
    model.debug_info.stats = model.simulator.last_stats();
    model.debug_info.drawn_boids = model.simulator.len();
}
