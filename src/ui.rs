/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for every simulation parameter and
 * draws the on-screen debug panel.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{SimulationParams, UpdatePolicy};

// Update the UI and return whether boids should be reset, number of boids changed, and if any UI changes occurred
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_reset_boids = false;

    // Compare against a copy to detect edits made this frame
    let before = params.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    should_reset_boids = true;
                }

                ui.add(egui::Slider::new(&mut params.time_step, SimulationParams::get_time_step_range()).text("Time Step"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.neighbor_radius, SimulationParams::get_radius_range()).text("Neighbor Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.repulsion_amplitude, SimulationParams::get_amplitude_range()).text("Repulsion Amplitude"));
                ui.add(egui::Slider::new(&mut params.repulsion_range, SimulationParams::get_repulsion_range_range()).text("Repulsion Range"));
                ui.add(egui::Slider::new(&mut params.noise_coefficient, SimulationParams::get_noise_range()).text("Noise"));
                ui.add(egui::Slider::new(&mut params.gravity, SimulationParams::get_gravity_range()).text("Center Gravity"));
                ui.add(egui::Slider::new(&mut params.color_change, SimulationParams::get_color_change_range()).text("Crowding Color"));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Look: click and drag");
                ui.label("Move: W/A/S/D, Shift up, Ctrl down");
                ui.label("Flight speed: mouse wheel");
                ui.label("Space pauses, R respawns the flock");
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.label("Update order");
                ui.radio_value(&mut params.update_policy, UpdatePolicy::Synchronous, "Synchronous");
                ui.radio_value(&mut params.update_policy, UpdatePolicy::Sequential, "Sequential");

                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
                ui.checkbox(&mut params.enable_spatial_grid, "Enable Spatial Grid");
                if params.update_policy == UpdatePolicy::Sequential {
                    ui.label("Sequential updates always scan the whole flock");
                }

                ui.separator();

                // Performance metrics
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));
                ui.label(format!("Steps this frame: {}", debug_info.physics_updates_per_frame));
                ui.label(format!("Mean neighbors: {:.2}", debug_info.stats.mean_neighbors));
                ui.label(format!("Isolated boids: {}", debug_info.stats.isolated));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    let num_boids_changed = params.num_boids != before.num_boids;
    let ui_changed = *params != before;

    (should_reset_boids, num_boids_changed, ui_changed)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
    camera_speed: f32,
) {
    // Create a background panel in the top-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = panel_x;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Total Boids: {}", boids_len),
        format!("Drawn Boids: {}", debug_info.drawn_boids),
        format!("Mean neighbors: {:.2}", debug_info.stats.mean_neighbors),
        format!("Flight speed: {:.0}", camera_speed),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
