/*
 * Input Module
 *
 * This module handles user input events for the viewer.
 *
 * Features:
 * - Looking around with a left mouse drag
 * - WASD flight, Shift/Ctrl to rise and sink
 * - Mouse wheel to change flight speed
 * - Space pauses the simulation, R respawns the flock
 * - Events over the egui panel are left to the UI
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};

use crate::app::{respawn_flock, Model};

pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.camera.drag(pos);
    model.mouse_position = pos;
}

pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag(model.mouse_position);
    }
}

pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    match delta {
        MouseScrollDelta::LineDelta(_, y) => model.camera.adjust_speed(y),
        MouseScrollDelta::PixelDelta(pos) => model.camera.adjust_speed(pos.y as f32 * 0.01),
    }
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::R => respawn_flock(&mut model.simulator, &mut model.physics_accumulator),
        _ => {}
    }
}

// Held-key flight, polled once per frame
pub fn fly_camera(app: &App, model: &mut Model, dt: f32) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    let down = |key: Key| app.keys.down.contains(&key);
    let axis = |positive: Key, negative: Key| match (down(positive), down(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    };

    let direction = vec3(
        axis(Key::D, Key::A),
        axis(Key::LShift, Key::LControl),
        axis(Key::W, Key::S),
    );
    if direction != Vec3::ZERO {
        model.camera.fly(direction, dt);
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
