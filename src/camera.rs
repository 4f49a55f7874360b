/*
 * Camera Module
 *
 * This module defines a free-flying perspective camera. It starts back on
 * the +Z axis looking at the origin, turns with mouse drags, and moves with
 * the keyboard. Points are projected straight into nannou's window
 * coordinates, so boids can be drawn with the regular 2D draw API.
 */

use std::f32::consts::{FRAC_PI_2, PI};

use nannou::prelude::*;

// Keep the view from flipping over the vertical
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

pub struct Camera {
    pub position: Vec3,
    // Horizontal angle; PI faces down -Z
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub near: f32,
    pub speed: f32,
    pub mouse_sensitivity: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: vec3(0.0, 0.0, 150.0),
            yaw: PI,
            pitch: 0.0,
            fov_y: 45.0f32.to_radians(),
            near: 0.1,
            speed: 30.0,
            mouse_sensitivity: 0.005,
            min_speed: 1.0,
            max_speed: 300.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn forward(&self) -> Vec3 {
        vec3(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    pub fn right(&self) -> Vec3 {
        vec3((self.yaw - FRAC_PI_2).sin(), 0.0, (self.yaw - FRAC_PI_2).cos())
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up())
    }

    // Distance from the eye to the image plane, in window units
    fn focal_length(&self, window_rect: Rect) -> f32 {
        (window_rect.h() * 0.5) / (self.fov_y * 0.5).tan()
    }

    // Window position and view depth of a world point, or None behind the near plane
    pub fn project(&self, view: &Mat4, point: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        let eye = view.transform_point3(point);
        let depth = -eye.z;
        if depth <= self.near {
            return None;
        }
        let scale = self.focal_length(window_rect) / depth;
        Some((vec2(eye.x, eye.y) * scale + window_rect.xy(), depth))
    }

    // Move along the camera's own axes; `direction` is (right, up, forward)
    pub fn fly(&mut self, direction: Vec3, dt: f32) {
        let world_up = vec3(0.0, 1.0, 0.0);
        let offset =
            self.right() * direction.x + world_up * direction.y + self.forward() * direction.z;
        self.position += offset * self.speed * dt;
    }

    pub fn adjust_speed(&mut self, scroll: f32) {
        let factor = 1.0 + scroll * 0.1;
        self.speed = (self.speed * factor).clamp(self.min_speed, self.max_speed);
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Turn the view by the cursor movement since the last event
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * self.mouse_sensitivity;
                self.pitch = (self.pitch + delta.y * self.mouse_sensitivity)
                    .clamp(-PITCH_LIMIT, PITCH_LIMIT);
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
