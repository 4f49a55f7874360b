/*
 * Renderer Module
 *
 * This module draws the flock. It only consumes the simulator's published
 * world transforms and colors: each boid is an arrow mesh modelled along +Y,
 * placed by its transform, projected through the camera and painted back to
 * front so nearer arrows cover farther ones.
 */

use std::cmp::Ordering;

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;
use crate::BOID_SIZE;

// Two crossed triangles pointing along +Y, in mesh space
fn arrow_mesh() -> [[Vec3; 3]; 2] {
    let tip = vec3(0.0, 1.0, 0.0) * BOID_SIZE;
    [
        [
            tip,
            vec3(-0.4, -0.6, 0.0) * BOID_SIZE,
            vec3(0.4, -0.6, 0.0) * BOID_SIZE,
        ],
        [
            tip,
            vec3(0.0, -0.6, -0.4) * BOID_SIZE,
            vec3(0.0, -0.6, 0.4) * BOID_SIZE,
        ],
    ]
}

// The simulated color channel can exceed 1; clamp only for display
fn display_color(color: Vec3, shade: f32) -> Rgb {
    rgb(
        (color.x * shade).clamp(0.0, 1.0),
        (color.y * shade).clamp(0.0, 1.0),
        (color.z * shade).clamp(0.0, 1.0),
    )
}

struct Facet {
    depth: f32,
    points: [Point2; 3],
    color: Rgb,
}

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.8, 0.8, 0.8));

    let window_rect = app.window_rect();
    let view_matrix = model.camera.view_matrix();
    let mesh = arrow_mesh();

    let transforms = model.simulator.world_transforms();
    let colors = model.simulator.colors();

    let mut facets = Vec::with_capacity(transforms.len() * mesh.len());
    for (transform, &color) in transforms.iter().zip(&colors) {
        for (face, triangle) in mesh.iter().enumerate() {
            let mut points = [Point2::ZERO; 3];
            let mut depth = 0.0;
            let mut visible = true;
            for (slot, &vertex) in triangle.iter().enumerate() {
                let world = transform.transform_point3(vertex);
                match model.camera.project(&view_matrix, world, window_rect) {
                    Some((screen, vertex_depth)) => {
                        points[slot] = screen;
                        depth += vertex_depth;
                    }
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if visible {
                let shade = if face == 0 { 1.0 } else { 0.75 };
                facets.push(Facet {
                    depth: depth / 3.0,
                    points,
                    color: display_color(color, shade),
                });
            }
        }
    }

    // Painter's algorithm: farthest first
    facets.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));

    for facet in &facets {
        draw.polygon()
            .color(facet.color)
            .points(facet.points.iter().cloned());
    }

    if model.params.show_debug {
        draw_center_axes(&draw, model, &view_matrix, window_rect);
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.simulator.len(),
            model.camera.speed,
        );
    }

    draw.to_frame(app, &frame).unwrap();

    model.egui.draw_to_frame(&frame).unwrap();
}

// Axis lines through the gravity center
fn draw_center_axes(draw: &Draw, model: &Model, view_matrix: &Mat4, window_rect: Rect) {
    let center = model.params.center();
    let length = model.params.neighbor_radius * 5.0;
    let axes = [
        (vec3(1.0, 0.0, 0.0), RED),
        (vec3(0.0, 1.0, 0.0), GREEN),
        (vec3(0.0, 0.0, 1.0), BLUE),
    ];

    for (axis, color) in axes {
        let start = model.camera.project(view_matrix, center, window_rect);
        let end = model.camera.project(view_matrix, center + axis * length, window_rect);
        if let (Some((start, _)), Some((end, _))) = (start, end) {
            draw.line().start(start).end(end).color(color).stroke_weight(2.0);
        }
    }
}
