/*
 * Orientation Module
 *
 * Turns a heading into the rotation that points a mesh along it. The arrow
 * mesh is modelled facing +Y, so every boid transform is built from the
 * shortest rotation taking +Y onto the boid's velocity.
 */

use std::f32::consts::PI;

use nannou::prelude::*;

// Below this cosine the two vectors are treated as pointing in opposite directions
const ANTIPARALLEL_EPSILON: f32 = 0.001;
// Squared length under which the +Z helper axis is too close to the reference
const HELPER_AXIS_MIN_LENGTH_SQUARED: f32 = 0.01;

// Rest direction of the rendered mesh
#[inline]
pub fn mesh_forward() -> Vec3 {
    vec3(0.0, 1.0, 0.0)
}

// Shortest rotation mapping `reference` onto `target`.
//
// Both inputs are normalized first. Opposite vectors admit infinitely many
// half turns; the axis is taken perpendicular to `reference` using +Z, or +X
// when `reference` lies along Z. A zero-length input yields the identity.
pub fn rotation_aligning(reference: Vec3, target: Vec3) -> Quat {
    let reference = reference.normalize_or_zero();
    let target = target.normalize_or_zero();
    if reference == Vec3::ZERO || target == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let cos_theta = reference.dot(target);

    if cos_theta < -1.0 + ANTIPARALLEL_EPSILON {
        let mut axis = vec3(0.0, 0.0, 1.0).cross(reference);
        if axis.length_squared() < HELPER_AXIS_MIN_LENGTH_SQUARED {
            axis = vec3(1.0, 0.0, 0.0).cross(reference);
        }
        return Quat::from_axis_angle(axis.normalize(), PI);
    }

    // Half-angle form: w = cos(theta / 2), xyz = axis * sin(theta / 2)
    let axis = reference.cross(target);
    let s = ((1.0 + cos_theta) * 2.0).sqrt();
    let inverse = 1.0 / s;

    Quat::from_xyzw(axis.x * inverse, axis.y * inverse, axis.z * inverse, s * 0.5)
}

// Translation to `position` composed with the mesh rotation onto `velocity`
pub fn world_transform(position: Vec3, velocity: Vec3) -> Mat4 {
    Mat4::from_rotation_translation(rotation_aligning(mesh_forward(), velocity), position)
}
