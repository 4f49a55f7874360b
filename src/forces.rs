/*
 * Forces Module
 *
 * The flocking force model. For one boid, every other boid strictly inside
 * the neighbor radius contributes to three averaged terms:
 * 1. Alignment: the mean neighbor velocity
 * 2. Cohesion: a weighted pull toward the mean neighbor position
 * 3. Separation: a Gaussian-decaying push away from each neighbor
 *
 * The center pull that keeps the flock in view lives here as well.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::SimulationParams;

// Result of scanning one boid's neighborhood
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlockingContribution {
    pub delta: Vec3,
    pub neighbor_count: usize,
}

impl FlockingContribution {
    pub const NONE: FlockingContribution = FlockingContribution {
        delta: Vec3::ZERO,
        neighbor_count: 0,
    };
}

// Scans `candidates` for neighbors of `boids[index]` and sums the flocking
// terms.
//
// `candidates` may contain `index` itself and boids outside the radius; both
// are filtered here. Neighbors are those with separation strictly below
// `neighbor_radius`. Passing `0..boids.len()` gives the full O(n²) scan.
pub fn flocking_contribution(
    index: usize,
    boids: &[Boid],
    candidates: impl IntoIterator<Item = usize>,
    params: &SimulationParams,
) -> FlockingContribution {
    let current = &boids[index];
    let inverse_range = 1.0 / params.repulsion_range;

    let mut neighbor_count = 0usize;
    let mut total_position = Vec3::ZERO;
    let mut total_velocity = Vec3::ZERO;
    let mut total_repulsion = Vec3::ZERO;

    for other_index in candidates {
        if other_index == index {
            continue;
        }
        let other = &boids[other_index];
        let distance = current.position - other.position;
        if distance.length() >= params.neighbor_radius {
            continue;
        }

        total_position += other.position;
        total_velocity += other.velocity;
        neighbor_count += 1;

        // Coincident boids have no separation direction and push nothing
        let scaled = distance * inverse_range;
        total_repulsion += params.repulsion_amplitude
            * scaled.normalize_or_zero()
            * (-scaled.length_squared()).exp();
    }

    if neighbor_count == 0 {
        return FlockingContribution::NONE;
    }

    let count = neighbor_count as f32;
    let average_velocity = total_velocity / count;
    let average_position = total_position / count;
    let cohesion = params.cohesion_weight * (average_position - current.position);
    let repulsion = total_repulsion / count;

    FlockingContribution {
        delta: average_velocity + cohesion + repulsion,
        neighbor_count,
    }
}

// Crowding color: green base, blue grows linearly with the neighbor count
#[inline]
pub fn density_color(neighbor_count: usize, params: &SimulationParams) -> Vec3 {
    vec3(0.0, 1.0, params.color_change * neighbor_count as f32)
}

// Full scan for `boids[index]` that also recolors it from its neighbor count.
// The sequential update order steps boids through this one at a time.
pub fn scan_and_recolor(
    index: usize,
    boids: &mut [Boid],
    params: &SimulationParams,
) -> FlockingContribution {
    let count = boids.len();
    let contribution = flocking_contribution(index, boids, 0..count, params);
    boids[index].color = density_color(contribution.neighbor_count, params);
    contribution
}

// Velocity adjustment for `boids[index]` from a full scan of the population.
// Also recolors the boid, so the color always reflects the crowding seen by
// the most recent force computation.
pub fn compute_flocking_velocity_delta(
    index: usize,
    boids: &mut [Boid],
    params: &SimulationParams,
) -> Vec3 {
    scan_and_recolor(index, boids, params).delta
}

// Pull of constant strength toward the configured center
pub fn center_pull(position: Vec3, params: &SimulationParams) -> Vec3 {
    let offset = position - params.center();
    if offset == Vec3::ZERO {
        return Vec3::ZERO;
    }
    -params.gravity * offset.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f32, y: f32, z: f32) -> Boid {
        Boid::new(vec3(x, y, z), Vec3::ZERO)
    }

    #[test]
    fn isolated_boid_gets_no_flocking_delta() {
        let params = SimulationParams::default();
        let mut boids = vec![
            still(0.0, 0.0, 0.0),
            still(10.0, 0.0, 0.0),
            still(0.0, -10.0, 0.0),
            still(0.0, 0.0, 50.0),
        ];
        let delta = compute_flocking_velocity_delta(0, &mut boids, &params);
        assert_eq!(delta, Vec3::ZERO);
        assert_eq!(boids[0].color, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn boid_exactly_at_the_radius_is_not_a_neighbor() {
        let params = SimulationParams::default();
        let boids = vec![still(0.0, 0.0, 0.0), still(params.neighbor_radius, 0.0, 0.0)];
        let contribution = flocking_contribution(0, &boids, 0..boids.len(), &params);
        assert_eq!(contribution, FlockingContribution::NONE);

        let closer = vec![still(0.0, 0.0, 0.0), still(params.neighbor_radius - 0.01, 0.0, 0.0)];
        let contribution = flocking_contribution(0, &closer, 0..closer.len(), &params);
        assert_eq!(contribution.neighbor_count, 1);
    }

    #[test]
    fn self_is_excluded_by_index_and_coincident_boids_stay_finite() {
        let params = SimulationParams::default();
        let alone = vec![Boid::new(vec3(1.0, 1.0, 1.0), vec3(0.0, 1.0, 0.0))];
        let contribution = flocking_contribution(0, &alone, [0, 0, 0], &params);
        assert_eq!(contribution, FlockingContribution::NONE);

        let stacked = vec![
            Boid::new(vec3(1.0, 1.0, 1.0), vec3(0.0, 1.0, 0.0)),
            Boid::new(vec3(1.0, 1.0, 1.0), vec3(1.0, 0.0, 0.0)),
        ];
        let contribution = flocking_contribution(0, &stacked, 0..2, &params);
        assert_eq!(contribution.neighbor_count, 1);
        assert!(contribution.delta.is_finite());
        // Only alignment survives: cohesion offset and repulsion are both zero
        assert_eq!(contribution.delta, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn close_pair_is_pushed_apart() {
        let params = SimulationParams::default();
        let boids = vec![still(0.0, 0.0, 0.0), still(2.0, 0.0, 0.0)];
        let delta = flocking_contribution(0, &boids, 0..2, &params).delta;

        // Separation of one repulsion range: push of A / e, pull of cohesion * 2
        let expected = -params.repulsion_amplitude * (-1.0f32).exp() + params.cohesion_weight * 2.0;
        assert!((delta.x - expected).abs() < 1e-5, "{delta:?}");
        assert!(delta.x < 0.0);
        assert_eq!(delta.y, 0.0);
        assert_eq!(delta.z, 0.0);
    }

    #[test]
    fn alignment_averages_neighbor_velocities() {
        let params = SimulationParams {
            cohesion_weight: 0.0,
            repulsion_amplitude: 0.0,
            ..SimulationParams::default()
        };
        let boids = vec![
            still(0.0, 0.0, 0.0),
            Boid::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
            Boid::new(vec3(-1.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0)),
        ];
        let delta = flocking_contribution(0, &boids, 0..3, &params).delta;
        assert!(delta.abs_diff_eq(vec3(0.0, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn blue_channel_grows_with_neighbor_count() {
        let params = SimulationParams::default();
        let mut previous_blue = -1.0;
        for neighbors in 0..8 {
            let mut boids = vec![still(0.0, 0.0, 0.0)];
            for k in 0..neighbors {
                let angle = k as f32;
                boids.push(still(angle.cos(), angle.sin(), 0.5));
            }
            compute_flocking_velocity_delta(0, &mut boids, &params);
            let color = boids[0].color;
            assert_eq!(color.x, 0.0);
            assert_eq!(color.y, 1.0);
            assert!(color.z > previous_blue, "{neighbors} neighbors gave {color:?}");
            previous_blue = color.z;
        }
        // Not clamped to the displayable range
        assert!(previous_blue > 1.0);
    }

    #[test]
    fn center_pull_points_home_with_gravity_strength() {
        let params = SimulationParams {
            center: [1.0, 2.0, 3.0],
            gravity: 0.5,
            ..SimulationParams::default()
        };
        let pull = center_pull(vec3(1.0, 2.0, 13.0), &params);
        assert!(pull.abs_diff_eq(vec3(0.0, 0.0, -0.5), 1e-6));
        assert_eq!(center_pull(params.center(), &params), Vec3::ZERO);
    }
}
