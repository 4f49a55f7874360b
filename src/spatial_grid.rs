/*
 * Spatial Grid Module
 *
 * Uniform 3D hash grid for neighbor lookups. Space is unbounded (boids are
 * only held near the center by gravity), so cells live in a hash map keyed by
 * integer cell coordinates rather than in a fixed-size array.
 *
 * With the cell size at least as large as the neighbor radius, every boid
 * strictly inside the radius lies in the 3x3x3 block of cells around the
 * query point. Candidates are returned sorted by index so callers can sum
 * over them in exactly the same order as a full scan.
 */

use std::collections::HashMap;

use nannou::prelude::*;

type CellKey = (i32, i32, i32);

pub struct SpatialGrid {
    pub cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    // Reused buffer for candidate lists
    nearby_indices_cache: Vec<usize>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            nearby_indices_cache: Vec::new(),
        }
    }

    // Build a grid holding every position, indexed by slice order
    pub fn from_positions(cell_size: f32, positions: impl IntoIterator<Item = Vec3>) -> Self {
        let mut grid = Self::new(cell_size);
        for (i, position) in positions.into_iter().enumerate() {
            grid.insert(i, position);
        }
        grid
    }

    // Coordinates beyond the i32 range saturate, so far-out cells may hold
    // many boids but neighbors still never end up more than one cell apart
    #[inline]
    pub fn cell_of(&self, position: Vec3) -> CellKey {
        let scaled = position / self.cell_size;
        (
            scaled.x.floor() as i32,
            scaled.y.floor() as i32,
            scaled.z.floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, boid_index: usize, position: Vec3) {
        let key = self.cell_of(position);
        self.cells.entry(key).or_default().push(boid_index);
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|cell| !cell.is_empty()).count()
    }

    // Indices in the 27 cells around `position`, ascending
    pub fn nearby_indices(&self, position: Vec3) -> Vec<usize> {
        let mut result = Vec::with_capacity(self.nearby_indices_cache.capacity());
        self.collect_nearby(position, &mut result);
        result
    }

    // Same as `nearby_indices` but fills the grid's own buffer
    pub fn nearby_indices_cached(&mut self, position: Vec3) -> &[usize] {
        let mut buffer = std::mem::take(&mut self.nearby_indices_cache);
        buffer.clear();
        self.collect_nearby(position, &mut buffer);
        self.nearby_indices_cache = buffer;
        &self.nearby_indices_cache
    }

    fn collect_nearby(&self, position: Vec3, result: &mut Vec<usize>) {
        let (cx, cy, cz) = self.cell_of(position);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    // Cells past the saturated edge of the key range do not exist
                    let key = match (cx.checked_add(dx), cy.checked_add(dy), cz.checked_add(dz)) {
                        (Some(x), Some(y), Some(z)) => (x, y, z),
                        _ => continue,
                    };
                    if let Some(cell) = self.cells.get(&key) {
                        result.extend_from_slice(cell);
                    }
                }
            }
        }
        result.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn candidates_cover_every_boid_within_the_cell_size() {
        let mut rng = StdRng::seed_from_u64(21);
        let radius = 4.0;
        let positions: Vec<Vec3> = (0..400)
            .map(|_| {
                vec3(
                    rng.gen_range(-20.0..20.0),
                    rng.gen_range(-20.0..20.0),
                    rng.gen_range(-20.0..20.0),
                )
            })
            .collect();
        let grid = SpatialGrid::from_positions(radius, positions.iter().copied());

        for (i, &p) in positions.iter().enumerate() {
            let candidates = grid.nearby_indices(p);
            assert!(candidates.windows(2).all(|w| w[0] < w[1]));
            assert!(candidates.contains(&i));
            for (j, &q) in positions.iter().enumerate() {
                if (p - q).length() < radius {
                    assert!(candidates.contains(&j), "{j} missing near {i}");
                }
            }
        }
    }

    #[test]
    fn negative_coordinates_fall_in_their_own_cells() {
        let grid = SpatialGrid::new(2.0);
        assert_eq!(grid.cell_of(vec3(-0.5, 0.5, -2.0)), (-1, 0, -1));
        assert_eq!(grid.cell_of(vec3(3.9, -4.1, 0.0)), (1, -3, 0));
    }

    #[test]
    fn saturated_cells_are_queried_once_without_overflow() {
        let far = vec3(100.0, 0.0, 0.0);
        let grid = SpatialGrid::from_positions(1e-8, vec![far, far, -far, Vec3::ZERO]);
        assert_eq!(grid.cell_of(far), (i32::MAX, 0, 0));
        assert_eq!(grid.cell_of(-far), (i32::MIN, 0, 0));

        assert_eq!(grid.nearby_indices(far), vec![0, 1]);
        assert_eq!(grid.nearby_indices(-far), vec![2]);
        assert_eq!(grid.nearby_indices(Vec3::ZERO), vec![3]);
    }

    #[test]
    fn clear_keeps_cells_but_drops_entries() {
        let mut grid = SpatialGrid::from_positions(1.0, vec![Vec3::ZERO, vec3(5.0, 5.0, 5.0)]);
        assert_eq!(grid.occupied_cells(), 2);
        grid.clear();
        assert_eq!(grid.occupied_cells(), 0);
        assert!(grid.nearby_indices_cached(Vec3::ZERO).is_empty());
    }
}
