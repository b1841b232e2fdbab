//! Uniform grid for neighbor candidate lookup.
//!
//! The grid covers `[-half_extent, half_extent]` on both axes. Positions
//! outside the plane are clamped into the border cells, so an agent and any
//! neighbor within one cell size always land in the same or adjacent cells.

use alloc::vec::Vec;

use crate::vector::Vec3;

/// Cells per axis are capped so tiny radii on a large plane do not allocate
/// millions of buckets. Capping only widens cells, which keeps lookups exact.
const MAX_CELLS_PER_AXIS: usize = 256;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells_per_axis: usize,
    half_extent: f32,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// `min_cell_size` should be the largest radius that will be queried.
    pub fn new(half_extent: f32, min_cell_size: f32) -> Self {
        let extent = 2.0 * half_extent;
        let cells_per_axis = if min_cell_size > 0.0 && min_cell_size < extent {
            let wanted = (extent / min_cell_size) as usize;
            wanted.clamp(1, MAX_CELLS_PER_AXIS)
        } else {
            1
        };

        Self {
            cell_size: extent / cells_per_axis as f32,
            cells_per_axis,
            half_extent,
            cells: (0..cells_per_axis * cells_per_axis)
                .map(|_| Vec::new())
                .collect(),
        }
    }

    #[inline]
    fn axis_cell(&self, coordinate: f32) -> usize {
        let max = (self.cells_per_axis - 1) as f32;
        let cell = (coordinate + self.half_extent) / self.cell_size;
        // NaN clamps to NaN, which casts to 0.
        cell.clamp(0.0, max) as usize
    }

    #[inline]
    fn cell_coords(&self, position: Vec3) -> (usize, usize) {
        (self.axis_cell(position.x), self.axis_cell(position.y))
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    pub fn insert(&mut self, index: usize, position: Vec3) {
        let (x, y) = self.cell_coords(position);
        self.cells[y * self.cells_per_axis + x].push(index);
    }

    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        self.clear();
        for (index, position) in positions.into_iter().enumerate() {
            self.insert(index, position);
        }
    }

    /// Appends to `out` the indices stored in the cell containing `position`
    /// and its eight surrounding cells.
    pub fn nearby(&self, position: Vec3, out: &mut Vec<usize>) {
        let (cx, cy) = self.cell_coords(position);
        let last = self.cells_per_axis - 1;

        for y in cy.saturating_sub(1)..=(cy + 1).min(last) {
            let row = y * self.cells_per_axis;
            for x in cx.saturating_sub(1)..=(cx + 1).min(last) {
                out.extend_from_slice(&self.cells[row + x]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_never_below_requested() {
        let grid = SpatialGrid::new(50.0, 8.0);
        assert_eq!(grid.cells_per_axis, 12);
        assert!(grid.cell_size >= 8.0);
    }

    #[test]
    fn test_tiny_radius_is_capped() {
        let grid = SpatialGrid::new(1000.0, 0.001);
        assert_eq!(grid.cells_per_axis, MAX_CELLS_PER_AXIS);
    }

    #[test]
    fn test_degenerate_radius_uses_single_cell() {
        let grid = SpatialGrid::new(10.0, 0.0);
        assert_eq!(grid.cells_per_axis, 1);

        let grid = SpatialGrid::new(10.0, 40.0);
        assert_eq!(grid.cells_per_axis, 1);
    }

    #[test]
    fn test_nearby_covers_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(50.0, 10.0);
        grid.rebuild([
            Vec3::planar(0.0, 0.0),
            Vec3::planar(9.0, 0.0),
            Vec3::planar(-45.0, -45.0),
        ]);

        let mut out = Vec::new();
        grid.nearby(Vec3::planar(1.0, 1.0), &mut out);
        out.sort_unstable();

        assert_eq!(out, [0, 1]);
    }

    #[test]
    fn test_out_of_bounds_positions_clamp_to_border() {
        let mut grid = SpatialGrid::new(10.0, 5.0);
        grid.rebuild([Vec3::planar(30.0, -30.0)]);

        let mut out = Vec::new();
        grid.nearby(Vec3::planar(9.0, -9.0), &mut out);

        assert_eq!(out, [0]);
    }
}
