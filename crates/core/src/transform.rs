//! Grid <-> world coordinate conversion.
//!
//! Row 0 is the top of the grid while world Y grows upward, so rows are
//! flipped: the last row sits at `origin.y` and row 0 at the highest Y.
//! Every conversion in the crate goes through this one type.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{Coord, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    pub cell_size: f32,
    /// World position of the centre of the bottom-left cell.
    pub origin: WorldPos,
    pub rows: usize,
    pub cols: usize,
}

impl WorldTransform {
    pub fn for_grid(grid: &Grid, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive, got {cell_size}");
        Self { cell_size, origin: WorldPos::default(), rows: grid.height(), cols: grid.width() }
    }

    pub fn with_origin(self, origin: WorldPos) -> Self {
        Self { origin, ..self }
    }

    /// Centre of `coord` in world space.
    pub fn grid_to_world(&self, coord: Coord) -> WorldPos {
        let flipped_row = self.rows as f32 - 1.0 - coord.row as f32;
        WorldPos {
            x: self.origin.x + coord.col as f32 * self.cell_size,
            y: self.origin.y + flipped_row * self.cell_size,
        }
    }

    /// Nearest cell to `pos`, or `None` when it falls outside the grid.
    pub fn world_to_grid(&self, pos: WorldPos) -> Option<Coord> {
        let col = ((pos.x - self.origin.x) / self.cell_size).round();
        let flipped_row = ((pos.y - self.origin.y) / self.cell_size).round();
        if !col.is_finite() || !flipped_row.is_finite() {
            return None;
        }
        let row = self.rows as f32 - 1.0 - flipped_row;
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some(Coord::new(row as i32, col as i32))
    }
}
