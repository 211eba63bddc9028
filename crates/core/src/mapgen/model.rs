//! Public data model for a generated maze.

use crate::grid::Grid;
use crate::types::{Coord, HouseArea};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Random openings actually made; may fall short of `complexity * 3` on dense grids.
    pub extra_openings: usize,
    pub strategic_openings: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    /// Carve origin and player spawn.
    pub start: Coord,
    pub complexity: u32,
    pub house_candidates: Vec<HouseArea>,
    pub house: Option<HouseArea>,
    pub stats: GenerationStats,
}

impl GeneratedMaze {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend(self.start.row.to_le_bytes());
        bytes.extend(self.start.col.to_le_bytes());
        bytes.extend(self.complexity.to_le_bytes());

        bytes.extend((self.house_candidates.len() as u32).to_le_bytes());
        for area in &self.house_candidates {
            bytes.extend(area.top_left.row.to_le_bytes());
            bytes.extend(area.top_left.col.to_le_bytes());
        }
        match self.house {
            Some(area) => {
                bytes.push(1);
                bytes.extend(area.top_left.row.to_le_bytes());
                bytes.extend(area.top_left.col.to_le_bytes());
            }
            None => bytes.push(0),
        }

        bytes.extend((self.stats.extra_openings as u32).to_le_bytes());
        bytes.extend((self.stats.strategic_openings as u32).to_le_bytes());
        bytes
    }

    pub fn pathable_cells(&self) -> Vec<Coord> {
        self.grid.path_cells()
    }

    pub fn wall_cells_adjacent_to_path(&self) -> Vec<Coord> {
        self.grid.wall_cells_adjacent_to_path()
    }
}
