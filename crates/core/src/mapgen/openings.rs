//! Loop-adding passes run after the spanning tree is carved.

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::types::{Cell, Coord, Direction, HouseArea};

pub(super) const OPENINGS_PER_COMPLEXITY: usize = 3;
const ATTEMPTS_PER_OPENING: usize = 40;
const STRATEGIC_STRIDE: usize = 4;

/// Opens up to `wanted` random interior walls that touch two or three paths.
/// Returns how many were actually opened.
pub(super) fn add_random_openings(
    grid: &mut Grid,
    wanted: usize,
    keep_solid: Option<HouseArea>,
    rng: &mut GameRng,
) -> usize {
    let mut opened = 0;
    for _ in 0..wanted * ATTEMPTS_PER_OPENING {
        if opened == wanted {
            break;
        }
        let cell = Coord::new(
            1 + rng.below(grid.height() - 2) as i32,
            1 + rng.below(grid.width() - 2) as i32,
        );
        if grid.is_path(cell) || keep_solid.is_some_and(|area| area.contains(cell)) {
            continue;
        }
        if (2..=3).contains(&grid.path_neighbor_count(cell)) {
            grid.set(cell, Cell::Path);
            opened += 1;
        }
    }
    opened
}

/// Every fourth row and column: open walls that sit between two paths along that line.
///
/// Candidates are collected against the grid as it was before this pass.
pub(super) fn open_strategic_corridors(grid: &mut Grid) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let mut openings = Vec::new();

    for row in (STRATEGIC_STRIDE..height - 1).step_by(STRATEGIC_STRIDE) {
        for col in 1..width - 1 {
            let cell = Coord::new(row as i32, col as i32);
            if bridges(grid, cell, Direction::Left, Direction::Right) {
                openings.push(cell);
            }
        }
    }
    for col in (STRATEGIC_STRIDE..width - 1).step_by(STRATEGIC_STRIDE) {
        for row in 1..height - 1 {
            let cell = Coord::new(row as i32, col as i32);
            if bridges(grid, cell, Direction::Up, Direction::Down) {
                openings.push(cell);
            }
        }
    }

    openings.sort_unstable();
    openings.dedup();
    for &cell in &openings {
        grid.set(cell, Cell::Path);
    }
    openings.len()
}

fn bridges(grid: &Grid, cell: Coord, one_side: Direction, other_side: Direction) -> bool {
    !grid.is_path(cell) && grid.is_path(cell.step(one_side)) && grid.is_path(cell.step(other_side))
}
