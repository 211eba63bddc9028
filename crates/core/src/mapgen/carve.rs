//! Starting-area and spanning-tree carving.

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::types::{Cell, Coord, Direction};

/// The 2x2 open block the player spawns in: `start` is its bottom-left cell.
pub(super) fn starting_area(start: Coord) -> [Coord; 4] {
    [
        Coord::new(start.row - 1, start.col),
        Coord::new(start.row - 1, start.col + 1),
        Coord::new(start.row, start.col),
        Coord::new(start.row, start.col + 1),
    ]
}

pub(super) fn carve_starting_area(grid: &mut Grid, start: Coord) {
    for cell in starting_area(start) {
        grid.set(cell, Cell::Path);
    }
}

/// Recursive backtracking over odd/odd cells with an explicit stack.
///
/// `reserved` is treated as already visited, so it and the walls around it
/// stay solid. Carving only ever turns walls into paths.
pub(crate) fn carve_spanning_tree(
    grid: &mut Grid,
    start: Coord,
    reserved: Option<Coord>,
    rng: &mut GameRng,
) {
    assert!(
        grid.is_interior(start) && start.row % 2 == 1 && start.col % 2 == 1,
        "carve start {start:?} must be an interior cell with odd coordinates"
    );

    let mut visited = vec![false; grid.width() * grid.height()];
    if let Some(cell) = reserved {
        visited[grid.index(cell)] = true;
    }
    visited[grid.index(start)] = true;
    grid.set(start, Cell::Path);

    let mut stack = vec![start];
    while let Some(&current) = stack.last() {
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| {
                let next = current.offset(direction, 2);
                grid.is_interior(next) && !visited[grid.index(next)]
            })
            .collect();

        let Some(&direction) = rng.choose(&open) else {
            stack.pop();
            continue;
        };
        let next = current.offset(direction, 2);
        grid.set(current.step(direction), Cell::Path);
        grid.set(next, Cell::Path);
        visited[grid.index(next)] = true;
        stack.push(next);
    }
}
