//! Breadth-first reachability over path cells, plus the accessibility
//! predicate that cautious obstacles consult before moving.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::transform::WorldTransform;
use crate::types::{Coord, Direction, WorldPos};

/// Answers "may an agent that respects the player's reach go here?".
pub trait Accessibility {
    fn is_accessible(&self, cell: Coord) -> bool;
}

impl<F> Accessibility for F
where
    F: Fn(Coord) -> bool,
{
    fn is_accessible(&self, cell: Coord) -> bool {
        self(cell)
    }
}

/// Path cells connected to `from`, in BFS discovery order.
///
/// `from` itself is only emitted when it is a path cell, but it is always
/// marked visited so a wall start yields its path neighbours' component.
pub fn find_reachable(grid: &Grid, from: Coord) -> Vec<Coord> {
    assert!(
        grid.in_bounds(from),
        "reachability start {from:?} is outside a {}x{} grid",
        grid.width(),
        grid.height()
    );

    let mut visited = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::from([from]);
    let mut reachable = Vec::new();
    visited[grid.index(from)] = true;

    while let Some(current) = queue.pop_front() {
        if grid.is_path(current) {
            reachable.push(current);
        }
        for (_, next) in grid.neighbors(current) {
            let index = grid.index(next);
            if !visited[index] && grid.is_path(next) {
                visited[index] = true;
                queue.push_back(next);
            }
        }
    }

    reachable
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachableSet {
    origin: Coord,
    cells: Vec<Coord>,
    member: Vec<bool>,
    width: usize,
}

impl ReachableSet {
    pub fn compute(grid: &Grid, from: Coord) -> Self {
        let cells = find_reachable(grid, from);
        let mut member = vec![false; grid.width() * grid.height()];
        for cell in &cells {
            member[grid.index(*cell)] = true;
        }
        Self { origin: from, cells, member, width: grid.width() }
    }

    /// Snaps `pos` to its nearest cell first; `None` when that lands off the grid.
    pub fn from_world(grid: &Grid, transform: &WorldTransform, pos: WorldPos) -> Option<Self> {
        let from = transform.world_to_grid(pos).filter(|cell| grid.in_bounds(*cell))?;
        Some(Self::compute(grid, from))
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Coord) -> bool {
        if cell.row < 0 || cell.col < 0 || cell.col as usize >= self.width {
            return false;
        }
        let index = cell.row as usize * self.width + cell.col as usize;
        self.member.get(index).copied().unwrap_or(false)
    }

    pub fn world_centers(&self, transform: &WorldTransform) -> Vec<WorldPos> {
        self.cells.iter().map(|cell| transform.grid_to_world(*cell)).collect()
    }
}

/// Reachable roads, and any grass cell bordering one.
impl Accessibility for ReachableSet {
    fn is_accessible(&self, cell: Coord) -> bool {
        self.contains(cell)
            || Direction::ALL.into_iter().any(|direction| self.contains(cell.step(direction)))
    }
}
