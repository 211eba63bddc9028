//! Deterministic shortest paths over road cells.
//! Used by autopilots; obstacles never path-find, they wander.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Open-set entry; field order makes ties break on lower `h`, then row, then column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    row: i32,
    col: i32,
}

/// A* over path cells. The result excludes `from` and ends at `to`;
/// `Some(vec![])` when they are the same cell.
pub fn shortest_path(grid: &Grid, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    if !grid.is_path(from) || !grid.is_path(to) {
        return None;
    }
    if from == to {
        return Some(Vec::new());
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = from.manhattan(to);
    open_set.insert(OpenNode { f: h, h, row: from.row, col: from.col });
    g_score.insert(from, 0_u32);

    while let Some(node) = open_set.pop_first() {
        let current = Coord::new(node.row, node.col);
        if current == to {
            return Some(reconstruct_path(&came_from, from, to));
        }
        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };
        for (_, next) in grid.neighbors(current) {
            if !grid.is_path(next) {
                continue;
            }
            let tentative = current_g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current);
                g_score.insert(next, tentative);
                let h = next.manhattan(to);
                open_set.insert(OpenNode { f: tentative + h, h, row: next.row, col: next.col });
            }
        }
    }
    None
}

/// First move along the shortest path, if any.
pub fn next_step_toward(grid: &Grid, from: Coord, to: Coord) -> Option<Direction> {
    let first = *shortest_path(grid, from, to)?.first()?;
    Direction::ALL.into_iter().find(|direction| from.step(*direction) == first)
}

fn reconstruct_path(came_from: &BTreeMap<Coord, Coord>, from: Coord, to: Coord) -> Vec<Coord> {
    let mut path = vec![to];
    let mut current = to;
    while let Some(&previous) = came_from.get(&current) {
        if previous == from {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
