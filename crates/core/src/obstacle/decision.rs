//! Target selection once an idle period ends.

use crate::grid::Grid;
use crate::reachability::Accessibility;
use crate::rng::GameRng;
use crate::types::{Cell, Coord, Direction, Surface};

const ROAD_PREFERENCE_ON_GRASS: f64 = 0.5;

/// Grass an obstacle may walk on: any wall cell off the outer ring.
pub fn is_navigable_grass(grid: &Grid, cell: Coord) -> bool {
    grid.is_interior(cell) && grid.cell(cell) == Cell::Wall
}

/// Adjacent cells of `surface` the agent may step onto, in `Direction::ALL` order.
pub fn legal_targets(
    grid: &Grid,
    from: Coord,
    surface: Surface,
    access: Option<&dyn Accessibility>,
) -> Vec<Coord> {
    grid.neighbors(from)
        .map(|(_, next)| next)
        .filter(|next| match surface {
            Surface::Road => grid.is_path(*next),
            Surface::Grass => is_navigable_grass(grid, *next),
        })
        .filter(|next| access.is_none_or(|access| access.is_accessible(*next)))
        .collect()
}

/// Roads always head back to grass. Grass flips a coin for a road, falling
/// back to more grass.
pub(super) fn choose_target(
    grid: &Grid,
    from: Coord,
    current: Surface,
    access: Option<&dyn Accessibility>,
    rng: &mut GameRng,
) -> Option<Coord> {
    let grass = legal_targets(grid, from, Surface::Grass, access);
    if current == Surface::Grass && rng.chance(ROAD_PREFERENCE_ON_GRASS) {
        let roads = legal_targets(grid, from, Surface::Road, access);
        if let Some(&road) = rng.choose(&roads) {
            log::trace!("grass at {from:?} steps onto road {road:?}");
            return Some(road);
        }
    }
    rng.choose(&grass).copied()
}

/// The axis with the larger world-space change picks the facing.
/// World Y points up, so a smaller row means moving up.
pub fn facing_for_step(from: Coord, to: Coord) -> Direction {
    let dx = to.col - from.col;
    let dy = from.row - to.row;
    if dx.abs() > dy.abs() {
        if dx > 0 { Direction::Right } else { Direction::Left }
    } else if dy > 0 {
        Direction::Up
    } else {
        Direction::Down
    }
}
