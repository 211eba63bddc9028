//! Greedy spaced selection of points from a candidate pool.

use crate::rng::GameRng;
use crate::types::{Coord, WorldPos};

/// Anything with a position on a plane. Distances are Euclidean.
pub trait PlanarPoint: Copy {
    fn planar(&self) -> (f32, f32);

    fn distance_to(&self, other: &Self) -> f32 {
        let (ax, ay) = self.planar();
        let (bx, by) = other.planar();
        (ax - bx).hypot(ay - by)
    }
}

impl PlanarPoint for Coord {
    fn planar(&self) -> (f32, f32) {
        (self.col as f32, self.row as f32)
    }
}

impl PlanarPoint for WorldPos {
    fn planar(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Shuffles a copy of `candidates`, then accepts each point that keeps at
/// least `min_distance` from everything accepted so far.
///
/// Returns fewer than `max_count` points when the pool is too small or too
/// tightly packed; callers decide whether that matters.
pub fn select_spaced_points<P: PlanarPoint>(
    candidates: &[P],
    min_distance: f32,
    max_count: usize,
    rng: &mut GameRng,
) -> Vec<P> {
    let mut pool = candidates.to_vec();
    rng.shuffle(&mut pool);

    let mut selected: Vec<P> = Vec::with_capacity(max_count.min(pool.len()));
    for point in pool {
        if selected.len() >= max_count {
            break;
        }
        if selected.iter().all(|kept| kept.distance_to(&point) >= min_distance) {
            selected.push(point);
        }
    }
    selected
}
