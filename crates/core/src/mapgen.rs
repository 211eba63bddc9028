//! Procedural maze generation split into carving, widening, and house selection.

pub mod model;
pub mod progression;

mod carve;
mod generator;
mod houses;
mod openings;

use crate::rng::GameRng;

pub use generator::MazeGenerator;
pub use model::{GeneratedMaze, GenerationStats};
pub use progression::{MAX_COMPLEXITY, clamp_complexity, complexity_for_level, normalize_dimension};

/// Smallest accepted width or height, border included.
pub const MIN_DIMENSION: usize = 5;

pub fn generate_maze(
    width: usize,
    height: usize,
    complexity: u32,
    rng: &mut GameRng,
) -> GeneratedMaze {
    MazeGenerator::new(width, height).generate(complexity, rng)
}
