//! Maze generation orchestration: carve, widen, then pick a house.

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::types::{Cell, Coord};

use super::MIN_DIMENSION;
use super::carve::{carve_spanning_tree, carve_starting_area, starting_area};
use super::houses::{find_house_candidates, lot_candidates};
use super::model::{GeneratedMaze, GenerationStats};
use super::openings::{OPENINGS_PER_COMPLEXITY, add_random_openings, open_strategic_corridors};
use super::progression::{clamp_complexity, normalize_dimension};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
}

impl MazeGenerator {
    /// Even sizes are bumped to the next odd size.
    pub fn new(width: usize, height: usize) -> Self {
        let width = normalize_dimension(width);
        let height = normalize_dimension(height);
        assert!(
            width >= MIN_DIMENSION && height >= MIN_DIMENSION,
            "maze dimensions must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {width}x{height}"
        );
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bottom-left interior cell; the spawn point and carve origin.
    pub fn start(&self) -> Coord {
        Coord::new(self.height as i32 - 2, 1)
    }

    pub fn generate(&self, complexity: u32, rng: &mut GameRng) -> GeneratedMaze {
        let complexity = clamp_complexity(complexity);
        let start = self.start();
        let mut grid = Grid::filled(self.width, self.height, Cell::Wall);

        carve_starting_area(&mut grid, start);
        let lot = rng.choose(&lot_candidates(&grid, &starting_area(start))).copied();
        carve_spanning_tree(&mut grid, start, lot.map(|area| area.top_left), rng);

        let wanted = complexity as usize * OPENINGS_PER_COMPLEXITY;
        let extra_openings = add_random_openings(&mut grid, wanted, lot, rng);
        if extra_openings < wanted {
            log::debug!("only {extra_openings} of {wanted} extra openings fit");
        }
        let strategic_openings = open_strategic_corridors(&mut grid);

        let house_candidates = find_house_candidates(&grid);
        let house = rng.choose(&house_candidates).copied();
        if house.is_none() {
            log::warn!("no house candidate on a {}x{} maze", self.width, self.height);
        }

        log::debug!(
            "generated {}x{} maze: complexity={complexity} paths={} openings={extra_openings}+{strategic_openings} houses={}",
            self.width,
            self.height,
            grid.path_count(),
            house_candidates.len()
        );

        GeneratedMaze {
            grid,
            start,
            complexity,
            house_candidates,
            house,
            stats: GenerationStats { extra_openings, strategic_openings },
        }
    }
}
