//! Cell-to-cell player movement along roads.

use crate::grid::Grid;
use crate::transform::WorldTransform;
use crate::types::{Coord, Direction, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    from: Coord,
    to: Coord,
    started: u64,
    arrives: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    cell: Coord,
    spawn: Coord,
    heading: Option<Direction>,
    step: Option<Step>,
    invulnerable_until: u64,
}

impl Player {
    pub fn new(spawn: Coord) -> Self {
        Self { cell: spawn, spawn, heading: None, step: None, invulnerable_until: 0 }
    }

    /// Last cell fully reached.
    pub fn cell(&self) -> Coord {
        self.cell
    }

    pub fn spawn(&self) -> Coord {
        self.spawn
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn is_moving(&self) -> bool {
        self.step.is_some()
    }

    pub fn invulnerable_until(&self) -> u64 {
        self.invulnerable_until
    }

    pub fn is_invulnerable(&self, now: u64) -> bool {
        now < self.invulnerable_until
    }

    pub fn world_position(&self, now: u64, transform: &WorldTransform) -> WorldPos {
        match self.step {
            None => transform.grid_to_world(self.cell),
            Some(step) => {
                let span = step.arrives.saturating_sub(step.started).max(1);
                let progress = now.saturating_sub(step.started) as f32 / span as f32;
                transform.grid_to_world(step.from).lerp(transform.grid_to_world(step.to), progress)
            }
        }
    }

    pub(super) fn steer(&mut self, heading: Option<Direction>) {
        self.heading = heading;
    }

    /// Finishes or starts a step. Returns the cell reached on the arrival tick;
    /// the next step starts no earlier than the following tick.
    pub(super) fn tick(&mut self, now: u64, grid: &Grid, step_ticks: u64) -> Option<Coord> {
        if let Some(step) = self.step {
            if now >= step.arrives {
                self.cell = step.to;
                self.step = None;
                return Some(step.to);
            }
            return None;
        }

        let heading = self.heading?;
        let next = self.cell.step(heading);
        if grid.is_path(next) {
            self.step =
                Some(Step { from: self.cell, to: next, started: now, arrives: now + step_ticks });
        }
        None
    }

    pub(super) fn respawn(&mut self, now: u64, grace_ticks: u64) {
        self.cell = self.spawn;
        self.step = None;
        self.invulnerable_until = now + grace_ticks;
    }

    /// New maze: move the spawn, and the player too if their cell is gone.
    pub(super) fn relocate(&mut self, spawn: Coord, keep_cell: bool) {
        self.spawn = spawn;
        self.step = None;
        if !keep_cell {
            self.cell = spawn;
        }
    }
}
