//! Wandering obstacles (the cat and the wagon) as tick-driven state machines.
//!
//! Each agent stores the tick its current phase ends and the owner polls it
//! with `tick`. There are no callbacks: dropping the agent is the teardown.

mod decision;


use std::rc::Rc;

use crate::config::{GameConfig, ObstacleTiming, SecondsRange};
use crate::grid::Grid;
use crate::reachability::Accessibility;
use crate::rng::GameRng;
use crate::transform::WorldTransform;
use crate::types::{Coord, Direction, ObstacleProfile, Surface, WorldPos};

pub use decision::{facing_for_step, is_navigable_grass, legal_targets};

/// Inclusive tick range an idle duration is rolled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickWindow {
    pub min: u64,
    pub max: u64,
}

impl TickWindow {
    pub fn from_secs(range: SecondsRange, config: &GameConfig) -> Self {
        let min = config.secs_to_ticks(range.min);
        Self { min, max: config.secs_to_ticks(range.max).max(min) }
    }

    pub fn roll(self, rng: &mut GameRng) -> u64 {
        rng.range_inclusive(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentTiming {
    pub road_idle: TickWindow,
    pub grass_idle: TickWindow,
    pub move_ticks: u64,
}

impl AgentTiming {
    pub fn from_config(timing: &ObstacleTiming, config: &GameConfig) -> Self {
        Self {
            road_idle: TickWindow::from_secs(timing.road_idle_secs, config),
            grass_idle: TickWindow::from_secs(timing.grass_idle_secs, config),
            move_ticks: config.secs_to_ticks(timing.move_secs),
        }
    }

    pub fn for_profile(profile: ObstacleProfile, config: &GameConfig) -> Self {
        Self::from_config(config.timing_for(profile), config)
    }

    pub fn idle_window(&self, surface: Surface) -> TickWindow {
        match surface {
            Surface::Road => self.road_idle,
            Surface::Grass => self.grass_idle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle { until: u64 },
    Moving { from: Coord, to: Coord, started: u64, arrives: u64 },
}

/// What the presentation layer should start playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    Idle { facing: Direction, surface: Surface },
    Walk { facing: Direction, from: Coord, to: Coord },
}

#[derive(Clone, Debug)]
pub struct ObstacleAgent {
    profile: ObstacleProfile,
    grid: Rc<Grid>,
    cell: Coord,
    facing: Direction,
    surface: Surface,
    phase: Phase,
    timing: AgentTiming,
}

impl ObstacleAgent {
    /// Places the agent and starts its first idle period at `now`.
    pub fn spawn(
        profile: ObstacleProfile,
        grid: Rc<Grid>,
        cell: Coord,
        timing: AgentTiming,
        now: u64,
        rng: &mut GameRng,
    ) -> (Self, AgentEvent) {
        assert!(grid.is_interior(cell), "obstacle spawn {cell:?} must be an interior cell");
        let surface = Surface::of(grid.cell(cell));
        let mut agent = Self {
            profile,
            grid,
            cell,
            facing: Direction::Down,
            surface,
            phase: Phase::Idle { until: now },
            timing,
        };
        let event = agent.enter_idle(now, rng);
        (agent, event)
    }

    pub fn profile(&self) -> ObstacleProfile {
        self.profile
    }

    /// The cell the agent stands on, or is leaving while moving.
    pub fn cell(&self) -> Coord {
        self.cell
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timing(&self) -> AgentTiming {
        self.timing
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Advances the state machine if the current deadline has passed.
    ///
    /// `access` is only consulted by the cautious profile, and only at the
    /// moment a target is chosen.
    pub fn tick(
        &mut self,
        now: u64,
        rng: &mut GameRng,
        access: &dyn Accessibility,
    ) -> Option<AgentEvent> {
        match self.phase {
            Phase::Idle { until } if now >= until => Some(self.decide(now, rng, access)),
            Phase::Moving { to, arrives, .. } if now >= arrives => {
                self.cell = to;
                self.surface = Surface::of(self.grid.cell(to));
                Some(self.enter_idle(now, rng))
            }
            _ => None,
        }
    }

    /// Swaps in a new maze, snaps the agent onto its interior, and restarts idling.
    pub fn update_grid(&mut self, grid: Rc<Grid>, now: u64, rng: &mut GameRng) -> AgentEvent {
        let anchor = match self.phase {
            Phase::Moving { to, .. } => to,
            Phase::Idle { .. } => self.cell,
        };
        self.cell = Coord::new(
            anchor.row.clamp(1, grid.height() as i32 - 2),
            anchor.col.clamp(1, grid.width() as i32 - 2),
        );
        self.surface = Surface::of(grid.cell(self.cell));
        self.grid = grid;
        self.enter_idle(now, rng)
    }

    pub fn world_position(&self, now: u64, transform: &WorldTransform) -> WorldPos {
        match self.phase {
            Phase::Idle { .. } => transform.grid_to_world(self.cell),
            Phase::Moving { from, to, started, arrives } => {
                let span = arrives.saturating_sub(started).max(1);
                let progress = now.saturating_sub(started) as f32 / span as f32;
                transform.grid_to_world(from).lerp(transform.grid_to_world(to), progress)
            }
        }
    }

    fn decide(&mut self, now: u64, rng: &mut GameRng, access: &dyn Accessibility) -> AgentEvent {
        let filter = match self.profile {
            ObstacleProfile::Cautious => Some(access),
            ObstacleProfile::Erratic => None,
        };
        match decision::choose_target(&self.grid, self.cell, self.surface, filter, rng) {
            Some(target) => self.start_move(target, now),
            None => {
                log::trace!("{:?} at {:?} has nowhere to go", self.profile, self.cell);
                self.enter_idle(now, rng)
            }
        }
    }

    fn start_move(&mut self, target: Coord, now: u64) -> AgentEvent {
        self.facing = facing_for_step(self.cell, target);
        self.phase = Phase::Moving {
            from: self.cell,
            to: target,
            started: now,
            arrives: now + self.timing.move_ticks,
        };
        AgentEvent::Walk { facing: self.facing, from: self.cell, to: target }
    }

    fn enter_idle(&mut self, now: u64, rng: &mut GameRng) -> AgentEvent {
        let duration = self.timing.idle_window(self.surface).roll(rng);
        self.phase = Phase::Idle { until: now + duration };
        AgentEvent::Idle { facing: self.facing, surface: self.surface }
    }
}
