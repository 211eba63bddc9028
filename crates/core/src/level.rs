//! One maze's worth of play: grid, destinations, player, and obstacles.
//! Built in a fixed order (maze, reachability, destinations, obstacles) by `setup`.

mod advance;
mod collision;
mod player;
mod setup;

#[cfg(test)]
mod tests;

use std::mem;
use std::rc::Rc;

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::GameConfig;
use crate::grid::Grid;
use crate::obstacle::{AgentEvent, AgentTiming, ObstacleAgent, Phase};
use crate::reachability::ReachableSet;
use crate::transform::WorldTransform;
use crate::types::{
    AdvanceStopReason, Coord, Direction, HouseArea, LogEvent, ObstacleId, ObstacleProfile, Surface,
};

pub use collision::Aabb;
pub use player::Player;

/// A timed pickup. Reaching it scores; letting it lapse costs a life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub cell: Coord,
    pub expires_at: u64,
}

/// `GameConfig` resolved into ticks and cells for one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelRules {
    pub ticks_per_second: u64,
    pub cell_size: f32,
    pub step_ticks: u64,
    pub destination_count: usize,
    pub min_distance: f32,
    pub destination_lifetime: u64,
    pub grace_ticks: u64,
    pub cat: AgentTiming,
    pub wagon: AgentTiming,
}

impl LevelRules {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ticks_per_second: u64::from(config.ticks_per_second),
            cell_size: config.maze.cell_size,
            step_ticks: config.secs_to_ticks(config.player.step_secs),
            destination_count: config.destinations.count,
            min_distance: config.destinations.min_distance,
            destination_lifetime: config.secs_to_ticks(config.destinations.lifetime_secs),
            grace_ticks: (config.player.grace_secs * config.ticks_per_second as f32).round() as u64,
            cat: AgentTiming::for_profile(ObstacleProfile::Erratic, config),
            wagon: AgentTiming::for_profile(ObstacleProfile::Cautious, config),
        }
    }

    pub fn timing_for(&self, profile: ObstacleProfile) -> AgentTiming {
        match profile {
            ObstacleProfile::Erratic => self.cat,
            ObstacleProfile::Cautious => self.wagon,
        }
    }
}

pub struct Level {
    number: u32,
    tick: u64,
    grid: Rc<Grid>,
    start: Coord,
    complexity: u32,
    house: Option<HouseArea>,
    house_candidates: Vec<HouseArea>,
    transform: WorldTransform,
    reachable: ReachableSet,
    destinations: Vec<Destination>,
    /// Destinations that lapsed this level; any at all rules out completion.
    expired: usize,
    player: Player,
    obstacles: SlotMap<ObstacleId, ObstacleAgent>,
    rules: LevelRules,
    log: Vec<LogEvent>,
    outcome: Option<AdvanceStopReason>,
}

impl Level {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    pub fn house(&self) -> Option<HouseArea> {
        self.house
    }

    pub fn house_candidates(&self) -> &[HouseArea] {
        &self.house_candidates
    }

    pub fn transform(&self) -> &WorldTransform {
        &self.transform
    }

    pub fn reachable(&self) -> &ReachableSet {
        &self.reachable
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn expired_count(&self) -> usize {
        self.expired
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn rules(&self) -> &LevelRules {
        &self.rules
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &ObstacleAgent)> {
        self.obstacles.iter()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&ObstacleAgent> {
        self.obstacles.get(id)
    }

    /// Set once the level has completed, ended the game, or been torn down.
    pub fn outcome(&self) -> Option<AdvanceStopReason> {
        self.outcome
    }

    /// Held direction; `None` stops after the current step.
    pub fn steer(&mut self, heading: Option<Direction>) {
        self.player.steer(heading);
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn drain_events(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.number.to_le_bytes());
        bytes.extend(self.tick.to_le_bytes());
        bytes.extend(self.grid.canonical_bytes());
        push_coord(&mut bytes, self.start);

        bytes.extend((self.destinations.len() as u32).to_le_bytes());
        bytes.extend((self.expired as u32).to_le_bytes());
        for destination in &self.destinations {
            push_coord(&mut bytes, destination.cell);
            bytes.extend(destination.expires_at.to_le_bytes());
        }

        push_coord(&mut bytes, self.player.cell());
        bytes.push(self.player.heading().map_or(0, |heading| 1 + direction_code(heading)));
        bytes.extend(self.player.invulnerable_until().to_le_bytes());

        bytes.extend((self.obstacles.len() as u32).to_le_bytes());
        for (_, agent) in &self.obstacles {
            push_coord(&mut bytes, agent.cell());
            bytes.push(direction_code(agent.facing()));
            bytes.push(match agent.surface() {
                Surface::Road => 0,
                Surface::Grass => 1,
            });
            match agent.phase() {
                Phase::Idle { until } => {
                    bytes.push(0);
                    bytes.extend(until.to_le_bytes());
                }
                Phase::Moving { to, arrives, .. } => {
                    bytes.push(1);
                    push_coord(&mut bytes, to);
                    bytes.extend(arrives.to_le_bytes());
                }
            }
        }
        bytes.push(match self.outcome {
            None => 0,
            Some(AdvanceStopReason::LevelComplete) => 1,
            Some(AdvanceStopReason::GameOver) => 2,
            Some(AdvanceStopReason::LevelClosed) => 3,
            Some(AdvanceStopReason::BudgetExhausted) => 4,
            Some(AdvanceStopReason::LevelFailed) => 5,
        });
        bytes
    }

    pub fn snapshot_hash(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

pub(crate) fn obstacle_log_event(obstacle: ObstacleId, event: AgentEvent) -> LogEvent {
    match event {
        AgentEvent::Idle { facing, surface } => LogEvent::ObstacleIdle { obstacle, facing, surface },
        AgentEvent::Walk { facing, to, .. } => LogEvent::ObstacleWalk { obstacle, facing, to },
    }
}

fn push_coord(bytes: &mut Vec<u8>, coord: Coord) {
    bytes.extend(coord.row.to_le_bytes());
    bytes.extend(coord.col.to_le_bytes());
}

fn direction_code(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 0,
        Direction::Right => 1,
        Direction::Down => 2,
        Direction::Left => 3,
    }
}
