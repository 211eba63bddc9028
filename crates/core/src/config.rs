//! Tunable game settings. Durations are seconds here and become ticks at level setup.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapgen::MIN_DIMENSION;
use crate::types::ObstacleProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ticks_per_second: u32,
    pub maze: MazeConfig,
    pub destinations: DestinationConfig,
    pub player: PlayerConfig,
    pub cat: ObstacleTiming,
    pub wagon: ObstacleTiming,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Requested size; even values are bumped to the next odd number.
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    pub count: usize,
    /// Minimum Euclidean spacing in cells.
    pub min_distance: f32,
    pub lifetime_secs: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub step_secs: f32,
    pub starting_lives: u32,
    /// Collisions are ignored for this long after the player is caught.
    pub grace_secs: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTiming {
    pub move_secs: f32,
    pub road_idle_secs: SecondsRange,
    pub grass_idle_secs: SecondsRange,
}

impl ObstacleTiming {
    pub fn erratic() -> Self {
        Self {
            move_secs: 0.45,
            road_idle_secs: SecondsRange { min: 2.0, max: 4.0 },
            grass_idle_secs: SecondsRange { min: 3.0, max: 5.0 },
        }
    }

    pub fn cautious() -> Self {
        Self { move_secs: 1.1, ..Self::erratic() }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            maze: MazeConfig::default(),
            destinations: DestinationConfig::default(),
            player: PlayerConfig::default(),
            cat: ObstacleTiming::erratic(),
            wagon: ObstacleTiming::cautious(),
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self { width: 20, height: 11, cell_size: 32.0 }
    }
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self { count: 5, min_distance: 4.0, lifetime_secs: 25.0 }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { step_secs: 0.18, starting_lives: 3, grace_secs: 1.5 }
    }
}

impl GameConfig {
    pub fn timing_for(&self, profile: ObstacleProfile) -> &ObstacleTiming {
        match profile {
            ObstacleProfile::Erratic => &self.cat,
            ObstacleProfile::Cautious => &self.wagon,
        }
    }

    /// Whole ticks for a duration, never less than one.
    pub fn secs_to_ticks(&self, secs: f32) -> u64 {
        ((secs * self.ticks_per_second as f32).round() as u64).max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be at least 1"));
        }
        if self.maze.width < MIN_DIMENSION || self.maze.height < MIN_DIMENSION {
            return Err(invalid(
                "maze",
                format!(
                    "dimensions must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {}x{}",
                    self.maze.width, self.maze.height
                ),
            ));
        }
        require_positive("maze.cell_size", self.maze.cell_size)?;
        require_non_negative("destinations.min_distance", self.destinations.min_distance)?;
        require_positive("destinations.lifetime_secs", self.destinations.lifetime_secs)?;
        require_positive("player.step_secs", self.player.step_secs)?;
        if self.player.starting_lives == 0 {
            return Err(invalid("player.starting_lives", "must be at least 1"));
        }
        require_non_negative("player.grace_secs", self.player.grace_secs)?;
        validate_timing("cat", &self.cat)?;
        validate_timing("wagon", &self.wagon)?;
        Ok(())
    }
}

fn validate_timing(field: &'static str, timing: &ObstacleTiming) -> Result<(), ConfigError> {
    for range in [timing.road_idle_secs, timing.grass_idle_secs] {
        let finite = range.min.is_finite() && range.max.is_finite();
        if !finite || range.min < 0.0 || range.max < range.min {
            return Err(invalid(
                field,
                format!(
                    "idle window {}..{} must be finite with 0 <= min <= max",
                    range.min, range.max
                ),
            ));
        }
    }
    require_positive(field, timing.move_secs)
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be zero or positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}
