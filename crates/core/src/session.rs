//! Run-level state: score and lives carried across levels, and the active level.

use std::mem;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::GameConfig;
use crate::level::Level;
use crate::rng::{GameRng, derive_level_seed};
use crate::types::{AdvanceResult, AdvanceStopReason, Direction, LogEvent};

/// Everything that outlives a single level. Passed into the level explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub levels_completed: u32,
}

impl SessionContext {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives, level: 1, levels_completed: 0 }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16);
        bytes.extend(self.score.to_le_bytes());
        bytes.extend(self.lives.to_le_bytes());
        bytes.extend(self.level.to_le_bytes());
        bytes.extend(self.levels_completed.to_le_bytes());
        bytes
    }
}

pub struct Session {
    run_seed: u64,
    config: GameConfig,
    rng: GameRng,
    context: SessionContext,
    level: Level,
    log: Vec<LogEvent>,
    finished: bool,
}

impl Session {
    pub fn new(run_seed: u64, config: GameConfig) -> Self {
        let context = SessionContext::new(config.player.starting_lives);
        let mut rng = GameRng::seeded(derive_level_seed(run_seed, context.level));
        let mut level = Level::new(context.level, &config, &mut rng);
        let log = level.drain_events();
        log::info!("session started with seed {run_seed}");
        Self { run_seed, config, rng, context, level, log, finished: false }
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn steer(&mut self, heading: Option<Direction>) {
        self.level.steer(heading);
    }

    /// Advances the active level. A completed level is replaced by the next
    /// one and a failed level by a fresh attempt at the same number before
    /// returning; game over is final.
    pub fn advance(&mut self, max_ticks: u32) -> AdvanceResult {
        if self.finished {
            return AdvanceResult { simulated_ticks: 0, stop_reason: AdvanceStopReason::GameOver };
        }

        let result = self.level.advance(&mut self.context, &mut self.rng, max_ticks);
        self.log.extend(self.level.drain_events());
        match result.stop_reason {
            AdvanceStopReason::LevelComplete => self.start_next_level(),
            AdvanceStopReason::LevelFailed => self.retry_level(),
            AdvanceStopReason::GameOver => self.finished = true,
            AdvanceStopReason::LevelClosed | AdvanceStopReason::BudgetExhausted => {}
        }
        result
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn drain_events(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut bytes = self.context.canonical_bytes();
        bytes.extend(self.level.canonical_bytes());
        xxh3_64(&bytes)
    }

    fn start_next_level(&mut self) {
        self.level.teardown();
        self.context.level += 1;
        self.rng = GameRng::seeded(derive_level_seed(self.run_seed, self.context.level));
        self.level = Level::new(self.context.level, &self.config, &mut self.rng);
        self.log.extend(self.level.drain_events());
    }

    /// Same level number, new maze drawn from where the level's stream left off.
    fn retry_level(&mut self) {
        self.level.teardown();
        self.level = Level::new(self.context.level, &self.config, &mut self.rng);
        self.log.extend(self.level.drain_events());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_on_level_one_with_full_lives() {
        let session = Session::new(5, GameConfig::default());
        assert_eq!(session.context(), &SessionContext::new(3));
        assert_eq!(session.level().number(), 1);
        assert!(matches!(session.events().first(), Some(LogEvent::LevelStarted { level: 1, .. })));
    }

    #[test]
    fn completing_a_level_builds_the_next_from_its_own_seed() {
        let mut config = GameConfig::default();
        config.destinations.count = 0;
        let mut session = Session::new(21, config.clone());

        let result = session.advance(10);
        assert_eq!(result.stop_reason, AdvanceStopReason::LevelComplete);
        assert_eq!(result.simulated_ticks, 1);
        assert_eq!(session.context().level, 2);
        assert_eq!(session.context().levels_completed, 1);

        let expected = Level::new(2, &config, &mut GameRng::seeded(derive_level_seed(21, 2)));
        assert_eq!(session.level().grid(), expected.grid());
        assert_eq!(session.level().complexity(), 1);
        assert!(session.events().iter().any(|event| matches!(
            event,
            LogEvent::LevelStarted { level: 2, .. }
        )));
    }

    #[test]
    fn game_over_is_final() {
        let mut config = GameConfig::default();
        config.player.starting_lives = 1;
        config.destinations.lifetime_secs = 0.1;
        let mut session = Session::new(8, config);

        let result = session.advance(1_000);
        assert_eq!(result.stop_reason, AdvanceStopReason::GameOver);
        assert!(session.is_finished());
        assert_eq!(session.context().lives, 0);

        let after = session.advance(1_000);
        assert_eq!(after.simulated_ticks, 0);
        assert_eq!(after.stop_reason, AdvanceStopReason::GameOver);
        let events = session.drain_events();
        assert!(matches!(events.last(), Some(LogEvent::GameOver { level: 1, .. })));
        assert!(session.events().is_empty());
    }

    #[test]
    fn letting_every_destination_expire_never_completes_the_level() {
        let mut config = GameConfig::default();
        config.player.starting_lives = 10;
        config.destinations.lifetime_secs = 1.0;
        let mut session = Session::new(31, config);
        let first_maze = session.level().grid().clone();

        let first = session.advance(10_000);
        assert_eq!(first.stop_reason, AdvanceStopReason::LevelFailed);
        assert_eq!(session.context().level, 1);
        assert_eq!(session.context().levels_completed, 0);
        assert_eq!(session.level().number(), 1);
        assert_eq!(session.level().expired_count(), 0, "the retry starts clean");
        assert_ne!(session.level().grid(), &first_maze);

        let mut rounds = 0;
        while !session.is_finished() && rounds < 20 {
            let result = session.advance(10_000);
            assert_ne!(result.stop_reason, AdvanceStopReason::LevelComplete);
            rounds += 1;
        }
        assert!(session.is_finished());
        assert_eq!(session.context().lives, 0);
        assert_eq!(session.context().level, 1);
        assert_eq!(session.context().levels_completed, 0);
        assert_eq!(session.context().score, 0);

        let events = session.drain_events();
        assert!(events.iter().any(|event| matches!(event, LogEvent::LevelFailed { level: 1, .. })));
        assert!(!events.iter().any(|event| matches!(event, LogEvent::LevelComplete { .. })));
    }

    #[test]
    fn same_seed_same_inputs_same_snapshot() {
        let mut a = Session::new(99, GameConfig::default());
        let mut b = Session::new(99, GameConfig::default());
        for heading in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            a.steer(Some(heading));
            b.steer(Some(heading));
            assert_eq!(a.advance(90), b.advance(90));
        }
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());
        assert_eq!(a.events(), b.events());
    }
}
