//! Per-tick simulation loop and stop-reason handling.

use super::*;
use crate::rng::GameRng;
use crate::session::SessionContext;
use crate::types::AdvanceResult;

const POINTS_PER_DESTINATION: u32 = 100;
const POINTS_PER_SECOND_LEFT: u32 = 5;

impl Level {
    /// Runs up to `max_ticks` ticks, stopping early when the level ends.
    /// The level only completes when every destination was reached; once the
    /// last one is gone with any of them expired, it fails instead.
    ///
    /// Each tick: player movement and pickups, destination expiry, obstacle
    /// decisions, then contact checks.
    pub fn advance(
        &mut self,
        context: &mut SessionContext,
        rng: &mut GameRng,
        max_ticks: u32,
    ) -> AdvanceResult {
        if let Some(stop_reason) = self.outcome {
            return AdvanceResult { simulated_ticks: 0, stop_reason };
        }

        let mut ticks = 0;
        while ticks < max_ticks {
            self.tick += 1;
            ticks += 1;

            self.step_player(context);
            self.expire_destinations(context);
            self.tick_obstacles(rng);
            self.resolve_collisions(context);

            if let Some(stop_reason) = self.check_finished(context) {
                return AdvanceResult { simulated_ticks: ticks, stop_reason };
            }
        }
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    fn step_player(&mut self, context: &mut SessionContext) {
        let Some(arrived) = self.player.tick(self.tick, &self.grid, self.rules.step_ticks) else {
            return;
        };
        let Some(index) = self.destinations.iter().position(|item| item.cell == arrived) else {
            return;
        };

        let destination = self.destinations.remove(index);
        let ticks_left = destination.expires_at.saturating_sub(self.tick);
        let seconds_left =
            u32::try_from(ticks_left / self.rules.ticks_per_second).unwrap_or(u32::MAX);
        let bonus = POINTS_PER_SECOND_LEFT.saturating_mul(seconds_left);
        let points = POINTS_PER_DESTINATION.saturating_add(bonus);
        context.score = context.score.saturating_add(points);
        self.log.push(LogEvent::DestinationReached {
            cell: arrived,
            remaining: self.destinations.len(),
            points,
        });
        self.log.push(LogEvent::ScoreReported { score: context.score });
    }

    fn expire_destinations(&mut self, context: &mut SessionContext) {
        let now = self.tick;
        let mut index = 0;
        while index < self.destinations.len() {
            if self.destinations[index].expires_at > now {
                index += 1;
                continue;
            }
            let expired = self.destinations.remove(index);
            self.expired += 1;
            context.lives = context.lives.saturating_sub(1);
            self.log.push(LogEvent::DestinationExpired {
                cell: expired.cell,
                remaining: self.destinations.len(),
            });
        }
    }

    fn tick_obstacles(&mut self, rng: &mut GameRng) {
        let now = self.tick;
        for (id, agent) in &mut self.obstacles {
            if let Some(event) = agent.tick(now, rng, &self.reachable) {
                self.log.push(obstacle_log_event(id, event));
            }
        }
    }

    fn check_finished(&mut self, context: &mut SessionContext) -> Option<AdvanceStopReason> {
        let reason = if context.lives == 0 {
            log::info!("game over on level {} with score {}", self.number, context.score);
            self.log.push(LogEvent::GameOver { level: self.number, score: context.score });
            AdvanceStopReason::GameOver
        } else if self.destinations.is_empty() && self.expired > 0 {
            log::info!("level {} failed: {} destinations expired", self.number, self.expired);
            self.log.push(LogEvent::LevelFailed { level: self.number, expired: self.expired });
            AdvanceStopReason::LevelFailed
        } else if self.destinations.is_empty() {
            context.levels_completed += 1;
            log::info!("level {} complete with score {}", self.number, context.score);
            self.log.push(LogEvent::LevelComplete { level: self.number, score: context.score });
            AdvanceStopReason::LevelComplete
        } else {
            return None;
        };
        self.outcome = Some(reason);
        Some(reason)
    }
}
