//! Explicit player/obstacle contact checks on world-space boxes.

use super::*;
use crate::session::SessionContext;
use crate::types::WorldPos;

/// Obstacle and player bodies are this fraction of a cell wide.
const BODY_SCALE: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: WorldPos,
    pub half_extent: f32,
}

impl Aabb {
    pub fn around(center: WorldPos, size: f32) -> Self {
        Self { center, half_extent: size / 2.0 }
    }

    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        let reach = self.half_extent + other.half_extent;
        (self.center.x - other.center.x).abs() < reach
            && (self.center.y - other.center.y).abs() < reach
    }
}

impl Level {
    pub(super) fn resolve_collisions(&mut self, context: &mut SessionContext) {
        if self.player.is_invulnerable(self.tick) {
            return;
        }

        let size = self.transform.cell_size * BODY_SCALE;
        let player_box =
            Aabb::around(self.player.world_position(self.tick, &self.transform), size);
        let hit = self.obstacles.iter().find_map(|(id, agent)| {
            let body = Aabb::around(agent.world_position(self.tick, &self.transform), size);
            body.overlaps(&player_box).then_some((id, agent.profile()))
        });

        if let Some((obstacle, profile)) = hit {
            context.lives = context.lives.saturating_sub(1);
            self.player.respawn(self.tick, self.rules.grace_ticks);
            log::debug!(
                "player caught by {profile:?} at tick {}, {} lives left",
                self.tick,
                context.lives
            );
            self.log.push(LogEvent::PlayerCaught { obstacle, profile });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_overlap_only_when_closer_than_their_combined_half_extents() {
        let a = Aabb::around(WorldPos::new(0.0, 0.0), 10.0);
        assert!(a.overlaps(&Aabb::around(WorldPos::new(9.0, -9.0), 10.0)));
        assert!(!a.overlaps(&Aabb::around(WorldPos::new(10.0, 0.0), 10.0)));
        assert!(!a.overlaps(&Aabb::around(WorldPos::new(0.0, 32.0), 10.0)));
    }
}
