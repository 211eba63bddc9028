//! Level construction, grid replacement, and teardown.

use super::*;
use crate::mapgen::{GeneratedMaze, complexity_for_level, generate_maze};
use crate::placement::select_spaced_points;
use crate::reachability::Accessibility;
use crate::rng::GameRng;

/// Obstacles never spawn closer than this (Manhattan) to the player start.
const MIN_SPAWN_DISTANCE: u32 = 3;

impl Level {
    pub fn new(number: u32, config: &GameConfig, rng: &mut GameRng) -> Self {
        let complexity = complexity_for_level(number);
        let maze = generate_maze(config.maze.width, config.maze.height, complexity, rng);
        Self::from_maze(number, maze, config, rng)
    }

    /// Builds a level around an already generated maze.
    pub fn from_maze(
        number: u32,
        maze: GeneratedMaze,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Self {
        let rules = LevelRules::from_config(config);
        let GeneratedMaze { grid, start, complexity, house_candidates, house, .. } = maze;
        let grid = Rc::new(grid);
        let transform = WorldTransform::for_grid(&grid, rules.cell_size);
        let reachable = ReachableSet::compute(&grid, start);
        let destinations = place_destinations(&reachable, start, &rules, 0, rng);

        let mut log = vec![LogEvent::LevelStarted {
            level: number,
            complexity,
            destinations: destinations.len(),
        }];
        if let Some(area) = house {
            log.push(LogEvent::HousePlaced { area });
        }

        let mut level = Self {
            number,
            tick: 0,
            grid,
            start,
            complexity,
            house,
            house_candidates,
            transform,
            reachable,
            destinations,
            expired: 0,
            player: Player::new(start),
            obstacles: SlotMap::with_key(),
            rules,
            log,
            outcome: None,
        };
        level.spawn_obstacles(rng);

        log::debug!(
            "level {number} ready: complexity={complexity} reachable={} destinations={} obstacles={}",
            level.reachable.len(),
            level.destinations.len(),
            level.obstacles.len()
        );
        level
    }

    /// Adds one obstacle at `cell`, idling from the current tick.
    pub fn spawn_obstacle(
        &mut self,
        profile: ObstacleProfile,
        cell: Coord,
        rng: &mut GameRng,
    ) -> ObstacleId {
        let timing = self.rules.timing_for(profile);
        let (agent, event) =
            ObstacleAgent::spawn(profile, Rc::clone(&self.grid), cell, timing, self.tick, rng);
        let id = self.obstacles.insert(agent);
        self.log.push(obstacle_log_event(id, event));
        id
    }

    /// Swaps in a new maze without rebuilding the level.
    ///
    /// Reachability is recomputed, destinations the player can no longer reach
    /// are dropped, and every obstacle is re-seated on the new grid.
    pub fn replace_grid(&mut self, maze: GeneratedMaze, rng: &mut GameRng) {
        let GeneratedMaze { grid, start, complexity, house_candidates, house, .. } = maze;
        self.grid = Rc::new(grid);
        self.start = start;
        self.complexity = complexity;
        self.house = house;
        self.house_candidates = house_candidates;
        self.transform = WorldTransform::for_grid(&self.grid, self.rules.cell_size);
        self.reachable = ReachableSet::compute(&self.grid, start);

        let before = self.destinations.len();
        let reachable = &self.reachable;
        self.destinations.retain(|destination| reachable.contains(destination.cell));
        if self.destinations.len() < before {
            log::debug!("{} destinations cut off by the new maze", before - self.destinations.len());
        }

        let keep_cell = self.reachable.contains(self.player.cell());
        self.player.relocate(start, keep_cell);

        for (id, agent) in &mut self.obstacles {
            let event = agent.update_grid(Rc::clone(&self.grid), self.tick, rng);
            self.log.push(obstacle_log_event(id, event));
        }
        if let Some(area) = house {
            self.log.push(LogEvent::HousePlaced { area });
        }
    }

    /// Drops every obstacle and destination; later `advance` calls are no-ops.
    pub fn teardown(&mut self) {
        self.obstacles.clear();
        self.destinations.clear();
        self.outcome = Some(AdvanceStopReason::LevelClosed);
        log::debug!("level {} torn down at tick {}", self.number, self.tick);
    }

    fn spawn_obstacles(&mut self, rng: &mut GameRng) {
        let sites: Vec<Coord> = self
            .grid
            .wall_cells_adjacent_to_path()
            .into_iter()
            .filter(|cell| cell.manhattan(self.start) >= MIN_SPAWN_DISTANCE)
            .filter(|cell| !self.house.is_some_and(|area| area.contains(*cell)))
            .collect();

        let cat_site = rng.choose(&sites).copied();
        let wagon_sites: Vec<Coord> = sites
            .iter()
            .copied()
            .filter(|cell| Some(*cell) != cat_site && self.reachable.is_accessible(*cell))
            .collect();
        let wagon_site = rng.choose(&wagon_sites).copied();

        for (profile, site) in
            [(ObstacleProfile::Erratic, cat_site), (ObstacleProfile::Cautious, wagon_site)]
        {
            match site {
                Some(cell) => {
                    self.spawn_obstacle(profile, cell, rng);
                }
                None => log::warn!("no spawn site left for the {profile:?} obstacle"),
            }
        }
    }
}

fn place_destinations(
    reachable: &ReachableSet,
    start: Coord,
    rules: &LevelRules,
    now: u64,
    rng: &mut GameRng,
) -> Vec<Destination> {
    let candidates: Vec<Coord> =
        reachable.cells().iter().copied().filter(|cell| *cell != start).collect();
    let cells = select_spaced_points(&candidates, rules.min_distance, rules.destination_count, rng);
    if cells.len() < rules.destination_count {
        log::warn!(
            "placed {} of {} destinations at spacing {}",
            cells.len(),
            rules.destination_count,
            rules.min_distance
        );
    }
    cells
        .into_iter()
        .map(|cell| Destination { cell, expires_at: now.saturating_add(rules.destination_lifetime) })
        .collect()
}
