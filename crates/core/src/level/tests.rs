use super::*;
use crate::mapgen::{GeneratedMaze, GenerationStats, generate_maze};
use crate::placement::PlanarPoint;
use crate::reachability::Accessibility;
use crate::rng::GameRng;
use crate::session::SessionContext;
use crate::types::AdvanceResult;

/// Ten ticks a second and one tick per player step keeps the arithmetic readable.
fn quick_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.ticks_per_second = 10;
    config.player.step_secs = 0.1;
    config
}

fn hand_made(rows: &[&str], start: Coord) -> GeneratedMaze {
    GeneratedMaze {
        grid: Grid::from_ascii(rows),
        start,
        complexity: 0,
        house_candidates: Vec::new(),
        house: None,
        stats: GenerationStats::default(),
    }
}

fn corridor_level() -> Level {
    let maze = hand_made(&["#######", "#.....#", "#######"], Coord::new(1, 1));
    Level::from_maze(1, maze, &quick_config(), &mut GameRng::seeded(1))
}

fn context() -> SessionContext {
    SessionContext::new(3)
}

#[test]
fn new_level_reports_setup_in_order() {
    let mut level = Level::new(1, &GameConfig::default(), &mut GameRng::seeded(17));
    let events = level.drain_events();

    assert!(matches!(events[0], LogEvent::LevelStarted { level: 1, complexity: 0, .. }));
    assert!(matches!(events[1], LogEvent::HousePlaced { .. }));
    let idles = events.iter().filter(|event| matches!(event, LogEvent::ObstacleIdle { .. }));
    assert_eq!(idles.count(), 2);
    assert!(level.events().is_empty());
}

#[test]
fn destinations_are_reachable_spaced_and_off_the_start() {
    let config = GameConfig::default();
    for seed in 0..20 {
        let level = Level::new(2, &config, &mut GameRng::seeded(seed));
        let destinations = level.destinations();

        assert!(destinations.len() >= 3 && destinations.len() <= config.destinations.count);
        for (index, a) in destinations.iter().enumerate() {
            assert!(level.reachable().contains(a.cell));
            assert_ne!(a.cell, level.start());
            assert_eq!(a.expires_at, level.rules().destination_lifetime);
            for b in &destinations[index + 1..] {
                let spacing = a.cell.distance_to(&b.cell);
                assert!(spacing >= config.destinations.min_distance, "seed={seed}");
            }
        }
    }
}

#[test]
fn obstacles_spawn_on_grass_away_from_the_start() {
    for seed in 0..20 {
        let level = Level::new(3, &GameConfig::default(), &mut GameRng::seeded(seed));
        let agents: Vec<&ObstacleAgent> = level.obstacles().map(|(_, agent)| agent).collect();
        assert_eq!(agents.len(), 2, "seed={seed}");
        assert_ne!(agents[0].cell(), agents[1].cell());

        for agent in &agents {
            let cell = agent.cell();
            assert!(level.grid().is_interior(cell));
            assert!(!level.grid().is_path(cell));
            assert!(level.grid().path_neighbor_count(cell) > 0);
            assert!(cell.manhattan(level.start()) >= 3);
            assert!(!level.house().is_some_and(|area| area.contains(cell)));
        }
        let wagon = agents.iter().find(|agent| agent.profile() == ObstacleProfile::Cautious);
        assert!(level.reachable().is_accessible(wagon.expect("wagon spawned").cell()));
    }
}

#[test]
fn player_walks_roads_and_stops_at_walls() {
    let mut level = corridor_level();
    level.destinations = vec![Destination { cell: Coord::new(1, 1), expires_at: 10_000 }];
    let mut context = context();

    level.steer(Some(Direction::Right));
    level.advance(&mut context, &mut GameRng::seeded(0), 2);
    assert_eq!(level.player().cell(), Coord::new(1, 2));

    level.advance(&mut context, &mut GameRng::seeded(0), 100);
    assert_eq!(level.player().cell(), Coord::new(1, 5));
    assert!(!level.player().is_moving());

    level.steer(Some(Direction::Up));
    level.advance(&mut context, &mut GameRng::seeded(0), 10);
    assert_eq!(level.player().cell(), Coord::new(1, 5));
}

#[test]
fn reaching_every_destination_scores_and_completes_the_level() {
    let mut level = corridor_level();
    level.destinations = vec![
        Destination { cell: Coord::new(1, 3), expires_at: 200 },
        Destination { cell: Coord::new(1, 5), expires_at: 200 },
    ];
    level.drain_events();
    let mut context = context();

    level.steer(Some(Direction::Right));
    let result = level.advance(&mut context, &mut GameRng::seeded(0), 100);

    assert_eq!(result.simulated_ticks, 8);
    assert_eq!(result.stop_reason, AdvanceStopReason::LevelComplete);
    // Reached on ticks 4 and 8: 19 whole seconds left each time.
    assert_eq!(context.score, 2 * (100 + 5 * 19));
    assert_eq!(context.levels_completed, 1);
    assert_eq!(context.lives, 3);

    let events = level.drain_events();
    assert_eq!(events, vec![
        LogEvent::DestinationReached { cell: Coord::new(1, 3), remaining: 1, points: 195 },
        LogEvent::ScoreReported { score: 195 },
        LogEvent::DestinationReached { cell: Coord::new(1, 5), remaining: 0, points: 195 },
        LogEvent::ScoreReported { score: 390 },
        LogEvent::LevelComplete { level: 1, score: 390 },
    ]);

    let again = level.advance(&mut context, &mut GameRng::seeded(0), 100);
    assert_eq!(again.simulated_ticks, 0);
    assert_eq!(context.levels_completed, 1, "completion is only counted once");
}

#[test]
fn expired_destination_costs_a_life() {
    let mut level = corridor_level();
    level.destinations = vec![
        Destination { cell: Coord::new(1, 5), expires_at: 3 },
        Destination { cell: Coord::new(1, 4), expires_at: 500 },
    ];
    level.drain_events();
    let mut context = context();

    let result = level.advance(&mut context, &mut GameRng::seeded(0), 10);
    assert_eq!(result.stop_reason, AdvanceStopReason::BudgetExhausted);
    assert_eq!(context.lives, 2);
    assert_eq!(level.destinations().len(), 1);
    assert_eq!(level.drain_events(), vec![LogEvent::DestinationExpired {
        cell: Coord::new(1, 5),
        remaining: 1,
    }]);
}

#[test]
fn losing_the_last_life_ends_the_game() {
    let mut level = corridor_level();
    level.destinations = vec![
        Destination { cell: Coord::new(1, 5), expires_at: 2 },
        Destination { cell: Coord::new(1, 4), expires_at: 500 },
    ];
    let mut context = SessionContext::new(1);

    let result = level.advance(&mut context, &mut GameRng::seeded(0), 10);
    assert_eq!(result.simulated_ticks, 2);
    assert_eq!(result.stop_reason, AdvanceStopReason::GameOver);
    assert_eq!(level.outcome(), Some(AdvanceStopReason::GameOver));
    assert!(matches!(level.events().last(), Some(LogEvent::GameOver { level: 1, score: 0 })));
    assert_eq!(level.advance(&mut context, &mut GameRng::seeded(0), 10).simulated_ticks, 0);
}

#[test]
fn expired_destinations_fail_the_level_instead_of_clearing_it() {
    let mut level = corridor_level();
    level.destinations = vec![
        Destination { cell: Coord::new(1, 5), expires_at: 2 },
        Destination { cell: Coord::new(1, 4), expires_at: 4 },
    ];
    level.drain_events();
    let mut context = context();

    let result = level.advance(&mut context, &mut GameRng::seeded(0), 100);
    assert_eq!(result.simulated_ticks, 4);
    assert_eq!(result.stop_reason, AdvanceStopReason::LevelFailed);
    assert_eq!(context.lives, 1);
    assert_eq!(context.levels_completed, 0);
    assert_eq!(level.expired_count(), 2);
    assert_eq!(level.events().last(), Some(&LogEvent::LevelFailed { level: 1, expired: 2 }));
    assert!(!level.events().iter().any(|event| matches!(event, LogEvent::LevelComplete { .. })));
}

#[test]
fn one_lapse_spoils_the_level_even_if_the_rest_are_reached() {
    let mut level = corridor_level();
    level.destinations = vec![
        Destination { cell: Coord::new(1, 5), expires_at: 1 },
        Destination { cell: Coord::new(1, 3), expires_at: 500 },
    ];
    let mut context = context();

    level.steer(Some(Direction::Right));
    let result = level.advance(&mut context, &mut GameRng::seeded(0), 100);
    assert_eq!(result.stop_reason, AdvanceStopReason::LevelFailed);
    assert!(context.score > 0);
    assert_eq!(context.levels_completed, 0);
}

#[test]
fn very_long_lifetimes_saturate_the_score() {
    let mut config = quick_config();
    config.destinations.lifetime_secs = 1.0e12;
    config.validate().expect("huge but finite lifetimes are allowed");
    let maze = hand_made(&["#######", "#.....#", "#######"], Coord::new(1, 1));
    let mut level = Level::from_maze(1, maze, &config, &mut GameRng::seeded(1));
    let lifetime = level.rules().destination_lifetime;
    level.destinations = vec![
        Destination { cell: Coord::new(1, 3), expires_at: lifetime },
        Destination { cell: Coord::new(1, 5), expires_at: lifetime },
    ];
    level.drain_events();
    let mut context = context();

    level.steer(Some(Direction::Right));
    let result = level.advance(&mut context, &mut GameRng::seeded(0), 100);

    assert_eq!(result.stop_reason, AdvanceStopReason::LevelComplete);
    assert_eq!(context.score, u32::MAX);
    assert!(level.events().contains(&LogEvent::DestinationReached {
        cell: Coord::new(1, 3),
        remaining: 1,
        points: u32::MAX,
    }));
}

#[test]
fn obstacle_contact_costs_a_life_then_grants_grace() {
    let maze = hand_made(&["#######", "#.....#", "#######", "#######"], Coord::new(1, 1));
    let config = quick_config();
    let mut rng = GameRng::seeded(3);
    let mut level = Level::from_maze(1, maze, &config, &mut rng);
    level.destinations = vec![Destination { cell: Coord::new(1, 5), expires_at: 10_000 }];
    let cat = level.spawn_obstacle(ObstacleProfile::Erratic, Coord::new(1, 2), &mut rng);
    level.drain_events();
    let mut context = context();

    level.steer(Some(Direction::Right));
    level.advance(&mut context, &mut rng, 2);

    assert_eq!(context.lives, 2);
    assert_eq!(level.player().cell(), level.start());
    assert!(level.events().contains(&LogEvent::PlayerCaught {
        obstacle: cat,
        profile: ObstacleProfile::Erratic,
    }));
    assert_eq!(level.player().invulnerable_until(), 2 + level.rules().grace_ticks);

    level.advance(&mut context, &mut rng, 2);
    assert_eq!(context.lives, 2, "grace period ignores contact");
    assert_eq!(level.player().cell(), Coord::new(1, 2));
}

#[test]
fn teardown_silences_the_level() {
    let mut level = Level::new(1, &GameConfig::default(), &mut GameRng::seeded(5));
    level.drain_events();
    level.teardown();

    let result = level.advance(&mut context(), &mut GameRng::seeded(5), 10_000);
    assert_eq!(
        result,
        AdvanceResult { simulated_ticks: 0, stop_reason: AdvanceStopReason::LevelClosed }
    );
    assert_eq!(level.obstacles().count(), 0);
    assert!(level.destinations().is_empty());
    assert!(level.events().is_empty());
}

#[test]
fn replace_grid_reseats_obstacles_and_prunes_destinations() {
    let config = GameConfig::default();
    let mut rng = GameRng::seeded(12);
    let mut level = Level::new(1, &config, &mut rng);
    let mut context = SessionContext::new(100);
    level.advance(&mut context, &mut rng, 120);
    level.drain_events();

    let replacement = generate_maze(24, 13, 4, &mut GameRng::seeded(777));
    let expected_grid = replacement.grid.clone();
    level.replace_grid(replacement, &mut rng);

    assert_eq!(level.grid(), &expected_grid);
    assert_eq!(level.reachable().len(), expected_grid.path_count());
    assert!(level.reachable().contains(level.player().cell()));
    for destination in level.destinations() {
        assert!(level.reachable().contains(destination.cell));
    }
    let events = level.drain_events();
    for (id, agent) in level.obstacles() {
        assert_eq!(agent.grid(), level.grid());
        assert!(level.grid().is_interior(agent.cell()));
        assert!(events.iter().any(|event| matches!(
            event,
            LogEvent::ObstacleIdle { obstacle, .. } if *obstacle == id
        )));
    }
}

#[test]
fn wagon_only_walks_where_the_player_can_reach() {
    let mut config = GameConfig::default();
    config.destinations.lifetime_secs = 10_000.0;
    for seed in 0..8 {
        let mut rng = GameRng::seeded(seed);
        let mut level = Level::new(4, &config, &mut rng);
        let mut context = SessionContext::new(u32::MAX);
        level.advance(&mut context, &mut rng, 3_000);

        let wagon = level
            .obstacles()
            .find(|(_, agent)| agent.profile() == ObstacleProfile::Cautious)
            .map(|(id, _)| id)
            .expect("wagon spawned");
        for event in level.events() {
            if let LogEvent::ObstacleWalk { obstacle, to, .. } = event {
                if *obstacle == wagon {
                    assert!(level.reachable().is_accessible(*to), "seed={seed} to={to:?}");
                }
            }
        }
    }
}

#[test]
fn same_seed_and_inputs_give_the_same_snapshot() {
    let config = GameConfig::default();
    let run = || {
        let mut rng = GameRng::seeded(4_242);
        let mut level = Level::new(3, &config, &mut rng);
        let mut context = context();
        for heading in [Direction::Up, Direction::Right, Direction::Right, Direction::Down] {
            level.steer(Some(heading));
            level.advance(&mut context, &mut rng, 60);
        }
        (level.snapshot_hash(), level.drain_events(), context)
    };
    assert_eq!(run(), run());
}
