use anyhow::{Result, bail};
use clap::Parser;
use maze_core::{
    Accessibility, AdvanceStopReason, Direction, GameConfig, ObstacleProfile, Session,
    next_step_toward,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20_000)]
    ticks: u32,
}

/// Mostly chases the nearest destination; one step in four is random.
fn pick_heading(session: &Session, rng: &mut ChaCha8Rng) -> Option<Direction> {
    let level = session.level();
    let here = level.player().cell();
    if rng.next_u64() % 4 == 0 {
        return Some(Direction::ALL[(rng.next_u64() % 4) as usize]);
    }
    let target = level
        .destinations()
        .iter()
        .map(|destination| destination.cell)
        .min_by_key(|cell| (cell.manhattan(here), *cell))?;
    next_step_toward(level.grid(), here, target)
}

fn check_invariants(session: &Session) -> Result<()> {
    let level = session.level();
    let grid = level.grid();
    if !grid.is_path(level.player().cell()) {
        bail!("Invariant failed: player inside wall at {:?}", level.player().cell());
    }
    for (_, agent) in level.obstacles() {
        if grid.is_border(agent.cell()) {
            bail!("Invariant failed: {:?} on the border at {:?}", agent.profile(), agent.cell());
        }
        if agent.profile() == ObstacleProfile::Cautious
            && !level.reachable().is_accessible(agent.cell())
        {
            bail!("Invariant failed: wagon off the player's reach at {:?}", agent.cell());
        }
    }
    for destination in level.destinations() {
        if !level.reachable().contains(destination.cell) {
            bail!("Invariant failed: unreachable destination {:?}", destination.cell);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} ticks...", args.seed, args.ticks);
    let mut session = Session::new(args.seed, GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_ticks = 0;
    while total_ticks < args.ticks {
        let heading = pick_heading(&session, &mut rng);
        session.steer(heading);
        let result = session.advance(5);
        total_ticks += result.simulated_ticks.max(1);

        match result.stop_reason {
            AdvanceStopReason::GameOver => {
                println!("Game over after {total_ticks} ticks");
                break;
            }
            AdvanceStopReason::LevelComplete => {
                println!("Reached level {} after {total_ticks} ticks", session.context().level);
            }
            AdvanceStopReason::LevelFailed => {
                println!("Retrying level {} after {total_ticks} ticks", session.context().level);
            }
            AdvanceStopReason::LevelClosed => bail!("Active level was closed unexpectedly"),
            AdvanceStopReason::BudgetExhausted => {}
        }
        check_invariants(&session)?;
    }

    let context = session.context();
    println!(
        "Fuzz run complete: level {}, score {}, lives {}, {} levels cleared.",
        context.level, context.score, context.lives, context.levels_completed
    );
    println!("Snapshot Hash: {}", session.snapshot_hash());
    Ok(())
}
