use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::rng::derive_level_seed;
use maze_core::{Coord, GameConfig, GameRng, HouseArea, Level, ObstacleProfile, load_config};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Generate a level and print its maze", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Level number; complexity grows with it.
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// TOML game config; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print a JSON summary instead of ASCII.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ObstacleSummary {
    profile: ObstacleProfile,
    cell: Coord,
}

#[derive(Serialize)]
struct LevelSummary {
    seed: u64,
    level: u32,
    complexity: u32,
    width: usize,
    height: usize,
    start: Coord,
    house: Option<HouseArea>,
    house_candidates: usize,
    reachable: usize,
    destinations: Vec<Coord>,
    obstacles: Vec<ObstacleSummary>,
    rows: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.maze.width = width;
    }
    if let Some(height) = args.height {
        config.maze.height = height;
    }
    config.validate().context("Invalid maze settings")?;

    let mut rng = GameRng::seeded(derive_level_seed(args.seed, args.level));
    let level = Level::new(args.level, &config, &mut rng);
    log::info!("level {} generated from seed {}", args.level, args.seed);

    let rows = render_rows(&level);
    if args.json {
        let summary = summarize(&args, &level, rows);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        for row in rows {
            println!("{row}");
        }
    }
    Ok(())
}

/// `#` wall, `.` road, `H` house, `S` start, `*` destination, `c` cat, `w` wagon.
fn render_rows(level: &Level) -> Vec<String> {
    let grid = level.grid();
    let mut rows: Vec<Vec<char>> = (0..grid.height())
        .map(|row| {
            (0..grid.width())
                .map(|col| if grid.is_path(Coord::new(row as i32, col as i32)) { '.' } else { '#' })
                .collect()
        })
        .collect();

    let mut mark = |cell: Coord, glyph: char| {
        rows[cell.row as usize][cell.col as usize] = glyph;
    };
    if let Some(area) = level.house() {
        for cell in area.cells() {
            mark(cell, 'H');
        }
    }
    for destination in level.destinations() {
        mark(destination.cell, '*');
    }
    for (_, agent) in level.obstacles() {
        let glyph = match agent.profile() {
            ObstacleProfile::Erratic => 'c',
            ObstacleProfile::Cautious => 'w',
        };
        mark(agent.cell(), glyph);
    }
    mark(level.start(), 'S');

    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn summarize(args: &Args, level: &Level, rows: Vec<String>) -> LevelSummary {
    LevelSummary {
        seed: args.seed,
        level: level.number(),
        complexity: level.complexity(),
        width: level.grid().width(),
        height: level.grid().height(),
        start: level.start(),
        house: level.house(),
        house_candidates: level.house_candidates().len(),
        reachable: level.reachable().len(),
        destinations: level.destinations().iter().map(|destination| destination.cell).collect(),
        obstacles: level
            .obstacles()
            .map(|(_, agent)| ObstacleSummary { profile: agent.profile(), cell: agent.cell() })
            .collect(),
        rows,
    }
}
