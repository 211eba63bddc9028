pub mod config;
pub mod config_file;
pub mod grid;
pub mod level;
pub mod mapgen;
pub mod obstacle;
pub mod pathfinding;
pub mod placement;
pub mod reachability;
pub mod rng;
pub mod session;
pub mod transform;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use config_file::{load_config, parse_config, write_config};
pub use grid::Grid;
pub use level::{Destination, Level};
pub use mapgen::{GeneratedMaze, MazeGenerator, generate_maze};
pub use obstacle::{AgentEvent, ObstacleAgent};
pub use pathfinding::{next_step_toward, shortest_path};
pub use placement::{PlanarPoint, select_spaced_points};
pub use reachability::{Accessibility, ReachableSet, find_reachable};
pub use rng::GameRng;
pub use session::{Session, SessionContext};
pub use transform::WorldTransform;
pub use types::*;
