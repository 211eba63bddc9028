use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ObstacleId;
}

/// Grid cell address. Row 0 is the top row of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (d_row, d_col) = direction.delta();
        Self { row: self.row + d_row * distance, col: self.col + d_col * distance }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// `(row, col)` delta in grid space.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// What an obstacle is standing on: roads are path cells, grass is the wall area between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Surface {
    Road,
    Grass,
}

impl Surface {
    pub fn of(cell: Cell) -> Self {
        match cell {
            Cell::Path => Surface::Road,
            Cell::Wall => Surface::Grass,
        }
    }
}

/// Continuous render-space position. World Y grows upward.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self { x: self.x + (other.x - self.x) * t, y: self.y + (other.y - self.y) * t }
    }
}

/// A 2x2 block of wall cells with a path along its edge, large enough to host a building.
/// `top_left` is the upper-left cell of the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HouseArea {
    pub top_left: Coord,
}

impl HouseArea {
    pub const fn new(top_left: Coord) -> Self {
        Self { top_left }
    }

    pub fn cells(self) -> [Coord; 4] {
        let Coord { row, col } = self.top_left;
        [
            Coord::new(row, col),
            Coord::new(row, col + 1),
            Coord::new(row + 1, col),
            Coord::new(row + 1, col + 1),
        ]
    }

    /// The eight cells orthogonally touching the block.
    pub fn border(self) -> [Coord; 8] {
        let Coord { row, col } = self.top_left;
        [
            Coord::new(row - 1, col),
            Coord::new(row - 1, col + 1),
            Coord::new(row + 2, col),
            Coord::new(row + 2, col + 1),
            Coord::new(row, col - 1),
            Coord::new(row + 1, col - 1),
            Coord::new(row, col + 2),
            Coord::new(row + 1, col + 2),
        ]
    }

    pub fn contains(self, cell: Coord) -> bool {
        let Coord { row, col } = self.top_left;
        (row..=row + 1).contains(&cell.row) && (col..=col + 1).contains(&cell.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObstacleProfile {
    /// Fast, roams any adjacent grass (the cat).
    Erratic,
    /// Slow, only goes where the player can also reach (the wagon).
    Cautious,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelStarted { level: u32, complexity: u32, destinations: usize },
    HousePlaced { area: HouseArea },
    DestinationReached { cell: Coord, remaining: usize, points: u32 },
    DestinationExpired { cell: Coord, remaining: usize },
    PlayerCaught { obstacle: ObstacleId, profile: ObstacleProfile },
    ObstacleIdle { obstacle: ObstacleId, facing: Direction, surface: Surface },
    ObstacleWalk { obstacle: ObstacleId, facing: Direction, to: Coord },
    ScoreReported { score: u32 },
    LevelComplete { level: u32, score: u32 },
    LevelFailed { level: u32, expired: usize },
    GameOver { level: u32, score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    LevelComplete,
    /// Every destination is gone but some expired instead of being reached.
    LevelFailed,
    GameOver,
    /// The level was torn down; nothing in it runs anymore.
    LevelClosed,
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}
