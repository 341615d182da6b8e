//! Grid value types and the board
//!
//! Everything the renderer draws lives on the [`Board`]; the engine owns
//! exactly one.

use serde::{Deserialize, Serialize};

use crate::consts::SAFE_ZONE_RADIUS;

/// A cell on the grid, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Direction the commander is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// (dx, dy) for one step; y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Commander moving
    Playing,
    /// Movement frozen by the player
    Paused,
    /// Run ended by a crash; only restart leaves it
    GameOver,
    /// Quota met; next level starts after a short dwell (final at level 10)
    LevelComplete,
}

/// What the commander ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Left the grid
    Wall,
    /// Crossed its own trail
    Trail,
    /// Hit a level obstacle
    Obstacle,
}

/// Something that happened during a tick, for renderers and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AlertCollected {
        position: Position,
        points: u64,
        /// 1 for the first alert of the level, 2 for the second, ...
        combo: u32,
    },
    Crashed {
        kind: CollisionKind,
        position: Position,
    },
    LevelCompleted { level: u32, bonus: u64 },
    LevelStarted { level: u32 },
    /// Final level cleared; the engine stays in LevelComplete
    GameCompleted { score: u64 },
}

/// Grid contents: commander, trail, alerts and obstacles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub commander: Position,
    /// Past commander cells, oldest first
    pub trail: Vec<Position>,
    pub alerts: Vec<Position>,
    pub obstacles: Vec<Position>,
}

impl Board {
    /// Empty board with the commander on the center cell
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            commander: Position::new(width / 2, height / 2),
            trail: Vec::new(),
            alerts: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Within the obstacle-free square around the spawn point (inclusive)
    pub fn in_safe_zone(&self, pos: Position) -> bool {
        let center = self.center();
        (pos.x - center.x).abs() <= SAFE_ZONE_RADIUS
            && (pos.y - center.y).abs() <= SAFE_ZONE_RADIUS
    }

    /// Taken by the commander, its trail, or an obstacle
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.commander == pos || self.trail.contains(&pos) || self.obstacles.contains(&pos)
    }

    /// Put the commander back on the center cell and wipe the level contents
    pub fn reset_for_level(&mut self) {
        self.commander = self.center();
        self.trail.clear();
        self.alerts.clear();
        self.obstacles.clear();
    }
}
