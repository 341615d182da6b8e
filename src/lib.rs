//! Incident Commander - a grid arcade game
//!
//! Core modules:
//! - `sim`: Game engine (tick loop, collisions, scoring, level layouts)
//! - `clock`: Wall-clock source used for level timers
//! - `settings`: Engine configuration
//!
//! Rendering and input live outside this crate. They read from
//! [`sim::Game`] accessors and call its commands.

pub mod clock;
pub mod settings;
pub mod sim;

pub use clock::{Clock, ManualClock, SystemClock};
pub use settings::Settings;
pub use sim::{Direction, Game, GamePhase, Position};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions
    pub const DEFAULT_GRID_WIDTH: i32 = 20;
    pub const DEFAULT_GRID_HEIGHT: i32 = 20;
    /// Smallest grid that still fits the safe zone and barrier offsets
    pub const MIN_GRID_SIZE: i32 = 8;

    /// Alerts kept on the board at all times
    pub const ALERT_COUNT: usize = 3;
    /// Final level
    pub const MAX_LEVEL: u32 = 10;
    /// Alerts needed to clear level 1 (one more per level after)
    pub const BASE_ALERTS_NEEDED: u32 = 5;

    /// Points for the first alert of a level (multiplied by combo)
    pub const ALERT_BASE_POINTS: u64 = 10;
    /// Completion bonus per level number
    pub const LEVEL_BONUS_PER_LEVEL: u64 = 100;
    /// Time bonus counts down from this many seconds
    pub const TIME_BONUS_SECONDS: u64 = 60;
    /// Dwell in LevelComplete before the next level starts (ms)
    pub const LEVEL_COMPLETE_DWELL_MS: u64 = 1000;

    /// Half-width of the obstacle-free square around the grid center
    pub const SAFE_ZONE_RADIUS: i32 = 2;
    /// Distance of the barrier lines from the grid center
    pub const BARRIER_OFFSET: i32 = 4;
    /// Maze lattice pitch and starting offset
    pub const MAZE_PITCH: usize = 4;
    pub const MAZE_MARGIN: i32 = 2;
    /// Random cells tried per obstacle before giving up on it
    pub const OBSTACLE_ATTEMPTS: u32 = 50;
    /// Random cells tried per alert (times grid area) before scanning for a free cell
    pub const ALERT_ATTEMPTS_PER_CELL: u32 = 4;

    /// Tick pacing for the external driving loop
    pub const BASE_TICK_RATE: f32 = 1.5;
    pub const TICK_RATE_PER_LEVEL: f32 = 0.65;
    pub const MAX_TICK_RATE: f32 = 8.0;
}

/// Ticks per second the driving loop should use at `level`.
/// Level 1 runs at ~2 ticks/s, capped at 8 ticks/s.
#[inline]
pub fn tick_rate_for_level(level: u32) -> f32 {
    use consts::*;
    (BASE_TICK_RATE + level as f32 * TICK_RATE_PER_LEVEL).min(MAX_TICK_RATE)
}

/// Time between ticks at `level`
#[inline]
pub fn tick_interval_for_level(level: u32) -> Duration {
    Duration::from_secs_f32(1.0 / tick_rate_for_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate_progression() {
        assert!((tick_rate_for_level(1) - 2.15).abs() < 0.001);
        assert!(tick_rate_for_level(5) > tick_rate_for_level(4));
        assert!((tick_rate_for_level(10) - consts::MAX_TICK_RATE).abs() < 0.001);
        assert_eq!(tick_rate_for_level(12), consts::MAX_TICK_RATE);
        assert_eq!(tick_rate_for_level(50), consts::MAX_TICK_RATE);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval_for_level(12), Duration::from_millis(125));
        let level1 = tick_interval_for_level(1).as_millis();
        assert!((460..=470).contains(&level1));
    }
}
