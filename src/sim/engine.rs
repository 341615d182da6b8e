//! The game engine
//!
//! [`Game`] is the single owner of all grid state. Input collaborators call
//! the commands (`set_direction`, `pause`, `restart`), the driving loop
//! calls `update` once per tick, and renderers read through the accessors,
//! which hand out copies so nothing outside can mutate the board.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement::{setup_level, spawn_alerts};
use super::state::{Board, Direction, GamePhase, Position};
use crate::clock::{Clock, SystemClock};
use crate::consts::BASE_ALERTS_NEEDED;
use crate::settings::Settings;

/// Alert quota for a level: 5 at level 1, one more per level
pub fn alerts_needed_for_level(level: u32) -> u32 {
    BASE_ALERTS_NEEDED + level.saturating_sub(1)
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub commander: Position,
    pub trail: Vec<Position>,
    pub alerts: Vec<Position>,
    pub obstacles: Vec<Position>,
    pub direction: Direction,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub alerts_collected: u32,
    pub alerts_needed: u32,
}

/// Game engine, advanced one tick at a time by [`Game::update`]
pub struct Game<C: Clock = SystemClock> {
    pub(super) board: Board,
    pub(super) direction: Direction,
    pub(super) phase: GamePhase,
    pub(super) score: u64,
    pub(super) level: u32,
    pub(super) alerts_collected: u32,
    pub(super) alerts_needed: u32,
    /// Clock time the current level (or run) started
    pub(super) level_started_at: Duration,
    /// Clock time LevelComplete was entered
    pub(super) level_completed_at: Duration,
    pub(super) last_update: Duration,
    seed: u64,
    pub(super) rng: Pcg32,
    pub(super) clock: C,
}

impl Game<SystemClock> {
    /// New game on a `width` x `height` grid, seeded from OS entropy
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_settings(&Settings::new(width, height))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_clock(settings, SystemClock::new())
    }
}

impl<C: Clock> Game<C> {
    /// New game driven by `clock`. Grids below the minimum size are enlarged.
    pub fn with_clock(settings: &Settings, clock: C) -> Self {
        let settings = settings.clamped();
        let seed = settings.resolve_seed();

        let mut game = Self {
            board: Board::new(settings.grid_width, settings.grid_height),
            direction: Direction::Right,
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            alerts_collected: 0,
            alerts_needed: alerts_needed_for_level(1),
            level_started_at: Duration::ZERO,
            level_completed_at: Duration::ZERO,
            last_update: Duration::ZERO,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock,
        };
        game.start_run(seed);

        log::info!(
            "New game: {}x{} grid, seed {}",
            game.board.width,
            game.board.height,
            seed
        );
        game
    }

    /// Reset everything except the grid size and clock
    fn start_run(&mut self, seed: u64) {
        let now = self.clock.now();

        self.board = Board::new(self.board.width, self.board.height);
        self.direction = Direction::Right;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.level = 1;
        self.alerts_collected = 0;
        self.alerts_needed = alerts_needed_for_level(1);
        self.level_started_at = now;
        self.level_completed_at = Duration::ZERO;
        self.last_update = now;
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);

        spawn_alerts(&mut self.board, &mut self.rng);
        setup_level(&mut self.board, self.level, &mut self.rng);
    }

    // === Commands ===

    /// Steer the commander from the next tick on. Reversing straight back
    /// into the trail is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    /// Toggle between Playing and Paused; ignored in any other phase
    pub fn pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Throw away the run and start over at level 1 on the same grid.
    /// The new seed comes from this game's RNG, so seeded runs stay reproducible.
    pub fn restart(&mut self) {
        let seed = self.rng.random();
        self.start_run(seed);
        log::info!("Game restarted with seed: {}", seed);
    }

    // === Accessors ===

    pub fn commander(&self) -> Position {
        self.board.commander
    }

    /// Past commander cells, oldest first
    pub fn trail(&self) -> Vec<Position> {
        self.board.trail.clone()
    }

    pub fn alerts(&self) -> Vec<Position> {
        self.board.alerts.clone()
    }

    pub fn obstacles(&self) -> Vec<Position> {
        self.board.obstacles.clone()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn alerts_collected(&self) -> u32 {
        self.alerts_collected
    }

    pub fn alerts_needed(&self) -> u32 {
        self.alerts_needed
    }

    pub fn width(&self) -> i32 {
        self.board.width
    }

    pub fn height(&self) -> i32 {
        self.board.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Clock time of the most recent `update`
    pub fn last_update(&self) -> Duration {
        self.last_update
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Final level cleared; no further level will start
    pub fn is_game_complete(&self) -> bool {
        self.level >= crate::consts::MAX_LEVEL && self.phase == GamePhase::LevelComplete
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width,
            height: self.board.height,
            commander: self.board.commander,
            trail: self.trail(),
            alerts: self.alerts(),
            obstacles: self.obstacles(),
            direction: self.direction,
            phase: self.phase,
            score: self.score,
            level: self.level,
            alerts_collected: self.alerts_collected,
            alerts_needed: self.alerts_needed,
        }
    }
}
