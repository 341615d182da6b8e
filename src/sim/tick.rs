//! Tick update
//!
//! One call to [`Game::update`] per clock tick. Level completion is resolved
//! first and regardless of phase; movement and collisions only run while
//! Playing.

use std::time::Duration;

use super::engine::{Game, alerts_needed_for_level};
use super::placement::{setup_level, spawn_alerts};
use super::state::{CollisionKind, GameEvent, GamePhase};
use crate::clock::Clock;
use crate::consts::*;

impl<C: Clock> Game<C> {
    /// Advance the game by one tick and report what happened.
    pub fn update(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now();
        self.last_update = now;
        let mut events = Vec::new();

        // Also runs while Paused so the completion dwell still resolves
        self.check_level_complete(now, &mut events);

        if self.phase != GamePhase::Playing {
            return events;
        }

        self.move_commander();
        self.check_collisions(&mut events);

        events
    }

    fn move_commander(&mut self) {
        let board = &mut self.board;
        board.trail.push(board.commander);
        board.commander = board.commander.step(self.direction);
    }

    /// Wall, then trail, then obstacles, then alerts
    fn check_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.board.commander;

        let crash = if !self.board.in_bounds(position) {
            Some(CollisionKind::Wall)
        } else if self.board.trail.contains(&position) {
            Some(CollisionKind::Trail)
        } else if self.board.obstacles.contains(&position) {
            Some(CollisionKind::Obstacle)
        } else {
            None
        };

        if let Some(kind) = crash {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: {:?} at ({}, {}), score {}",
                kind,
                position.x,
                position.y,
                self.score
            );
            events.push(GameEvent::Crashed { kind, position });
            return;
        }

        if let Some(index) = self.board.alerts.iter().position(|&a| a == position) {
            self.collect_alert(index, events);
        }
    }

    fn collect_alert(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let position = self.board.alerts.remove(index);

        let combo = self.alerts_collected + 1;
        let points = ALERT_BASE_POINTS * combo as u64;
        self.score += points;
        self.alerts_collected = combo;

        log::debug!(
            "Alert at ({}, {}) collected: +{} (combo x{}), {}/{}",
            position.x,
            position.y,
            points,
            combo,
            self.alerts_collected,
            self.alerts_needed
        );
        events.push(GameEvent::AlertCollected {
            position,
            points,
            combo,
        });

        spawn_alerts(&mut self.board, &mut self.rng);
    }

    fn check_level_complete(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        if self.alerts_collected < self.alerts_needed {
            return;
        }

        if self.phase != GamePhase::LevelComplete {
            let bonus = self.completion_bonus(now);
            self.phase = GamePhase::LevelComplete;
            self.score += bonus;
            self.level_completed_at = now;

            log::info!(
                "Level {} complete: bonus {}, score {}",
                self.level,
                bonus,
                self.score
            );
            events.push(GameEvent::LevelCompleted {
                level: self.level,
                bonus,
            });
            if self.level >= MAX_LEVEL {
                log::info!("All {} levels cleared, final score {}", MAX_LEVEL, self.score);
                events.push(GameEvent::GameCompleted { score: self.score });
            }
        } else if now.saturating_sub(self.level_completed_at)
            >= Duration::from_millis(LEVEL_COMPLETE_DWELL_MS)
            && self.next_level()
        {
            events.push(GameEvent::LevelStarted { level: self.level });
        }
    }

    /// `100 * level` plus a point for every second under a minute
    fn completion_bonus(&self, now: Duration) -> u64 {
        let elapsed_secs = now.saturating_sub(self.level_started_at).as_secs();
        LEVEL_BONUS_PER_LEVEL * self.level as u64 + TIME_BONUS_SECONDS.saturating_sub(elapsed_secs)
    }

    /// Start the next level. Returns false at the final level, where the game
    /// stays in LevelComplete.
    pub(super) fn next_level(&mut self) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }

        self.level += 1;
        self.alerts_collected = 0;
        self.alerts_needed = alerts_needed_for_level(self.level);
        self.level_started_at = self.clock.now();
        self.phase = GamePhase::Playing;

        self.board.reset_for_level();
        setup_level(&mut self.board, self.level, &mut self.rng);
        let spawn = self.board.commander;
        self.board.obstacles.retain(|&o| o != spawn);
        spawn_alerts(&mut self.board, &mut self.rng);

        log::info!(
            "Level {} started: {} alerts needed, {} obstacles",
            self.level,
            self.alerts_needed,
            self.board.obstacles.len()
        );
        true
    }
}
