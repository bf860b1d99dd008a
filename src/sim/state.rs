//! Game state store
//!
//! Score, distance, health and the play/game-over flags for one session.
//! Owned by the session and passed by reference; there is no global instance.
//!
//! Invariants:
//! - `health` stays in `[0, max_health]`
//! - `is_game_over` iff `health == 0`
//! - `is_game_over` implies `!is_playing`

use std::collections::BTreeSet;

use serde::Serialize;

use super::entity::PowerUpKind;
use crate::consts::MAX_HEALTH;

/// Mutable session state read by the HUD.
/// Serialize-only: every instance goes through the checked mutators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    score: u64,
    distance: f32,
    health: u8,
    max_health: u8,
    is_playing: bool,
    is_game_over: bool,
    /// Buff bookkeeping. No buff has an effect yet.
    active_power_ups: BTreeSet<PowerUpKind>,
}

/// Read-only snapshot for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub distance: f32,
    pub health: u8,
    pub max_health: u8,
    pub is_playing: bool,
    pub is_game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(MAX_HEALTH)
    }
}

impl GameState {
    /// Fresh state with full health. `max_health` is raised to 1 if zero.
    pub fn new(max_health: u8) -> Self {
        let max_health = max_health.max(1);
        Self {
            score: 0,
            distance: 0.0,
            health: max_health,
            max_health,
            is_playing: false,
            is_game_over: false,
            active_power_ups: BTreeSet::new(),
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn max_health(&self) -> u8 {
        self.max_health
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn active_power_ups(&self) -> impl Iterator<Item = PowerUpKind> + '_ {
        self.active_power_ups.iter().copied()
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    /// Negative distances are stored as 0; non-finite ones are ignored
    pub fn set_distance(&mut self, distance: f32) {
        if distance.is_finite() {
            self.distance = distance.max(0.0);
        } else {
            log::warn!("Ignoring non-finite distance {}", distance);
        }
    }

    /// Reduce health, latching game over when it reaches 0
    pub fn damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 && !self.is_game_over {
            self.is_game_over = true;
            self.is_playing = false;
            log::info!("Game over (score {}, distance {:.1})", self.score, self.distance);
        }
    }

    /// Restore health up to `max_health`. Has no effect after game over.
    pub fn heal(&mut self, amount: u8) {
        if self.is_game_over {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Set health directly, clamped to `[0, max_health]`. Setting 0 ends the run.
    pub fn set_health(&mut self, health: u8) {
        if self.is_game_over {
            return;
        }
        let health = health.min(self.max_health);
        if health == 0 {
            let current = self.health;
            self.damage(current);
        } else {
            self.health = health;
        }
    }

    /// Returns false if the change was refused (resuming after game over)
    pub fn set_playing(&mut self, playing: bool) -> bool {
        if playing && self.is_game_over {
            log::warn!("Refusing to resume a finished run");
            return false;
        }
        self.is_playing = playing;
        true
    }

    /// Force the game-over latch (e.g. player quit). Health drops to 0.
    pub fn end_run(&mut self) {
        let current = self.health;
        self.damage(current.max(1));
    }

    pub fn add_power_up(&mut self, kind: PowerUpKind) {
        self.active_power_ups.insert(kind);
    }

    pub fn remove_power_up(&mut self, kind: PowerUpKind) {
        self.active_power_ups.remove(&kind);
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.active_power_ups.contains(&kind)
    }

    /// Restore initial values. Entity lists are not owned here.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_health);
    }

    pub fn snapshot(&self) -> Hud {
        Hud {
            score: self.score,
            distance: self.distance,
            health: self.health,
            max_health: self.max_health,
            is_playing: self.is_playing,
            is_game_over: self.is_game_over,
        }
    }
}
