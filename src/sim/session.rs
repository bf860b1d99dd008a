//! Game session controller
//!
//! Owns the store, the track and the contact tracker for one player, and
//! drives the session phase machine:
//! `Idle -> Playing <-> Paused -> GameOver -> (reset) -> Idle`.

use super::collision::{Contact, ContactMode, ContactTracker, respond};
use super::entity::{Obstacle, PowerUp};
use super::state::{GameState, Hud};
use super::tick::{FrameReport, frame};
use super::track::Track;
use crate::input::{Action, step_lateral};
use crate::settings::SpawnRateMode;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh session, waiting for the player to start
    Idle,
    Playing,
    Paused,
    /// Run ended; only `reset` leaves this phase
    GameOver,
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub hud: Hud,
    pub forward: f32,
    pub lateral: f32,
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    track: Track,
    contacts: ContactTracker,
    tuning: Tuning,
    spawn_mode: SpawnRateMode,
    started: bool,
}

impl Session {
    /// Session with default tuning, per-frame spawning and enter-only contacts
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), SpawnRateMode::default(), ContactMode::default())
    }

    pub fn with_config(
        seed: u64,
        tuning: Tuning,
        spawn_mode: SpawnRateMode,
        contact_mode: ContactMode,
    ) -> Self {
        Self {
            state: GameState::new(tuning.max_health),
            track: Track::new(seed),
            contacts: ContactTracker::new(contact_mode),
            tuning,
            spawn_mode,
            started: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Mutable track access for scripted scenarios (demo, tests)
    pub fn track_mut(&mut self) -> &mut Track {
        &mut self.track
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn spawn_mode(&self) -> SpawnRateMode {
        self.spawn_mode
    }

    pub fn set_spawn_mode(&mut self, mode: SpawnRateMode) {
        self.spawn_mode = mode;
        self.track.spawner.clear_accumulator();
    }

    pub fn phase(&self) -> GamePhase {
        if self.state.is_game_over() {
            GamePhase::GameOver
        } else if self.state.is_playing() {
            GamePhase::Playing
        } else if self.started {
            GamePhase::Paused
        } else {
            GamePhase::Idle
        }
    }

    /// Idle -> Playing. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase() != GamePhase::Idle {
            return false;
        }
        self.started = true;
        self.state.set_playing(true);
        log::info!("Run started (seed {})", self.track.spawner.seed());
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase() != GamePhase::Playing {
            return false;
        }
        self.state.set_playing(false);
        log::info!("Paused at {:.1}", self.track.forward);
        true
    }

    /// Paused -> Playing. Refused after game over.
    pub fn resume(&mut self) -> bool {
        if self.phase() != GamePhase::Paused {
            if self.phase() == GamePhase::GameOver {
                log::warn!("Cannot resume: run is over");
            }
            return false;
        }
        self.state.set_playing(true);
        log::info!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Idle | GamePhase::GameOver => false,
        }
    }

    /// Apply a player action. Lateral moves only register while playing.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft | Action::MoveRight => {
                if self.phase() == GamePhase::Playing {
                    self.track.lateral = step_lateral(
                        self.track.lateral,
                        action,
                        self.tuning.lateral_step,
                        self.tuning.lateral_limit,
                    );
                }
            }
            Action::Boost => log::debug!("Boost pressed (no effect)"),
            Action::Pause => {
                self.toggle_pause();
            }
        }
    }

    /// Advance one rendered frame, then resolve contacts along the path
    /// travelled during it.
    /// Returns `None` (no-op) unless playing.
    pub fn tick(&mut self, delta: f32) -> Option<FrameReport> {
        let from = self.track.player_pos();
        let mut report = frame(
            &mut self.state,
            &mut self.track,
            &self.tuning,
            self.spawn_mode,
            delta,
        )?;

        let contacts = self.contacts.detect(
            from,
            self.track.player_pos(),
            self.tuning.player_radius,
            &self.track.obstacles,
            &self.track.power_ups,
        );
        for contact in contacts {
            let applied = respond(&mut self.state, &mut self.track.power_ups, contact, &self.tuning);
            if applied {
                match contact {
                    Contact::Obstacle(_) => report.obstacle_hits += 1,
                    Contact::PowerUp(_) => report.power_ups_collected += 1,
                }
            }
        }

        Some(report)
    }

    /// Back to Idle: store, entity lists, positions and contacts all cleared
    pub fn reset(&mut self) {
        self.state.reset();
        self.track.clear();
        self.contacts.clear();
        self.started = false;
        log::info!("Session reset");
    }

    /// Reset with a fresh RNG stream
    pub fn restart(&mut self, seed: u64) {
        self.track = Track::new(seed);
        self.reset();
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase(),
            hud: self.state.snapshot(),
            forward: self.track.forward,
            lateral: self.track.lateral,
            obstacles: &self.track.obstacles,
            power_ups: &self.track.power_ups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{ObstacleKind, PowerUpKind};
    use glam::Vec3;

    #[test]
    fn test_phase_machine() {
        let mut s = Session::new(1);
        assert_eq!(s.phase(), GamePhase::Idle);
        assert!(!s.toggle_pause());

        assert!(s.start());
        assert_eq!(s.phase(), GamePhase::Playing);
        assert!(!s.start());

        s.apply(Action::Pause);
        assert_eq!(s.phase(), GamePhase::Paused);
        s.apply(Action::Pause);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut s = Session::new(1);
        s.start();
        s.tick(0.5);
        s.pause();
        let before = s.state().clone();
        assert!(s.tick(0.5).is_none());
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_lateral_input_only_while_playing() {
        let mut s = Session::new(1);
        s.apply(Action::MoveRight);
        assert_eq!(s.track().lateral, 0.0);
        s.start();
        s.apply(Action::MoveRight);
        assert!((s.track().lateral - 0.15).abs() < 1e-6);
        for _ in 0..50 {
            s.apply(Action::MoveLeft);
        }
        assert_eq!(s.track().lateral, -2.0);
    }

    #[test]
    fn test_obstacle_contact_costs_health_once() {
        let mut s = Session::new(1);
        s.start();
        let id = s.track_mut().spawner.next_obstacle_id();
        s.track_mut().obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Crystal,
            pos: Vec3::new(0.0, 0.0, 0.3),
        });

        let r = s.tick(0.01).unwrap();
        assert_eq!(r.obstacle_hits, 1);
        assert_eq!(s.state().health(), 2);

        // Still inside the sphere next frame: no second hit
        let r = s.tick(0.01).unwrap();
        assert_eq!(r.obstacle_hits, 0);
        assert_eq!(s.state().health(), 2);
    }

    #[test]
    fn test_fast_frame_hits_obstacle_between_endpoints() {
        let mut s = Session::new(1);
        s.start();
        s.track_mut().forward = 2000.0;
        let speed = crate::sim::current_speed(2000.0, s.tuning());
        assert_eq!(speed, 25.0);

        let id = s.track_mut().spawner.next_obstacle_id();
        s.track_mut().obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Spike,
            pos: Vec3::new(0.0, 0.0, 2001.25),
        });

        // 0.1 s at 25 u/s jumps 2.5 units, ending clear of the spike on both sides
        let r = s.tick(0.1).unwrap();
        assert_eq!(s.track().forward, 2002.5);
        assert_eq!(r.obstacle_hits, 1);
        assert_eq!(s.state().health(), 2);
    }

    #[test]
    fn test_power_up_pickup() {
        let mut s = Session::new(1);
        s.start();
        let id = s.track_mut().spawner.next_power_up_id();
        s.track_mut().power_ups.push(PowerUp {
            id,
            kind: PowerUpKind::Quantum,
            pos: Vec3::new(0.0, 0.0, 0.2),
        });

        let r = s.tick(0.01).unwrap();
        assert_eq!(r.power_ups_collected, 1);
        assert!(s.track().power_ups.iter().all(|p| p.id != id));
        // 0.05 units covered floors to 0 points, so the score is the bonus alone
        assert_eq!(s.state().score(), 100);
    }

    #[test]
    fn test_game_over_then_reset() {
        let mut s = Session::new(1);
        s.start();
        s.tick(1.0);
        assert!(!s.track().obstacles.is_empty());

        s.apply(Action::MoveLeft);
        for _ in 0..3 {
            s.track_mut().obstacles.clear();
            let id = s.track_mut().spawner.next_obstacle_id();
            let pos = s.track().player_pos();
            s.track_mut().obstacles.push(Obstacle { id, kind: ObstacleKind::Ring, pos });
            s.tick(0.0);
        }
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!(!s.resume());
        assert!(!s.toggle_pause());
        assert!(s.tick(1.0).is_none());

        s.reset();
        assert_eq!(s.phase(), GamePhase::Idle);
        assert_eq!(s.state(), &GameState::default());
        assert!(s.track().obstacles.is_empty());
        assert!(s.track().power_ups.is_empty());
        assert_eq!(s.track().forward, 0.0);
        assert_eq!(s.track().lateral, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut s = Session::new(seed);
            s.start();
            for i in 0..600 {
                if i % 7 == 0 {
                    s.apply(Action::MoveRight);
                }
                if i % 11 == 0 {
                    s.apply(Action::MoveLeft);
                }
                s.tick(1.0 / 60.0);
            }
            (s.state().clone(), s.track().obstacles.clone(), s.track().power_ups.clone())
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_view_reflects_state() {
        let mut s = Session::new(5);
        s.start();
        s.tick(1.0);
        let v = s.view();
        assert_eq!(v.phase, GamePhase::Playing);
        assert_eq!(v.hud.distance, 5.0);
        assert_eq!(v.forward, 5.0);
        assert_eq!(v.obstacles.len(), s.track().obstacles.len());
    }
}
