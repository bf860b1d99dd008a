//! Cosmic Drift - a neon wormhole infinite runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (store, spawner, culling, collisions, frame driver)
//! - `input`: Keyboard to logical action mapping and lateral movement
//! - `scene`: Presentation boundary with fault capture and retry
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `hub`: Game hub catalogue

pub mod hub;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use input::Action;
pub use settings::{Settings, SpawnRateMode};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Forward speed at the start of a run (units/s)
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed gained at every speed step
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Distance between speed steps
    pub const SPEED_STEP_DISTANCE: f32 = 50.0;
    /// Distance between difficulty levels
    pub const DIFFICULTY_STEP_DISTANCE: f32 = 25.0;

    /// Obstacle spawn rate: base + per-level, capped (all multiplied by delta)
    pub const OBSTACLE_RATE_BASE: f32 = 1.5;
    pub const OBSTACLE_RATE_PER_LEVEL: f32 = 0.2;
    pub const OBSTACLE_RATE_CAP: f32 = 3.0;

    /// Power-up spawn rate: base + per-level, capped (all multiplied by delta)
    pub const POWER_UP_RATE_BASE: f32 = 0.5;
    pub const POWER_UP_RATE_PER_LEVEL: f32 = 0.1;
    pub const POWER_UP_RATE_CAP: f32 = 1.5;

    /// Entities appear this far ahead of the player
    pub const SPAWN_AHEAD: f32 = 15.0;
    /// Entities are removed once this far behind the player
    pub const CULL_BEHIND: f32 = 5.0;
    /// Half-width of the lateral band entities spawn in
    pub const SPAWN_SPREAD: f32 = 1.5;

    /// Lateral movement per key press
    pub const LATERAL_STEP: f32 = 0.15;
    /// Player lateral position is clamped to [-LATERAL_LIMIT, LATERAL_LIMIT]
    pub const LATERAL_LIMIT: f32 = 2.0;

    /// Player health
    pub const MAX_HEALTH: u8 = 3;
    /// Damage dealt by one obstacle contact
    pub const OBSTACLE_DAMAGE: u8 = 1;
    /// Score bonus for collecting a power-up
    pub const POWER_UP_BONUS: u64 = 100;
    /// Score awarded per unit of distance covered
    pub const SCORE_PER_UNIT: f32 = 10.0;

    /// Player collision sphere
    pub const PLAYER_RADIUS: f32 = 0.35;

    /// Fixed spawn-check interval when spawn rates are frame-rate independent (60 Hz)
    pub const SPAWN_DT: f32 = 1.0 / 60.0;
    /// Maximum spawn checks per frame to prevent spiral of death
    pub const MAX_SPAWN_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
    /// Hard ceiling on a single simulation step, whatever the caller passes
    pub const MAX_TICK_DELTA: f32 = 1.0;
}

/// Map a track-space position (z grows forward) to world space (forward is -Z)
#[inline]
pub fn track_to_world(pos: glam::Vec3) -> glam::Vec3 {
    glam::Vec3::new(pos.x, pos.y, -pos.z)
}
