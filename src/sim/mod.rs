//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{Contact, ContactMode, ContactTracker, respond, spheres_overlap, swept_overlap};
pub use entity::{Obstacle, ObstacleKind, PowerUp, PowerUpKind, TrackEntity};
pub use lifecycle::{cull_behind, remove_by_id};
pub use session::{FrameView, GamePhase, Session};
pub use spawner::{SpawnRates, Spawned, Spawner, spawn_rates};
pub use state::{GameState, Hud};
pub use tick::{FrameReport, current_speed, difficulty_level, frame};
pub use track::Track;
