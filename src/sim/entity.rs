//! Track entities: obstacles and power-ups
//!
//! Positions are in track space: x is lateral, y is up, z grows in the
//! direction of travel. Kind and id never change after spawn.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Ring,
    Spike,
    Crystal,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Ring, ObstacleKind::Spike, ObstacleKind::Crystal];

    /// Collision sphere radius
    pub fn radius(&self) -> f32 {
        match self {
            ObstacleKind::Ring => 0.6,
            ObstacleKind::Spike => 0.4,
            ObstacleKind::Crystal => 0.5,
        }
    }
}

/// Power-up types. Only the score bonus is implemented; kinds are cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Flux,
    Quantum,
    Phase,
    Hyper,
    Nebula,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Flux,
        PowerUpKind::Quantum,
        PowerUpKind::Phase,
        PowerUpKind::Hyper,
        PowerUpKind::Nebula,
    ];

    /// Collision sphere radius
    pub fn radius(&self) -> f32 {
        0.4
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Flux => "flux",
            PowerUpKind::Quantum => "quantum",
            PowerUpKind::Phase => "phase",
            PowerUpKind::Hyper => "hyper",
            PowerUpKind::Nebula => "nebula",
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec3,
}

/// A power-up entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
}

/// Common view over anything that scrolls past the player
pub trait TrackEntity {
    fn id(&self) -> u32;
    fn pos(&self) -> Vec3;
    fn radius(&self) -> f32;

    fn z(&self) -> f32 {
        self.pos().z
    }
}

impl TrackEntity for Obstacle {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.kind.radius()
    }
}

impl TrackEntity for PowerUp {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.kind.radius()
    }
}
