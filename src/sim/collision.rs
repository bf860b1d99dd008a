//! Contact detection and collision response
//!
//! Detection sweeps the player sphere along the segment it travelled this
//! frame and tests each entity sphere against it, standing in for a physics
//! engine's contact callbacks. Response mutates the
//! store: obstacles deal damage, power-ups are collected for a score bonus.

use std::collections::BTreeSet;

use glam::Vec3;

use super::entity::{Obstacle, PowerUp, TrackEntity};
use super::lifecycle::remove_by_id;
use super::state::GameState;
use crate::tuning::Tuning;

/// A contact event between the player and an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Obstacle(u32),
    PowerUp(u32),
}

/// When contact events fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactMode {
    /// Once when an overlap begins
    #[default]
    Enter,
    /// Every check while overlapping
    Continuous,
}

/// Check if two spheres overlap
#[inline]
pub fn spheres_overlap(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Check if a sphere moving from `a` to `b` touches a static sphere at any point
pub fn swept_overlap(a: Vec3, b: Vec3, ra: f32, center: Vec3, rb: f32) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    spheres_overlap(a + ab * t, ra, center, rb)
}

/// Tracks which entities are currently touching the player
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    mode: ContactMode,
    touching_obstacles: BTreeSet<u32>,
    touching_power_ups: BTreeSet<u32>,
}

impl ContactTracker {
    pub fn new(mode: ContactMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> ContactMode {
        self.mode
    }

    pub fn clear(&mut self) {
        self.touching_obstacles.clear();
        self.touching_power_ups.clear();
    }

    /// Report contacts for the player's path from `from` to `to` this frame,
    /// obstacles first, each list in id order
    pub fn detect(
        &mut self,
        from: Vec3,
        to: Vec3,
        player_radius: f32,
        obstacles: &[Obstacle],
        power_ups: &[PowerUp],
    ) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let mode = self.mode;

        let hits = overlapping(from, to, player_radius, obstacles);
        for &id in &hits {
            if mode == ContactMode::Continuous || !self.touching_obstacles.contains(&id) {
                contacts.push(Contact::Obstacle(id));
            }
        }
        self.touching_obstacles = hits;

        let hits = overlapping(from, to, player_radius, power_ups);
        for &id in &hits {
            if mode == ContactMode::Continuous || !self.touching_power_ups.contains(&id) {
                contacts.push(Contact::PowerUp(id));
            }
        }
        self.touching_power_ups = hits;

        contacts
    }
}

fn overlapping<E: TrackEntity>(
    from: Vec3,
    to: Vec3,
    player_radius: f32,
    list: &[E],
) -> BTreeSet<u32> {
    list.iter()
        .filter(|e| swept_overlap(from, to, player_radius, e.pos(), e.radius()))
        .map(|e| e.id())
        .collect()
}

/// Apply one contact to the store. Returns false if it had no effect.
pub fn respond(
    state: &mut GameState,
    power_ups: &mut Vec<PowerUp>,
    contact: Contact,
    tuning: &Tuning,
) -> bool {
    if state.is_game_over() {
        return false;
    }

    match contact {
        Contact::Obstacle(id) => {
            state.damage(tuning.obstacle_damage);
            log::debug!("Hit obstacle {} (health {})", id, state.health());
            true
        }
        Contact::PowerUp(id) => match remove_by_id(power_ups, id) {
            Some(p) => {
                state.add_score(tuning.power_up_bonus);
                log::debug!("Collected {} power-up {}", p.kind.as_str(), id);
                true
            }
            None => false,
        },
    }
}
