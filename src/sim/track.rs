//! Track state owned by the frame driver for one play session

use glam::Vec3;

use super::entity::{Obstacle, PowerUp};
use super::spawner::{Spawned, Spawner};

/// Scroll position, player lane offset and the live entity lists
#[derive(Debug, Clone)]
pub struct Track {
    /// Cumulative distance travelled
    pub forward: f32,
    /// Player lateral offset, written only by input handling
    pub lateral: f32,
    /// Active obstacles (ordered by id)
    pub obstacles: Vec<Obstacle>,
    /// Active power-ups (ordered by id)
    pub power_ups: Vec<PowerUp>,
    pub spawner: Spawner,
}

impl Track {
    pub fn new(seed: u64) -> Self {
        Self {
            forward: 0.0,
            lateral: 0.0,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            spawner: Spawner::new(seed),
        }
    }

    /// Player position in track space
    pub fn player_pos(&self) -> Vec3 {
        Vec3::new(self.lateral, 0.0, self.forward)
    }

    /// Append freshly spawned entities. Ids only grow, so order is kept.
    pub fn push(&mut self, spawned: Spawned) -> (usize, usize) {
        let mut counts = (0, 0);
        if let Some(o) = spawned.obstacle {
            log::debug!("Spawned {:?} obstacle {} at {:?}", o.kind, o.id, o.pos);
            self.obstacles.push(o);
            counts.0 = 1;
        }
        if let Some(p) = spawned.power_up {
            log::debug!("Spawned {} power-up {} at {:?}", p.kind.as_str(), p.id, p.pos);
            self.power_ups.push(p);
            counts.1 = 1;
        }
        counts
    }

    /// Back to the start line. The spawner keeps its RNG stream and id counters.
    pub fn clear(&mut self) {
        self.forward = 0.0;
        self.lateral = 0.0;
        self.obstacles.clear();
        self.power_ups.clear();
        self.spawner.clear_accumulator();
    }
}
