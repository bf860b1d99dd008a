//! Procedural obstacle and power-up spawning
//!
//! The spawner owns the run RNG and both id counters so that a session with a
//! given seed always produces the same entities.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::{MAX_SPAWN_SUBSTEPS, SPAWN_DT};
use crate::settings::SpawnRateMode;
use crate::tuning::Tuning;

/// Probability of spawning each kind within one spawn check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRates {
    pub obstacle: f32,
    pub power_up: f32,
}

/// Per-check spawn probabilities for a difficulty level.
///
/// Rates scale with `delta` and are capped at a multiple of it, so with
/// `SpawnRateMode::PerFrame` spawn density depends on frame rate.
pub fn spawn_rates(delta: f32, level: u32, tuning: &Tuning) -> SpawnRates {
    let level = level as f32;
    let obstacle = (delta * (tuning.obstacle_rate_base + level * tuning.obstacle_rate_per_level))
        .min(delta * tuning.obstacle_rate_cap);
    let power_up = (delta * (tuning.power_up_rate_base + level * tuning.power_up_rate_per_level))
        .min(delta * tuning.power_up_rate_cap);
    SpawnRates { obstacle, power_up }
}

/// Entities produced by one spawn check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawned {
    pub obstacle: Option<Obstacle>,
    pub power_up: Option<PowerUp>,
}

/// Entity spawner with seeded RNG and monotonic id counters
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    next_obstacle_id: u32,
    next_power_up_id: u32,
    /// Unconsumed time for `SpawnRateMode::FixedTick`
    accumulator: f32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_obstacle_id: 1,
            next_power_up_id: 1,
            accumulator: 0.0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        id
    }

    /// Allocate a new power-up ID
    pub fn next_power_up_id(&mut self) -> u32 {
        let id = self.next_power_up_id;
        self.next_power_up_id += 1;
        id
    }

    /// Drop any partially accumulated fixed-tick time
    pub fn clear_accumulator(&mut self) {
        self.accumulator = 0.0;
    }

    /// Split a frame into spawn checks: returns (check count, delta per check)
    pub fn checks_for_frame(&mut self, delta: f32, mode: SpawnRateMode) -> (u32, f32) {
        match mode {
            SpawnRateMode::PerFrame => (1, delta),
            SpawnRateMode::FixedTick => {
                self.accumulator += delta;
                let mut checks = 0;
                while self.accumulator >= SPAWN_DT && checks < MAX_SPAWN_SUBSTEPS {
                    self.accumulator -= SPAWN_DT;
                    checks += 1;
                }
                if checks == MAX_SPAWN_SUBSTEPS {
                    // Don't carry a backlog into the next frame
                    self.accumulator = self.accumulator.min(SPAWN_DT);
                }
                (checks, SPAWN_DT)
            }
        }
    }

    /// One spawn check: a single uniform draw per kind against `rates`.
    /// Spawned entities sit `spawn_ahead` in front of `forward`.
    pub fn roll(&mut self, rates: SpawnRates, forward: f32, tuning: &Tuning) -> Spawned {
        let z = forward + tuning.spawn_ahead;
        let mut spawned = Spawned::default();

        if self.rng.random::<f32>() < rates.obstacle {
            let x = self.lateral(tuning.spawn_spread);
            let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
            let id = self.next_obstacle_id();
            spawned.obstacle = Some(Obstacle { id, kind, pos: Vec3::new(x, 0.0, z) });
        }

        if self.rng.random::<f32>() < rates.power_up {
            let x = self.lateral(tuning.spawn_spread);
            let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
            let id = self.next_power_up_id();
            spawned.power_up = Some(PowerUp { id, kind, pos: Vec3::new(x, 0.0, z) });
        }

        spawned
    }

    fn lateral(&mut self, spread: f32) -> f32 {
        if spread <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-spread..=spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_rates() {
        let t = Tuning::default();
        let r = spawn_rates(1.0, 0, &t);
        assert!((r.obstacle - 1.5).abs() < 1e-6);
        assert!((r.power_up - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rates_cap() {
        let t = Tuning::default();
        let r = spawn_rates(0.016, 1000, &t);
        assert!((r.obstacle - 0.016 * 3.0).abs() < 1e-6);
        assert!((r.power_up - 0.016 * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_certain_spawn_places_ahead() {
        let t = Tuning::default();
        let mut spawner = Spawner::new(7);
        let rates = SpawnRates { obstacle: 1.0, power_up: 1.0 };
        let s = spawner.roll(rates, 40.0, &t);

        let o = s.obstacle.unwrap();
        let p = s.power_up.unwrap();
        assert_eq!(o.id, 1);
        assert_eq!(p.id, 1);
        assert_eq!(o.pos.z, 55.0);
        assert_eq!(p.pos.z, 55.0);
        assert!(o.pos.x.abs() <= 1.5);
        assert!(p.pos.x.abs() <= 1.5);
    }

    #[test]
    fn test_zero_rate_never_spawns() {
        let t = Tuning::default();
        let mut spawner = Spawner::new(7);
        let rates = SpawnRates { obstacle: 0.0, power_up: 0.0 };
        for _ in 0..1000 {
            assert_eq!(spawner.roll(rates, 0.0, &t), Spawned::default());
        }
    }

    #[test]
    fn test_ids_monotonic_per_kind() {
        let t = Tuning::default();
        let mut spawner = Spawner::new(3);
        let rates = SpawnRates { obstacle: 1.0, power_up: 0.0 };
        let ids: Vec<u32> = (0..5)
            .map(|_| spawner.roll(rates, 0.0, &t).obstacle.unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(spawner.next_power_up_id(), 1);
    }

    #[test]
    fn test_same_seed_same_entities() {
        let t = Tuning::default();
        let rates = SpawnRates { obstacle: 0.5, power_up: 0.3 };
        let mut a = Spawner::new(42);
        let mut b = Spawner::new(42);
        for i in 0..200 {
            assert_eq!(a.roll(rates, i as f32, &t), b.roll(rates, i as f32, &t));
        }
    }

    #[test]
    fn test_fixed_tick_checks() {
        let mut spawner = Spawner::new(1);
        assert_eq!(spawner.checks_for_frame(0.5, SpawnRateMode::PerFrame), (1, 0.5));

        // Half a tick: nothing yet, then it completes
        let (n, _) = spawner.checks_for_frame(SPAWN_DT * 0.5, SpawnRateMode::FixedTick);
        assert_eq!(n, 0);
        let (n, dt) = spawner.checks_for_frame(SPAWN_DT * 0.6, SpawnRateMode::FixedTick);
        assert_eq!(n, 1);
        assert_eq!(dt, SPAWN_DT);

        // Long frames are capped
        let (n, _) = spawner.checks_for_frame(1.0, SpawnRateMode::FixedTick);
        assert_eq!(n, MAX_SPAWN_SUBSTEPS);
    }

    proptest! {
        #[test]
        fn prop_rates_monotonic_in_level(delta in 0.0f32..1.0, level in 0u32..200) {
            let t = Tuning::default();
            let lo = spawn_rates(delta, level, &t);
            let hi = spawn_rates(delta, level + 1, &t);
            prop_assert!(hi.obstacle >= lo.obstacle);
            prop_assert!(hi.power_up >= lo.power_up);
            prop_assert!(hi.obstacle <= delta * 3.0 + 1e-6);
            prop_assert!(hi.power_up <= delta * 1.5 + 1e-6);
        }
    }
}
