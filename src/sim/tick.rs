//! Per-frame simulation step
//!
//! Order within a frame is fixed: advance scroll, award score, spawn, cull.
//! Spawns land `spawn_ahead` in front of the player so they can never be
//! culled in the frame that created them.

use super::lifecycle::cull_behind;
use super::spawner::spawn_rates;
use super::state::GameState;
use super::track::Track;
use crate::consts::MAX_TICK_DELTA;
use crate::settings::SpawnRateMode;
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub difficulty_level: u32,
    pub speed: f32,
    pub score_awarded: u64,
    pub obstacles_spawned: usize,
    pub power_ups_spawned: usize,
    pub culled: usize,
    /// Filled in by the session after contact response
    pub obstacle_hits: usize,
    pub power_ups_collected: usize,
}

/// Difficulty rises one level every `difficulty_step_distance` units
pub fn difficulty_level(forward: f32, tuning: &Tuning) -> u32 {
    (forward.max(0.0) / tuning.difficulty_step_distance).floor() as u32
}

/// Speed rises in discrete steps every `speed_step_distance` units
pub fn current_speed(forward: f32, tuning: &Tuning) -> f32 {
    let steps = (forward.max(0.0) / tuning.speed_step_distance).floor();
    tuning.base_speed + steps * tuning.speed_increment
}

/// Advance the track by one rendered frame.
///
/// Returns `None` without touching anything unless the run is playing.
/// `delta` is clamped to `0..=MAX_TICK_DELTA`; non-finite deltas count as 0.
/// Score is floored per frame, so totals drift slightly below
/// `distance * score_per_unit`.
pub fn frame(
    state: &mut GameState,
    track: &mut Track,
    tuning: &Tuning,
    mode: SpawnRateMode,
    delta: f32,
) -> Option<FrameReport> {
    if !state.is_playing() || state.is_game_over() {
        return None;
    }
    let delta = if delta.is_finite() { delta.clamp(0.0, MAX_TICK_DELTA) } else { 0.0 };

    let level = difficulty_level(track.forward, tuning);
    let speed = current_speed(track.forward, tuning);

    let step = delta * speed;
    track.forward += step;
    state.set_distance(track.forward);

    let score_awarded = (step * tuning.score_per_unit).floor() as u64;
    state.add_score(score_awarded);

    let mut report = FrameReport {
        difficulty_level: level,
        speed,
        score_awarded,
        ..Default::default()
    };

    let (checks, check_dt) = track.spawner.checks_for_frame(delta, mode);
    let rates = spawn_rates(check_dt, level, tuning);
    for _ in 0..checks {
        let spawned = track.spawner.roll(rates, track.forward, tuning);
        let (o, p) = track.push(spawned);
        report.obstacles_spawned += o;
        report.power_ups_spawned += p;
    }

    report.culled = cull_behind(&mut track.obstacles, track.forward, tuning.cull_behind)
        + cull_behind(&mut track.power_ups, track.forward, tuning.cull_behind);
    if report.culled > 0 {
        log::debug!("Culled {} entities behind {:.1}", report.culled, track.forward);
    }

    Some(report)
}
