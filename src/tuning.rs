//! Data-driven game balance
//!
//! Every number the frame driver uses lives here so balance passes can be done
//! from JSON without recompiling. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("tuning field `{field}` must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("max_health must be at least 1")]
    ZeroHealth,
    #[error("obstacle_damage must be at least 1")]
    ZeroDamage,
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_speed: f32,
    pub speed_increment: f32,
    pub speed_step_distance: f32,
    pub difficulty_step_distance: f32,

    pub obstacle_rate_base: f32,
    pub obstacle_rate_per_level: f32,
    pub obstacle_rate_cap: f32,
    pub power_up_rate_base: f32,
    pub power_up_rate_per_level: f32,
    pub power_up_rate_cap: f32,

    pub spawn_ahead: f32,
    pub cull_behind: f32,
    pub spawn_spread: f32,

    pub lateral_step: f32,
    pub lateral_limit: f32,

    pub max_health: u8,
    pub obstacle_damage: u8,
    pub power_up_bonus: u64,
    pub score_per_unit: f32,
    pub player_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_step_distance: SPEED_STEP_DISTANCE,
            difficulty_step_distance: DIFFICULTY_STEP_DISTANCE,

            obstacle_rate_base: OBSTACLE_RATE_BASE,
            obstacle_rate_per_level: OBSTACLE_RATE_PER_LEVEL,
            obstacle_rate_cap: OBSTACLE_RATE_CAP,
            power_up_rate_base: POWER_UP_RATE_BASE,
            power_up_rate_per_level: POWER_UP_RATE_PER_LEVEL,
            power_up_rate_cap: POWER_UP_RATE_CAP,

            spawn_ahead: SPAWN_AHEAD,
            cull_behind: CULL_BEHIND,
            spawn_spread: SPAWN_SPREAD,

            lateral_step: LATERAL_STEP,
            lateral_limit: LATERAL_LIMIT,

            max_health: MAX_HEALTH,
            obstacle_damage: OBSTACLE_DAMAGE,
            power_up_bonus: POWER_UP_BONUS,
            score_per_unit: SCORE_PER_UNIT,
            player_radius: PLAYER_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Check that step sizes and distances can't stall or invert the curves.
    /// Speed and spawn rates may only grow with distance.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_speed", self.base_speed),
            ("speed_step_distance", self.speed_step_distance),
            ("difficulty_step_distance", self.difficulty_step_distance),
            ("spawn_ahead", self.spawn_ahead),
            ("cull_behind", self.cull_behind),
            ("lateral_step", self.lateral_step),
            ("lateral_limit", self.lateral_limit),
            ("player_radius", self.player_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("obstacle_rate_base", self.obstacle_rate_base),
            ("obstacle_rate_per_level", self.obstacle_rate_per_level),
            ("obstacle_rate_cap", self.obstacle_rate_cap),
            ("power_up_rate_base", self.power_up_rate_base),
            ("power_up_rate_per_level", self.power_up_rate_per_level),
            ("power_up_rate_cap", self.power_up_rate_cap),
            ("spawn_spread", self.spawn_spread),
            ("score_per_unit", self.score_per_unit),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.max_health == 0 {
            return Err(TuningError::ZeroHealth);
        }
        if self.obstacle_damage == 0 {
            return Err(TuningError::ZeroDamage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let t = Tuning::default();
        assert_eq!(t.base_speed, 5.0);
        assert_eq!(t.max_health, 3);
        assert_eq!(t.spawn_ahead, 15.0);
        assert_eq!(t.cull_behind, 5.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let t = Tuning::from_json(r#"{ "base_speed": 7.5, "max_health": 5 }"#).unwrap();
        assert_eq!(t.base_speed, 7.5);
        assert_eq!(t.max_health, 5);
        assert_eq!(t.speed_increment, SPEED_INCREMENT);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = Tuning::from_json(r#"{ "speed_step_distance": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive { field: "speed_step_distance", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = Tuning::from_json(r#"{ "obstacle_rate_per_level": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative { field: "obstacle_rate_per_level", .. }
        ));
        let err = Tuning::from_json(r#"{ "power_up_rate_cap": -0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "power_up_rate_cap", .. }));
    }

    #[test]
    fn test_rejects_negative_speed_increment() {
        let err = Tuning::from_json(r#"{ "speed_increment": -20.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative { field: "speed_increment", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_damage() {
        let err = Tuning::from_json(r#"{ "obstacle_damage": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ZeroDamage));
    }

    #[test]
    fn test_zero_rates_are_allowed() {
        let t = Tuning::from_json(r#"{ "power_up_rate_base": 0.0, "power_up_rate_per_level": 0.0 }"#);
        assert!(t.is_ok());
    }

    #[test]
    fn test_rejects_zero_health() {
        let err = Tuning::from_json(r#"{ "max_health": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ZeroHealth));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
