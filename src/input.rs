//! Keyboard input mapping
//!
//! Raw key names (as reported by `KeyboardEvent.key`) map to logical actions.
//! Lateral movement is applied per key press, outside the frame step.

/// A logical player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// Reserved: parsed but has no gameplay effect yet
    Boost,
    Pause,
}

impl Action {
    /// Map a `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Action::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Action::MoveRight),
            " " | "Spacebar" => Some(Action::Boost),
            "p" | "P" | "Escape" => Some(Action::Pause),
            _ => None,
        }
    }
}

/// Move `lateral` one step in the direction of `action`, clamped to `[-limit, limit]`.
/// Non-movement actions return the position unchanged.
pub fn step_lateral(lateral: f32, action: Action, step: f32, limit: f32) -> f32 {
    let delta = match action {
        Action::MoveLeft => -step,
        Action::MoveRight => step,
        Action::Boost | Action::Pause => return lateral,
    };
    (lateral + delta).clamp(-limit, limit)
}
