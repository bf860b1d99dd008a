//! Game settings and preferences
//!
//! Persisted in LocalStorage. Only preferences live here, never run progress.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA;

/// How per-frame spawn probabilities relate to frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpawnRateMode {
    /// One spawn draw per rendered frame using the raw delta.
    /// Spawn density depends on frame rate (original behavior).
    #[default]
    PerFrame,
    /// Spawn draws happen on a fixed 60 Hz clock, independent of frame rate
    FixedTick,
}

impl SpawnRateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnRateMode::PerFrame => "PerFrame",
            SpawnRateMode::FixedTick => "FixedTick",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SpawnRateMode::PerFrame => SpawnRateMode::FixedTick,
            SpawnRateMode::FixedTick => SpawnRateMode::PerFrame,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "perframe" | "per-frame" | "frame" => Some(SpawnRateMode::PerFrame),
            "fixedtick" | "fixed-tick" | "fixed" => Some(SpawnRateMode::FixedTick),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawn probability model
    pub spawn_mode: SpawnRateMode,
    /// Frame deltas are clamped to this many seconds before simulation
    pub max_frame_delta: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show distance readout
    pub show_distance: bool,

    // === Accessibility ===
    /// Reduced motion (no starfield streaks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_mode: SpawnRateMode::PerFrame,
            max_frame_delta: MAX_FRAME_DELTA,
            show_fps: true,
            show_distance: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Clamp a raw frame delta into the range the simulation accepts
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        dt.min(self.max_frame_delta)
    }

    /// Flip the spawn model and return the new one. Callers persist with `save`.
    pub fn toggle_spawn_mode(&mut self) -> SpawnRateMode {
        self.spawn_mode = self.spawn_mode.toggled();
        log::info!("Spawn mode set to {}", self.spawn_mode.as_str());
        self.spawn_mode
    }

    /// Whether to draw speed streaks behind the player
    pub fn streaks_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "cosmic_drift_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
