//! Presentation preferences
//!
//! Persisted separately from tuning in LocalStorage. Nothing here changes
//! what the simulation computes per tick, only how often it ticks and what
//! gets drawn.

use serde::{Deserialize, Serialize};

/// How simulation ticks map onto presented frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FramePacing {
    /// Exactly one tick per presented frame; speed follows the refresh rate
    #[default]
    PerFrame,
    /// Accumulate real time and tick at a fixed 60 Hz
    Fixed,
}

impl FramePacing {
    pub const ALL: [FramePacing; 2] = [FramePacing::PerFrame, FramePacing::Fixed];

    /// Stable identifier accepted by `from_str`
    pub fn key(&self) -> &'static str {
        match self {
            FramePacing::PerFrame => "perframe",
            FramePacing::Fixed => "fixed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FramePacing::PerFrame => "Per frame",
            FramePacing::Fixed => "Fixed 60 Hz",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "perframe" | "per-frame" | "frame" => Some(FramePacing::PerFrame),
            "fixed" | "60" => Some(FramePacing::Fixed),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub frame_pacing: FramePacing,

    // === Visuals ===
    /// Scroll the background slower than the world
    pub parallax: bool,
    /// Stronger platform/player colors
    pub high_contrast: bool,

    // === HUD ===
    /// Raw position/camera values in the HUD
    pub show_debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_pacing: FramePacing::PerFrame,
            parallax: true,
            high_contrast: false,
            show_debug: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mountain_climber_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
