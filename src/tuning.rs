//! Data-driven gameplay magnitudes
//!
//! Everything here is a tuned constant rather than a load-bearing one. The
//! validation keeps the relationships the game depends on while letting the
//! magnitudes move: the largest gap stays below the per-tick jump peak plus
//! the landing tolerance, and platforms are generated before the camera
//! needs to catch up.

use serde::{Deserialize, Serialize};

use crate::consts::{PLATFORM_HEIGHT, VIEW_HEIGHT, WORLD_WIDTH};
use crate::error::TuningError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick (world units / tick²)
    pub gravity: f32,
    /// Upward speed applied by a jump (world units / tick)
    pub jump_velocity: f32,
    /// Terminal fall speed (world units / tick)
    pub max_fall_speed: f32,
    /// Size of one discrete horizontal step
    pub move_step: f32,
    /// Minimum real time between accepted horizontal steps
    pub move_cooldown_ms: f64,
    /// Minimum real time between accepted jumps
    pub jump_cooldown_ms: f64,
    /// How far below a platform top the player's feet may be and still land
    pub landing_tolerance: f32,

    /// Ledges generated above the ground at session start
    pub initial_platforms: usize,
    /// Ledges generated per batch once the player nears the watermark
    pub batch_size: usize,
    /// Vertical gap between consecutive ledges
    pub min_gap: f32,
    pub max_gap: f32,
    /// Ledge width range
    pub min_width: f32,
    pub max_width: f32,
    /// Generate a batch when the player is this close to the watermark
    pub generation_trigger: f32,

    /// Snap the camera when the player's screen y is above this margin
    pub camera_snap_margin: f32,
    /// Exponential smoothing factor applied per tick otherwise
    pub camera_smoothing: f32,

    /// Countdown length
    pub session_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_velocity: 12.0,
            max_fall_speed: 15.0,
            move_step: 40.0,
            move_cooldown_ms: 150.0,
            jump_cooldown_ms: 300.0,
            landing_tolerance: 10.0,

            initial_platforms: 8,
            batch_size: 5,
            min_gap: 70.0,
            max_gap: 110.0,
            min_width: 70.0,
            max_width: 150.0,
            generation_trigger: 200.0,

            camera_snap_margin: 100.0,
            camera_smoothing: 0.1,

            session_secs: 120,
        }
    }
}

impl Tuning {
    /// Peak height of a jump from rest, stepped one tick at a time the way
    /// the simulation integrates it
    pub fn jump_height(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        let mut vy = -self.jump_velocity;
        let mut height = 0.0;
        loop {
            vy += self.gravity;
            if vy >= 0.0 {
                return height;
            }
            height -= vy;
        }
    }

    /// Tallest gap a jump from rest can still land on
    pub fn reachable_gap(&self) -> f32 {
        self.jump_height() + self.landing_tolerance
    }

    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.gravity <= 0.0 || self.jump_velocity <= 0.0 || self.max_fall_speed <= 0.0 {
            return invalid("gravity, jump_velocity and max_fall_speed must be positive");
        }
        if self.move_step <= 0.0 || self.move_step > WORLD_WIDTH {
            return invalid("move_step must be within the play-field width");
        }
        if self.move_cooldown_ms < 0.0 || self.jump_cooldown_ms < 0.0 {
            return invalid("cooldowns cannot be negative");
        }
        if self.landing_tolerance <= 0.0 {
            return invalid("landing_tolerance must be positive");
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be at least 1");
        }
        if self.min_gap <= PLATFORM_HEIGHT || self.min_gap.ceil() > self.max_gap.floor() {
            return invalid("gaps must satisfy platform height < min_gap <= max_gap with a whole unit between");
        }
        if self.max_gap >= self.reachable_gap() {
            return invalid("max_gap must be lower than the jump peak plus landing tolerance");
        }
        if self.min_width <= 0.0
            || self.min_width.ceil() > self.max_width.floor()
            || self.max_width > WORLD_WIDTH
        {
            return invalid("widths must satisfy 0 < min_width <= max_width <= world width with a whole unit between");
        }
        if self.camera_snap_margin <= 0.0 || self.camera_snap_margin >= VIEW_HEIGHT {
            return invalid("camera_snap_margin must lie inside the viewport");
        }
        if self.generation_trigger <= self.camera_snap_margin {
            return invalid("generation_trigger must exceed camera_snap_margin");
        }
        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return invalid("camera_smoothing must be in (0, 1]");
        }
        if self.session_secs == 0 {
            return invalid("session_secs must be at least 1");
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mountain_climber_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::default().max_gap < Tuning::default().jump_height());
    }

    #[test]
    fn test_jump_height_is_stepped_peak() {
        let tuning = Tuning::default();
        // 11.5 + 11.0 + ... + 0.5
        assert_eq!(tuning.jump_height(), 138.0);
        assert_eq!(tuning.reachable_gap(), 148.0);

        let too_far = Tuning {
            max_gap: 148.0,
            ..Default::default()
        };
        assert!(too_far.validate().is_err());
        let at_edge = Tuning {
            max_gap: 147.0,
            ..Default::default()
        };
        assert!(at_edge.validate().is_ok());
    }

    #[test]
    fn test_fractional_range_needs_a_whole_unit() {
        let tuning = Tuning {
            min_gap: 70.2,
            max_gap: 70.8,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.6, "session_secs": 60 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.session_secs, 60);
        assert_eq!(tuning.batch_size, Tuning::default().batch_size);
    }

    #[test]
    fn test_unreachable_gap_rejected() {
        let json = r#"{ "max_gap": 400.0 }"#;
        assert!(matches!(Tuning::from_json(json), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_trigger_must_exceed_snap_margin() {
        let tuning = Tuning {
            generation_trigger: 50.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }
}
