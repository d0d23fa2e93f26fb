//! Mountain Climber - a vertical climbing platformer for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, platform generation)
//! - `session`: Game session controller (lifecycle, frame loop, countdown)
//! - `renderer`: Immediate-mode 2D rendering onto a drawable surface
//! - `platform`: Host scheduling abstraction (animation frames, intervals)
//! - `settings`: Presentation preferences
//! - `tuning`: Data-driven gameplay magnitudes

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{StartError, TuningError};
pub use session::{GameSession, SessionResult};
pub use settings::{FramePacing, Settings};
pub use tuning::Tuning;

/// Fixed play-field geometry and loop constants
pub mod consts {
    /// Play-field width in world units (also the canvas width)
    pub const WORLD_WIDTH: f32 = 800.0;
    /// Visible viewport height in world units (also the canvas height)
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;

    /// Ground platform spans the whole play-field width
    pub const GROUND_Y: f32 = 550.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Spawn point: centered, standing on the ground
    pub const SPAWN_X: f32 = (WORLD_WIDTH - PLAYER_WIDTH) / 2.0;
    pub const SPAWN_Y: f32 = GROUND_Y - PLAYER_HEIGHT;

    /// Thickness of generated ledges
    pub const PLATFORM_HEIGHT: f32 = 15.0;

    /// Falling below this world y respawns the player
    pub const OUT_OF_BOUNDS_Y: f32 = VIEW_HEIGHT + 400.0;

    /// Screen y the camera tries to keep the player at
    pub const CAMERA_ANCHOR_Y: f32 = VIEW_HEIGHT * 0.5;

    /// World units climbed per point of score
    pub const SCORE_UNIT: f32 = 10.0;

    /// Fixed simulation step used by `FramePacing::Fixed` (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Countdown granularity
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;
}
