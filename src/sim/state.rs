//! Session state and core simulation types
//!
//! Everything the session controller owns lives in `GameState`; nothing here
//! is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generate::initial_platforms;
use crate::consts::*;
use crate::error::StartError;
use crate::tuning::Tuning;

/// Lifecycle of one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for identity input and a start command
    NotStarted,
    /// Ticking and counting down
    Running,
    /// Timer ran out; final score on display until reset
    Ended,
}

/// Who is playing, gathered before `start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub contact: String,
}

impl PlayerIdentity {
    /// Trimmed identity; both fields are required
    pub fn new(name: &str, contact: &str) -> Result<Self, StartError> {
        let name = name.trim();
        let contact = contact.trim();
        if name.is_empty() {
            return Err(StartError::MissingName);
        }
        if contact.is_empty() {
            return Err(StartError::MissingContact);
        }
        Ok(Self {
            name: name.to_string(),
            contact: contact.to_string(),
        })
    }
}

/// The player body (world coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    /// Supported by a platform this tick
    pub resting: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, SPAWN_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vy: 0.0,
            resting: true,
        }
    }
}

impl Player {
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Back to the spawn point, standing still on the ground
    pub fn respawn(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Ledge,
}

/// A static axis-aligned platform. Never mutated once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub kind: PlatformKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn ground() -> Self {
        Self {
            kind: PlatformKind::Ground,
            pos: Vec2::new(0.0, GROUND_Y),
            size: Vec2::new(WORLD_WIDTH, GROUND_HEIGHT),
        }
    }

    pub fn ledge(x: f32, y: f32, width: f32) -> Self {
        Self {
            kind: PlatformKind::Ledge,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, PLATFORM_HEIGHT),
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the generator was created with
    pub seed: u64,
    /// Platform generator
    pub(crate) rng: Pcg32,
    /// Gameplay magnitudes for this session
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Set by a successful start, cleared on reset
    pub identity: Option<PlayerIdentity>,
    pub player: Player,
    /// Ground first, then ledges in generation order (append-only)
    pub platforms: Vec<Platform>,
    /// World y of the highest generated platform
    pub watermark: f32,
    /// Vertical render translation, always >= 0
    pub camera_offset: f32,
    /// Best height reached, never decreases within a session
    pub score: u64,
    pub seconds_remaining: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh `NotStarted` session
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: SessionPhase::NotStarted,
            identity: None,
            player: Player::default(),
            platforms: Vec::new(),
            watermark: GROUND_Y,
            camera_offset: 0.0,
            score: 0,
            seconds_remaining: tuning.session_secs,
            time_ticks: 0,
        };
        state.reinitialize();
        state
    }

    /// Begin a play-through. Rejected input leaves the state untouched.
    pub fn start(&mut self, identity: PlayerIdentity) -> Result<(), StartError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(StartError::NotReady(self.phase));
        }
        self.reinitialize();
        self.identity = Some(identity);
        self.phase = SessionPhase::Running;
        Ok(())
    }

    /// Abandon the current play-through and return to `NotStarted`
    pub fn reset(&mut self) {
        self.reinitialize();
        self.identity = None;
        self.phase = SessionPhase::NotStarted;
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Seconds played so far
    pub fn elapsed_secs(&self) -> u32 {
        self.tuning.session_secs.saturating_sub(self.seconds_remaining)
    }

    fn reinitialize(&mut self) {
        let (platforms, watermark) = initial_platforms(&mut self.rng, &self.tuning);
        self.platforms = platforms;
        self.watermark = watermark;
        self.player = Player::default();
        self.camera_offset = 0.0;
        self.score = 0;
        self.seconds_remaining = self.tuning.session_secs;
        self.time_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_trims_and_requires_fields() {
        let id = PlayerIdentity::new("  Ada ", "a@x.com").unwrap();
        assert_eq!(id.name, "Ada");
        assert_eq!(PlayerIdentity::new("", "a@x.com"), Err(StartError::MissingName));
        assert_eq!(PlayerIdentity::new("Ada", "   "), Err(StartError::MissingContact));
        // Name is checked first
        assert_eq!(PlayerIdentity::new(" ", ""), Err(StartError::MissingName));
    }

    #[test]
    fn test_new_session_shape() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.seconds_remaining, 120);
        assert_eq!(state.platforms.len(), 1 + Tuning::default().initial_platforms);
        assert_eq!(state.platforms[0], Platform::ground());
        assert!(state.player.resting);
        assert_eq!(state.player.bottom(), Platform::ground().top());
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut state = GameState::new(7, Tuning::default());
        let id = PlayerIdentity::new("Ada", "a@x.com").unwrap();
        state.start(id.clone()).unwrap();
        assert_eq!(
            state.start(id),
            Err(StartError::NotReady(SessionPhase::Running))
        );
        assert_eq!(state.phase, SessionPhase::Running);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(99, Tuning::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platforms, state.platforms);
        assert_eq!(back.watermark, state.watermark);
    }
}
