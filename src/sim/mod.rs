//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick increments only
//! - Seeded RNG only
//! - Append-only platform list, iterated in generation order
//! - No rendering or platform dependencies

pub mod collision;
pub mod generate;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Landing, find_landing, lands_on, overlaps_horizontally, resolve_landing};
pub use generate::{generate_batch, initial_platforms};
pub use input::{Action, HeldActions, InputGate, TickInput};
pub use state::{GameState, Platform, PlatformKind, Player, PlayerIdentity, SessionPhase};
pub use tick::{camera_target, countdown, tick};
