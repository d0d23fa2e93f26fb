//! Error types for the fallible boundaries

use thiserror::Error;

use crate::sim::SessionPhase;

/// Why a `start` request was rejected. Rejection never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("please enter your name to start")]
    MissingName,
    #[error("please enter a contact (email or handle) to start")]
    MissingContact,
    #[error("cannot start while the session is {0:?}")]
    NotReady(SessionPhase),
}

/// Invalid tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
