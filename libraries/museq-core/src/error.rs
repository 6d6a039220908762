//! Core error types for Museq
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `MuseqError`
pub type Result<T> = std::result::Result<T, MuseqError>;

/// Core error type for Museq
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MuseqError {
    /// Track id is not (or no longer) in the registry
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Microphone or media access refused by the platform
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A source locator did not produce playable media
    #[error("Media failed to load: {0}")]
    MediaLoad(String),

    /// State machine transition not allowed from the current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MuseqError {
    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a media load error
    pub fn media_load(msg: impl Into<String>) -> Self {
        Self::MediaLoad(msg.into())
    }

    /// Create an invalid transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
