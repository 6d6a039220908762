//! Error types for playback management

use museq_core::{MuseqError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track id is not (or no longer) in the registry
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Media could not be opened for a track
    #[error("Media failed to load for {track_id}: {message}")]
    MediaLoad {
        /// Track whose source failed
        track_id: TrackId,
        /// Backend message
        message: String,
    },

    /// Platform refused to start media
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Operation not valid in the current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// WAV header could not be read
    #[error("WAV probe failed: {0}")]
    WavProbe(#[from] hound::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaybackError {
    /// Create a media load error
    pub fn media_load(track_id: &TrackId, message: impl Into<String>) -> Self {
        Self::MediaLoad {
            track_id: track_id.clone(),
            message: message.into(),
        }
    }

    /// Whether the target track was already gone
    ///
    /// Callers treat this as a no-op rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TrackNotFound(_))
    }
}

impl From<MuseqError> for PlaybackError {
    fn from(err: MuseqError) -> Self {
        match err {
            MuseqError::TrackNotFound(id) => Self::TrackNotFound(id),
            MuseqError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            MuseqError::MediaLoad(msg) => Self::MediaLoad {
                track_id: TrackId::new(""),
                message: msg,
            },
            MuseqError::InvalidTransition(msg) => Self::InvalidTransition(msg),
            MuseqError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_kind() {
        let id = TrackId::new("t1");
        let err: PlaybackError = MuseqError::TrackNotFound(id.clone()).into();
        assert!(err.is_not_found());

        let err: PlaybackError = MuseqError::invalid_input("bad slot").into();
        assert!(matches!(err, PlaybackError::InvalidInput(msg) if msg == "bad slot"));
    }

    #[test]
    fn media_load_mentions_track() {
        let err = PlaybackError::media_load(&TrackId::new("t9"), "no such file");
        assert_eq!(err.to_string(), "Media failed to load for t9: no such file");
    }
}
