//! Audio-specific errors

use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// Microphone access refused, or no input device present
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Audio device exists but could not be used
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Stream could not be built or started
    #[error("Stream error: {0}")]
    Stream(String),

    /// Invalid argument or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Capture thread failed to start or stop
    #[error("Capture thread error: {0}")]
    Thread(String),
}

impl From<AudioError> for museq_core::MuseqError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            AudioError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::media_load(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museq_core::MuseqError;

    #[test]
    fn permission_survives_conversion() {
        let err: MuseqError = AudioError::PermissionDenied("no microphone".into()).into();
        assert_eq!(err, MuseqError::PermissionDenied("no microphone".into()));

        let err: MuseqError = AudioError::Stream("xrun".into()).into();
        assert!(matches!(err, MuseqError::MediaLoad(msg) if msg.contains("xrun")));
    }
}
