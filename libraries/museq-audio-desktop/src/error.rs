//! Desktop audio errors

use museq_audio::AudioError;
use thiserror::Error;

/// Result type alias using `DesktopAudioError`
pub type Result<T> = std::result::Result<T, DesktopAudioError>;

/// Errors raised while opening or running the cpal capture streams
#[derive(Error, Debug)]
pub enum DesktopAudioError {
    /// The host has no default input device (or access to it was refused)
    #[error("No input device available")]
    NoInputDevice,

    /// The host has no default output device to monitor on
    #[error("No output device available")]
    NoOutputDevice,

    /// Device disappeared or refused to open (typical of a revoked microphone grant)
    #[error("Device not available")]
    DeviceNotAvailable,

    /// Device's default format is not f32
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Default stream configuration could not be queried
    #[error("Stream config error: {0}")]
    Config(String),

    /// cpal refused to build the input or output stream
    #[error("Failed to build stream: {0}")]
    StreamBuild(String),

    /// A built stream failed to start playing
    #[error("Failed to start stream: {0}")]
    StreamPlay(String),

    /// The capture thread could not be spawned or died during setup
    #[error("Capture thread error: {0}")]
    Thread(String),
}

impl From<cpal::BuildStreamError> for DesktopAudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        match err {
            cpal::BuildStreamError::DeviceNotAvailable => Self::DeviceNotAvailable,
            other => Self::StreamBuild(other.to_string()),
        }
    }
}

impl From<cpal::PlayStreamError> for DesktopAudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        match err {
            cpal::PlayStreamError::DeviceNotAvailable => Self::DeviceNotAvailable,
            other => Self::StreamPlay(other.to_string()),
        }
    }
}

impl From<cpal::DefaultStreamConfigError> for DesktopAudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        match err {
            cpal::DefaultStreamConfigError::DeviceNotAvailable => Self::DeviceNotAvailable,
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<DesktopAudioError> for AudioError {
    fn from(err: DesktopAudioError) -> Self {
        match err {
            // The platform reports a denied microphone as a missing or unavailable input
            DesktopAudioError::NoInputDevice | DesktopAudioError::DeviceNotAvailable => {
                AudioError::PermissionDenied(err.to_string())
            }
            DesktopAudioError::NoOutputDevice
            | DesktopAudioError::UnsupportedFormat(_)
            | DesktopAudioError::Config(_) => AudioError::DeviceUnavailable(err.to_string()),
            DesktopAudioError::StreamBuild(_) | DesktopAudioError::StreamPlay(_) => {
                AudioError::Stream(err.to_string())
            }
            DesktopAudioError::Thread(msg) => AudioError::Thread(msg),
        }
    }
}
