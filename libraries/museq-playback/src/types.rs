//! Core types for playback management

use museq_core::waveform::{played_bar_index, DEFAULT_BAR_COUNT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happens to "play all" when one of its tracks reaches the end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayAllEndPolicy {
    /// Remaining tracks keep playing; play-all clears once every track has ended
    #[default]
    ContinueOthers,

    /// The first track to finish stops every track
    StopAll,
}

/// Per-track transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Paused, never started, or finished
    Idle,

    /// Currently playing
    Playing,
}

/// Read-only progress snapshot for one track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProgress {
    /// Current position
    pub position: Duration,

    /// Total length, once known
    pub duration: Option<Duration>,

    /// Whether the handle is playing
    pub playing: bool,
}

impl TrackProgress {
    /// Position as a fraction of the duration (0.0 when unknown)
    pub fn fraction(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Last waveform bar to draw as played, out of `bar_count`
    ///
    /// `None` until the duration is known.
    pub fn played_bar(&self, bar_count: usize) -> Option<usize> {
        let duration = self.duration?;
        played_bar_index(bar_count, self.position.as_secs_f64(), duration.as_secs_f64())
    }

    /// Transport state
    pub fn state(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }
}

/// A file handed over by the upload surface
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Original file name
    pub file_name: String,

    /// Declared MIME type, if the picker reported one
    pub mime_type: Option<String>,

    /// File contents
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Create an uploaded file
    pub fn new(file_name: impl Into<String>, mime_type: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.map(str::to_string),
            data,
        }
    }
}

/// Configuration for the studio session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Bars per synthesized track waveform (default: 240)
    pub bar_count: usize,

    /// End-of-media behavior during play-all (default: ContinueOthers)
    pub play_all_end: PlayAllEndPolicy,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            bar_count: DEFAULT_BAR_COUNT,
            play_all_end: PlayAllEndPolicy::default(),
        }
    }
}
