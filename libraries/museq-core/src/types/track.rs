//! Track domain type
use crate::types::{EqVector, TrackId};
use crate::waveform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a track's audio lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceLocator {
    /// Bytes handed over in-process (upload or microphone recording)
    Blob {
        /// Raw media bytes, shared with the media backend without copying
        data: Arc<Vec<u8>>,
        /// Declared MIME type (e.g. "audio/wav")
        mime_type: String,
    },

    /// File on the local filesystem
    File(PathBuf),
}

impl SourceLocator {
    /// Locator for in-memory bytes
    pub fn blob(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self::Blob {
            data: Arc::new(data),
            mime_type: mime_type.into(),
        }
    }

    /// Locator for a file on disk
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Declared MIME type, or one guessed from the file extension
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Blob { mime_type, .. } => Some(mime_type.as_str()),
            Self::File(path) => match path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .as_deref()
            {
                Some("wav") => Some("audio/wav"),
                Some("mp3") => Some("audio/mpeg"),
                Some("webm") => Some("audio/webm"),
                Some("ogg") => Some("audio/ogg"),
                _ => None,
            },
        }
    }
}

/// Mix settings for a track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Mix {
    /// Equalizer settings (7 bands + volume trim)
    pub eq: EqVector,

    /// Optional output gain multiplier
    pub output_gain: Option<f32>,
}

/// A track in the session
///
/// All fields are always present; a freshly created track is unmuted,
/// unsoloed and has a flat EQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display name (usually the uploaded file name)
    pub name: String,

    /// Audio source
    pub source: SourceLocator,

    /// Bar amplitudes for display, fixed length for the track's lifetime
    pub waveform: Vec<f32>,

    /// Mute flag
    pub muted: bool,

    /// Solo flag
    pub solo: bool,

    /// Mix settings
    pub mix: Mix,
}

impl Track {
    /// Create a new track with a synthesized waveform of `bar_count` bars
    pub fn new(name: impl Into<String>, source: SourceLocator, bar_count: usize) -> Self {
        Self {
            id: TrackId::generate(),
            name: name.into(),
            source,
            waveform: waveform::synthesize(bar_count),
            muted: false,
            solo: false,
            mix: Mix::default(),
        }
    }

    /// Copy of this track with a patch merged in
    ///
    /// The id, source and waveform are never touched by a patch.
    pub fn merged(&self, patch: &TrackPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name.clone_from(name);
        }
        if let Some(muted) = patch.muted {
            next.muted = muted;
        }
        if let Some(solo) = patch.solo {
            next.solo = solo;
        }
        if let Some(eq) = patch.eq {
            next.mix.eq = eq;
        }
        if let Some(output_gain) = patch.output_gain {
            next.mix.output_gain = output_gain;
        }
        next
    }
}

/// Partial update for a track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPatch {
    /// New display name
    pub name: Option<String>,
    /// New mute flag
    pub muted: Option<bool>,
    /// New solo flag
    pub solo: Option<bool>,
    /// New EQ vector
    pub eq: Option<EqVector>,
    /// New output gain (`Some(None)` clears it)
    pub output_gain: Option<Option<f32>>,
}

impl TrackPatch {
    /// Patch that only sets the mute flag
    pub fn muted(muted: bool) -> Self {
        Self {
            muted: Some(muted),
            ..Self::default()
        }
    }

    /// Patch that only sets the solo flag
    pub fn solo(solo: bool) -> Self {
        Self {
            solo: Some(solo),
            ..Self::default()
        }
    }

    /// Patch that only replaces the EQ vector
    pub fn eq(eq: EqVector) -> Self {
        Self {
            eq: Some(eq),
            ..Self::default()
        }
    }
}
