//! Export of single tracks and the full mix
//!
//! No encoder ships with Museq. The default sink returns a fixed placeholder
//! payload; a real encoder plugs in through `ExportSink`.

use crate::error::{PlaybackError, Result};
use crate::registry::TrackRegistry;
use museq_core::Track;
use std::path::Path;
use tracing::info;

/// MIME type of every export
pub const EXPORT_MIME_TYPE: &str = "audio/mpeg";

/// File name of a full-mix export
pub const MIXDOWN_FILE_NAME: &str = "museq-mixing.mp3";

/// Payload produced by `PlaceholderSink`
pub const PLACEHOLDER_BYTES: [u8; 4] = [0, 1, 2, 3];

/// Produces encoded bytes for a set of tracks
pub trait ExportSink: Send {
    /// Render the given tracks, in order, into one file
    fn render(&self, tracks: &[&Track]) -> Result<Vec<u8>>;
}

/// Sink that ignores its input and returns `PLACEHOLDER_BYTES`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSink;

impl ExportSink for PlaceholderSink {
    fn render(&self, _tracks: &[&Track]) -> Result<Vec<u8>> {
        Ok(PLACEHOLDER_BYTES.to_vec())
    }
}

/// Result of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Suggested download name
    pub file_name: String,
    /// MIME type of `data`
    pub mime_type: String,
    /// Encoded bytes
    pub data: Vec<u8>,
    /// Names of the exported tracks, in order
    pub track_names: Vec<String>,
}

/// Export front end over a sink
pub struct Exporter {
    sink: Box<dyn ExportSink>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(PlaceholderSink)
    }
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter").finish_non_exhaustive()
    }
}

impl Exporter {
    /// Create an exporter over a sink
    pub fn new(sink: impl ExportSink + 'static) -> Self {
        Self { sink: Box::new(sink) }
    }

    /// Export one track as `<stem>.mp3`
    pub fn export_track(&self, track: &Track) -> Result<ExportReceipt> {
        let data = self.sink.render(&[track])?;
        let receipt = ExportReceipt {
            file_name: format!("{}.mp3", file_stem(&track.name)),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            data,
            track_names: vec![track.name.clone()],
        };
        info!(file_name = %receipt.file_name, track_id = %track.id, "Track exported");
        Ok(receipt)
    }

    /// Export every track as one mix
    pub fn export_all(&self, registry: &TrackRegistry) -> Result<ExportReceipt> {
        if registry.is_empty() {
            return Err(PlaybackError::InvalidTransition("no tracks to export".into()));
        }

        let tracks: Vec<&Track> = registry.tracks().iter().collect();
        let data = self.sink.render(&tracks)?;
        let receipt = ExportReceipt {
            file_name: MIXDOWN_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            data,
            track_names: tracks.iter().map(|t| t.name.clone()).collect(),
        };
        info!(
            file_name = %receipt.file_name,
            tracks = receipt.track_names.len(),
            "Mix exported"
        );
        Ok(receipt)
    }
}

fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(name)
}
