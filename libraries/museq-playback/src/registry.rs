//! Ordered track collection with a current selection
//!
//! The registry only holds `Track` values. It never sees a media handle;
//! transport state lives in the controller.

use crate::error::{PlaybackError, Result};
use crate::types::UploadedFile;
use museq_core::waveform::DEFAULT_BAR_COUNT;
use museq_core::{SourceLocator, Track, TrackId, TrackPatch};
use tracing::{debug, info, warn};

/// MIME types accepted by the upload filter
const SUPPORTED_MIME_TYPES: &[&str] = &["audio/wav", "audio/x-wav", "audio/wave", "audio/mpeg", "audio/mp3"];

/// File extensions accepted by the upload filter
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// Tracks in insertion order plus the selected track id
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    selected: Option<TrackId>,
    bar_count: usize,
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_COUNT)
    }
}

impl TrackRegistry {
    /// Create an empty registry whose tracks get `bar_count` waveform bars
    pub fn new(bar_count: usize) -> Self {
        Self {
            tracks: Vec::new(),
            selected: None,
            bar_count,
        }
    }

    /// Bars per synthesized waveform
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    // ===== Creation =====

    /// Append a new track and select it
    pub fn add_track(&mut self, name: impl Into<String>, source: SourceLocator) -> Track {
        let track = Track::new(name, source, self.bar_count);
        debug!(track_id = %track.id, name = %track.name, "Track added");
        self.selected = Some(track.id.clone());
        self.tracks.push(track.clone());
        track
    }

    /// Add one track per uploaded file, in order
    ///
    /// The WAV/MP3 filter is advisory: other files are still added, with a
    /// warning.
    pub fn add_uploads(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> Vec<Track> {
        files
            .into_iter()
            .map(|file| {
                if !is_supported_upload(&file) {
                    warn!(
                        file_name = %file.file_name,
                        mime_type = ?file.mime_type,
                        "Uploaded file is not WAV or MP3"
                    );
                }
                let mime_type = file
                    .mime_type
                    .clone()
                    .or_else(|| {
                        SourceLocator::file(&file.file_name)
                            .mime_type()
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                self.add_track(file.file_name, SourceLocator::blob(file.data, mime_type))
            })
            .collect()
    }

    /// Add a finished microphone recording
    ///
    /// The track is named `record-<unix millis>.<ext>`, with the extension
    /// taken from the MIME type.
    pub fn add_recording(&mut self, data: Vec<u8>, mime_type: &str) -> Track {
        let name = format!(
            "record-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            extension_for_mime(mime_type)
        );
        info!(name = %name, bytes = data.len(), "Recording added");
        self.add_track(name, SourceLocator::blob(data, mime_type))
    }

    // ===== Mutation =====

    /// Merge a patch into a track, replacing the stored value
    pub fn update_track(&mut self, id: &TrackId, patch: &TrackPatch) -> Result<Track> {
        let slot = self
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;
        *slot = slot.merged(patch);
        Ok(slot.clone())
    }

    /// Remove a track, clearing the selection if it pointed at it
    pub fn remove_track(&mut self, id: &TrackId) -> Result<Track> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let track = self.tracks.remove(index);
        debug!(track_id = %id, "Track removed");
        Ok(track)
    }

    /// Flip the solo flag
    pub fn toggle_solo(&mut self, id: &TrackId) -> Result<bool> {
        let solo = !self.get(id).ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?.solo;
        self.update_track(id, &TrackPatch::solo(solo))?;
        Ok(solo)
    }

    // ===== Selection =====

    /// Select a track
    pub fn select(&mut self, id: &TrackId) -> Result<()> {
        if self.index_of(id).is_none() {
            return Err(PlaybackError::TrackNotFound(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selected track id
    pub fn selected_id(&self) -> Option<&TrackId> {
        self.selected.as_ref()
    }

    /// Selected track
    pub fn selected_track(&self) -> Option<&Track> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    // ===== Lookup =====

    /// Track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Whether a track is present
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index_of(id).is_some()
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }
}

/// Whether an upload passes the WAV/MP3 filter
pub fn is_supported_upload(file: &UploadedFile) -> bool {
    let mime_ok = file
        .mime_type
        .as_deref()
        .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
        .is_some_and(|m| SUPPORTED_MIME_TYPES.contains(&m.as_str()));

    let ext_ok = std::path::Path::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)));

    mime_ok || ext_ok
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.split(';').next().map(str::trim) {
        Some("audio/ogg") => "ogg",
        Some("audio/wav" | "audio/x-wav" | "audio/wave") => "wav",
        Some("audio/mpeg" | "audio/mp3") => "mp3",
        Some("audio/mp4") => "m4a",
        _ => "webm",
    }
}
