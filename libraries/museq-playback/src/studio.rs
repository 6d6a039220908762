//! Studio session
//!
//! Bundles registry, transport, mixer and exporter behind one owner so that
//! cross-component orderings (release a handle before removing its track,
//! mirror mute onto live handles) hold for every caller.

use crate::{
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    export::{ExportReceipt, Exporter},
    media::MediaBackend,
    mixer::MixerSession,
    registry::TrackRegistry,
    types::{StudioConfig, TrackProgress, UploadedFile},
};
use museq_core::{Track, TrackId};
use std::time::Duration;

/// One mixing session
#[derive(Debug)]
pub struct Studio {
    config: StudioConfig,
    registry: TrackRegistry,
    controller: PlaybackController,
    mixer: MixerSession,
    exporter: Exporter,
}

impl Studio {
    /// Create an empty studio over a media backend
    pub fn new(config: StudioConfig, backend: impl MediaBackend + 'static) -> Self {
        Self {
            registry: TrackRegistry::new(config.bar_count),
            controller: PlaybackController::new(backend, config.play_all_end),
            mixer: MixerSession::new(),
            exporter: Exporter::default(),
            config,
        }
    }

    /// Replace the exporter
    #[must_use]
    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// Session configuration
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Track registry
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Transport controller
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Mixer session
    pub fn mixer(&self) -> &MixerSession {
        &self.mixer
    }

    // ===== Tracks =====

    /// Add uploaded files
    pub fn upload(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> Vec<Track> {
        self.registry.add_uploads(files)
    }

    /// Add a finished recording
    pub fn record(&mut self, data: Vec<u8>, mime_type: &str) -> Track {
        self.registry.add_recording(data, mime_type)
    }

    /// Select a track
    pub fn select(&mut self, id: &TrackId) -> Result<()> {
        self.registry.select(id)
    }

    /// Flip a track's solo flag
    pub fn toggle_solo(&mut self, id: &TrackId) -> Result<bool> {
        self.registry.toggle_solo(id)
    }

    /// Release the track's media, then remove it
    pub fn remove_track(&mut self, id: &TrackId) -> Result<Track> {
        self.controller.remove(&mut self.registry, id)
    }

    // ===== Transport =====

    /// Play or pause one track
    pub fn toggle_play(&mut self, id: &TrackId) -> Result<()> {
        self.controller.toggle_play(&self.registry, id)
    }

    /// Start every track
    pub fn play_all(&mut self) -> usize {
        self.controller.play_all(&self.registry)
    }

    /// Pause every track
    pub fn stop_all(&mut self) {
        self.controller.stop_all();
    }

    /// Seek by fraction
    pub fn seek(&mut self, id: &TrackId, fraction: f64) -> Result<()> {
        self.controller.seek(id, fraction)
    }

    /// Flip a track's mute flag
    pub fn toggle_mute(&mut self, id: &TrackId) -> Result<bool> {
        self.controller.toggle_mute(&mut self.registry, id)
    }

    /// Progress of one track
    pub fn progress(&self, id: &TrackId) -> Option<TrackProgress> {
        self.controller.progress(id)
    }

    /// Advance the media clock
    pub fn tick(&mut self, elapsed: Duration) {
        self.controller.tick(elapsed);
    }

    /// Take queued playback events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.controller.drain_events()
    }

    // ===== Mixer =====

    /// Open the mixer on the selected track
    pub fn open_mixer(&mut self) -> Result<()> {
        self.mixer.open(&self.registry)
    }

    /// Change one slot of the working EQ
    pub fn change_band(&mut self, index: usize, db: f32) -> Result<()> {
        self.mixer.change_band(index, db)
    }

    /// Reset one slot of the working EQ
    pub fn reset_band(&mut self, index: usize) -> Result<()> {
        self.mixer.reset_band(index)
    }

    /// Save the working EQ
    pub fn save_mixer(&mut self) -> Result<Track> {
        self.mixer.save(&mut self.registry)
    }

    /// Close the mixer without saving
    pub fn cancel_mixer(&mut self) {
        self.mixer.cancel();
    }

    // ===== Export =====

    /// Export one track
    pub fn export_track(&self, id: &TrackId) -> Result<ExportReceipt> {
        let track = self
            .registry
            .get(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;
        self.exporter.export_track(track)
    }

    /// Export the whole mix
    pub fn export_all(&self) -> Result<ExportReceipt> {
        self.exporter.export_all(&self.registry)
    }
}
