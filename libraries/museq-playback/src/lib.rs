//! Museq - Playback Management
//!
//! Platform-agnostic session state for the multi-track studio.
//!
//! This crate provides:
//! - Track registry (ordered tracks, selection, uploads, recordings)
//! - Per-track transport (lazy media handles, play/pause, seek by fraction, mute)
//! - Synchronized play-all with a configurable end-of-media policy
//! - Mixer session (working EQ vector, "after EQ" waveform, save/cancel)
//! - Export stub with a pluggable sink
//!
//! # Architecture
//!
//! `museq-playback` has no audio I/O. Playable media is provided through the
//! `MediaBackend` / `MediaHandle` traits; `VirtualMediaBackend` is a
//! clock-driven implementation for headless use and tests.
//!
//! # Example: Play and mix
//!
//! ```rust
//! use museq_playback::{Studio, StudioConfig, UploadedFile, VirtualMediaBackend};
//! use std::time::Duration;
//!
//! let backend = VirtualMediaBackend::new().with_default_duration(Duration::from_secs(30));
//! let mut studio = Studio::new(StudioConfig::default(), backend);
//!
//! let added = studio.upload(vec![UploadedFile::new("a.mp3", Some("audio/mpeg"), Vec::new())]);
//! let track = added[0].id.clone();
//! studio.toggle_play(&track).unwrap();
//! studio.tick(Duration::from_secs(15));
//! assert_eq!(studio.progress(&track).unwrap().fraction(), 0.5);
//!
//! studio.open_mixer().unwrap();
//! studio.change_band(0, 6.0).unwrap();
//! let saved = studio.save_mixer().unwrap();
//! assert_eq!(saved.mix.eq.get(0), Some(6.0));
//! ```

mod controller;
mod error;
mod events;
mod export;
mod media;
mod mixer;
mod registry;
mod studio;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use export::{
    ExportReceipt, ExportSink, Exporter, PlaceholderSink, EXPORT_MIME_TYPE, MIXDOWN_FILE_NAME,
    PLACEHOLDER_BYTES,
};
pub use media::{
    probe_duration, MediaBackend, MediaHandle, MediaStats, MediaStatsHandle, VirtualMedia,
    VirtualMediaBackend,
};
pub use mixer::{MixerSession, MixerState};
pub use registry::{is_supported_upload, TrackRegistry};
pub use studio::Studio;
pub use types::{PlayAllEndPolicy, PlaybackState, StudioConfig, TrackProgress, UploadedFile};
