//! Museq Core
//!
//! Platform-agnostic domain types shared by every Museq crate.
//!
//! This crate provides:
//! - **Domain Types**: `Track`, `Mix`, `EqVector`, `SourceLocator`, `TrackId`
//! - **EQ Band Table**: the single `EQ_BANDS` table every EQ consumer reads
//! - **Waveforms**: the synthetic bar waveform and the EQ-to-waveform visual transform
//! - **Error Handling**: `MuseqError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use museq_core::{waveform, EqVector, SourceLocator, Track};
//!
//! let track = Track::new("a.mp3", SourceLocator::file("/music/a.mp3"), 240);
//! assert_eq!(track.waveform.len(), 240);
//!
//! let mut eq = EqVector::flat();
//! eq.set(0, 6.0);
//! let processed = waveform::apply_eq(&eq, &track.waveform);
//! assert_eq!(processed.len(), track.waveform.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;
pub mod waveform;

pub use error::{MuseqError, Result};
pub use types::{
    db_to_linear, EqBand, EqVector, Mix, SourceLocator, Track, TrackId, TrackPatch, EQ_BANDS, EQ_DB_LIMIT,
    EQ_SLOTS, FILTER_BAND_COUNT, VOLUME_SLOT,
};
pub use waveform::WaveformShape;
