//! Museq - Desktop Audio
//!
//! CPAL implementation of the realtime capture backend. The default
//! microphone feeds the `museq-audio` graph and the result is monitored on
//! the default output device.
//!
//! ```no_run
//! use museq_audio::{RealtimeConfig, RealtimePipeline};
//! use museq_audio_desktop::CpalCaptureBackend;
//!
//! let mut pipeline = RealtimePipeline::new(CpalCaptureBackend::new(), RealtimeConfig::default())?;
//! pipeline.enable()?;
//! pipeline.set_band(0, 6.0)?;
//! pipeline.disable();
//! # Ok::<(), museq_audio::AudioError>(())
//! ```

pub mod bridge;
mod capture;
mod error;

pub use capture::{CpalCaptureBackend, CpalCaptureSession};
pub use error::{DesktopAudioError, Result};
