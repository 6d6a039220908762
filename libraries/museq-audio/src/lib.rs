//! Museq Audio
//!
//! Realtime microphone processing for Museq.
//!
//! This crate provides:
//! - The realtime graph: seven peaking bands, a wave shaper and an output gain
//! - Lock-free EQ parameters shared with the audio thread
//! - `RealtimePipeline`, which owns the capture session and its teardown
//! - The `CaptureBackend` / `CaptureSession` seam implemented per platform
//!
//! # Example: Processing a block
//!
//! ```rust
//! use museq_audio::{EqParams, RealtimeConfig, RealtimeGraph};
//! use std::sync::Arc;
//!
//! let params = Arc::new(EqParams::new());
//! let mut graph = RealtimeGraph::new(&RealtimeConfig::default(), Arc::clone(&params), 48000);
//!
//! // Boost the bass band while the graph runs
//! params.set(1, 6.0);
//!
//! let mut block = vec![0.0f32; 512];
//! graph.process(&mut block);
//! assert!(block.iter().all(|s| s.is_finite()));
//! ```

pub mod config;
pub mod effects;
mod error;
pub mod graph;
pub mod params;
pub mod pipeline;

pub use config::RealtimeConfig;
pub use error::{AudioError, Result};
pub use graph::RealtimeGraph;
pub use params::EqParams;
pub use pipeline::{CaptureBackend, CaptureRequest, CaptureSession, RealtimePipeline};
