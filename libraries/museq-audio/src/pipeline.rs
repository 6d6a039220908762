//! Realtime microphone pipeline
//!
//! Owns at most one capture session. Enabling acquires the microphone and
//! starts the graph; disabling (or dropping the pipeline) stops the session
//! before returning. EQ changes flow to a running graph through shared
//! atomics and are kept while disabled.

use crate::config::RealtimeConfig;
use crate::error::{AudioError, Result};
use crate::graph::RealtimeGraph;
use crate::params::EqParams;
use museq_core::waveform::{apply_eq, synthesize};
use museq_core::{EqVector, EQ_SLOTS};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a backend needs to run the graph
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Graph settings
    pub config: RealtimeConfig,
    /// Live EQ parameters
    pub params: Arc<EqParams>,
}

impl CaptureRequest {
    /// Build a graph for the negotiated stream rate
    pub fn build_graph(&self, sample_rate: u32) -> RealtimeGraph {
        RealtimeGraph::new(&self.config, Arc::clone(&self.params), sample_rate)
    }
}

/// A running microphone → graph → output session
pub trait CaptureSession: Send {
    /// Stop capture and output; must not return while audio is still flowing
    fn stop(&mut self);

    /// Whether audio is flowing
    fn is_active(&self) -> bool;

    /// Negotiated sample rate
    fn sample_rate(&self) -> u32;
}

/// Platform audio I/O that can run a capture session
pub trait CaptureBackend {
    /// Acquire the microphone and start the graph
    ///
    /// On failure nothing may be left running.
    fn start(&mut self, request: &CaptureRequest) -> Result<Box<dyn CaptureSession>>;
}

/// Toggleable realtime EQ over the microphone
pub struct RealtimePipeline<B: CaptureBackend> {
    backend: B,
    config: RealtimeConfig,
    params: Arc<EqParams>,
    session: Option<Box<dyn CaptureSession>>,
}

impl<B: CaptureBackend> RealtimePipeline<B> {
    /// Create a disabled pipeline
    pub fn new(backend: B, config: RealtimeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            config,
            params: Arc::new(EqParams::new()),
            session: None,
        })
    }

    /// Start monitoring; a no-op when already enabled
    pub fn enable(&mut self) -> Result<()> {
        if self.session.is_some() {
            debug!("Realtime pipeline already enabled");
            return Ok(());
        }

        let request = CaptureRequest {
            config: self.config.clone(),
            params: Arc::clone(&self.params),
        };
        match self.backend.start(&request) {
            Ok(session) => {
                info!(sample_rate = session.sample_rate(), "Realtime pipeline enabled");
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Realtime pipeline failed to start");
                Err(e)
            }
        }
    }

    /// Stop monitoring; a no-op when already disabled
    pub fn disable(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
            info!("Realtime pipeline disabled");
        }
    }

    /// Enable if disabled, disable if enabled
    pub fn toggle(&mut self) -> Result<bool> {
        if self.is_enabled() {
            self.disable();
            Ok(false)
        } else {
            self.enable()?;
            Ok(true)
        }
    }

    /// Whether a session is running
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Sample rate of the running session
    pub fn sample_rate(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.sample_rate())
    }

    /// Set one EQ slot (clamped to ±12 dB)
    pub fn set_band(&mut self, index: usize, db: f32) -> Result<()> {
        if !self.params.set(index, db) {
            return Err(AudioError::InvalidInput(format!(
                "band index {index} out of range 0..{EQ_SLOTS}"
            )));
        }
        Ok(())
    }

    /// Return one EQ slot to 0 dB
    pub fn reset_band(&mut self, index: usize) -> Result<()> {
        self.set_band(index, 0.0)
    }

    /// Current EQ values
    pub fn eq(&self) -> EqVector {
        self.params.snapshot()
    }

    /// Synthetic waveform scaled by the current EQ
    pub fn processed_waveform(&self, bar_count: usize) -> Vec<f32> {
        apply_eq(&self.eq(), &synthesize(bar_count))
    }

    /// Graph settings
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Capture backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CaptureBackend> Drop for RealtimePipeline<B> {
    fn drop(&mut self) {
        self.disable();
    }
}

impl<B: CaptureBackend> std::fmt::Debug for RealtimePipeline<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimePipeline")
            .field("enabled", &self.is_enabled())
            .field("eq", &self.eq())
            .finish_non_exhaustive()
    }
}
