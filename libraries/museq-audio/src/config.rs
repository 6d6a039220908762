//! Realtime graph configuration

use crate::error::{AudioError, Result};
use museq_core::waveform::DEFAULT_BAR_COUNT;
use serde::{Deserialize, Serialize};

/// Settings for the realtime microphone graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Q of every peaking band (default: 1.0)
    pub band_q: f32,

    /// Wave shaper curve amount (default: 20)
    pub distortion_amount: f32,

    /// Points in the wave shaper curve (default: 44100)
    pub curve_size: usize,

    /// Oversampling factor of the wave shaper: 1, 2 or 4 (default: 4)
    pub oversample: u32,

    /// Capture-to-output buffering in milliseconds (default: 50)
    pub latency_ms: u32,

    /// Bars in the "after EQ" waveform (default: 240)
    pub bar_count: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            band_q: 1.0,
            distortion_amount: 20.0,
            curve_size: 44100,
            oversample: 4,
            latency_ms: 50,
            bar_count: DEFAULT_BAR_COUNT,
        }
    }
}

impl RealtimeConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.band_q.is_finite() && self.band_q > 0.0) {
            return Err(AudioError::InvalidInput(format!("band_q must be positive, got {}", self.band_q)));
        }
        if !self.distortion_amount.is_finite() || self.distortion_amount < 0.0 {
            return Err(AudioError::InvalidInput(format!(
                "distortion_amount must be >= 0, got {}",
                self.distortion_amount
            )));
        }
        if self.curve_size < 2 {
            return Err(AudioError::InvalidInput("curve_size must be at least 2".into()));
        }
        if !matches!(self.oversample, 1 | 2 | 4) {
            return Err(AudioError::InvalidInput(format!(
                "oversample must be 1, 2 or 4, got {}",
                self.oversample
            )));
        }
        if self.latency_ms == 0 {
            return Err(AudioError::InvalidInput("latency_ms must be positive".into()));
        }
        Ok(())
    }

    /// Ring buffer capacity in samples for a given rate
    pub fn ring_capacity(&self, sample_rate: u32) -> usize {
        let samples = u64::from(sample_rate) * u64::from(self.latency_ms) / 1000;
        // Room for the latency target on both sides of the read pointer
        (samples as usize).max(64) * 2
    }
}
