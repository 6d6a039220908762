//! Realtime processing graph
//!
//! ```text
//! input -> 7 × PeakingFilter -> WaveShaper -> OutputGain -> output
//! ```
//!
//! Band frequencies come from the shared `EQ_BANDS` table; gains are read
//! from `EqParams` on every block.

use crate::config::RealtimeConfig;
use crate::effects::{EffectChain, OutputGain, PeakingFilter, WaveShaper};
use crate::params::EqParams;
use museq_core::{EQ_BANDS, VOLUME_SLOT};
use std::sync::Arc;

/// The microphone processing chain for one stream
#[derive(Debug)]
pub struct RealtimeGraph {
    chain: EffectChain,
    sample_rate: u32,
}

impl RealtimeGraph {
    /// Build the graph for a stream running at `sample_rate`
    pub fn new(config: &RealtimeConfig, params: Arc<EqParams>, sample_rate: u32) -> Self {
        let mut chain = EffectChain::new();

        for band in EQ_BANDS.iter() {
            if let Some(frequency) = band.frequency_hz {
                chain.push(Box::new(PeakingFilter::new(
                    Arc::clone(&params),
                    band.index,
                    frequency,
                    config.band_q,
                )));
            }
        }
        chain.push(Box::new(WaveShaper::distortion(
            config.distortion_amount,
            config.curve_size,
            config.oversample,
        )));
        chain.push(Box::new(OutputGain::new(params, VOLUME_SLOT)));

        Self { chain, sample_rate }
    }

    /// Process one block of mono samples in place
    #[inline]
    pub fn process(&mut self, buffer: &mut [f32]) {
        self.chain.process(buffer, self.sample_rate);
    }

    /// Clear filter and shaper history
    pub fn reset(&mut self) {
        self.chain.reset();
    }

    /// Stream sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stage names in processing order
    pub fn stage_names(&self) -> Vec<&str> {
        self.chain.names()
    }
}
