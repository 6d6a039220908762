//! Output gain stage

use super::chain::AudioEffect;
use crate::params::EqParams;
use museq_core::db_to_linear;
use std::sync::Arc;

/// Linear gain of `10^(dB/20)` read from a shared EQ slot
pub struct OutputGain {
    params: Arc<EqParams>,
    slot: usize,
}

impl OutputGain {
    /// Gain that follows `params[slot]`
    pub fn new(params: Arc<EqParams>, slot: usize) -> Self {
        Self { params, slot }
    }

    /// Current linear gain
    pub fn linear(&self) -> f32 {
        db_to_linear(self.params.get(self.slot))
    }
}

impl AudioEffect for OutputGain {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        let gain = self.linear();
        for sample in buffer.iter_mut() {
            *sample *= gain;
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Output Gain"
    }
}
