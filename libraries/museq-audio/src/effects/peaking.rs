//! Peaking biquad band
//!
//! RBJ cookbook peaking filter. The gain is not owned by the filter: it is
//! read from a shared `EqParams` slot at the start of every block, so UI
//! threads can move it while the stream runs.

use super::chain::AudioEffect;
use crate::params::EqParams;
use std::f32::consts::PI;
use std::sync::Arc;

/// One peaking band of the realtime EQ
pub struct PeakingFilter {
    params: Arc<EqParams>,
    slot: usize,
    frequency: f32,
    q: f32,

    // Coefficients are rebuilt when the gain or sample rate changes
    applied_gain_db: f32,
    applied_sample_rate: u32,
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    // Filter state
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,

    name: String,
}

impl PeakingFilter {
    /// Create a band at `frequency` Hz whose gain follows `params[slot]`
    pub fn new(params: Arc<EqParams>, slot: usize, frequency: f32, q: f32) -> Self {
        Self {
            params,
            slot,
            frequency,
            q: q.max(0.01),
            applied_gain_db: f32::NAN,
            applied_sample_rate: 0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            name: format!("Peaking {frequency} Hz"),
        }
    }

    /// Center frequency in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// EQ slot this band reads
    pub fn slot(&self) -> usize {
        self.slot
    }

    fn update_coefficients(&mut self, gain_db: f32, sample_rate: u32) {
        self.applied_gain_db = gain_db;
        self.applied_sample_rate = sample_rate;

        if sample_rate == 0 || gain_db.abs() < 0.01 {
            self.b0 = 1.0;
            self.b1 = 0.0;
            self.b2 = 0.0;
            self.a1 = 0.0;
            self.a2 = 0.0;
            return;
        }

        let sample_rate = sample_rate as f32;
        let a = 10.0_f32.powf(gain_db / 40.0);
        // Keep clear of Nyquist
        let frequency = self.frequency.min(sample_rate * 0.45);
        let omega = 2.0 * PI * frequency / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * self.q);

        let b0 = 1.0 + alpha * a;
        let b1 = -2.0 * cos_omega;
        let b2 = 1.0 - alpha * a;
        let a0 = 1.0 + alpha / a;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha / a;

        // Normalize
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }
}

impl AudioEffect for PeakingFilter {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if sample_rate != self.applied_sample_rate && self.applied_sample_rate != 0 {
            self.reset();
        }
        let gain_db = self.params.get(self.slot);
        if gain_db != self.applied_gain_db || sample_rate != self.applied_sample_rate {
            self.update_coefficients(gain_db, sample_rate);
        }

        for sample in buffer.iter_mut() {
            let input = *sample;
            let mut output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
                - self.a1 * self.y1
                - self.a2 * self.y2;

            // Flush denormals
            if output.abs() < 1e-15 {
                output = 0.0;
            }

            self.x2 = self.x1;
            self.x1 = input;
            self.y2 = self.y1;
            self.y1 = output;
            *sample = output;
        }
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::tests::{generate_sine, settled_rms};

    fn band(db: f32, frequency: f32) -> (Arc<EqParams>, PeakingFilter) {
        let params = Arc::new(EqParams::new());
        params.set(0, db);
        let filter = PeakingFilter::new(Arc::clone(&params), 0, frequency, 1.0);
        (params, filter)
    }

    #[test]
    fn test_flat_band_is_transparent() {
        let (_, mut filter) = band(0.0, 1000.0);
        let input = generate_sine(440.0, 44100, 0.1);
        let mut buffer = input.clone();
        filter.process(&mut buffer, 44100);
        assert_eq!(buffer, input);
    }

    #[test]
    fn test_boost_at_center_frequency() {
        let (_, mut filter) = band(12.0, 1000.0);
        let mut buffer = generate_sine(1000.0, 44100, 0.5);
        let before = settled_rms(&buffer);
        filter.process(&mut buffer, 44100);
        let ratio = settled_rms(&buffer) / before;

        // +12 dB is roughly 3.98x
        assert!((ratio - 3.98).abs() < 0.2, "ratio was {ratio}");
    }

    #[test]
    fn test_cut_leaves_distant_frequencies() {
        let (_, mut filter) = band(-12.0, 60.0);
        let mut buffer = generate_sine(8000.0, 44100, 0.5);
        let before = settled_rms(&buffer);
        filter.process(&mut buffer, 44100);
        let ratio = settled_rms(&buffer) / before;
        assert!((ratio - 1.0).abs() < 0.05, "ratio was {ratio}");
    }

    #[test]
    fn test_follows_shared_gain() {
        let (params, mut filter) = band(0.0, 1000.0);
        let mut quiet = generate_sine(1000.0, 44100, 0.5);
        filter.process(&mut quiet, 44100);

        params.set(0, 12.0);
        filter.reset();
        let mut loud = generate_sine(1000.0, 44100, 0.5);
        filter.process(&mut loud, 44100);

        assert!(settled_rms(&loud) > 3.0 * settled_rms(&quiet));
    }

    #[test]
    fn test_output_stays_finite_near_nyquist() {
        let (_, mut filter) = band(12.0, 16000.0);
        let mut buffer = generate_sine(15000.0, 22050, 0.2);
        filter.process(&mut buffer, 22050);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
