//! Curve-based wave shaper
//!
//! Maps each sample through a lookup curve over [-1, 1] with linear
//! interpolation between points. Oversampling interpolates between
//! consecutive input samples, shapes every sub-sample and averages the
//! result back down. The curve saturates hard, so its values are clipped
//! to the [-1, 1] range a device output accepts.

use super::chain::AudioEffect;
use std::f32::consts::PI;

/// Hard-saturating distortion curve
///
/// `curve[i] = clamp(((3 + k) · x · 20 · π) / (π + k · |x|), -1, 1)` with
/// `x = 2i / n - 1`.
pub fn distortion_curve(amount: f32, points: usize) -> Vec<f32> {
    let points = points.max(2);
    (0..points)
        .map(|i| {
            let x = (i as f32 * 2.0) / points as f32 - 1.0;
            let y = ((3.0 + amount) * x * 20.0 * PI) / (PI + amount * x.abs());
            y.clamp(-1.0, 1.0)
        })
        .collect()
}

/// Wave shaper with an optional oversampling factor
pub struct WaveShaper {
    curve: Vec<f32>,
    oversample: u32,
    previous: f32,
}

impl WaveShaper {
    /// Shaper over an arbitrary curve
    ///
    /// `oversample` is clamped to at least 1.
    pub fn new(curve: Vec<f32>, oversample: u32) -> Self {
        Self {
            curve,
            oversample: oversample.max(1),
            previous: 0.0,
        }
    }

    /// Shaper over `distortion_curve(amount, points)`
    pub fn distortion(amount: f32, points: usize, oversample: u32) -> Self {
        Self::new(distortion_curve(amount, points), oversample)
    }

    /// Oversampling factor
    pub fn oversample(&self) -> u32 {
        self.oversample
    }

    /// Look one value up in the curve
    pub fn shape(&self, input: f32) -> f32 {
        let last = match self.curve.len() {
            0 => return input,
            1 => return self.curve[0],
            n => n - 1,
        };
        let position = (input.clamp(-1.0, 1.0) + 1.0) * 0.5 * last as f32;
        let index = (position.floor() as usize).min(last - 1);
        let frac = position - index as f32;
        self.curve[index] + (self.curve[index + 1] - self.curve[index]) * frac
    }
}

impl AudioEffect for WaveShaper {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        if self.oversample == 1 {
            for sample in buffer.iter_mut() {
                *sample = self.shape(*sample);
            }
            return;
        }

        let steps = self.oversample as f32;
        for sample in buffer.iter_mut() {
            let input = *sample;
            let mut acc = 0.0;
            for step in 1..=self.oversample {
                let t = step as f32 / steps;
                acc += self.shape(self.previous + (input - self.previous) * t);
            }
            self.previous = input;
            *sample = acc / steps;
        }
    }

    fn reset(&mut self) {
        self.previous = 0.0;
    }

    fn name(&self) -> &str {
        "Wave Shaper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_shape() {
        let curve = distortion_curve(20.0, 44100);
        assert_eq!(curve.len(), 44100);

        // Saturated at both ends, zero in the middle
        assert_eq!(curve[0], -1.0);
        assert_eq!(curve[44099], 1.0);
        assert!(curve[22050].abs() < 1e-6);
        assert!(curve.iter().all(|v| (-1.0..=1.0).contains(v)));

        // Monotonic
        assert!(curve.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_curve_is_steep_near_zero() {
        let curve = distortion_curve(50.0, 44100);
        // x = 0.01 is already well past unity before clipping
        let index = ((0.01 + 1.0) / 2.0 * 44100.0) as usize;
        assert_eq!(curve[index], 1.0);
        assert_eq!(curve[44100 - index], -1.0);

        // Without the drive the raw value at |x| = 1 would be about 62
        let raw = (53.0 * 20.0 * PI) / (PI + 50.0);
        assert!(raw > 60.0);
    }

    #[test]
    fn test_shape_interpolates_and_clamps() {
        let shaper = WaveShaper::new(vec![-1.0, 0.0, 1.0], 1);
        assert_eq!(shaper.shape(0.0), 0.0);
        assert!((shaper.shape(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(shaper.shape(4.0), 1.0);
        assert_eq!(shaper.shape(-4.0), -1.0);
    }

    #[test]
    fn test_silence_stays_near_zero() {
        // Zero lands between the two middle points of an even-length curve
        let mut shaper = WaveShaper::distortion(20.0, 44100, 4);
        let mut buffer = vec![0.0; 256];
        shaper.process(&mut buffer, 48000);
        assert!(buffer.iter().all(|s| s.abs() < 0.02));
    }

    #[test]
    fn test_full_scale_input_stays_in_range() {
        let mut shaper = WaveShaper::distortion(20.0, 44100, 4);
        let mut buffer: Vec<f32> = (0..512).map(|i| ((i as f32) * 0.3).sin() * 1.5).collect();
        shaper.process(&mut buffer, 48000);
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.0));

        let mut square = vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0];
        let mut plain = WaveShaper::distortion(20.0, 44100, 1);
        plain.process(&mut square, 48000);
        assert_eq!(square, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut shaper = WaveShaper::new(vec![-1.0, 1.0], 2);
        let mut buffer = vec![1.0];
        shaper.process(&mut buffer, 44100);
        // Half-way sub-sample from 0.0 plus the full sample
        assert!((buffer[0] - 0.75).abs() < 1e-6);

        shaper.reset();
        let mut buffer = vec![1.0];
        shaper.process(&mut buffer, 44100);
        assert!((buffer[0] - 0.75).abs() < 1e-6);
    }
}
