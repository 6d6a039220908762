//! Synthetic waveform bars and the EQ visual transform
//!
//! No audio is analysed here. Track waveforms are a fixed sine-sum
//! placeholder, and the "after EQ" view scales every bar by one gain
//! derived from the average EQ setting.

use crate::types::{EqVector, EQ_DB_LIMIT};

/// Bar count used by the track list and the realtime panel
pub const DEFAULT_BAR_COUNT: usize = 240;

/// Lower clamp applied to EQ-processed bars
pub const PROCESSED_MIN: f32 = 10.0;

/// Upper clamp applied to EQ-processed bars
pub const PROCESSED_MAX: f32 = 90.0;

/// Parameters of the sine-sum waveform
///
/// `v[i] = clamp(base + a·sin(i/p1) + b·sin(i/p2), lo, hi)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformShape {
    /// Resting bar height
    pub base: f32,
    /// Amplitude of the fast sine
    pub amplitude_a: f32,
    /// Amplitude of the slow sine
    pub amplitude_b: f32,
    /// Period divisor of the fast sine
    pub period_a: f32,
    /// Period divisor of the slow sine
    pub period_b: f32,
    /// Lower clamp
    pub min: f32,
    /// Upper clamp
    pub max: f32,
}

impl WaveformShape {
    /// The shape every panel uses
    pub const DEFAULT: Self = Self {
        base: 40.0,
        amplitude_a: 20.0,
        amplitude_b: 10.0,
        period_a: 4.0,
        period_b: 9.0,
        min: 15.0,
        max: 80.0,
    };

    /// Generate `bar_count` bars
    pub fn render(&self, bar_count: usize) -> Vec<f32> {
        (0..bar_count)
            .map(|i| {
                let x = i as f32;
                let wave = (x / self.period_a).sin() * self.amplitude_a
                    + (x / self.period_b).sin() * self.amplitude_b;
                (self.base + wave).clamp(self.min, self.max)
            })
            .collect()
    }
}

impl Default for WaveformShape {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Generate the placeholder waveform for `bar_count` bars
///
/// Deterministic: equal bar counts always yield equal sequences, with
/// every value in [15, 80].
pub fn synthesize(bar_count: usize) -> Vec<f32> {
    WaveformShape::DEFAULT.render(bar_count)
}

/// Global gain derived from an EQ vector
///
/// Average normalized deviation across the ±12 dB range:
/// `sum(eq) / (len · 12)`.
pub fn eq_gain(eq: &EqVector) -> f32 {
    let slots = eq.as_array().len() as f32;
    eq.sum() / (slots * EQ_DB_LIMIT)
}

/// Apply the EQ visual transform to a waveform
///
/// `processed[i] = clamp(w[i] · (1 + gain), 10, 90)`. Output length always
/// equals input length.
pub fn apply_eq(eq: &EqVector, waveform: &[f32]) -> Vec<f32> {
    let scale = 1.0 + eq_gain(eq);
    waveform
        .iter()
        .map(|v| (v * scale).clamp(PROCESSED_MIN, PROCESSED_MAX))
        .collect()
}

/// Index of the last "played" bar for a progress fraction
///
/// Bars `0..=index` are drawn in the played color. Returns `None` when
/// nothing should be highlighted (no duration yet, or no bars).
pub fn played_bar_index(bar_count: usize, position_secs: f64, duration_secs: f64) -> Option<usize> {
    if bar_count == 0 || duration_secs.is_nan() || duration_secs <= 0.0 {
        return None;
    }
    let fraction = (position_secs / duration_secs).clamp(0.0, 1.0);
    let index = (fraction * bar_count as f64).floor() as usize;
    Some(index.min(bar_count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_first_bars() {
        let bars = synthesize(4);
        assert_eq!(bars.len(), 4);
        // i = 0: 40 + 0 + 0
        assert!((bars[0] - 40.0).abs() < 1e-5);
        // i = 1: 40 + 20·sin(0.25) + 10·sin(1/9)
        let expected = 40.0 + 20.0 * 0.25_f32.sin() + 10.0 * (1.0_f32 / 9.0).sin();
        assert!((bars[1] - expected).abs() < 1e-4);
    }

    #[test]
    fn synthesize_empty() {
        assert!(synthesize(0).is_empty());
    }

    #[test]
    fn flat_eq_has_zero_gain() {
        assert_eq!(eq_gain(&EqVector::flat()), 0.0);
    }

    #[test]
    fn single_band_boost_gain() {
        let mut eq = EqVector::flat();
        eq.set(0, 6.0);
        assert!((eq_gain(&eq) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn full_boost_doubles_then_clamps() {
        let eq = EqVector::new([12.0; 8]);
        let out = apply_eq(&eq, &[20.0, 50.0]);
        assert_eq!(out, vec![40.0, 90.0]);
    }

    #[test]
    fn full_cut_floors_at_minimum() {
        let eq = EqVector::new([-12.0; 8]);
        let out = apply_eq(&eq, &[40.0, 80.0]);
        assert_eq!(out, vec![10.0, 10.0]);
    }

    #[test]
    fn played_bar_index_tracks_fraction() {
        assert_eq!(played_bar_index(240, 0.0, 0.0), None);
        assert_eq!(played_bar_index(240, 0.0, 10.0), Some(0));
        assert_eq!(played_bar_index(240, 5.0, 10.0), Some(120));
        assert_eq!(played_bar_index(240, 10.0, 10.0), Some(239));
        assert_eq!(played_bar_index(0, 1.0, 10.0), None);
    }
}
