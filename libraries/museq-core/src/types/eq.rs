//! Equalizer vector and the shared band table
//!
//! Every EQ surface (mixer panel, realtime graph, labels) uses the same eight
//! slots: seven peaking bands followed by an overall volume trim.

use crate::error::{MuseqError, Result};
use serde::{Deserialize, Serialize};

/// Number of slots in an EQ vector (7 bands + volume trim)
pub const EQ_SLOTS: usize = 8;

/// Number of frequency bands (slots 0..7)
pub const FILTER_BAND_COUNT: usize = 7;

/// Slot holding the overall volume trim in dB
pub const VOLUME_SLOT: usize = 7;

/// Slider range in dB (symmetric)
pub const EQ_DB_LIMIT: f32 = 12.0;

/// One entry of the shared EQ band table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqBand {
    /// Slot index in an `EqVector`
    pub index: usize,
    /// Display label
    pub label: &'static str,
    /// Center frequency in Hz (`None` for the volume trim)
    pub frequency_hz: Option<f32>,
}

impl EqBand {
    /// Frequency caption as shown under the slider ("60Hz", "1kHz", "dB")
    pub fn caption(&self) -> String {
        match self.frequency_hz {
            Some(hz) if hz >= 1000.0 => format!("{}kHz", hz / 1000.0),
            Some(hz) => format!("{}Hz", hz),
            None => "dB".to_string(),
        }
    }

    /// Whether this slot drives a peaking filter
    pub fn is_filter(&self) -> bool {
        self.frequency_hz.is_some()
    }
}

/// Shared band table
pub const EQ_BANDS: [EqBand; EQ_SLOTS] = [
    EqBand { index: 0, label: "SUB", frequency_hz: Some(60.0) },
    EqBand { index: 1, label: "BASS", frequency_hz: Some(120.0) },
    EqBand { index: 2, label: "LOW MID", frequency_hz: Some(250.0) },
    EqBand { index: 3, label: "MID", frequency_hz: Some(1000.0) },
    EqBand { index: 4, label: "HIGH MID", frequency_hz: Some(4000.0) },
    EqBand { index: 5, label: "TREBLE", frequency_hz: Some(8000.0) },
    EqBand { index: 6, label: "AIR", frequency_hz: Some(16000.0) },
    EqBand { index: VOLUME_SLOT, label: "VOLUME", frequency_hz: None },
];

/// Eight signed dB values, each kept within [-12, +12]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct EqVector([f32; EQ_SLOTS]);

impl EqVector {
    /// All slots at 0 dB
    pub fn flat() -> Self {
        Self([0.0; EQ_SLOTS])
    }

    /// Build from eight values, clamping each into range
    pub fn new(values: [f32; EQ_SLOTS]) -> Self {
        Self(values.map(clamp_db))
    }

    /// Build from a slice that must hold exactly eight values
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let values: [f32; EQ_SLOTS] = values.try_into().map_err(|_| {
            MuseqError::invalid_input(format!(
                "EQ vector needs {} values, got {}",
                EQ_SLOTS,
                values.len()
            ))
        })?;
        Ok(Self::new(values))
    }

    /// Value at a slot
    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// Replace a slot, clamped into range. Returns false for an out-of-range index.
    pub fn set(&mut self, index: usize, db: f32) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = clamp_db(db);
                true
            }
            None => false,
        }
    }

    /// Gains of the seven filter bands
    pub fn band_gains(&self) -> &[f32] {
        &self.0[..FILTER_BAND_COUNT]
    }

    /// Overall volume trim in dB
    pub fn volume_db(&self) -> f32 {
        self.0[VOLUME_SLOT]
    }

    /// All eight values
    pub fn as_array(&self) -> &[f32; EQ_SLOTS] {
        &self.0
    }

    /// Sum of all slots
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Whether every slot sits at 0 dB
    pub fn is_flat(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl TryFrom<Vec<f32>> for EqVector {
    type Error = MuseqError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

impl From<EqVector> for Vec<f32> {
    fn from(eq: EqVector) -> Self {
        eq.0.to_vec()
    }
}

/// Convert a dB value to a linear gain multiplier: `10^(dB/20)`
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

fn clamp_db(db: f32) -> f32 {
    if db.is_nan() {
        0.0
    } else {
        db.clamp(-EQ_DB_LIMIT, EQ_DB_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_table_is_ordered_by_index() {
        for (i, band) in EQ_BANDS.iter().enumerate() {
            assert_eq!(band.index, i);
        }
        assert_eq!(EQ_BANDS.iter().filter(|b| b.is_filter()).count(), FILTER_BAND_COUNT);
        assert!(!EQ_BANDS[VOLUME_SLOT].is_filter());
    }

    #[test]
    fn captions_match_panel_labels() {
        assert_eq!(EQ_BANDS[0].caption(), "60Hz");
        assert_eq!(EQ_BANDS[3].caption(), "1kHz");
        assert_eq!(EQ_BANDS[6].caption(), "16kHz");
        assert_eq!(EQ_BANDS[7].caption(), "dB");
    }

    #[test]
    fn set_clamps_to_slider_range() {
        let mut eq = EqVector::flat();
        assert!(eq.set(0, 30.0));
        assert!(eq.set(1, -30.0));
        assert_eq!(eq.get(0), Some(12.0));
        assert_eq!(eq.get(1), Some(-12.0));
        assert!(!eq.set(8, 1.0));
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(EqVector::from_slice(&[0.0; 7]).is_err());
        assert!(EqVector::from_slice(&[0.0; 9]).is_err());
        assert!(EqVector::from_slice(&[1.0; 8]).is_ok());
    }

    #[test]
    fn nan_is_treated_as_flat() {
        let mut eq = EqVector::flat();
        eq.set(2, f32::NAN);
        assert_eq!(eq.get(2), Some(0.0));
    }

    #[test]
    fn serde_round_trips_through_plain_list() {
        let eq = EqVector::new([6.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -3.0]);
        let json = serde_json::to_string(&eq).unwrap();
        assert_eq!(json, "[6.0,0.0,0.0,0.0,0.0,0.0,0.0,-3.0]");
        let back: EqVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eq);

        let short: std::result::Result<EqVector, _> = serde_json::from_str("[1.0, 2.0]");
        assert!(short.is_err());
    }

    #[test]
    fn db_conversion() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((db_to_linear(-6.0) - 0.501).abs() < 1e-3);
    }
}
