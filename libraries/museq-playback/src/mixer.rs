//! Mixer session: edit a working EQ vector for the selected track
//!
//! Closed until opened on the current selection. Nothing reaches the
//! registry until `save`.

use crate::error::{PlaybackError, Result};
use crate::registry::TrackRegistry;
use museq_core::waveform::{apply_eq, eq_gain};
use museq_core::{EqVector, Track, TrackId, TrackPatch, EQ_SLOTS};
use tracing::{debug, info};

/// Mixer state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MixerState {
    /// No track being edited
    #[default]
    Closed,

    /// Editing one track
    Open {
        /// Track being edited
        track_id: TrackId,
        /// The track's waveform, kept for the "after EQ" view
        base_waveform: Vec<f32>,
        /// Unsaved EQ vector
        working: EqVector,
    },
}

/// Editing session for one track's EQ
#[derive(Debug, Clone, Default)]
pub struct MixerSession {
    state: MixerState,
}

impl MixerSession {
    /// Create a closed session
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on the selected track, copying its EQ
    ///
    /// Opening while already open re-targets to the current selection and
    /// discards unsaved edits.
    pub fn open(&mut self, registry: &TrackRegistry) -> Result<()> {
        let track = registry
            .selected_track()
            .ok_or_else(|| PlaybackError::InvalidTransition("no track selected".into()))?;

        debug!(track_id = %track.id, "Mixer opened");
        self.state = MixerState::Open {
            track_id: track.id.clone(),
            base_waveform: track.waveform.clone(),
            working: track.mix.eq,
        };
        Ok(())
    }

    /// Set one slot of the working vector, clamped to ±12 dB
    pub fn change_band(&mut self, index: usize, db: f32) -> Result<()> {
        let working = self.working_mut()?;
        if index >= EQ_SLOTS {
            return Err(PlaybackError::InvalidInput(format!(
                "band index {index} out of range 0..{EQ_SLOTS}"
            )));
        }
        working.set(index, db);
        Ok(())
    }

    /// Return one slot to 0 dB
    pub fn reset_band(&mut self, index: usize) -> Result<()> {
        self.change_band(index, 0.0)
    }

    /// Write the working vector to the track and close
    ///
    /// The session closes even when the track was removed in the meantime.
    pub fn save(&mut self, registry: &mut TrackRegistry) -> Result<Track> {
        let MixerState::Open { track_id, working, .. } = std::mem::take(&mut self.state) else {
            return Err(PlaybackError::InvalidTransition("mixer is not open".into()));
        };

        let track = registry.update_track(&track_id, &TrackPatch::eq(working))?;
        info!(track_id = %track_id, gain = eq_gain(&working), "Mix saved");
        Ok(track)
    }

    /// Close without writing
    pub fn cancel(&mut self) {
        if let MixerState::Open { track_id, .. } = &self.state {
            debug!(track_id = %track_id, "Mixer cancelled");
        }
        self.state = MixerState::Closed;
    }

    /// The base waveform scaled by the working EQ
    pub fn processed_waveform(&self) -> Option<Vec<f32>> {
        match &self.state {
            MixerState::Open {
                base_waveform,
                working,
                ..
            } => Some(apply_eq(working, base_waveform)),
            MixerState::Closed => None,
        }
    }

    /// Visual gain of the working EQ
    pub fn gain(&self) -> Option<f32> {
        self.working().map(eq_gain)
    }

    /// Unsaved EQ vector
    pub fn working(&self) -> Option<&EqVector> {
        match &self.state {
            MixerState::Open { working, .. } => Some(working),
            MixerState::Closed => None,
        }
    }

    /// Track being edited
    pub fn track_id(&self) -> Option<&TrackId> {
        match &self.state {
            MixerState::Open { track_id, .. } => Some(track_id),
            MixerState::Closed => None,
        }
    }

    /// Whether the session is open
    pub fn is_open(&self) -> bool {
        matches!(self.state, MixerState::Open { .. })
    }

    /// Current state
    pub fn state(&self) -> &MixerState {
        &self.state
    }

    fn working_mut(&mut self) -> Result<&mut EqVector> {
        match &mut self.state {
            MixerState::Open { working, .. } => Ok(working),
            MixerState::Closed => Err(PlaybackError::InvalidTransition("mixer is not open".into())),
        }
    }
}
