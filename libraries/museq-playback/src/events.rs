//! Playback Events
//!
//! Queued by the controller and drained by the caller. Events are emitted on:
//! - Transport changes of a single track (play/pause)
//! - Play-all starting or ending
//! - Natural end of a track
//! - Position updates on every tick while playing
//! - Media failures that were skipped instead of returned

use crate::types::PlaybackState;
use museq_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A track started or stopped
    StateChanged {
        /// Track whose handle changed
        track_id: TrackId,
        /// The new state
        state: PlaybackState,
    },

    /// Play-all was switched on or off
    PlayAllChanged {
        /// Whether play-all is now active
        active: bool,
    },

    /// Track reached its end
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Periodic position report for a playing track
    PositionUpdate {
        /// Track being reported
        track_id: TrackId,
        /// Current position
        position_ms: u64,
        /// Total duration, if known
        duration_ms: Option<u64>,
    },

    /// Mute flag mirrored onto a live handle
    MuteChanged {
        /// Track whose flag changed
        track_id: TrackId,
        /// New flag
        muted: bool,
    },

    /// Error that did not abort the operation
    Error {
        /// Track involved, if any
        track_id: Option<TrackId>,
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Track this event is about, if any
    pub fn track_id(&self) -> Option<&TrackId> {
        match self {
            Self::StateChanged { track_id, .. }
            | Self::TrackFinished { track_id }
            | Self::PositionUpdate { track_id, .. }
            | Self::MuteChanged { track_id, .. } => Some(track_id),
            Self::Error { track_id, .. } => track_id.as_ref(),
            Self::PlayAllChanged { .. } => None,
        }
    }
}
