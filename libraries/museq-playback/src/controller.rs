//! Multi-track transport
//!
//! Owns one media handle per track (opened lazily on first play), the
//! now-playing marker and the play-all flag.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    media::{MediaBackend, MediaHandle},
    registry::TrackRegistry,
    types::{PlayAllEndPolicy, PlaybackState, TrackProgress},
};
use museq_core::{Track, TrackId, TrackPatch};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A live handle plus end-of-media bookkeeping
struct HandleSlot {
    handle: Box<dyn MediaHandle>,
    end_reported: bool,
}

/// Transport controller for every track in a registry
pub struct PlaybackController {
    backend: Box<dyn MediaBackend>,

    // Ordered by id so ticks and play-all report in a stable order
    handles: BTreeMap<TrackId, HandleSlot>,

    now_playing: Option<TrackId>,
    play_all: bool,
    end_policy: PlayAllEndPolicy,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller over a media backend
    pub fn new(backend: impl MediaBackend + 'static, end_policy: PlayAllEndPolicy) -> Self {
        Self {
            backend: Box::new(backend),
            handles: BTreeMap::new(),
            now_playing: None,
            play_all: false,
            end_policy,
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Play or pause one track
    ///
    /// Starting a track makes it the now-playing track without stopping any
    /// other handle.
    pub fn toggle_play(&mut self, registry: &TrackRegistry, id: &TrackId) -> Result<()> {
        let track = registry
            .get(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;

        let slot = match self.ensure_handle(track) {
            Ok(slot) => slot,
            Err(e) => {
                self.emit_error(Some(id), &e);
                return Err(e);
            }
        };

        if slot.handle.is_playing() {
            slot.handle.pause();
            if self.now_playing.as_ref() == Some(id) {
                self.now_playing = None;
            }
            debug!(track_id = %id, "Paused");
            self.emit_state_changed(id, PlaybackState::Idle);
            return Ok(());
        }

        if let Err(e) = slot.handle.play() {
            warn!(track_id = %id, error = %e, "Play rejected");
            self.emit_error(Some(id), &e);
            return Err(e);
        }
        slot.end_reported = false;
        self.now_playing = Some(id.clone());
        debug!(track_id = %id, "Playing");
        self.emit_state_changed(id, PlaybackState::Playing);
        Ok(())
    }

    /// Start every track together
    ///
    /// Tracks whose media fails to load or play are skipped and reported as
    /// `Error` events. Returns the number of tracks started.
    pub fn play_all(&mut self, registry: &TrackRegistry) -> usize {
        let mut started = 0;
        for track in registry.tracks() {
            let result = self.ensure_handle(track).and_then(|slot| {
                slot.handle.play()?;
                slot.end_reported = false;
                Ok(())
            });
            match result {
                Ok(()) => {
                    started += 1;
                    self.emit_state_changed(&track.id, PlaybackState::Playing);
                }
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "Skipping track in play-all");
                    self.emit_error(Some(&track.id), &e);
                }
            }
        }

        self.play_all = true;
        self.now_playing = None;
        info!(started, total = registry.len(), "Play-all started");
        self.pending_events.push(PlaybackEvent::PlayAllChanged { active: true });
        started
    }

    /// Pause every handle and leave play-all
    pub fn stop_all(&mut self) {
        let ids: Vec<TrackId> = self
            .handles
            .iter_mut()
            .filter(|(_, slot)| slot.handle.is_playing())
            .map(|(id, slot)| {
                slot.handle.pause();
                id.clone()
            })
            .collect();
        for id in &ids {
            self.emit_state_changed(id, PlaybackState::Idle);
        }

        self.now_playing = None;
        if self.play_all {
            self.play_all = false;
            self.pending_events.push(PlaybackEvent::PlayAllChanged { active: false });
        }
        info!(paused = ids.len(), "Stopped all tracks");
    }

    /// Seek by fraction of the duration
    ///
    /// During play-all every handle with a known duration seeks to the same
    /// fraction of its own length; otherwise only `id` seeks. Handles with an
    /// unknown duration, or a track without a handle, are left alone.
    pub fn seek(&mut self, id: &TrackId, fraction: f64) -> Result<()> {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };

        if self.play_all {
            let mut failures = Vec::new();
            for (track_id, slot) in &mut self.handles {
                if let Err(e) = seek_slot(slot, fraction) {
                    failures.push((track_id.clone(), e));
                }
            }
            for (track_id, e) in failures {
                warn!(track_id = %track_id, error = %e, "Seek failed during play-all");
                self.emit_error(Some(&track_id), &e);
            }
            return Ok(());
        }

        match self.handles.get_mut(id) {
            Some(slot) => seek_slot(slot, fraction),
            None => Ok(()),
        }
    }

    /// Flip a track's mute flag and mirror it onto its live handle
    ///
    /// Position and transport are untouched.
    pub fn toggle_mute(&mut self, registry: &mut TrackRegistry, id: &TrackId) -> Result<bool> {
        let muted = !registry
            .get(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?
            .muted;
        registry.update_track(id, &TrackPatch::muted(muted))?;

        if let Some(slot) = self.handles.get_mut(id) {
            slot.handle.set_muted(muted);
        }
        self.pending_events.push(PlaybackEvent::MuteChanged {
            track_id: id.clone(),
            muted,
        });
        Ok(muted)
    }

    /// Release a track's handle, then remove the track
    pub fn remove(&mut self, registry: &mut TrackRegistry, id: &TrackId) -> Result<Track> {
        if !registry.contains(id) {
            return Err(PlaybackError::TrackNotFound(id.clone()));
        }

        if let Some(mut slot) = self.handles.remove(id) {
            slot.handle.pause();
            slot.handle.release();
            debug!(track_id = %id, "Released media handle");
        }
        if self.now_playing.as_ref() == Some(id) {
            self.now_playing = None;
        }
        registry.remove_track(id)
    }

    // ===== Clock =====

    /// Advance handles by `elapsed` and detect natural ends
    pub fn tick(&mut self, elapsed: Duration) {
        let mut finished = Vec::new();

        for (id, slot) in &mut self.handles {
            slot.handle.advance(elapsed);

            if slot.handle.has_ended() && !slot.end_reported {
                slot.end_reported = true;
                finished.push(id.clone());
            } else if slot.handle.is_playing() {
                self.pending_events.push(PlaybackEvent::PositionUpdate {
                    track_id: id.clone(),
                    position_ms: duration_ms(slot.handle.position()),
                    duration_ms: slot.handle.duration().map(duration_ms),
                });
            }
        }

        for id in &finished {
            self.on_track_finished(id);
        }
    }

    fn on_track_finished(&mut self, id: &TrackId) {
        info!(track_id = %id, "Track finished");
        if self.now_playing.as_ref() == Some(id) {
            self.now_playing = None;
        }
        self.pending_events.push(PlaybackEvent::TrackFinished { track_id: id.clone() });

        if !self.play_all {
            return;
        }
        match self.end_policy {
            PlayAllEndPolicy::StopAll => self.stop_all(),
            PlayAllEndPolicy::ContinueOthers => {
                if !self.handles.values().any(|slot| slot.handle.is_playing()) {
                    self.play_all = false;
                    self.pending_events.push(PlaybackEvent::PlayAllChanged { active: false });
                }
            }
        }
    }

    // ===== State =====

    /// Position, duration and state of a track with a live handle
    pub fn progress(&self, id: &TrackId) -> Option<TrackProgress> {
        self.handles.get(id).map(|slot| TrackProgress {
            position: slot.handle.position(),
            duration: slot.handle.duration(),
            playing: slot.handle.is_playing(),
        })
    }

    /// Whether a track is currently playing
    pub fn is_playing(&self, id: &TrackId) -> bool {
        self.handles
            .get(id)
            .is_some_and(|slot| slot.handle.is_playing())
    }

    /// Whether a track's handle is muted
    pub fn is_muted(&self, id: &TrackId) -> Option<bool> {
        self.handles.get(id).map(|slot| slot.handle.is_muted())
    }

    /// Track started through `toggle_play`, if still playing
    pub fn now_playing(&self) -> Option<&TrackId> {
        self.now_playing.as_ref()
    }

    /// Whether play-all is active
    pub fn is_play_all(&self) -> bool {
        self.play_all
    }

    /// End-of-media policy in effect
    pub fn end_policy(&self) -> PlayAllEndPolicy {
        self.end_policy
    }

    /// Whether a track has a live handle
    pub fn has_handle(&self, id: &TrackId) -> bool {
        self.handles.contains_key(id)
    }

    /// Number of live handles
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self, id: &TrackId, state: PlaybackState) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            track_id: id.clone(),
            state,
        });
    }

    fn emit_error(&mut self, id: Option<&TrackId>, error: &PlaybackError) {
        self.pending_events.push(PlaybackEvent::Error {
            track_id: id.cloned(),
            message: error.to_string(),
        });
    }

    // ===== Handles =====

    fn ensure_handle(&mut self, track: &Track) -> Result<&mut HandleSlot> {
        match self.handles.entry(track.id.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut handle = self.backend.open(track)?;
                handle.set_muted(track.muted);
                Ok(entry.insert(HandleSlot {
                    handle,
                    end_reported: false,
                }))
            }
        }
    }

    /// Pause and release every handle
    pub fn release_all(&mut self) {
        for (id, mut slot) in std::mem::take(&mut self.handles) {
            slot.handle.pause();
            slot.handle.release();
            debug!(track_id = %id, "Released media handle");
        }
        self.now_playing = None;
        self.play_all = false;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("handles", &self.handles.keys().collect::<Vec<_>>())
            .field("now_playing", &self.now_playing)
            .field("play_all", &self.play_all)
            .field("end_policy", &self.end_policy)
            .finish_non_exhaustive()
    }
}

fn seek_slot(slot: &mut HandleSlot, fraction: f64) -> Result<()> {
    let Some(duration) = slot.handle.duration() else {
        return Ok(());
    };
    slot.handle.seek(duration.mul_f64(fraction))?;
    slot.end_reported = false;
    Ok(())
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
