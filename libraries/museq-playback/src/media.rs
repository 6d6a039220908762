//! Platform-agnostic media handle seam
//!
//! The controller never touches audio bytes. It asks a `MediaBackend` for one
//! `MediaHandle` per track and drives it through play/pause/seek/mute.
//! `VirtualMediaBackend` is the clock-driven implementation used by the
//! headless harness and by tests.

use crate::error::{PlaybackError, Result};
use museq_core::{SourceLocator, Track, TrackId};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Playable media for one track
///
/// Implementors either run their own clock (a platform player) or rely on
/// `advance` being called with the elapsed wall time.
pub trait MediaHandle: Send {
    /// Start or resume playback
    ///
    /// Starting a handle that already reached its end restarts it from zero.
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Whether the handle is currently playing
    fn is_playing(&self) -> bool;

    /// Current position
    fn position(&self) -> Duration;

    /// Total length, `None` until metadata is known
    fn duration(&self) -> Option<Duration>;

    /// Move to an absolute position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Silence or restore output without affecting transport
    fn set_muted(&mut self, muted: bool);

    /// Whether output is silenced
    fn is_muted(&self) -> bool;

    /// Whether playback reached the end naturally
    fn has_ended(&self) -> bool;

    /// Advance an externally clocked handle
    fn advance(&mut self, _elapsed: Duration) {}

    /// Release platform resources; the handle is not used afterwards
    fn release(&mut self) {}
}

/// Factory for media handles
pub trait MediaBackend: Send {
    /// Open playable media for a track
    fn open(&self, track: &Track) -> Result<Box<dyn MediaHandle>>;
}

/// Counters shared between a `VirtualMediaBackend` and its handles
#[derive(Debug, Default)]
struct MediaCounters {
    opened: AtomicUsize,
    released: AtomicUsize,
}

/// Snapshot of handle lifecycle counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaStats {
    /// Handles successfully opened
    pub opened: usize,
    /// Handles released
    pub released: usize,
}

impl MediaStats {
    /// Handles opened but not yet released
    pub fn live(&self) -> usize {
        self.opened.saturating_sub(self.released)
    }
}

/// Clock-driven backend with no audio output
///
/// Durations come from, in order: a per-track override, the WAV header of
/// the source, the default duration. Non-WAV sources without an override
/// stay unknown unless a default is set.
#[derive(Debug, Default)]
pub struct VirtualMediaBackend {
    default_duration: Option<Duration>,
    overrides: HashMap<TrackId, Duration>,
    failing: HashSet<TrackId>,
    fail_all: bool,
    reject_play: bool,
    counters: Arc<MediaCounters>,
}

impl VirtualMediaBackend {
    /// Create a backend with unknown default duration
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration reported for sources that cannot be probed
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = Some(duration);
        self
    }

    /// Fixed duration for one track
    #[must_use]
    pub fn with_duration(mut self, id: &TrackId, duration: Duration) -> Self {
        self.overrides.insert(id.clone(), duration);
        self
    }

    /// Make `open` fail for one track
    #[must_use]
    pub fn failing_for(mut self, id: &TrackId) -> Self {
        self.failing.insert(id.clone());
        self
    }

    /// Make every `open` fail
    #[must_use]
    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Make every `play` fail as if the platform blocked autoplay
    #[must_use]
    pub fn rejecting_play(mut self) -> Self {
        self.reject_play = true;
        self
    }

    /// Handle lifecycle counters
    pub fn stats(&self) -> MediaStats {
        MediaStats {
            opened: self.counters.opened.load(Ordering::SeqCst),
            released: self.counters.released.load(Ordering::SeqCst),
        }
    }

    /// Shareable view of the counters, usable after the backend was moved
    pub fn stats_handle(&self) -> MediaStatsHandle {
        MediaStatsHandle(Arc::clone(&self.counters))
    }

    fn resolve_duration(&self, track: &Track) -> Result<Option<Duration>> {
        if let Some(duration) = self.overrides.get(&track.id) {
            return Ok(Some(*duration));
        }
        match probe_duration(&track.source) {
            Ok(Some(duration)) => Ok(Some(duration)),
            Ok(None) => Ok(self.default_duration),
            Err(e) => Err(PlaybackError::media_load(&track.id, e.to_string())),
        }
    }
}

/// Read-only access to a backend's counters
#[derive(Debug, Clone)]
pub struct MediaStatsHandle(Arc<MediaCounters>);

impl MediaStatsHandle {
    /// Current counters
    pub fn get(&self) -> MediaStats {
        MediaStats {
            opened: self.0.opened.load(Ordering::SeqCst),
            released: self.0.released.load(Ordering::SeqCst),
        }
    }
}

impl MediaBackend for VirtualMediaBackend {
    fn open(&self, track: &Track) -> Result<Box<dyn MediaHandle>> {
        if self.fail_all || self.failing.contains(&track.id) {
            return Err(PlaybackError::media_load(&track.id, "source rejected by backend"));
        }

        let duration = self.resolve_duration(track)?;
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        debug!(track_id = %track.id, ?duration, "Opened virtual media");

        Ok(Box::new(VirtualMedia {
            duration,
            position: Duration::ZERO,
            playing: false,
            muted: false,
            ended: false,
            released: false,
            reject_play: self.reject_play,
            counters: Arc::clone(&self.counters),
        }))
    }
}

/// Clock-driven media handle
///
/// Position only moves through `advance`.
#[derive(Debug)]
pub struct VirtualMedia {
    duration: Option<Duration>,
    position: Duration,
    playing: bool,
    muted: bool,
    ended: bool,
    released: bool,
    reject_play: bool,
    counters: Arc<MediaCounters>,
}

impl VirtualMedia {
    /// Standalone handle with a known duration
    pub fn with_duration(duration: Option<Duration>) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
            playing: false,
            muted: false,
            ended: false,
            released: false,
            reject_play: false,
            counters: Arc::default(),
        }
    }
}

impl MediaHandle for VirtualMedia {
    fn play(&mut self) -> Result<()> {
        if self.released {
            return Err(PlaybackError::InvalidTransition("media handle already released".into()));
        }
        if self.reject_play {
            return Err(PlaybackError::PermissionDenied("playback not allowed".into()));
        }
        if self.ended {
            self.position = Duration::ZERO;
            self.ended = false;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        if self.released {
            return Err(PlaybackError::InvalidTransition("media handle already released".into()));
        }
        self.position = match self.duration {
            Some(d) => position.min(d),
            None => position,
        };
        self.ended = false;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position += elapsed;
        if let Some(d) = self.duration {
            if self.position >= d {
                self.position = d;
                self.playing = false;
                self.ended = true;
            }
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.playing = false;
            self.released = true;
            self.counters.released.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Duration of a WAV source, read from its header
///
/// Returns `Ok(None)` for sources that are not WAV.
pub fn probe_duration(source: &SourceLocator) -> Result<Option<Duration>> {
    match source {
        SourceLocator::Blob { data, mime_type } => {
            if !is_wav_mime(mime_type) && !data.starts_with(b"RIFF") {
                return Ok(None);
            }
            let reader = hound::WavReader::new(Cursor::new(data.as_slice()))?;
            Ok(Some(wav_length(&reader)))
        }
        SourceLocator::File(path) => {
            if !path.exists() {
                return Err(PlaybackError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} does not exist", path.display()),
                )));
            }
            if !has_wav_extension(path) {
                return Ok(None);
            }
            let reader = hound::WavReader::open(path)?;
            Ok(Some(wav_length(&reader)))
        }
    }
}

fn wav_length<R: std::io::Read>(reader: &hound::WavReader<R>) -> Duration {
    let sample_rate = reader.spec().sample_rate;
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(f64::from(reader.duration()) / f64::from(sample_rate))
}

fn is_wav_mime(mime_type: &str) -> bool {
    matches!(
        mime_type.split(';').next().map(str::trim),
        Some("audio/wav" | "audio/x-wav" | "audio/wave")
    )
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}
