//! Headless track-list demo
//!
//! Loads audio files into a `Studio` backed by the virtual media clock,
//! optionally mixes the last loaded track, runs play-all on a simulated
//! clock and exports the session.

use crate::config::AppConfig;
use anyhow::{bail, Context};
use museq_core::{Track, TrackId};
use museq_playback::{
    ExportReceipt, PlaybackEvent, Studio, UploadedFile, VirtualMediaBackend,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What to run
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Audio files to load
    pub files: Vec<PathBuf>,
    /// Simulated seconds to play before stopping
    pub seconds: f64,
    /// Simulated clock step
    pub step: Duration,
    /// Band gains applied to the last loaded track through the mixer
    pub bands: Vec<(usize, f32)>,
}

/// What happened
#[derive(Debug)]
pub struct DemoReport {
    pub tracks: Vec<Track>,
    pub finished: Vec<TrackId>,
    pub simulated: Duration,
    pub export: ExportReceipt,
}

pub fn run_demo(config: &AppConfig, options: &DemoOptions) -> anyhow::Result<DemoReport> {
    let mut uploads = Vec::with_capacity(options.files.len());
    for path in &options.files {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        uploads.push(UploadedFile::new(file_name, None, data));
    }
    if uploads.is_empty() {
        bail!("no input files");
    }

    let mut studio = Studio::new(config.studio.clone(), VirtualMediaBackend::new());
    let loaded = studio.upload(uploads);
    info!(count = loaded.len(), "Loaded tracks");

    if !options.bands.is_empty() {
        studio.open_mixer()?;
        for (index, db) in &options.bands {
            studio.change_band(*index, *db)?;
        }
        let mixed = studio.save_mixer()?;
        info!(track_id = %mixed.id, eq = ?mixed.mix.eq, "Saved mix");
    }

    let started = studio.play_all();
    if started == 0 {
        warn!("No track could be played");
    }

    let step = if options.step.is_zero() {
        Duration::from_millis(100)
    } else {
        options.step
    };
    let limit = Duration::from_secs_f64(options.seconds.max(0.0));
    let mut simulated = Duration::ZERO;
    let mut finished = Vec::new();

    while simulated < limit && studio.controller().is_play_all() {
        studio.tick(step);
        simulated += step;

        for event in studio.drain_events() {
            match event {
                PlaybackEvent::TrackFinished { track_id } => {
                    info!(track_id = %track_id, "Track finished");
                    finished.push(track_id);
                }
                PlaybackEvent::Error { track_id, message } => {
                    warn!(track_id = ?track_id, %message, "Playback error");
                }
                PlaybackEvent::PositionUpdate { .. } => {}
                other => debug!(event = ?other, "Playback event"),
            }
        }
    }

    for track in studio.registry().tracks() {
        if let Some(progress) = studio.progress(&track.id) {
            info!(
                track = %track.name,
                position = ?progress.position,
                duration = ?progress.duration,
                fraction = progress.fraction(),
                played_bar = ?progress.played_bar(track.waveform.len()),
                "Progress"
            );
        }
    }

    studio.stop_all();
    let export = studio.export_all()?;

    Ok(DemoReport {
        tracks: studio.registry().tracks().to_vec(),
        finished,
        simulated,
        export,
    })
}
