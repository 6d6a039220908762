//! Integration tests for the studio session
//!
//! These tests verify real multi-track scenarios and workflows.
//! No shallow tests - every test verifies meaningful behavior.

use museq_core::waveform::{apply_eq, eq_gain};
use museq_core::{SourceLocator, TrackId};
use museq_playback::{
    MediaBackend, MediaHandle, PlayAllEndPolicy, PlaybackController, PlaybackError, PlaybackEvent,
    PlaybackState, Studio, StudioConfig, TrackRegistry, UploadedFile, VirtualMediaBackend,
};
use std::io::Cursor;
use std::time::Duration;

// ===== Test Helpers =====

/// Mono 16-bit WAV of the given length
fn wav_fixture(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..sample_rate * seconds {
            let t = i as f32 / sample_rate as f32;
            let sample = (t * 440.0 * std::f32::consts::TAU).sin() * 0.25;
            writer.write_sample((sample * f32::from(i16::MAX)) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn mp3_upload(name: &str) -> UploadedFile {
    UploadedFile::new(name, Some("audio/mpeg"), vec![0xFF, 0xFB, 0x90, 0x00])
}

fn studio_with(policy: PlayAllEndPolicy, backend: VirtualMediaBackend) -> Studio {
    let config = StudioConfig {
        play_all_end: policy,
        ..StudioConfig::default()
    };
    Studio::new(config, backend)
}

fn finished_ids(events: &[PlaybackEvent]) -> Vec<TrackId> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::TrackFinished { track_id } => Some(track_id.clone()),
            _ => None,
        })
        .collect()
}

// ===== Scenario =====

#[test]
fn test_upload_mix_and_save_scenario() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new());
    assert!(studio.registry().is_empty());

    let added = studio.upload(vec![mp3_upload("a.mp3")]);
    let track = &added[0];
    assert_eq!(track.name, "a.mp3");
    assert_eq!(track.waveform.len(), studio.config().bar_count);
    assert!(track.mix.eq.is_flat());
    assert_eq!(studio.registry().selected_id(), Some(&track.id));

    studio.open_mixer().unwrap();
    studio.change_band(0, 6.0).unwrap();
    assert!((studio.mixer().gain().unwrap() - 0.0625).abs() < 1e-6);

    let saved = studio.save_mixer().unwrap();
    assert_eq!(saved.mix.eq.get(0), Some(6.0));
    assert!(!studio.mixer().is_open());

    let stored = studio.registry().get(&track.id).unwrap();
    assert_eq!(stored.mix.eq.get(0), Some(6.0));
    assert!((eq_gain(&stored.mix.eq) - 0.0625).abs() < 1e-6);

    let processed = apply_eq(&stored.mix.eq, &stored.waveform);
    assert_eq!(processed.len(), stored.waveform.len());
}

#[test]
fn test_mixer_save_after_removal_is_not_found() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new());
    let id = studio.upload(vec![mp3_upload("a.mp3")])[0].id.clone();

    studio.open_mixer().unwrap();
    studio.change_band(3, -4.0).unwrap();
    studio.remove_track(&id).unwrap();

    let err = studio.save_mixer().unwrap_err();
    assert!(err.is_not_found());
    assert!(!studio.mixer().is_open());
}

#[test]
fn test_remove_playing_track_releases_media() {
    let backend = VirtualMediaBackend::new().with_default_duration(Duration::from_secs(60));
    let stats = backend.stats_handle();
    let mut studio = studio_with(PlayAllEndPolicy::default(), backend);

    let id = studio.upload(vec![mp3_upload("a.mp3")])[0].id.clone();
    studio.toggle_play(&id).unwrap();
    assert_eq!(stats.get().live(), 1);

    studio.remove_track(&id).unwrap();
    assert_eq!(stats.get().live(), 0);
    assert_eq!(studio.controller().now_playing(), None);
    assert_eq!(studio.registry().selected_id(), None);
    assert!(studio.progress(&id).is_none());

    // Removing again is a recoverable no-op
    assert!(studio.remove_track(&id).unwrap_err().is_not_found());
}

// ===== Durations =====

#[test]
fn test_wav_duration_is_probed() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new());
    let upload = UploadedFile::new("tone.wav", Some("audio/wav"), wav_fixture(8000, 4));
    let id = studio.upload(vec![upload])[0].id.clone();

    studio.toggle_play(&id).unwrap();
    let progress = studio.progress(&id).unwrap();
    assert_eq!(progress.duration, Some(Duration::from_secs(4)));

    studio.seek(&id, 0.5).unwrap();
    assert_eq!(studio.progress(&id).unwrap().position, Duration::from_secs(2));
}

#[test]
fn test_wav_file_on_disk_is_probed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("take.wav");
    std::fs::write(&path, wav_fixture(8000, 3)).unwrap();

    let mut registry = TrackRegistry::default();
    let track = registry.add_track("take.wav", SourceLocator::file(&path));
    let handle = VirtualMediaBackend::new().open(&track).unwrap();
    assert_eq!(handle.duration(), Some(Duration::from_secs(3)));
}

#[test]
fn test_unknown_duration_seek_is_noop() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new());
    let id = studio.upload(vec![mp3_upload("a.mp3")])[0].id.clone();

    studio.toggle_play(&id).unwrap();
    studio.tick(Duration::from_secs(3));
    studio.seek(&id, 0.9).unwrap();

    let progress = studio.progress(&id).unwrap();
    assert_eq!(progress.duration, None);
    assert_eq!(progress.position, Duration::from_secs(3));
}

// ===== Play-all =====

#[test]
fn test_play_all_skips_failed_media() {
    let mut registry = TrackRegistry::default();
    let good = registry.add_track("good.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let bad = registry.add_track("bad.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let backend = VirtualMediaBackend::new()
        .with_default_duration(Duration::from_secs(10))
        .failing_for(&bad.id);
    let mut controller = PlaybackController::new(backend, PlayAllEndPolicy::default());

    let started = controller.play_all(&registry);
    assert_eq!(started, 1);
    assert!(controller.is_play_all());
    assert!(controller.is_playing(&good.id));
    assert!(controller.progress(&bad.id).is_none());

    let events = controller.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::Error { track_id: Some(id), .. } if *id == bad.id
    )));

    // Seek on the failed track is a silent no-op
    controller.seek(&bad.id, 0.5).unwrap();
}

#[test]
fn test_play_all_seek_uses_each_duration() {
    let mut registry = TrackRegistry::default();
    let short = registry.add_track("short.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let long = registry.add_track("long.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let unknown = registry.add_track("unknown.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let backend = VirtualMediaBackend::new()
        .with_duration(&short.id, Duration::from_secs(10))
        .with_duration(&long.id, Duration::from_secs(100));
    let mut controller = PlaybackController::new(backend, PlayAllEndPolicy::default());

    controller.play_all(&registry);
    controller.seek(&short.id, 0.25).unwrap();

    assert_eq!(controller.progress(&short.id).unwrap().position, Duration::from_millis(2500));
    assert_eq!(controller.progress(&long.id).unwrap().position, Duration::from_secs(25));
    assert_eq!(controller.progress(&unknown.id).unwrap().position, Duration::ZERO);
}

#[test]
fn test_play_all_continue_others_policy() {
    let mut registry = TrackRegistry::default();
    let short = registry.add_track("short.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let long = registry.add_track("long.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let backend = VirtualMediaBackend::new()
        .with_duration(&short.id, Duration::from_secs(2))
        .with_duration(&long.id, Duration::from_secs(5));
    let mut controller = PlaybackController::new(backend, PlayAllEndPolicy::ContinueOthers);

    controller.play_all(&registry);
    controller.drain_events();

    controller.tick(Duration::from_secs(3));
    let events = controller.drain_events();
    assert_eq!(finished_ids(&events), vec![short.id.clone()]);
    assert!(controller.is_play_all());
    assert!(controller.is_playing(&long.id));
    assert_eq!(controller.now_playing(), None);

    controller.tick(Duration::from_secs(3));
    let events = controller.drain_events();
    assert_eq!(finished_ids(&events), vec![long.id.clone()]);
    assert!(!controller.is_play_all());
    assert!(events.contains(&PlaybackEvent::PlayAllChanged { active: false }));
}

#[test]
fn test_play_all_stop_all_policy() {
    let mut registry = TrackRegistry::default();
    let short = registry.add_track("short.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let long = registry.add_track("long.mp3", SourceLocator::blob(vec![], "audio/mpeg"));
    let backend = VirtualMediaBackend::new()
        .with_duration(&short.id, Duration::from_secs(2))
        .with_duration(&long.id, Duration::from_secs(5));
    let mut controller = PlaybackController::new(backend, PlayAllEndPolicy::StopAll);

    controller.play_all(&registry);
    controller.tick(Duration::from_secs(3));

    assert!(!controller.is_play_all());
    assert!(!controller.is_playing(&long.id));
    assert_eq!(controller.progress(&long.id).unwrap().position, Duration::from_secs(3));
}

#[test]
fn test_single_mode_end_clears_now_playing() {
    let mut studio = studio_with(
        PlayAllEndPolicy::default(),
        VirtualMediaBackend::new().with_default_duration(Duration::from_secs(1)),
    );
    let id = studio.upload(vec![mp3_upload("a.mp3")])[0].id.clone();

    studio.toggle_play(&id).unwrap();
    assert_eq!(studio.controller().now_playing(), Some(&id));

    studio.tick(Duration::from_millis(1500));
    assert_eq!(studio.controller().now_playing(), None);
    assert_eq!(finished_ids(&studio.drain_events()), vec![id.clone()]);

    // Playing again restarts from zero
    studio.toggle_play(&id).unwrap();
    assert_eq!(studio.progress(&id).unwrap().position, Duration::ZERO);
}

#[test]
fn test_toggle_play_does_not_stop_others() {
    let mut studio = studio_with(
        PlayAllEndPolicy::default(),
        VirtualMediaBackend::new().with_default_duration(Duration::from_secs(30)),
    );
    let added = studio.upload(vec![mp3_upload("a.mp3"), mp3_upload("b.mp3")]);
    let (a, b) = (added[0].id.clone(), added[1].id.clone());

    studio.toggle_play(&a).unwrap();
    studio.toggle_play(&b).unwrap();
    assert!(studio.controller().is_playing(&a));
    assert!(studio.controller().is_playing(&b));
    assert_eq!(studio.controller().now_playing(), Some(&b));

    // Pausing a track that is not the marker leaves the marker alone
    studio.toggle_play(&a).unwrap();
    assert_eq!(studio.controller().now_playing(), Some(&b));
}

// ===== Errors =====

#[test]
fn test_rejected_play_reports_permission() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new().rejecting_play());
    let id = studio.upload(vec![mp3_upload("a.mp3")])[0].id.clone();

    let err = studio.toggle_play(&id).unwrap_err();
    assert!(matches!(err, PlaybackError::PermissionDenied(_)));
    assert_eq!(studio.controller().now_playing(), None);
    assert_eq!(studio.progress(&id).unwrap().state(), PlaybackState::Idle);
}

#[test]
fn test_export_through_studio() {
    let mut studio = studio_with(PlayAllEndPolicy::default(), VirtualMediaBackend::new());
    let id = studio.upload(vec![mp3_upload("vocals.mp3")])[0].id.clone();
    studio.record(vec![1, 2, 3], "audio/webm");

    let single = studio.export_track(&id).unwrap();
    assert_eq!(single.file_name, "vocals.mp3");

    let mix = studio.export_all().unwrap();
    assert_eq!(mix.file_name, "museq-mixing.mp3");
    assert_eq!(mix.data, vec![0, 1, 2, 3]);
    assert_eq!(mix.track_names.len(), 2);

    assert!(studio.export_track(&TrackId::new("gone")).unwrap_err().is_not_found());
}
