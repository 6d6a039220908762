//! Capture backend tests against real devices
//!
//! Hardware-dependent tests are marked with `#[ignore]` and can be run with:
//! ```bash
//! cargo test -p museq-audio-desktop capture_hardware_test -- --ignored
//! ```

use museq_audio::{AudioError, RealtimeConfig, RealtimePipeline};
use museq_audio_desktop::CpalCaptureBackend;
use std::time::Duration;

#[test]
#[ignore = "requires a microphone and an output device"]
fn test_capture_session_starts_and_stops() {
    let mut pipeline =
        RealtimePipeline::new(CpalCaptureBackend::new(), RealtimeConfig::default()).unwrap();

    match pipeline.enable() {
        Ok(()) => {
            assert!(pipeline.is_enabled());
            assert!(pipeline.sample_rate().unwrap() > 0);
            pipeline.set_band(0, 6.0).unwrap();
            std::thread::sleep(Duration::from_millis(200));
            pipeline.disable();
            assert!(!pipeline.is_enabled());
        }
        Err(AudioError::PermissionDenied(_) | AudioError::DeviceUnavailable(_)) => {
            eprintln!("No usable audio devices, skipping");
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn test_failed_enable_leaves_no_session() {
    // Only meaningful on machines without a microphone
    let mut pipeline =
        RealtimePipeline::new(CpalCaptureBackend::new(), RealtimeConfig::default()).unwrap();
    if CpalCaptureBackend::has_input_device() {
        return;
    }
    assert!(pipeline.enable().is_err());
    assert!(!pipeline.is_enabled());
}
