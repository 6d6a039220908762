//! CPAL microphone capture backend
//!
//! cpal streams are not `Send` on every platform, so a dedicated thread
//! builds both streams, owns them for their whole life and drops them when
//! told to shut down. The caller only holds a command channel and the
//! thread's join handle.

use crate::bridge::{monitor_bridge, InputStage, OutputStage};
use crate::error::{DesktopAudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{bounded, Receiver, Sender};
use museq_audio::{CaptureBackend, CaptureRequest, CaptureSession};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Commands sent to the capture thread
enum CaptureCommand {
    /// Drop both streams and exit
    Shutdown,
}

/// Capture backend on the host's default input and output devices
#[derive(Debug, Default)]
pub struct CpalCaptureBackend;

impl CpalCaptureBackend {
    /// Backend on `cpal::default_host()`; devices are opened on each start
    pub fn new() -> Self {
        Self
    }

    /// Whether the default host reports an input device at all
    pub fn has_input_device() -> bool {
        cpal::default_host().default_input_device().is_some()
    }
}

impl CaptureBackend for CpalCaptureBackend {
    fn start(&mut self, request: &CaptureRequest) -> museq_audio::Result<Box<dyn CaptureSession>> {
        let (command_tx, command_rx) = bounded::<CaptureCommand>(4);
        let (ready_tx, ready_rx) = bounded::<Result<u32>>(1);
        let request = request.clone();

        let thread = thread::Builder::new()
            .name("museq-capture".into())
            .spawn(move || capture_thread_run(&request, &ready_tx, &command_rx))
            .map_err(|e| DesktopAudioError::Thread(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(sample_rate)) => {
                info!(sample_rate, "Capture session started");
                Ok(Box::new(CpalCaptureSession {
                    command_tx,
                    thread: Some(thread),
                    sample_rate,
                }))
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e.into())
            }
            Err(_) => {
                let _ = thread.join();
                Err(DesktopAudioError::Thread("capture thread exited during setup".into()).into())
            }
        }
    }
}

/// A running capture session
pub struct CpalCaptureSession {
    command_tx: Sender<CaptureCommand>,
    thread: Option<JoinHandle<()>>,
    sample_rate: u32,
}

impl CaptureSession for CpalCaptureSession {
    fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // A closed channel also ends the thread's wait loop
            let _ = self.command_tx.send(CaptureCommand::Shutdown);
            if thread.join().is_err() {
                warn!("Capture thread panicked during shutdown");
            }
            info!("Capture session stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.thread.is_some()
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Drop for CpalCaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Both streams; dropping this stops audio
struct OpenStreams {
    _input: Stream,
    _output: Stream,
    sample_rate: u32,
}

fn capture_thread_run(
    request: &CaptureRequest,
    ready_tx: &Sender<Result<u32>>,
    command_rx: &Receiver<CaptureCommand>,
) {
    let streams = match open_streams(request) {
        Ok(streams) => streams,
        Err(e) => {
            warn!(error = %e, "Failed to open capture streams");
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    if ready_tx.send(Ok(streams.sample_rate)).is_err() {
        return;
    }

    while let Ok(command) = command_rx.recv() {
        match command {
            CaptureCommand::Shutdown => break,
        }
    }

    drop(streams);
    debug!("Capture thread exiting");
}

fn open_streams(request: &CaptureRequest) -> Result<OpenStreams> {
    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or(DesktopAudioError::NoInputDevice)?;
    let output_device = host
        .default_output_device()
        .ok_or(DesktopAudioError::NoOutputDevice)?;

    let input_supported = input_device.default_input_config()?;
    if input_supported.sample_format() != SampleFormat::F32 {
        return Err(DesktopAudioError::UnsupportedFormat(format!(
            "input {:?}",
            input_supported.sample_format()
        )));
    }
    let output_supported = output_device.default_output_config()?;
    if output_supported.sample_format() != SampleFormat::F32 {
        return Err(DesktopAudioError::UnsupportedFormat(format!(
            "output {:?}",
            output_supported.sample_format()
        )));
    }

    let sample_rate = input_supported.sample_rate();
    let input_config: StreamConfig = input_supported.config();
    // Monitor at the capture rate so no resampling is needed
    let output_config = StreamConfig {
        channels: output_supported.channels(),
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    debug!(
        sample_rate,
        input_channels = input_config.channels,
        output_channels = output_config.channels,
        "Opening capture streams"
    );

    let (input_stage, output_stage) = monitor_bridge(
        request.build_graph(sample_rate),
        input_config.channels as usize,
        output_config.channels as usize,
        request.config.ring_capacity(sample_rate),
    );

    let input = build_input(&input_device, &input_config, input_stage)?;
    let output = build_output(&output_device, &output_config, output_stage)?;

    output.play()?;
    input.play()?;

    Ok(OpenStreams {
        _input: input,
        _output: output,
        sample_rate,
    })
}

fn build_input(
    device: &cpal::Device,
    config: &StreamConfig,
    mut stage: InputStage,
) -> Result<Stream> {
    let stream = device.build_input_stream(
        config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            stage.process(data);
        },
        |err| warn!(error = %err, "Input stream error"),
        None,
    )?;
    Ok(stream)
}

fn build_output(
    device: &cpal::Device,
    config: &StreamConfig,
    mut stage: OutputStage,
) -> Result<Stream> {
    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            stage.fill(data);
        },
        |err| warn!(error = %err, "Output stream error"),
        None,
    )?;
    Ok(stream)
}
