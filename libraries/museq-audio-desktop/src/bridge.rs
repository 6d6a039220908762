//! Callback-side halves of the monitor path
//!
//! The input callback downmixes interleaved frames to mono, runs them
//! through the realtime graph and pushes the result into a lock-free ring.
//! The output callback pops from the same ring, clips to [-1, 1] and writes
//! each sample to every output channel. Neither side allocates or locks.

use museq_audio::RealtimeGraph;
use rtrb::{Consumer, Producer, RingBuffer};

/// Mono samples processed per graph call
pub const BLOCK_FRAMES: usize = 1024;

/// Average interleaved frames into `out`, returning the number of frames written
pub fn downmix(interleaved: &[f32], channels: usize, out: &mut [f32]) -> usize {
    let channels = channels.max(1);
    let mut written = 0;
    for (frame, slot) in interleaved.chunks_exact(channels).zip(out.iter_mut()) {
        *slot = frame.iter().sum::<f32>() / channels as f32;
        written += 1;
    }
    written
}

/// Producer half, owned by the input stream callback
pub struct InputStage {
    graph: RealtimeGraph,
    producer: Producer<f32>,
    channels: usize,
    scratch: Vec<f32>,
    dropped: u64,
}

impl InputStage {
    /// Process one callback's worth of interleaved input
    ///
    /// Returns the number of mono samples dropped because the ring was full.
    pub fn process(&mut self, interleaved: &[f32]) -> usize {
        let mut dropped = 0;
        for chunk in interleaved.chunks(BLOCK_FRAMES * self.channels) {
            let frames = downmix(chunk, self.channels, &mut self.scratch);
            let block = &mut self.scratch[..frames];
            self.graph.process(block);

            for sample in block.iter() {
                if self.producer.push(*sample).is_err() {
                    dropped += 1;
                }
            }
        }
        self.dropped += dropped as u64;
        dropped
    }

    /// Samples dropped since the stage was created
    pub fn total_dropped(&self) -> u64 {
        self.dropped
    }
}

/// Consumer half, owned by the output stream callback
pub struct OutputStage {
    consumer: Consumer<f32>,
    channels: usize,
    underruns: u64,
}

impl OutputStage {
    /// Fill one callback's worth of interleaved output
    ///
    /// Frames with no captured sample are written as silence; returns how many.
    pub fn fill(&mut self, interleaved: &mut [f32]) -> usize {
        let mut silent = 0;
        for frame in interleaved.chunks_mut(self.channels) {
            let sample = if let Ok(sample) = self.consumer.pop() {
                sample
            } else {
                silent += 1;
                0.0
            };
            frame.fill(sample.clamp(-1.0, 1.0));
        }
        self.underruns += silent as u64;
        silent
    }

    /// Silent frames written since the stage was created
    pub fn total_underruns(&self) -> u64 {
        self.underruns
    }
}

/// Connect a graph to an output through a ring of `capacity` mono samples
pub fn monitor_bridge(
    graph: RealtimeGraph,
    input_channels: usize,
    output_channels: usize,
    capacity: usize,
) -> (InputStage, OutputStage) {
    let (producer, consumer) = RingBuffer::<f32>::new(capacity.max(1));
    (
        InputStage {
            graph,
            producer,
            channels: input_channels.max(1),
            scratch: vec![0.0; BLOCK_FRAMES],
            dropped: 0,
        },
        OutputStage {
            consumer,
            channels: output_channels.max(1),
            underruns: 0,
        },
    )
}
