//! Ordered effect stages
//!
//! Every stage runs on every block, in insertion order, over mono f32
//! samples in place.

/// One processing stage of the realtime graph
///
/// Runs on the audio callback thread: `process` must not allocate or block.
pub trait AudioEffect: Send {
    /// Process mono audio in place
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32);

    /// Clear filter history (e.g. when the stream restarts)
    fn reset(&mut self);

    /// Stage name for logs and diagnostics
    fn name(&self) -> &str;
}

/// Stages run back to back over the same buffer
#[derive(Default)]
pub struct EffectChain {
    stages: Vec<Box<dyn AudioEffect>>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage after the existing ones
    pub fn push(&mut self, stage: Box<dyn AudioEffect>) {
        self.stages.push(stage);
    }

    /// Run every stage over `buffer`
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        for stage in &mut self.stages {
            stage.process(buffer, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Stage names in processing order
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl std::fmt::Debug for EffectChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f32);

    impl AudioEffect for Scale {
        fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
            for sample in buffer.iter_mut() {
                *sample *= self.0;
            }
        }

        fn reset(&mut self) {}

        fn name(&self) -> &str {
            "Scale"
        }
    }

    struct Offset(f32);

    impl AudioEffect for Offset {
        fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
            for sample in buffer.iter_mut() {
                *sample += self.0;
            }
        }

        fn reset(&mut self) {}

        fn name(&self) -> &str {
            "Offset"
        }
    }

    #[test]
    fn test_stages_run_in_insertion_order() {
        let mut chain = EffectChain::new();
        chain.push(Box::new(Scale(0.5)));
        chain.push(Box::new(Offset(1.0)));

        let mut buffer = vec![1.0; 8];
        chain.process(&mut buffer, 44100);
        // (1.0 * 0.5) + 1.0, not (1.0 + 1.0) * 0.5
        assert!(buffer.iter().all(|s| (*s - 1.5).abs() < 1e-6));
        assert_eq!(chain.names(), vec!["Scale", "Offset"]);
    }

    #[test]
    fn test_empty_chain_is_passthrough() {
        let mut chain = EffectChain::new();
        let mut buffer = vec![0.7; 4];
        chain.process(&mut buffer, 44100);
        assert_eq!(buffer, vec![0.7; 4]);
    }
}
