//! Audio effects processing
//!
//! Trait-based effect chain for the realtime microphone path. All effects
//! operate on mono f32 samples in [-1.0, 1.0] range.
//!
//! Available effects:
//! - **PeakingFilter**: one RBJ peaking biquad whose gain follows a shared EQ slot
//! - **WaveShaper**: curve-based distortion with oversampling
//! - **OutputGain**: dB trim read from a shared EQ slot

mod chain;
mod gain;
mod peaking;
mod waveshaper;

pub use chain::{AudioEffect, EffectChain};
pub use gain::OutputGain;
pub use peaking::PeakingFilter;
pub use waveshaper::{distortion_curve, WaveShaper};
