//! Exponential slew limiters.
//!
//! # Theory
//!
//! A one-pole lowpass with separate time constants for rising and falling
//! input. With time constant `T` seconds at rate `fs`:
//!
//! ```text
//! alpha = exp(-1 / (T · fs))        (0 when T <= 0)
//! y[n]  = alpha · y[n-1] + (1 - alpha) · x[n]
//! ```
//!
//! A step from 0 to 1 reaches `1 - exp(-t/T)` after `t` seconds, so `T` is
//! the time to cover about 63% of the distance. Coefficients are
//! recomputed from the latest scalar inputs every block and never
//! interpolated; the filter state survives time-constant changes.
//!
//! Three front ends share the core [`Slew`](branches_core::Slew):
//!
//! - [`Slew`] smooths an audio buffer per sample
//! - [`SlewFloat`] smooths a float once per block
//! - [`BoolToAudio`] turns a bool into a smoothed 0/1 audio gate

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
};

/// Default rise and fall time in seconds (no smoothing).
pub const DEFAULT_SLEW_TIME_S: f32 = 0.0;

const RISE: PortDescriptor =
    PortDescriptor::float("Rise Time", "Rise time in seconds", DEFAULT_SLEW_TIME_S);
const FALL: PortDescriptor =
    PortDescriptor::float("Fall Time", "Fall time in seconds", DEFAULT_SLEW_TIME_S);

/// Port declaration of [`Slew`].
pub static SLEW_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal", "Audio signal to smooth"),
        RISE,
        FALL,
    ],
    &[PortDescriptor::audio("Output", "Slew-limited signal")],
);

/// Port declaration of [`SlewFloat`].
pub static SLEW_FLOAT_SIGNATURE: NodeSignature = NodeSignature::new(
    &[PortDescriptor::float("In", "Value to smooth", 0.0), RISE, FALL],
    &[PortDescriptor::float_output("Out", "Slew-limited value")],
);

/// Port declaration of [`BoolToAudio`].
pub static BOOL_TO_AUDIO_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::bool("Value", "Gate to convert to audio", false),
        RISE,
        FALL,
    ],
    &[PortDescriptor::audio("Out", "Smoothed 0/1 signal")],
);

/// Audio-rate slew limiter.
///
/// ## Inputs
///
/// | Index | Name | Kind | Default |
/// |-------|------|------|---------|
/// | 0 | Signal | audio | silence |
/// | 1 | Rise Time | float (s) | 0 |
/// | 2 | Fall Time | float (s) | 0 |
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Slew;
///
/// let mut slew = Slew::new(&BlockConfig::new(48000.0, 4));
/// slew.process(&[1.0; 4], 0.0, 0.0);
/// assert_eq!(slew.out(), &[1.0; 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Slew {
    sample_rate: f32,
    slew: branches_core::Slew,
    out: Vec<f32>,
}

impl Slew {
    /// Create a limiter at rest at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            slew: branches_core::Slew::new(),
            out: vec![0.0; config.block_size],
        }
    }

    /// Smooth one block of `signal`.
    pub fn process(&mut self, signal: &[f32], rise_s: f32, fall_s: f32) {
        debug_assert_eq!(signal.len(), self.out.len());
        self.slew.set_times(rise_s, fall_s, self.sample_rate);
        self.slew.process_block(signal, &mut self.out);
    }

    /// Output of the last block.
    pub fn out(&self) -> &[f32] {
        &self.out
    }
}

impl BlockProcessor for Slew {
    fn signature(&self) -> &'static NodeSignature {
        &SLEW_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.float(1, DEFAULT_SLEW_TIME_S),
            inputs.float(2, DEFAULT_SLEW_TIME_S),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.out))
    }

    fn reset(&mut self) {
        self.slew.reset();
        self.out.fill(0.0);
    }
}

/// Block-rate slew limiter for float controls.
///
/// Takes one step per block. The coefficient uses the configured sample
/// rate, so time constants are in units of `1 / sample_rate` blocks.
#[derive(Debug, Clone)]
pub struct SlewFloat {
    rate: f32,
    slew: branches_core::Slew,
    out: f32,
}

impl SlewFloat {
    /// Create a limiter at rest at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            rate: config.sample_rate,
            slew: branches_core::Slew::new(),
            out: 0.0,
        }
    }

    /// Take one step toward `value`.
    pub fn process(&mut self, value: f32, rise_s: f32, fall_s: f32) -> f32 {
        self.slew.set_times(rise_s, fall_s, self.rate);
        self.out = self.slew.process(value);
        self.out
    }

    /// Output of the last block.
    pub fn out(&self) -> f32 {
        self.out
    }
}

impl BlockProcessor for SlewFloat {
    fn signature(&self) -> &'static NodeSignature {
        &SLEW_FLOAT_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.float(0, 0.0),
            inputs.float(1, DEFAULT_SLEW_TIME_S),
            inputs.float(2, DEFAULT_SLEW_TIME_S),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Float(self.out))
    }

    fn reset(&mut self) {
        self.slew.reset();
        self.out = 0.0;
    }
}

/// Boolean to audio converter with slewed transitions.
///
/// `true` targets 1.0 and `false` targets 0.0 on every sample of the block.
#[derive(Debug, Clone)]
pub struct BoolToAudio {
    sample_rate: f32,
    slew: branches_core::Slew,
    out: Vec<f32>,
}

impl BoolToAudio {
    /// Create a converter at rest at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            slew: branches_core::Slew::new(),
            out: vec![0.0; config.block_size],
        }
    }

    /// Render one block toward the level of `value`.
    pub fn process(&mut self, value: bool, rise_s: f32, fall_s: f32) {
        let target = if value { 1.0 } else { 0.0 };
        self.slew.set_times(rise_s, fall_s, self.sample_rate);
        for out in &mut self.out {
            *out = self.slew.process(target);
        }
    }

    /// Output of the last block.
    pub fn out(&self) -> &[f32] {
        &self.out
    }
}

impl BlockProcessor for BoolToAudio {
    fn signature(&self) -> &'static NodeSignature {
        &BOOL_TO_AUDIO_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.bool(0, false),
            inputs.float(1, DEFAULT_SLEW_TIME_S),
            inputs.float(2, DEFAULT_SLEW_TIME_S),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.out))
    }

    fn reset(&mut self) {
        self.slew.reset();
        self.out.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_slew_snaps_with_zero_times() {
        let mut slew = Slew::new(&BlockConfig::new(48000.0, 4));
        slew.process(&[0.2, -0.4, 0.9, 0.0], 0.0, 0.0);
        assert_eq!(slew.out(), &[0.2, -0.4, 0.9, 0.0]);
    }

    #[test]
    fn audio_slew_carries_state_across_blocks() {
        let config = BlockConfig::new(1000.0, 4);
        let mut slew = Slew::new(&config);
        slew.process(&[1.0; 4], 0.01, 0.01);
        let end_of_first = slew.out()[3];
        slew.process(&[1.0; 4], 0.01, 0.01);
        assert!(slew.out()[0] > end_of_first);
    }

    #[test]
    fn float_slew_one_step_per_block() {
        let mut slew = SlewFloat::new(&BlockConfig::new(10.0, 256));
        let alpha = libm::expf(-1.0 / (1.0 * 10.0));
        let first = slew.process(1.0, 1.0, 1.0);
        assert!((first - (1.0 - alpha)).abs() < 1e-6);
        let second = slew.process(1.0, 1.0, 1.0);
        assert!((second - (1.0 - alpha * alpha)).abs() < 1e-6);
    }

    #[test]
    fn bool_to_audio_levels() {
        let mut node = BoolToAudio::new(&BlockConfig::new(48000.0, 8));
        node.process(true, 0.0, 0.0);
        assert_eq!(node.out(), &[1.0; 8]);
        node.process(false, 0.0, 0.0);
        assert_eq!(node.out(), &[0.0; 8]);
    }

    #[test]
    fn bool_to_audio_rises_monotonically() {
        let mut node = BoolToAudio::new(&BlockConfig::new(48000.0, 64));
        node.process(true, 0.001, 0.0);
        for pair in node.out().windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(node.out()[63] < 1.0);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut node = SlewFloat::new(&BlockConfig::default());
        node.process(5.0, 0.0, 0.0);
        node.reset();
        assert_eq!(node.out(), 0.0);
        assert_eq!(node.process(0.0, 1.0, 1.0), 0.0);
    }
}
