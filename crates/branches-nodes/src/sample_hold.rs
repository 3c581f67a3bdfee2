//! Sample-and-hold nodes.
//!
//! A hold latches its signal input at the frame where its trigger input
//! rises to the threshold (`previous < threshold && current >= threshold`)
//! and outputs the latched value on every frame until the next crossing.
//! The held value and the previous trigger sample both start at 0.

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    ThresholdCrossing,
};

/// Default trigger threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.0;

/// Number of channels in a [`SahBank`].
pub const BANK_CHANNELS: usize = 4;

const THRESHOLD: PortDescriptor = PortDescriptor::float(
    "Threshold",
    "Trigger level that latches the signal",
    DEFAULT_THRESHOLD,
);

/// Port declaration of [`Sah`].
pub static SAH_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal", "Signal to sample"),
        PortDescriptor::audio("Trigger", "Latches the signal on a rising crossing"),
        THRESHOLD,
    ],
    &[PortDescriptor::audio("Output", "Held value")],
);

/// Port declaration of [`SahBank`].
pub static SAH_BANK_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal 1", "Signal to sample on channel 1"),
        PortDescriptor::audio("Trigger 1", "Trigger for channel 1"),
        PortDescriptor::audio("Signal 2", "Signal to sample on channel 2"),
        PortDescriptor::audio("Trigger 2", "Trigger for channel 2"),
        PortDescriptor::audio("Signal 3", "Signal to sample on channel 3"),
        PortDescriptor::audio("Trigger 3", "Trigger for channel 3"),
        PortDescriptor::audio("Signal 4", "Signal to sample on channel 4"),
        PortDescriptor::audio("Trigger 4", "Trigger for channel 4"),
        THRESHOLD,
    ],
    &[
        PortDescriptor::audio("Output 1", "Held value of channel 1"),
        PortDescriptor::audio("Output 2", "Held value of channel 2"),
        PortDescriptor::audio("Output 3", "Held value of channel 3"),
        PortDescriptor::audio("Output 4", "Held value of channel 4"),
    ],
);

/// One latch: crossing detector plus held value.
#[derive(Debug, Clone, Copy, Default)]
struct Hold {
    trigger: ThresholdCrossing,
    held: f32,
}

impl Hold {
    fn process(&mut self, signal: &[f32], trigger: &[f32], threshold: f32, out: &mut [f32]) {
        debug_assert_eq!(signal.len(), out.len());
        debug_assert_eq!(trigger.len(), out.len());
        for ((out, &x), &t) in out.iter_mut().zip(signal).zip(trigger) {
            if self.trigger.reaches(t, threshold) {
                self.held = x;
            }
            *out = self.held;
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single sample-and-hold.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Sah;
///
/// let mut sah = Sah::new(&BlockConfig::new(48000.0, 4));
/// sah.process(&[0.1, 0.2, 0.3, 0.4], &[0.0, 0.0, 1.0, 1.0], 0.5);
/// assert_eq!(sah.out(), &[0.0, 0.0, 0.3, 0.3]);
/// ```
#[derive(Debug, Clone)]
pub struct Sah {
    hold: Hold,
    out: Vec<f32>,
}

impl Sah {
    /// Create a hold at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            hold: Hold::default(),
            out: vec![0.0; config.block_size],
        }
    }

    /// Process one block.
    pub fn process(&mut self, signal: &[f32], trigger: &[f32], threshold: f32) {
        self.hold.process(signal, trigger, threshold, &mut self.out);
    }

    /// Output of the last block.
    pub fn out(&self) -> &[f32] {
        &self.out
    }

    /// Currently held value.
    pub fn held(&self) -> f32 {
        self.hold.held
    }
}

impl BlockProcessor for Sah {
    fn signature(&self) -> &'static NodeSignature {
        &SAH_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.audio(1),
            inputs.float(2, DEFAULT_THRESHOLD),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.out))
    }

    fn reset(&mut self) {
        self.hold.reset();
        self.out.fill(0.0);
    }
}

/// Four independent sample-and-holds sharing one threshold.
#[derive(Debug, Clone)]
pub struct SahBank {
    holds: [Hold; BANK_CHANNELS],
    outs: [Vec<f32>; BANK_CHANNELS],
}

impl SahBank {
    /// Create a bank with every hold at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            holds: [Hold::default(); BANK_CHANNELS],
            outs: core::array::from_fn(|_| vec![0.0; config.block_size]),
        }
    }

    /// Process one block; `channels[k]` is the `(signal, trigger)` pair of channel `k`.
    pub fn process(&mut self, channels: [(&[f32], &[f32]); BANK_CHANNELS], threshold: f32) {
        for ((hold, out), (signal, trigger)) in
            self.holds.iter_mut().zip(&mut self.outs).zip(channels)
        {
            hold.process(signal, trigger, threshold, out);
        }
    }

    /// Output of channel `channel` (0-based).
    pub fn out(&self, channel: usize) -> Option<&[f32]> {
        self.outs.get(channel).map(Vec::as_slice)
    }
}

impl BlockProcessor for SahBank {
    fn signature(&self) -> &'static NodeSignature {
        &SAH_BANK_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        let channels = core::array::from_fn(|k| (inputs.audio(2 * k), inputs.audio(2 * k + 1)));
        self.process(channels, inputs.float(2 * BANK_CHANNELS, DEFAULT_THRESHOLD));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out(index).map(OutputRef::Audio)
    }

    fn reset(&mut self) {
        for hold in &mut self.holds {
            hold.reset();
        }
        for out in &mut self.outs {
            out.fill(0.0);
        }
    }
}
