//! Stateless stereo geometry.
//!
//! Per-sample transforms on a left/right pair. Output buffers have the
//! block length; every control is a per-block scalar, clamped to its range.
//!
//! | Node | Control | Law |
//! |------|---------|-----|
//! | [`Balance`] | balance `[-1, 1]` | `θ = (b + 1)·π/4`, `L·cos θ`, `R·sin θ` |
//! | [`StereoBalance`] | balance `[-1, 1]` | `θ = b·π/4`, gains normalised |
//! | [`Width`] | width `[0, 2]` | mid/side, side scaled |
//! | [`CrossfadeStereo`] | crossfade `[0, 1]` | `cos`/`sin` of `t·π/2` between two pairs |
//! | [`StereoInverter`] | swap, invert L, invert R | swap first, then invert |
//! | [`StereoGain`] | linear gain | both channels scaled |

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    balance_gains, crossfade_gains, normalized_balance_gains, widen,
};

/// Default balance (centre).
pub const DEFAULT_BALANCE: f32 = 0.0;
/// Default width (unchanged image).
pub const DEFAULT_WIDTH: f32 = 1.0;
/// Default crossfade (first pair only).
pub const DEFAULT_CROSSFADE: f32 = 0.0;
/// Default linear gain.
pub const DEFAULT_GAIN: f32 = 1.0;

const IN_L: PortDescriptor = PortDescriptor::audio("In L", "Left channel");
const IN_R: PortDescriptor = PortDescriptor::audio("In R", "Right channel");
const OUT_L: PortDescriptor = PortDescriptor::audio("Out L", "Left output");
const OUT_R: PortDescriptor = PortDescriptor::audio("Out R", "Right output");
const BALANCE: PortDescriptor = PortDescriptor::float(
    "Balance",
    "-1 is full left, 1 is full right",
    DEFAULT_BALANCE,
);

/// Port declaration of [`Balance`].
pub static BALANCE_SIGNATURE: NodeSignature =
    NodeSignature::new(&[IN_L, IN_R, BALANCE], &[OUT_L, OUT_R]);

/// Port declaration of [`StereoBalance`].
pub static STEREO_BALANCE_SIGNATURE: NodeSignature =
    NodeSignature::new(&[IN_L, IN_R, BALANCE], &[OUT_L, OUT_R]);

/// Port declaration of [`Width`].
pub static WIDTH_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        IN_L,
        IN_R,
        PortDescriptor::float("Width", "0 is mono, 1 unchanged, 2 double side", DEFAULT_WIDTH),
    ],
    &[OUT_L, OUT_R],
);

/// Port declaration of [`CrossfadeStereo`].
pub static CROSSFADE_STEREO_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("In1 L", "Left channel of the first pair"),
        PortDescriptor::audio("In1 R", "Right channel of the first pair"),
        PortDescriptor::audio("In2 L", "Left channel of the second pair"),
        PortDescriptor::audio("In2 R", "Right channel of the second pair"),
        PortDescriptor::float(
            "Crossfade",
            "0 is the first pair, 1 the second",
            DEFAULT_CROSSFADE,
        ),
    ],
    &[OUT_L, OUT_R],
);

/// Port declaration of [`StereoInverter`].
pub static STEREO_INVERTER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        IN_L,
        IN_R,
        PortDescriptor::bool("Invert L", "Invert the left output", false),
        PortDescriptor::bool("Invert R", "Invert the right output", false),
        PortDescriptor::bool("Swap L/R", "Swap the channels", false),
    ],
    &[OUT_L, OUT_R],
);

/// Port declaration of [`StereoGain`].
pub static STEREO_GAIN_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        IN_L,
        IN_R,
        PortDescriptor::float("Gain", "Linear gain", DEFAULT_GAIN),
    ],
    &[OUT_L, OUT_R],
);

/// Left/right output storage shared by the stereo nodes.
#[derive(Debug, Clone)]
struct StereoOut {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl StereoOut {
    fn new(config: &BlockConfig) -> Self {
        Self {
            left: vec![0.0; config.block_size],
            right: vec![0.0; config.block_size],
        }
    }

    /// Write `f(l, r)` for every frame.
    #[inline]
    fn map(&mut self, left: &[f32], right: &[f32], f: impl Fn(f32, f32) -> (f32, f32)) {
        debug_assert_eq!(left.len(), self.left.len());
        debug_assert_eq!(right.len(), self.right.len());
        for ((out_l, out_r), (&l, &r)) in self
            .left
            .iter_mut()
            .zip(self.right.iter_mut())
            .zip(left.iter().zip(right))
        {
            (*out_l, *out_r) = f(l, r);
        }
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        match index {
            0 => Some(OutputRef::Audio(&self.left)),
            1 => Some(OutputRef::Audio(&self.right)),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }
}

macro_rules! stereo_accessors {
    ($node:ty) => {
        impl $node {
            /// Left output of the last block.
            pub fn left(&self) -> &[f32] {
                &self.out.left
            }

            /// Right output of the last block.
            pub fn right(&self) -> &[f32] {
                &self.out.right
            }
        }
    };
}

/// Constant-power balance.
///
/// Centre attenuates both channels to `√2/2`; the extremes pass one
/// channel at unity and mute the other.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Balance;
///
/// let mut balance = Balance::new(&BlockConfig::new(48000.0, 2));
/// balance.process(&[1.0, 1.0], &[1.0, 1.0], -1.0);
/// assert!((balance.left()[0] - 1.0).abs() < 1e-6);
/// assert!(balance.right()[0].abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Balance {
    out: StereoOut,
}

impl Balance {
    /// Create a balance node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block.
    pub fn process(&mut self, left: &[f32], right: &[f32], balance: f32) {
        let (gain_l, gain_r) = balance_gains(balance);
        self.out.map(left, right, |l, r| (l * gain_l, r * gain_r));
    }
}

stereo_accessors!(Balance);

impl BlockProcessor for Balance {
    fn signature(&self) -> &'static NodeSignature {
        &BALANCE_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.audio(1),
            inputs.float(2, DEFAULT_BALANCE),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}

/// Normalised balance.
///
/// Uses `θ = b·π/4` with both gains divided by their norm. At centre the
/// left channel passes at unity and the right is muted; at `b = 1` both
/// pass at `√2/2`.
#[derive(Debug, Clone)]
pub struct StereoBalance {
    out: StereoOut,
}

impl StereoBalance {
    /// Create a normalised balance node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block.
    pub fn process(&mut self, left: &[f32], right: &[f32], balance: f32) {
        let (gain_l, gain_r) = normalized_balance_gains(balance);
        self.out.map(left, right, |l, r| (l * gain_l, r * gain_r));
    }
}

stereo_accessors!(StereoBalance);

impl BlockProcessor for StereoBalance {
    fn signature(&self) -> &'static NodeSignature {
        &STEREO_BALANCE_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.audio(1),
            inputs.float(2, DEFAULT_BALANCE),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}

/// Mid/side stereo width.
#[derive(Debug, Clone)]
pub struct Width {
    out: StereoOut,
}

impl Width {
    /// Create a width node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block.
    pub fn process(&mut self, left: &[f32], right: &[f32], width: f32) {
        self.out.map(left, right, |l, r| widen(l, r, width));
    }
}

stereo_accessors!(Width);

impl BlockProcessor for Width {
    fn signature(&self) -> &'static NodeSignature {
        &WIDTH_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0), inputs.audio(1), inputs.float(2, DEFAULT_WIDTH));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}

/// Constant-power crossfade between two stereo pairs.
#[derive(Debug, Clone)]
pub struct CrossfadeStereo {
    out: StereoOut,
}

impl CrossfadeStereo {
    /// Create a crossfade node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block; `first` and `second` are `(left, right)` pairs.
    pub fn process(&mut self, first: (&[f32], &[f32]), second: (&[f32], &[f32]), crossfade: f32) {
        let (g1, g2) = crossfade_gains(crossfade);
        let (in1_l, in1_r) = first;
        let (in2_l, in2_r) = second;
        debug_assert_eq!(in2_l.len(), in1_l.len());
        debug_assert_eq!(in2_r.len(), in1_r.len());

        for (frame, (out_l, out_r)) in self
            .out
            .left
            .iter_mut()
            .zip(self.out.right.iter_mut())
            .enumerate()
        {
            let sample = |buffer: &[f32]| buffer.get(frame).copied().unwrap_or(0.0);
            *out_l = g1 * sample(in1_l) + g2 * sample(in2_l);
            *out_r = g1 * sample(in1_r) + g2 * sample(in2_r);
        }
    }
}

stereo_accessors!(CrossfadeStereo);

impl BlockProcessor for CrossfadeStereo {
    fn signature(&self) -> &'static NodeSignature {
        &CROSSFADE_STEREO_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            (inputs.audio(0), inputs.audio(1)),
            (inputs.audio(2), inputs.audio(3)),
            inputs.float(4, DEFAULT_CROSSFADE),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}

/// Channel swap and polarity inversion.
#[derive(Debug, Clone)]
pub struct StereoInverter {
    out: StereoOut,
}

impl StereoInverter {
    /// Create an inverter node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block. Swap is applied before inversion.
    pub fn process(
        &mut self,
        left: &[f32],
        right: &[f32],
        invert_left: bool,
        invert_right: bool,
        swap: bool,
    ) {
        let sign = |invert: bool| if invert { -1.0 } else { 1.0 };
        let (sign_l, sign_r) = (sign(invert_left), sign(invert_right));
        let (src_l, src_r) = if swap { (right, left) } else { (left, right) };
        self.out.map(src_l, src_r, |l, r| (l * sign_l, r * sign_r));
    }
}

stereo_accessors!(StereoInverter);

impl BlockProcessor for StereoInverter {
    fn signature(&self) -> &'static NodeSignature {
        &STEREO_INVERTER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.audio(1),
            inputs.bool(2, false),
            inputs.bool(3, false),
            inputs.bool(4, false),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}

/// Linear gain on both channels.
#[derive(Debug, Clone)]
pub struct StereoGain {
    out: StereoOut,
}

impl StereoGain {
    /// Create a gain node.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            out: StereoOut::new(config),
        }
    }

    /// Process one block.
    pub fn process(&mut self, left: &[f32], right: &[f32], gain: f32) {
        self.out.map(left, right, |l, r| (l * gain, r * gain));
    }
}

stereo_accessors!(StereoGain);

impl BlockProcessor for StereoGain {
    fn signature(&self) -> &'static NodeSignature {
        &STEREO_GAIN_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0), inputs.audio(1), inputs.float(2, DEFAULT_GAIN));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.out.output(index)
    }

    fn reset(&mut self) {
        self.out.clear();
    }
}
