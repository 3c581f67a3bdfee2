//! Trigger-to-impulse converters.
//!
//! [`Click`] writes a single-sample impulse into an otherwise silent audio
//! buffer at every trigger frame and re-emits the trigger. In bipolar mode
//! successive impulses alternate `+1, -1, +1, ...`; in unipolar mode they
//! are all `+1`. [`Impulse`] is the same processor under a second name.

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    TriggerBuffer,
};

/// Default bipolar mode.
pub const DEFAULT_BIPOLAR: bool = true;

/// Port declaration of [`Click`] and [`Impulse`].
pub static CLICK_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::trigger("Trigger", "Emits an impulse per event"),
        PortDescriptor::bool(
            "Bi-Polar",
            "Alternate impulse polarity",
            DEFAULT_BIPOLAR,
        ),
    ],
    &[
        PortDescriptor::trigger("On Trigger", "Re-emitted input events"),
        PortDescriptor::audio("Impulse", "Single-sample impulses"),
    ],
);

/// Alternating impulse sign, starting positive.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Polarity {
    positive: bool,
}

impl Polarity {
    pub(crate) const fn new() -> Self {
        Self { positive: true }
    }

    /// Next impulse value. Only bipolar impulses advance the alternation.
    #[inline]
    pub(crate) fn next(&mut self, bipolar: bool) -> f32 {
        if !bipolar {
            return 1.0;
        }
        let value = if self.positive { 1.0 } else { -1.0 };
        self.positive = !self.positive;
        value
    }

    pub(crate) fn reset(&mut self) {
        self.positive = true;
    }
}

/// Trigger-to-impulse converter.
///
/// # Example
///
/// ```rust
/// use branches_core::{BlockConfig, TriggerBuffer};
/// use branches_nodes::Click;
///
/// let mut click = Click::new(&BlockConfig::new(48000.0, 6));
/// click.process(&TriggerBuffer::from_frames(6, [1, 4]), true);
///
/// assert_eq!(click.impulse(), &[0.0, 1.0, 0.0, 0.0, -1.0, 0.0]);
/// assert_eq!(click.on_trigger().frames(), &[1, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Click {
    polarity: Polarity,
    on_trigger: TriggerBuffer,
    impulse: Vec<f32>,
}

/// Alias registered as a separate node.
pub type Impulse = Click;

impl Click {
    /// Create a converter whose first bipolar impulse is positive.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            polarity: Polarity::new(),
            on_trigger: TriggerBuffer::new(config.block_size),
            impulse: vec![0.0; config.block_size],
        }
    }

    /// Render one block of impulses for `trigger`.
    pub fn process(&mut self, trigger: &TriggerBuffer, bipolar: bool) {
        self.on_trigger.advance_block();
        self.impulse.fill(0.0);
        for frame in trigger.iter() {
            if let Some(sample) = self.impulse.get_mut(frame) {
                *sample = self.polarity.next(bipolar);
                self.on_trigger.fire(frame);
            }
        }
    }

    /// Impulse buffer of the last block.
    pub fn impulse(&self) -> &[f32] {
        &self.impulse
    }

    /// Re-emitted events of the last block.
    pub fn on_trigger(&self) -> &TriggerBuffer {
        &self.on_trigger
    }
}

impl BlockProcessor for Click {
    fn signature(&self) -> &'static NodeSignature {
        &CLICK_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.trigger(0), inputs.bool(1, DEFAULT_BIPOLAR));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        match index {
            0 => Some(OutputRef::Trigger(&self.on_trigger)),
            1 => Some(OutputRef::Audio(&self.impulse)),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.polarity.reset();
        self.on_trigger.advance_block();
        self.impulse.fill(0.0);
    }
}
