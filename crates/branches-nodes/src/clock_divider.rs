//! Eight-way clock divider.
//!
//! Counts input triggers modulo 8 and fires a fixed pattern of outputs for
//! each count. Output `n` fires on every trigger whose 1-based position in
//! the cycle is a multiple of `n`:
//!
//! | Count | Fired outputs |
//! |-------|---------------|
//! | 0 | 1 |
//! | 1 | 1, 2 |
//! | 2 | 1, 3 |
//! | 3 | 1, 2, 4 |
//! | 4 | 1, 5 |
//! | 5 | 1, 2, 3, 6 |
//! | 6 | 1, 7 |
//! | 7 | 1, 2, 4, 8 |
//!
//! The first trigger after construction or after a reset is count 0.
//! Reset and input events are handled in frame order; a reset on the same
//! frame as an input trigger is applied first.

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    TriggerBuffer,
};

/// Number of division outputs.
pub const DIVISIONS: usize = 8;

/// Output bitmask per count; bit `k` fires output `k + 1`.
const PATTERN: [u8; DIVISIONS] = [
    0b0000_0001,
    0b0000_0011,
    0b0000_0101,
    0b0000_1011,
    0b0001_0001,
    0b0010_0111,
    0b0100_0001,
    0b1000_1011,
];

/// Port declaration of [`ClockDivider`].
pub static CLOCK_DIVIDER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::trigger("Trigger", "Clock input"),
        PortDescriptor::trigger("Reset", "Restart the count"),
    ],
    &[
        PortDescriptor::trigger("1", "Every trigger"),
        PortDescriptor::trigger("2", "Every 2nd trigger"),
        PortDescriptor::trigger("3", "3rd and 6th trigger of the cycle"),
        PortDescriptor::trigger("4", "Every 4th trigger"),
        PortDescriptor::trigger("5", "5th trigger of the cycle"),
        PortDescriptor::trigger("6", "6th trigger of the cycle"),
        PortDescriptor::trigger("7", "7th trigger of the cycle"),
        PortDescriptor::trigger("8", "Every 8th trigger"),
    ],
);

/// Clock divider with eight trigger outputs.
///
/// # Example
///
/// ```rust
/// use branches_core::{BlockConfig, TriggerBuffer};
/// use branches_nodes::ClockDivider;
///
/// let config = BlockConfig::new(48000.0, 16);
/// let mut divider = ClockDivider::new(&config);
/// let clock = TriggerBuffer::from_frames(16, [0, 2, 4, 6]);
/// divider.process(&clock, &TriggerBuffer::new(16));
///
/// assert_eq!(divider.division(1).unwrap().frames(), &[0, 2, 4, 6]);
/// assert_eq!(divider.division(2).unwrap().frames(), &[2, 6]);
/// assert_eq!(divider.division(4).unwrap().frames(), &[6]);
/// ```
#[derive(Debug, Clone)]
pub struct ClockDivider {
    count: usize,
    outs: [TriggerBuffer; DIVISIONS],
}

impl ClockDivider {
    /// Create a divider at count 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            count: 0,
            outs: core::array::from_fn(|_| TriggerBuffer::new(config.block_size)),
        }
    }

    /// Process one block of clock and reset events.
    pub fn process(&mut self, trigger: &TriggerBuffer, reset: &TriggerBuffer) {
        for out in &mut self.outs {
            out.advance_block();
        }

        let mut resets = reset.iter().peekable();
        for frame in trigger.iter() {
            while resets.next_if(|&r| r <= frame).is_some() {
                self.count = 0;
            }
            self.fire(frame);
        }
        if resets.next().is_some() {
            self.count = 0;
        }
    }

    fn fire(&mut self, frame: usize) {
        let mask = PATTERN[self.count];
        for (bit, out) in self.outs.iter_mut().enumerate() {
            if mask & (1 << bit) != 0 {
                out.fire(frame);
            }
        }
        self.count = (self.count + 1) % DIVISIONS;
    }

    /// Output for division `n` (1 through 8).
    pub fn division(&self, n: usize) -> Option<&TriggerBuffer> {
        n.checked_sub(1).and_then(|index| self.outs.get(index))
    }

    /// Position in the cycle the next trigger will take.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl BlockProcessor for ClockDivider {
    fn signature(&self) -> &'static NodeSignature {
        &CLOCK_DIVIDER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.trigger(0), inputs.trigger(1));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.outs.get(index).map(OutputRef::Trigger)
    }

    fn reset(&mut self) {
        self.count = 0;
        for out in &mut self.outs {
            out.advance_block();
        }
    }
}
