//! Eight-stage shift registers.
//!
//! On each qualifying trigger every stage takes the value of the stage
//! before it and stage 0 takes the current input. Between triggers the
//! stages hold, which turns a single random or pitch source into eight
//! delayed, stepped copies.
//!
//! - [`ShiftRegister`] runs at audio rate, clocked by an audio trigger
//!   crossing a threshold (`previous <= threshold && current > threshold`).
//! - [`TriggerShiftRegister`] is clocked by a trigger stream and shifts
//!   float values.

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    ThresholdCrossing, TriggerBuffer,
};

/// Number of stages.
pub const STAGES: usize = 8;

/// Default clock threshold of [`ShiftRegister`].
pub const DEFAULT_THRESHOLD: f32 = 0.0;

/// Port declaration of [`ShiftRegister`].
pub static SHIFT_REGISTER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal", "Signal shifted into stage 1"),
        PortDescriptor::audio("Trigger", "Shifts on a rising crossing"),
        PortDescriptor::float("Threshold", "Trigger level", DEFAULT_THRESHOLD),
    ],
    &[
        PortDescriptor::audio("Stage 1", "Most recent value"),
        PortDescriptor::audio("Stage 2", "Value one shift ago"),
        PortDescriptor::audio("Stage 3", "Value two shifts ago"),
        PortDescriptor::audio("Stage 4", "Value three shifts ago"),
        PortDescriptor::audio("Stage 5", "Value four shifts ago"),
        PortDescriptor::audio("Stage 6", "Value five shifts ago"),
        PortDescriptor::audio("Stage 7", "Value six shifts ago"),
        PortDescriptor::audio("Stage 8", "Value seven shifts ago"),
    ],
);

/// Port declaration of [`TriggerShiftRegister`].
pub static TRIGGER_SHIFT_REGISTER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::float("Value", "Value shifted into stage 1", 0.0),
        PortDescriptor::trigger("Trigger", "Shifts once per event"),
    ],
    &[
        PortDescriptor::trigger("On Trigger", "Re-emits each shift"),
        PortDescriptor::float_output("Stage 1", "Most recent value"),
        PortDescriptor::float_output("Stage 2", "Value one shift ago"),
        PortDescriptor::float_output("Stage 3", "Value two shifts ago"),
        PortDescriptor::float_output("Stage 4", "Value three shifts ago"),
        PortDescriptor::float_output("Stage 5", "Value four shifts ago"),
        PortDescriptor::float_output("Stage 6", "Value five shifts ago"),
        PortDescriptor::float_output("Stage 7", "Value six shifts ago"),
        PortDescriptor::float_output("Stage 8", "Value seven shifts ago"),
    ],
);

#[inline]
fn shift_in(stages: &mut [f32; STAGES], value: f32) {
    stages.copy_within(0..STAGES - 1, 1);
    stages[0] = value;
}

/// Audio-rate eight-stage shift register.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::ShiftRegister;
///
/// let mut reg = ShiftRegister::new(&BlockConfig::new(48000.0, 4));
/// reg.process(&[1.0, 2.0, 3.0, 4.0], &[1.0, 0.0, 1.0, 1.0], 0.0);
///
/// assert_eq!(reg.stage(0), Some(&[1.0, 1.0, 3.0, 3.0][..]));
/// assert_eq!(reg.stage(1), Some(&[0.0, 0.0, 1.0, 1.0][..]));
/// ```
#[derive(Debug, Clone)]
pub struct ShiftRegister {
    trigger: ThresholdCrossing,
    stages: [f32; STAGES],
    outs: [Vec<f32>; STAGES],
}

impl ShiftRegister {
    /// Create a register with all stages at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            trigger: ThresholdCrossing::new(),
            stages: [0.0; STAGES],
            outs: core::array::from_fn(|_| vec![0.0; config.block_size]),
        }
    }

    /// Process one block.
    pub fn process(&mut self, signal: &[f32], trigger: &[f32], threshold: f32) {
        debug_assert_eq!(signal.len(), trigger.len());
        let block = self.outs[0].len();
        for (frame, (&x, &t)) in signal.iter().zip(trigger).take(block).enumerate() {
            if self.trigger.exceeds(t, threshold) {
                shift_in(&mut self.stages, x);
            }
            for (out, &stage) in self.outs.iter_mut().zip(&self.stages) {
                out[frame] = stage;
            }
        }
    }

    /// Output buffer of `stage` (0-based).
    pub fn stage(&self, stage: usize) -> Option<&[f32]> {
        self.outs.get(stage).map(Vec::as_slice)
    }

    /// Current stage values.
    pub fn stages(&self) -> &[f32; STAGES] {
        &self.stages
    }
}

impl BlockProcessor for ShiftRegister {
    fn signature(&self) -> &'static NodeSignature {
        &SHIFT_REGISTER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.audio(1),
            inputs.float(2, DEFAULT_THRESHOLD),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.stage(index).map(OutputRef::Audio)
    }

    fn reset(&mut self) {
        self.trigger.reset();
        self.stages = [0.0; STAGES];
        for out in &mut self.outs {
            out.fill(0.0);
        }
    }
}

/// Trigger-clocked eight-stage shift register for float values.
///
/// Every event of the trigger stream shifts the block's `Value` in, so
/// several events in one block push the same value several times.
#[derive(Debug, Clone)]
pub struct TriggerShiftRegister {
    stages: [f32; STAGES],
    on_trigger: TriggerBuffer,
}

impl TriggerShiftRegister {
    /// Create a register with all stages at 0.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            stages: [0.0; STAGES],
            on_trigger: TriggerBuffer::new(config.block_size),
        }
    }

    /// Process one block.
    pub fn process(&mut self, value: f32, trigger: &TriggerBuffer) {
        self.on_trigger.advance_block();
        for frame in trigger.iter() {
            shift_in(&mut self.stages, value);
            self.on_trigger.fire(frame);
        }
    }

    /// Current stage values.
    pub fn stages(&self) -> &[f32; STAGES] {
        &self.stages
    }

    /// Shift events of the last block.
    pub fn on_trigger(&self) -> &TriggerBuffer {
        &self.on_trigger
    }
}

impl BlockProcessor for TriggerShiftRegister {
    fn signature(&self) -> &'static NodeSignature {
        &TRIGGER_SHIFT_REGISTER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.float(0, 0.0), inputs.trigger(1));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        match index {
            0 => Some(OutputRef::Trigger(&self.on_trigger)),
            n => self.stages.get(n - 1).copied().map(OutputRef::Float),
        }
    }

    fn reset(&mut self) {
        self.stages = [0.0; STAGES];
        self.on_trigger.advance_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_hold_between_triggers() {
        let mut reg = ShiftRegister::new(&BlockConfig::new(48000.0, 4));
        reg.process(&[5.0; 4], &[1.0; 4], 0.0);
        assert_eq!(reg.stages()[0], 5.0);
        reg.process(&[9.0; 4], &[1.0; 4], 0.0);
        assert_eq!(reg.stages()[0], 5.0);
        assert_eq!(reg.stages()[1], 0.0);
    }

    #[test]
    fn threshold_moves_the_clock_level() {
        let mut reg = ShiftRegister::new(&BlockConfig::new(48000.0, 4));
        reg.process(&[1.0, 2.0, 3.0, 4.0], &[0.3, 0.6, 0.3, 0.6], 0.5);
        assert_eq!(&reg.stages()[..3], &[4.0, 2.0, 0.0]);
    }

    #[test]
    fn over_length_input_is_truncated_to_block() {
        let mut reg = ShiftRegister::new(&BlockConfig::new(48000.0, 4));
        let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let trigger = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        reg.process(&signal, &trigger, 0.0);

        assert_eq!(reg.stage(0), Some(&[0.0, 2.0, 2.0, 4.0][..]));
        assert_eq!(reg.stage(1), Some(&[0.0, 0.0, 0.0, 2.0][..]));
        assert_eq!(&reg.stages()[..3], &[4.0, 2.0, 0.0]);
    }

    #[test]
    fn trigger_register_shifts_per_event() {
        let mut reg = TriggerShiftRegister::new(&BlockConfig::new(48000.0, 16));
        let triggers = TriggerBuffer::from_frames(16, [3, 9]);
        reg.process(0.25, &triggers);
        assert_eq!(&reg.stages()[..3], &[0.25, 0.25, 0.0]);
        assert_eq!(reg.on_trigger().frames(), &[3, 9]);

        reg.process(0.5, &TriggerBuffer::new(16));
        assert!(reg.on_trigger().is_empty());
        assert_eq!(reg.stages()[0], 0.25);
    }

    #[test]
    fn trigger_register_outputs() {
        let mut reg = TriggerShiftRegister::new(&BlockConfig::new(48000.0, 4));
        reg.process(1.5, &TriggerBuffer::from_frames(4, [0]));
        assert!(reg.output(0).and_then(|o| o.as_trigger()).is_some());
        assert_eq!(reg.output(1).and_then(|o| o.as_float()), Some(1.5));
        assert_eq!(reg.output(8).and_then(|o| o.as_float()), Some(0.0));
        assert!(reg.output(9).is_none());
    }
}
