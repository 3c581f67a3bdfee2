//! Frequency and tuning math nodes.
//!
//! - [`Edo`] maps a note number into an equal division of the octave.
//! - [`Tuning`] maps a MIDI note to Hz with a fine-tune offset and a cents
//!   offset per pitch class, for custom temperaments.
//!
//! Both compute once per block and output a float.

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    edo_frequency, pitch_class, tuned_frequency,
};

/// Default note number.
pub const DEFAULT_NOTE: i32 = 60;
/// Default reference frequency in Hz.
pub const DEFAULT_REFERENCE_HZ: f32 = 440.0;
/// Default reference MIDI note (A4).
pub const DEFAULT_REFERENCE_NOTE: i32 = 69;
/// Default octave divisions.
pub const DEFAULT_DIVISIONS: i32 = 12;

/// Port declaration of [`Edo`].
pub static EDO_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::int("Note Number", "Step number in the scale", DEFAULT_NOTE),
        PortDescriptor::float(
            "Reference Frequency",
            "Frequency of the reference note in Hz",
            DEFAULT_REFERENCE_HZ,
        ),
        PortDescriptor::int(
            "Reference MIDI Note",
            "Note number sounding at the reference frequency",
            DEFAULT_REFERENCE_NOTE,
        ),
        PortDescriptor::int("Divisions", "Steps per octave", DEFAULT_DIVISIONS),
    ],
    &[PortDescriptor::float_output("Frequency", "Frequency in Hz")],
);

/// Port declaration of [`Tuning`].
pub static TUNING_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::int("MIDI Note Number", "MIDI note to tune", DEFAULT_NOTE),
        PortDescriptor::float("Fine Tune", "Offset in semitones", 0.0),
        PortDescriptor::float("Cents 0", "Offset for C in cents", 0.0),
        PortDescriptor::float("Cents 1", "Offset for C#/Db in cents", 0.0),
        PortDescriptor::float("Cents 2", "Offset for D in cents", 0.0),
        PortDescriptor::float("Cents 3", "Offset for D#/Eb in cents", 0.0),
        PortDescriptor::float("Cents 4", "Offset for E in cents", 0.0),
        PortDescriptor::float("Cents 5", "Offset for F in cents", 0.0),
        PortDescriptor::float("Cents 6", "Offset for F#/Gb in cents", 0.0),
        PortDescriptor::float("Cents 7", "Offset for G in cents", 0.0),
        PortDescriptor::float("Cents 8", "Offset for G#/Ab in cents", 0.0),
        PortDescriptor::float("Cents 9", "Offset for A in cents", 0.0),
        PortDescriptor::float("Cents 10", "Offset for A#/Bb in cents", 0.0),
        PortDescriptor::float("Cents 11", "Offset for B in cents", 0.0),
    ],
    &[PortDescriptor::float_output("Frequency", "Frequency in Hz")],
);

/// Equal-division-of-the-octave frequency.
///
/// `freq = reference · 2^((note - reference_note) / divisions)`. Zero
/// divisions count as 1; negative divisions run the scale downward.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Edo;
///
/// let mut edo = Edo::new(&BlockConfig::default());
/// let hz = edo.process(81, 440.0, 69, 12);
/// assert!((hz - 880.0).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Edo {
    frequency: f32,
}

impl Edo {
    /// Create an EDO node.
    pub fn new(_config: &BlockConfig) -> Self {
        Self::default()
    }

    /// Compute the block's frequency.
    pub fn process(&mut self, note: i32, reference_hz: f32, reference_note: i32, divisions: i32) -> f32 {
        self.frequency = edo_frequency(note, reference_hz, reference_note, divisions);
        self.frequency
    }

    /// Frequency of the last block.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl BlockProcessor for Edo {
    fn signature(&self) -> &'static NodeSignature {
        &EDO_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.int(0, DEFAULT_NOTE),
            inputs.float(1, DEFAULT_REFERENCE_HZ),
            inputs.int(2, DEFAULT_REFERENCE_NOTE),
            inputs.int(3, DEFAULT_DIVISIONS),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Float(self.frequency))
    }

    fn reset(&mut self) {
        self.frequency = 0.0;
    }
}

/// Twelve-tone tuning table.
///
/// The cents offset of the note's pitch class (`note mod 12`, wrapping
/// negative notes upward) is added in the semitone domain:
/// `440 · 2^((note + fine + cents/100 - 69) / 12)`.
#[derive(Debug, Clone, Default)]
pub struct Tuning {
    frequency: f32,
}

impl Tuning {
    /// Create a tuning node.
    pub fn new(_config: &BlockConfig) -> Self {
        Self::default()
    }

    /// Compute the block's frequency from a note and a cents table.
    pub fn process(&mut self, note: i32, fine_semitones: f32, cents: &[f32; 12]) -> f32 {
        self.frequency = tuned_frequency(note, fine_semitones, cents[pitch_class(note)]);
        self.frequency
    }

    /// Frequency of the last block.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl BlockProcessor for Tuning {
    fn signature(&self) -> &'static NodeSignature {
        &TUNING_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        let cents: [f32; 12] = core::array::from_fn(|pc| inputs.float(2 + pc, 0.0));
        self.process(inputs.int(0, DEFAULT_NOTE), inputs.float(1, 0.0), &cents);
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Float(self.frequency))
    }

    fn reset(&mut self) {
        self.frequency = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branches_core::InputRef;

    #[test]
    fn edo_defaults_give_middle_c() {
        let mut edo = Edo::new(&BlockConfig::default());
        let silence = [0.0; 4];
        edo.execute(&BlockInputs::unbound(&silence));
        assert!((edo.frequency() - 261.6256).abs() < 1e-2);
    }

    #[test]
    fn edo_nineteen_divisions() {
        let mut edo = Edo::new(&BlockConfig::default());
        let hz = edo.process(69 + 19, 440.0, 69, 19);
        assert!((hz - 880.0).abs() < 1e-2);
    }

    #[test]
    fn edo_negative_divisions_run_downward() {
        let mut edo = Edo::new(&BlockConfig::default());
        let hz = edo.process(81, 440.0, 69, -12);
        assert!((hz - 220.0).abs() < 1e-2);
        assert_eq!(edo.frequency(), hz);
    }

    #[test]
    fn tuning_applies_matching_pitch_class() {
        let mut tuning = Tuning::new(&BlockConfig::default());
        let mut cents = [0.0; 12];
        cents[9] = 100.0; // A up a semitone
        let hz = tuning.process(69, 0.0, &cents);
        assert!((hz - 466.1638).abs() < 1e-2);
        // C is untouched
        let hz = tuning.process(60, 0.0, &cents);
        assert!((hz - 261.6256).abs() < 1e-2);
    }

    #[test]
    fn tuning_negative_notes_wrap() {
        let mut tuning = Tuning::new(&BlockConfig::default());
        let mut cents = [0.0; 12];
        cents[11] = -1200.0;
        let shifted = tuning.process(-1, 0.0, &cents);
        let plain = tuned_frequency(-13, 0.0, 0.0);
        assert!((shifted - plain).abs() < 1e-3);
    }

    #[test]
    fn tuning_execute_reads_cents_by_index() {
        let mut tuning = Tuning::new(&BlockConfig::default());
        let silence = [0.0; 4];
        let mut ports = [None; 14];
        ports[0] = Some(InputRef::Int(62));
        ports[1] = Some(InputRef::Float(0.5));
        ports[4] = Some(InputRef::Float(-50.0)); // Cents 2 (D)
        tuning.execute(&BlockInputs::new(&ports, &silence));
        assert!((tuning.frequency() - tuned_frequency(62, 0.0, 0.0)).abs() < 1e-3);
    }
}
