//! Debounced edge and zero-crossing detectors.
//!
//! Both nodes scan an audio signal and emit trigger events at the frames
//! where a transition happens. A debounce time (seconds, clamped to
//! `[0.001, 5.0]`) suppresses further events for that long after each one.
//!
//! - [`Edge`] fires `Rise` when the signal starts moving up and `Fall` when
//!   it starts moving down.
//! - [`ZeroCrossing`] fires `Crossing` whenever the signal changes sign.
//!
//! The first block after construction or reset uses its own first sample
//! as the previous value, so a signal that starts away from zero does not
//! produce an edge at frame 0.

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, Direction, EdgeDetector, NodeSignature, OutputRef,
    PortDescriptor, TriggerBuffer, ZeroCrossingDetector,
};

/// Default debounce time in seconds.
pub const DEFAULT_DEBOUNCE_S: f32 = 0.01;

/// Port declaration of [`Edge`].
pub static EDGE_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal", "Audio signal to watch for direction changes"),
        PortDescriptor::float(
            "Debounce",
            "Minimum time between triggers in seconds",
            DEFAULT_DEBOUNCE_S,
        ),
    ],
    &[
        PortDescriptor::trigger("Rise", "Fires when the signal starts rising"),
        PortDescriptor::trigger("Fall", "Fires when the signal starts falling"),
    ],
);

/// Port declaration of [`ZeroCrossing`].
pub static ZERO_CROSSING_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("Signal", "Audio signal to watch for sign changes"),
        PortDescriptor::float(
            "Debounce",
            "Minimum time between triggers in seconds",
            DEFAULT_DEBOUNCE_S,
        ),
    ],
    &[PortDescriptor::trigger(
        "Crossing",
        "Fires when the signal crosses zero in either direction",
    )],
);

/// Rise/fall trigger generator.
///
/// ## Inputs
///
/// | Index | Name | Kind | Default |
/// |-------|------|------|---------|
/// | 0 | Signal | audio | silence |
/// | 1 | Debounce | float (s) | 0.01 |
///
/// ## Outputs
///
/// | Index | Name | Kind |
/// |-------|------|------|
/// | 0 | Rise | trigger |
/// | 1 | Fall | trigger |
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Edge;
///
/// let config = BlockConfig::new(1000.0, 8);
/// let mut edge = Edge::new(&config);
/// edge.process(&[0.0, 0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.0], 0.001);
///
/// assert_eq!(edge.rise().frames(), &[2]);
/// assert_eq!(edge.fall().frames(), &[4]);
/// ```
#[derive(Debug, Clone)]
pub struct Edge {
    sample_rate: f32,
    detector: EdgeDetector,
    rise: TriggerBuffer,
    fall: TriggerBuffer,
}

impl Edge {
    /// Create a detector for the host's block configuration.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            detector: EdgeDetector::new(),
            rise: TriggerBuffer::new(config.block_size),
            fall: TriggerBuffer::new(config.block_size),
        }
    }

    /// Scan one block of `signal`.
    pub fn process(&mut self, signal: &[f32], debounce_s: f32) {
        self.rise.advance_block();
        self.fall.advance_block();

        let (rise, fall) = (&mut self.rise, &mut self.fall);
        self.detector
            .process_block(signal, debounce_s, self.sample_rate, |frame, direction| {
                match direction {
                    Direction::Rising => rise.fire(frame),
                    Direction::Falling => fall.fire(frame),
                };
            });
    }

    /// Rise events of the last block.
    pub fn rise(&self) -> &TriggerBuffer {
        &self.rise
    }

    /// Fall events of the last block.
    pub fn fall(&self) -> &TriggerBuffer {
        &self.fall
    }
}

impl BlockProcessor for Edge {
    fn signature(&self) -> &'static NodeSignature {
        &EDGE_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0), inputs.float(1, DEFAULT_DEBOUNCE_S));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        match index {
            0 => Some(OutputRef::Trigger(&self.rise)),
            1 => Some(OutputRef::Trigger(&self.fall)),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.detector.reset();
        self.rise.advance_block();
        self.fall.advance_block();
    }
}

/// Zero-crossing trigger generator.
///
/// Upward crossings go from `<= 0` to `> 0`, downward crossings from
/// `>= 0` to `< 0`.
///
/// ## Inputs
///
/// | Index | Name | Kind | Default |
/// |-------|------|------|---------|
/// | 0 | Signal | audio | silence |
/// | 1 | Debounce | float (s) | 0.01 |
///
/// ## Outputs
///
/// | Index | Name | Kind |
/// |-------|------|------|
/// | 0 | Crossing | trigger |
#[derive(Debug, Clone)]
pub struct ZeroCrossing {
    sample_rate: f32,
    detector: ZeroCrossingDetector,
    crossing: TriggerBuffer,
}

impl ZeroCrossing {
    /// Create a detector for the host's block configuration.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            detector: ZeroCrossingDetector::new(),
            crossing: TriggerBuffer::new(config.block_size),
        }
    }

    /// Scan one block of `signal`.
    pub fn process(&mut self, signal: &[f32], debounce_s: f32) {
        self.crossing.advance_block();
        let crossing = &mut self.crossing;
        self.detector
            .process_block(signal, debounce_s, self.sample_rate, |frame, _| {
                crossing.fire(frame);
            });
    }

    /// Crossing events of the last block.
    pub fn crossing(&self) -> &TriggerBuffer {
        &self.crossing
    }
}

impl BlockProcessor for ZeroCrossing {
    fn signature(&self) -> &'static NodeSignature {
        &ZERO_CROSSING_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0), inputs.float(1, DEFAULT_DEBOUNCE_S));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Trigger(&self.crossing))
    }

    fn reset(&mut self) {
        self.detector.reset();
        self.crossing.advance_block();
    }
}
