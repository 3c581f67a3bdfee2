//! Allpass phase dispersion.
//!
//! # Theory
//!
//! Each stage is a Schroeder allpass on a 2-sample delay with `g = 0.5`:
//!
//! ```text
//! H(z) = (-g + z^-2) / (1 - g·z^-2)
//! ```
//!
//! `|H| = 1` at every frequency, so a chain leaves the magnitude spectrum
//! untouched while its group delay varies with frequency (6 samples per
//! stage at DC and Nyquist, 2/3 of a sample at fs/4). Long chains smear
//! transients into chirps, the classic "laser" dispersion sound.
//!
//! The input is copied into a scratch buffer, run through the active
//! stages in place, then copied to the output. All storage is allocated at
//! construction.

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    AllpassStage, BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef,
    PortDescriptor,
};

/// Delay length of each stage in samples.
pub const STAGE_DELAY: usize = 2;
/// Feedback coefficient of each stage.
pub const STAGE_FEEDBACK: f32 = 0.5;
/// Largest number of stages [`PhaseDisperser`] runs.
pub const MAX_STAGES: usize = 128;
/// Default stage count of [`PhaseDisperser`].
pub const DEFAULT_STAGES: i32 = 8;
/// Stage count of [`PhaseDispersion`].
pub const DISPERSION_STAGES: usize = 10;

/// Port declaration of [`PhaseDisperser`].
pub static PHASE_DISPERSER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        PortDescriptor::audio("In", "Audio to disperse"),
        PortDescriptor::int("Stages", "Number of allpass stages, 1 to 128", DEFAULT_STAGES),
    ],
    &[PortDescriptor::audio("Out", "Phase-dispersed audio")],
);

/// Port declaration of [`PhaseDispersion`].
pub static PHASE_DISPERSION_SIGNATURE: NodeSignature = NodeSignature::new(
    &[PortDescriptor::audio("Signal", "Audio to disperse")],
    &[PortDescriptor::audio("Output", "Phase-dispersed audio")],
);

/// Allpass chain with a scratch buffer.
#[derive(Debug, Clone)]
struct Chain {
    stages: Vec<AllpassStage>,
    scratch: Vec<f32>,
    out: Vec<f32>,
}

impl Chain {
    fn new(config: &BlockConfig, stages: usize) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(stages, block_size = config.block_size, "allpass chain allocated");

        Self {
            stages: (0..stages)
                .map(|_| AllpassStage::new(STAGE_DELAY, STAGE_FEEDBACK))
                .collect(),
            scratch: vec![0.0; config.block_size],
            out: vec![0.0; config.block_size],
        }
    }

    fn process(&mut self, input: &[f32], active: usize) {
        debug_assert_eq!(input.len(), self.scratch.len());
        let len = input.len().min(self.scratch.len());
        let scratch = &mut self.scratch[..len];
        scratch.copy_from_slice(&input[..len]);
        for stage in self.stages.iter_mut().take(active) {
            stage.process_block_inplace(scratch);
        }
        self.out[..len].copy_from_slice(scratch);
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
        self.scratch.fill(0.0);
        self.out.fill(0.0);
    }
}

/// Variable-length allpass dispersion chain.
///
/// The `Stages` input is clamped to `[1, 128]` each block. Stages beyond the
/// active count keep their state untouched until they are used again.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::PhaseDisperser;
///
/// let mut disperser = PhaseDisperser::new(&BlockConfig::new(48000.0, 4));
/// disperser.process(&[1.0, 0.0, 0.0, 0.0], 1);
/// assert_eq!(disperser.out(), &[-0.5, 0.0, 0.75, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseDisperser {
    chain: Chain,
}

impl PhaseDisperser {
    /// Create a chain of [`MAX_STAGES`] stages.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            chain: Chain::new(config, MAX_STAGES),
        }
    }

    /// Process one block through `stages` stages.
    pub fn process(&mut self, input: &[f32], stages: i32) {
        let active = stages.clamp(1, MAX_STAGES as i32) as usize;
        self.chain.process(input, active);
    }

    /// Output of the last block.
    pub fn out(&self) -> &[f32] {
        &self.chain.out
    }
}

impl BlockProcessor for PhaseDisperser {
    fn signature(&self) -> &'static NodeSignature {
        &PHASE_DISPERSER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0), inputs.int(1, DEFAULT_STAGES));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.chain.out))
    }

    fn reset(&mut self) {
        self.chain.reset();
    }
}

/// Fixed ten-stage allpass dispersion chain.
#[derive(Debug, Clone)]
pub struct PhaseDispersion {
    chain: Chain,
}

impl PhaseDispersion {
    /// Create a chain of [`DISPERSION_STAGES`] stages.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            chain: Chain::new(config, DISPERSION_STAGES),
        }
    }

    /// Process one block.
    pub fn process(&mut self, input: &[f32]) {
        self.chain.process(input, DISPERSION_STAGES);
    }

    /// Output of the last block.
    pub fn out(&self) -> &[f32] {
        &self.chain.out
    }
}

impl BlockProcessor for PhaseDispersion {
    fn signature(&self) -> &'static NodeSignature {
        &PHASE_DISPERSION_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(inputs.audio(0));
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.chain.out))
    }

    fn reset(&mut self) {
        self.chain.reset();
    }
}
