//! Stochastic impulse generators.
//!
//! # Theory
//!
//! Dust emits sparse random impulses whose rate follows a density control.
//! Every sample draws `r` uniformly from `[0, 1)` and fires when
//!
//! ```text
//! density   = |modulation[n]| + offset
//! threshold = 1 - density · 0.0009
//! fire      = r > threshold
//! ```
//!
//! so the firing probability per sample is `density · 0.0009` (clamped to
//! `[0, 1]` by the comparison). At 48 kHz a density of 1 yields about 43
//! impulses per second.
//!
//! Each instance owns its random stream. [`Dust::new`] seeds it from the
//! wall clock (`std`) so instances differ; [`Dust::with_seed`] makes a
//! run reproducible. When disabled the output is silent and no numbers are
//! drawn, so a re-enabled generator continues the same sequence.

use alloc::vec;
use alloc::vec::Vec;

use branches_core::{
    BlockConfig, BlockInputs, BlockProcessor, NodeSignature, OutputRef, PortDescriptor,
    RandomStream, TriggerBuffer,
};

use crate::click::Polarity;

/// Firing probability per sample per unit density.
pub const DENSITY_SCALE: f32 = 0.0009;
/// Default density offset added to the modulation signal.
pub const DEFAULT_DENSITY: f32 = 0.1;
/// Default enabled state.
pub const DEFAULT_ENABLED: bool = true;
/// Default bipolar mode.
pub const DEFAULT_BIPOLAR: bool = true;

const MODULATION: PortDescriptor =
    PortDescriptor::audio("Modulation", "Density control signal, magnitude is used");
const DENSITY: PortDescriptor =
    PortDescriptor::float("Density", "Density offset added to the modulation", DEFAULT_DENSITY);
const ENABLED: PortDescriptor =
    PortDescriptor::bool("Enabled", "Enable generation", DEFAULT_ENABLED);

/// Port declaration of [`Dust`].
pub static DUST_SIGNATURE: NodeSignature = NodeSignature::new(
    &[
        MODULATION,
        DENSITY,
        ENABLED,
        PortDescriptor::bool("Bi-Polar", "Alternate impulse polarity", DEFAULT_BIPOLAR),
    ],
    &[PortDescriptor::audio("Impulse", "Random single-sample impulses")],
);

/// Port declaration of [`DustTrigger`].
pub static DUST_TRIGGER_SIGNATURE: NodeSignature = NodeSignature::new(
    &[MODULATION, DENSITY, ENABLED],
    &[PortDescriptor::trigger("Trigger", "Random trigger events")],
);

#[inline]
fn fires(rng: &mut RandomStream, modulation: f32, offset: f32) -> bool {
    let density = modulation.abs() + offset;
    let threshold = 1.0 - density * DENSITY_SCALE;
    rng.next_fraction() > threshold
}

/// Random impulse generator with audio output.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
/// use branches_nodes::Dust;
///
/// let config = BlockConfig::new(48000.0, 256);
/// let mut a = Dust::with_seed(&config, 42);
/// let mut b = Dust::with_seed(&config, 42);
/// let modulation = vec![50.0; 256];
/// a.process(&modulation, 0.1, true, true);
/// b.process(&modulation, 0.1, true, true);
/// assert_eq!(a.impulse(), b.impulse());
/// ```
#[derive(Debug, Clone)]
pub struct Dust {
    rng: RandomStream,
    polarity: Polarity,
    impulse: Vec<f32>,
}

impl Dust {
    /// Create a generator seeded from the clock.
    pub fn new(config: &BlockConfig) -> Self {
        Self::with_stream(config, RandomStream::unseeded())
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(config: &BlockConfig, seed: u64) -> Self {
        Self::with_stream(config, RandomStream::with_seed(seed))
    }

    fn with_stream(config: &BlockConfig, rng: RandomStream) -> Self {
        Self {
            rng,
            polarity: Polarity::new(),
            impulse: vec![0.0; config.block_size],
        }
    }

    /// Render one block.
    pub fn process(&mut self, modulation: &[f32], density: f32, enabled: bool, bipolar: bool) {
        if !enabled {
            self.impulse.fill(0.0);
            return;
        }
        debug_assert_eq!(modulation.len(), self.impulse.len());
        for (out, &m) in self.impulse.iter_mut().zip(modulation) {
            *out = if fires(&mut self.rng, m, density) {
                self.polarity.next(bipolar)
            } else {
                0.0
            };
        }
    }

    /// Impulse buffer of the last block.
    pub fn impulse(&self) -> &[f32] {
        &self.impulse
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl BlockProcessor for Dust {
    fn signature(&self) -> &'static NodeSignature {
        &DUST_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.float(1, DEFAULT_DENSITY),
            inputs.bool(2, DEFAULT_ENABLED),
            inputs.bool(3, DEFAULT_BIPOLAR),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Audio(&self.impulse))
    }

    fn reset(&mut self) {
        self.polarity.reset();
        self.impulse.fill(0.0);
    }
}

/// Random trigger generator.
#[derive(Debug, Clone)]
pub struct DustTrigger {
    rng: RandomStream,
    trigger: TriggerBuffer,
}

impl DustTrigger {
    /// Create a generator seeded from the clock.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            rng: RandomStream::unseeded(),
            trigger: TriggerBuffer::new(config.block_size),
        }
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(config: &BlockConfig, seed: u64) -> Self {
        Self {
            rng: RandomStream::with_seed(seed),
            trigger: TriggerBuffer::new(config.block_size),
        }
    }

    /// Render one block of events.
    pub fn process(&mut self, modulation: &[f32], density: f32, enabled: bool) {
        self.trigger.advance_block();
        if !enabled {
            return;
        }
        for (frame, &m) in modulation.iter().enumerate() {
            if fires(&mut self.rng, m, density) {
                self.trigger.fire(frame);
            }
        }
    }

    /// Events of the last block.
    pub fn trigger(&self) -> &TriggerBuffer {
        &self.trigger
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl BlockProcessor for DustTrigger {
    fn signature(&self) -> &'static NodeSignature {
        &DUST_TRIGGER_SIGNATURE
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.process(
            inputs.audio(0),
            inputs.float(1, DEFAULT_DENSITY),
            inputs.bool(2, DEFAULT_ENABLED),
        );
    }

    fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        (index == 0).then_some(OutputRef::Trigger(&self.trigger))
    }

    fn reset(&mut self) {
        self.trigger.advance_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BlockConfig {
        BlockConfig::new(48000.0, 512)
    }

    #[test]
    fn disabled_is_silent_and_draws_nothing() {
        let modulation = vec![1000.0; 512];
        let mut a = Dust::with_seed(&config(), 5);
        let mut b = Dust::with_seed(&config(), 5);

        a.process(&modulation, 0.1, false, true);
        assert!(a.impulse().iter().all(|&x| x == 0.0));

        // a skipped a disabled block; both streams are still in step
        a.process(&modulation, 0.1, true, true);
        b.process(&modulation, 0.1, true, true);
        assert_eq!(a.impulse(), b.impulse());
    }

    #[test]
    fn high_density_always_fires() {
        // density 2000 -> threshold -0.8, every draw exceeds it
        let mut dust = Dust::with_seed(&config(), 1);
        dust.process(&vec![0.0; 512], 2000.0, true, false);
        assert!(dust.impulse().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn zero_density_never_fires() {
        // threshold 1.0 is never exceeded by a draw in [0, 1)
        let mut dust = Dust::with_seed(&config(), 1);
        dust.process(&vec![0.0; 512], 0.0, true, true);
        assert!(dust.impulse().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn bipolar_impulses_alternate() {
        let mut dust = Dust::with_seed(&config(), 3);
        dust.process(&vec![500.0; 512], 0.0, true, true);
        let impulses: Vec<f32> = dust.impulse().iter().copied().filter(|&x| x != 0.0).collect();
        assert!(impulses.len() > 10);
        for (i, &x) in impulses.iter().enumerate() {
            assert_eq!(x, if i % 2 == 0 { 1.0 } else { -1.0 });
        }
    }

    #[test]
    fn trigger_variant_matches_audio_variant() {
        let modulation = vec![300.0; 512];
        let mut audio = Dust::with_seed(&config(), 77);
        let mut trigger = DustTrigger::with_seed(&config(), 77);
        audio.process(&modulation, 0.1, true, false);
        trigger.process(&modulation, 0.1, true);

        let audio_frames: Vec<usize> = audio
            .impulse()
            .iter()
            .enumerate()
            .filter_map(|(i, &x)| (x != 0.0).then_some(i))
            .collect();
        assert_eq!(trigger.trigger().frames(), audio_frames.as_slice());
    }

    #[test]
    fn seed_is_kept() {
        assert_eq!(Dust::with_seed(&config(), 9).seed(), 9);
        assert_eq!(DustTrigger::with_seed(&config(), 9).seed(), 9);
    }
}
