//! First-order allpass stage for phase dispersion.
//!
//! A Schroeder allpass on a short circular delay. Chains of these smear
//! transients in time while leaving the magnitude response flat.

use alloc::vec;
use alloc::vec::Vec;

use crate::math::flush_denormal;

/// Schroeder allpass with a fixed-length circular delay.
///
/// Per sample:
///
/// ```text
/// out       = -g * in + delay[w]
/// delay[w]  = in + g * out
/// w         = (w + 1) mod D
/// ```
///
/// # Example
///
/// ```rust
/// use branches_core::AllpassStage;
///
/// let mut stage = AllpassStage::new(2, 0.5);
/// assert_eq!(stage.process(1.0), -0.5);
/// assert_eq!(stage.process(0.0), 0.0);
/// assert_eq!(stage.process(0.0), 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassStage {
    delay: Vec<f32>,
    write: usize,
    feedback: f32,
}

impl AllpassStage {
    /// Create a stage with a `delay_samples`-long delay (at least 1).
    ///
    /// Feedback is clamped to `[-0.99, 0.99]` for stability.
    pub fn new(delay_samples: usize, feedback: f32) -> Self {
        Self {
            delay: vec![0.0; delay_samples.max(1)],
            write: 0,
            feedback: feedback.clamp(-0.99, 0.99),
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay[self.write];
        let output = -self.feedback * input + delayed;
        self.delay[self.write] = flush_denormal(input + self.feedback * output);
        self.write += 1;
        if self.write == self.delay.len() {
            self.write = 0;
        }
        output
    }

    /// Process a buffer in place.
    #[inline]
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the delay and rewind the write index.
    pub fn clear(&mut self) {
        self.delay.fill(0.0);
        self.write = 0;
    }

    /// Feedback coefficient.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Delay length in samples.
    pub fn delay_len(&self) -> usize {
        self.delay.len()
    }
}
