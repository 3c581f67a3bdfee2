//! Asymmetric exponential slew limiter.
//!
//! One-pole smoothing toward a target with separate rise and fall time
//! constants. Used per sample by the audio slew nodes and once per block
//! by the scalar slew node.

use crate::math::{flush_denormal, slew_coefficient};

/// One-pole slew limiter with independent rise and fall coefficients.
///
/// `output = alpha * previous + (1 - alpha) * target`, where `alpha` is the
/// rise coefficient when the target is above the previous output and the
/// fall coefficient otherwise. A target equal to the previous output is
/// passed through. Coefficients of 0 snap straight to the target.
///
/// # Example
///
/// ```rust
/// use branches_core::Slew;
///
/// let mut slew = Slew::new();
/// slew.set_times(0.01, 0.0, 48000.0);
///
/// let first = slew.process(1.0);
/// assert!(first > 0.0 && first < 0.01);
///
/// // Zero fall time snaps down
/// assert_eq!(slew.process(0.0), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Slew {
    previous: f32,
    rise_alpha: f32,
    fall_alpha: f32,
}

impl Slew {
    /// Create a slew limiter at rest at 0 with no smoothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both coefficients from times in seconds at `rate` Hz.
    #[inline]
    pub fn set_times(&mut self, rise_s: f32, fall_s: f32, rate: f32) {
        self.rise_alpha = slew_coefficient(rise_s, rate);
        self.fall_alpha = slew_coefficient(fall_s, rate);
    }

    /// Advance one step toward `target`.
    #[inline]
    pub fn process(&mut self, target: f32) -> f32 {
        if target == self.previous {
            return target;
        }
        let alpha = if target > self.previous {
            self.rise_alpha
        } else {
            self.fall_alpha
        };
        let out = alpha * self.previous + (1.0 - alpha) * target;
        self.previous = flush_denormal(out);
        self.previous
    }

    /// Slew every sample of `input` into `output`.
    #[inline]
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        for (out, &target) in output.iter_mut().zip(input) {
            *out = self.process(target);
        }
    }

    /// Current output value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.previous
    }

    /// Rise coefficient.
    pub fn rise_alpha(&self) -> f32 {
        self.rise_alpha
    }

    /// Fall coefficient.
    pub fn fall_alpha(&self) -> f32 {
        self.fall_alpha
    }

    /// Return to rest at 0, keeping the coefficients.
    pub fn reset(&mut self) {
        self.previous = 0.0;
    }

    /// Jump to `value`, keeping the coefficients.
    pub fn reset_to(&mut self, value: f32) {
        self.previous = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_times_snap() {
        let mut slew = Slew::new();
        slew.set_times(0.0, 0.0, 48000.0);
        assert_eq!(slew.process(0.7), 0.7);
        assert_eq!(slew.process(-0.2), -0.2);
    }

    #[test]
    fn step_response_follows_time_constant() {
        let rate = 48000.0;
        let rise = 0.005;
        let mut slew = Slew::new();
        slew.set_times(rise, 0.0, rate);

        let mut out = 0.0;
        let n = 480;
        for _ in 0..n {
            out = slew.process(1.0);
        }
        let t = n as f32 / rate;
        let expected = 1.0 - libm::expf(-t / rise);
        assert!(
            (out - expected).abs() < 1e-3,
            "got {out}, expected {expected}"
        );
    }

    #[test]
    fn rise_and_fall_use_their_own_coefficients() {
        let mut slew = Slew::new();
        slew.set_times(0.01, 0.1, 1000.0);
        assert!(slew.rise_alpha() < slew.fall_alpha());

        slew.reset_to(1.0);
        let down = 1.0 - slew.process(0.0);
        slew.reset_to(0.0);
        let up = slew.process(1.0);
        assert!(up > down);
    }

    #[test]
    fn reset_keeps_coefficients() {
        let mut slew = Slew::new();
        slew.set_times(0.01, 0.01, 48000.0);
        slew.process(1.0);
        let alpha = slew.rise_alpha();
        slew.reset();
        assert_eq!(slew.value(), 0.0);
        assert_eq!(slew.rise_alpha(), alpha);
    }
}
