//! Mathematical utility functions for node DSP.
//!
//! All functions are allocation-free and `no_std` compatible (`libm`).
//!
//! # Gain Laws
//!
//! | Function | Law | Centre gains |
//! |----------|-----|--------------|
//! | [`balance_gains`] | `(b + 1)·π/4` constant power | 0.707 / 0.707 |
//! | [`normalized_balance_gains`] | `b·π/4`, normalised | 1.0 / 0.0 |
//! | [`crossfade_gains`] | `t·π/2` constant power | 1.0 / 0.0 at t = 0 |
//!
//! # Time and Tuning
//!
//! - [`slew_coefficient`] - one-pole coefficient for a time constant
//! - [`debounce_samples`] - clamped debounce time in samples
//! - [`edo_frequency`] / [`tuned_frequency`] / [`pitch_class`]

use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use libm::{cosf, expf, exp2f, roundf, sinf, sqrtf};

/// Shortest debounce time in seconds.
pub const MIN_DEBOUNCE_S: f32 = 0.001;
/// Longest debounce time in seconds.
pub const MAX_DEBOUNCE_S: f32 = 5.0;

/// Flush denormal floats to zero.
///
/// Decaying feedback paths otherwise drift into subnormal range where
/// some CPUs slow down dramatically.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// One-pole smoothing coefficient `exp(-1 / (time_s * rate))`.
///
/// Returns 0 (no smoothing) when `time_s` or `rate` is not positive.
///
/// # Example
///
/// ```rust
/// use branches_core::slew_coefficient;
///
/// assert_eq!(slew_coefficient(0.0, 48000.0), 0.0);
/// let alpha = slew_coefficient(0.01, 48000.0);
/// assert!(alpha > 0.99 && alpha < 1.0);
/// ```
#[inline]
pub fn slew_coefficient(time_s: f32, rate: f32) -> f32 {
    if time_s > 0.0 && rate > 0.0 {
        expf(-1.0 / (time_s * rate))
    } else {
        0.0
    }
}

/// Debounce length in samples: `round(clamp(time_s, 0.001, 5.0) * rate)`.
///
/// A NaN time is treated as the shortest debounce.
#[inline]
pub fn debounce_samples(time_s: f32, rate: f32) -> u32 {
    let time_s = if time_s.is_nan() {
        MIN_DEBOUNCE_S
    } else {
        time_s.clamp(MIN_DEBOUNCE_S, MAX_DEBOUNCE_S)
    };
    let samples = roundf(time_s * rate);
    if samples > 0.0 { samples as u32 } else { 0 }
}

/// Constant-power balance gains `(left, right)`.
///
/// `angle = (clamp(balance, -1, 1) + 1) * π/4`, `left = cos(angle)`,
/// `right = sin(angle)`. Centre gives equal gains of `√2/2`.
#[inline]
pub fn balance_gains(balance: f32) -> (f32, f32) {
    let angle = (clamp_unit_bipolar(balance) + 1.0) * FRAC_PI_4;
    (cosf(angle), sinf(angle))
}

/// Normalised balance gains `(left, right)`.
///
/// `angle = clamp(balance, -1, 1) * π/4`; both gains are divided by
/// `sqrt(cos² + sin²)`. Centre leaves the left channel at unity and mutes
/// the right.
#[inline]
pub fn normalized_balance_gains(balance: f32) -> (f32, f32) {
    let angle = clamp_unit_bipolar(balance) * FRAC_PI_4;
    let (left, right) = (cosf(angle), sinf(angle));
    let norm = sqrtf(left * left + right * right);
    if norm > 0.0 {
        (left / norm, right / norm)
    } else {
        (left, right)
    }
}

/// Constant-power crossfade gains `(first, second)` for `t` in `[0, 1]`.
#[inline]
pub fn crossfade_gains(t: f32) -> (f32, f32) {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let angle = t * FRAC_PI_2;
    (cosf(angle), sinf(angle))
}

/// Mid/side width: `side` scaled by `clamp(width, 0, 2)`.
///
/// Width 1 is identity, width 0 collapses to mono.
#[inline]
pub fn widen(left: f32, right: f32, width: f32) -> (f32, f32) {
    let width = if width.is_nan() { 1.0 } else { width.clamp(0.0, 2.0) };
    let mid = 0.5 * (left + right);
    let side = 0.5 * (left - right) * width;
    (mid + side, mid - side)
}

/// Equal-division-of-the-octave frequency.
///
/// `reference_hz * 2^((note - reference_note) / divisions)`. Zero divisions
/// are treated as 1; negative divisions give a descending scale.
///
/// # Example
///
/// ```rust
/// use branches_core::edo_frequency;
///
/// assert!((edo_frequency(69, 440.0, 69, 12) - 440.0).abs() < 1e-3);
/// assert!((edo_frequency(81, 440.0, 69, 12) - 880.0).abs() < 1e-3);
/// ```
#[inline]
pub fn edo_frequency(note: i32, reference_hz: f32, reference_note: i32, divisions: i32) -> f32 {
    let divisions = if divisions == 0 { 1 } else { divisions };
    let steps = (note as f32 - reference_note as f32) / divisions as f32;
    reference_hz * exp2f(steps)
}

/// MIDI note with a semitone fine-tune and a cents offset, in Hz (A4 = 440).
///
/// `440 * 2^((note + fine + cents/100 - 69) / 12)`.
#[inline]
pub fn tuned_frequency(note: i32, fine_semitones: f32, cents: f32) -> f32 {
    let semitones = note as f32 + fine_semitones + cents / 100.0 - 69.0;
    440.0 * exp2f(semitones / 12.0)
}

/// Pitch class `0..12` of a MIDI note. Negative notes wrap upward.
#[inline]
pub fn pitch_class(note: i32) -> usize {
    note.rem_euclid(12) as usize
}

#[inline]
fn clamp_unit_bipolar(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn balance_endpoints() {
        let (l, r) = balance_gains(-1.0);
        assert!((l - 1.0).abs() < EPSILON && r.abs() < EPSILON);

        let (l, r) = balance_gains(0.0);
        let half = core::f32::consts::FRAC_1_SQRT_2;
        assert!((l - half).abs() < EPSILON && (r - half).abs() < EPSILON);

        let (l, r) = balance_gains(1.0);
        assert!(l.abs() < EPSILON && (r - 1.0).abs() < EPSILON);
    }

    #[test]
    fn balance_clamps() {
        assert_eq!(balance_gains(7.0), balance_gains(1.0));
        assert_eq!(balance_gains(-3.0), balance_gains(-1.0));
    }

    #[test]
    fn normalized_balance_has_unit_norm() {
        for b in [-1.0, -0.3, 0.0, 0.5, 1.0] {
            let (l, r) = normalized_balance_gains(b);
            assert!((l * l + r * r - 1.0).abs() < EPSILON);
        }
        let (l, r) = normalized_balance_gains(0.0);
        assert!((l - 1.0).abs() < EPSILON && r.abs() < EPSILON);
    }

    #[test]
    fn crossfade_endpoints() {
        let (a, b) = crossfade_gains(0.0);
        assert!((a - 1.0).abs() < EPSILON && b.abs() < EPSILON);
        let (a, b) = crossfade_gains(1.0);
        assert!(a.abs() < EPSILON && (b - 1.0).abs() < EPSILON);
        assert_eq!(crossfade_gains(2.0), crossfade_gains(1.0));
    }

    #[test]
    fn widen_identity_and_mono() {
        let (l, r) = widen(0.8, -0.2, 1.0);
        assert!((l - 0.8).abs() < EPSILON && (r + 0.2).abs() < EPSILON);
        let (l, r) = widen(0.8, -0.2, 0.0);
        assert!((l - 0.3).abs() < EPSILON && (r - 0.3).abs() < EPSILON);
    }

    #[test]
    fn slew_coefficient_zero_time_snaps() {
        assert_eq!(slew_coefficient(0.0, 48000.0), 0.0);
        assert_eq!(slew_coefficient(-1.0, 48000.0), 0.0);
        assert_eq!(slew_coefficient(0.1, 0.0), 0.0);
    }

    #[test]
    fn debounce_clamps() {
        assert_eq!(debounce_samples(0.0, 48000.0), 48);
        assert_eq!(debounce_samples(0.01, 48000.0), 480);
        assert_eq!(debounce_samples(60.0, 1000.0), 5000);
        assert_eq!(debounce_samples(f32::NAN, 1000.0), 1);
    }

    #[test]
    fn edo_octaves() {
        assert!((edo_frequency(69, 440.0, 69, 12) - 440.0).abs() < 1e-3);
        assert!((edo_frequency(81, 440.0, 69, 12) - 880.0).abs() < 1e-3);
        assert!((edo_frequency(57, 440.0, 69, 12) - 220.0).abs() < 1e-3);
        // 0 divisions is one step per octave
        assert!((edo_frequency(70, 440.0, 69, 0) - 880.0).abs() < 1e-3);
    }

    #[test]
    fn edo_negative_divisions_descend() {
        assert!((edo_frequency(81, 440.0, 69, -12) - 220.0).abs() < 1e-3);
        assert!((edo_frequency(57, 440.0, 69, -12) - 880.0).abs() < 1e-3);
        assert!((edo_frequency(70, 440.0, 69, -1) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn tuned_frequency_offsets() {
        assert!((tuned_frequency(69, 0.0, 0.0) - 440.0).abs() < 1e-3);
        assert!((tuned_frequency(69, 0.0, 1200.0) - 880.0).abs() < 1e-2);
        assert!((tuned_frequency(69, 12.0, 0.0) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn pitch_class_wraps_negative() {
        assert_eq!(pitch_class(60), 0);
        assert_eq!(pitch_class(71), 11);
        assert_eq!(pitch_class(-1), 11);
        assert_eq!(pitch_class(-12), 0);
    }

    #[test]
    fn flush_denormal_zeroes_tiny() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }
}
