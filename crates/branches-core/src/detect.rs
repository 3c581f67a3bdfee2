//! Debounced event detection.
//!
//! - [`Debouncer`] - refractory counter with a cached sample length
//! - [`EdgeDetector`] - fires when the signal changes direction
//! - [`ZeroCrossingDetector`] - fires when the signal changes sign
//! - [`ThresholdCrossing`] - rising threshold test for sample-and-hold triggers
//!
//! Both debounced detectors count down first, then compare, so an event
//! reloads the counter and the next `samples` frames are suppressed.

use crate::math::debounce_samples;

/// Direction of a detected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Signal moved upward.
    Rising,
    /// Signal moved downward.
    Falling,
}

/// Refractory counter for debounced detectors.
///
/// The sample length is recomputed only when the debounce time or sample
/// rate differs from the last call to [`configure`](Self::configure).
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    samples: u32,
    counter: u32,
    cached: Option<(f32, f32)>,
}

impl Debouncer {
    /// Create an idle debouncer with no length configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce time in seconds at `rate` Hz.
    #[inline]
    pub fn configure(&mut self, time_s: f32, rate: f32) {
        if self.cached != Some((time_s, rate)) {
            self.samples = debounce_samples(time_s, rate);
            self.cached = Some((time_s, rate));
        }
    }

    /// Count down one sample.
    #[inline]
    pub fn tick(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }

    /// Whether an event may fire now.
    #[inline]
    pub fn ready(&self) -> bool {
        self.counter == 0
    }

    /// Start the refractory period after an event.
    #[inline]
    pub fn arm(&mut self) {
        self.counter = self.samples;
    }

    /// Configured length in samples.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Clear the countdown; the cached length is kept.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Debounced direction-change detector.
///
/// A rise fires when the signal starts moving up after moving down (or on
/// its first upward move), a fall when it starts moving down. Flat samples
/// keep the last direction. The direction only changes when an event
/// fires, so a transition suppressed by the debounce window is reported on
/// the first sample after the window that still moves the new way.
///
/// The first block after construction or [`reset`](Self::reset) seeds the
/// previous sample from its own first sample.
///
/// # Example
///
/// ```rust
/// use branches_core::{Direction, EdgeDetector};
///
/// let mut detector = EdgeDetector::new();
/// let signal = [0.0, 0.5, 1.0, 0.5, 0.0, 0.5];
/// let mut events = Vec::new();
/// detector.process_block(&signal, 0.001, 1000.0, |frame, dir| events.push((frame, dir)));
///
/// assert_eq!(events, vec![(1, Direction::Rising), (3, Direction::Falling), (5, Direction::Rising)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: f32,
    seeded: bool,
    direction: Option<Direction>,
    debouncer: Debouncer,
}

impl EdgeDetector {
    /// Create an unseeded detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `signal`, calling `on_event(frame, direction)` for each event.
    pub fn process_block(
        &mut self,
        signal: &[f32],
        debounce_s: f32,
        rate: f32,
        mut on_event: impl FnMut(usize, Direction),
    ) {
        self.debouncer.configure(debounce_s, rate);
        if let (false, Some(&first)) = (self.seeded, signal.first()) {
            self.previous = first;
            self.seeded = true;
        }
        for (frame, &current) in signal.iter().enumerate() {
            if let Some(direction) = self.step(current) {
                on_event(frame, direction);
            }
        }
    }

    #[inline]
    fn step(&mut self, current: f32) -> Option<Direction> {
        self.debouncer.tick();
        let moved = if current > self.previous {
            Some(Direction::Rising)
        } else if current < self.previous {
            Some(Direction::Falling)
        } else {
            None
        };
        self.previous = current;

        let direction = moved?;
        if self.direction == Some(direction) || !self.debouncer.ready() {
            return None;
        }
        self.direction = Some(direction);
        self.debouncer.arm();
        Some(direction)
    }

    /// Forget history; the next block re-seeds the previous sample.
    pub fn reset(&mut self) {
        self.previous = 0.0;
        self.seeded = false;
        self.direction = None;
        self.debouncer.reset();
    }
}

/// Debounced sign-change detector.
///
/// Upward crossings go from non-positive to positive, downward crossings
/// from non-negative to negative, so a signal resting on exactly zero
/// crosses once per excursion.
#[derive(Debug, Clone, Default)]
pub struct ZeroCrossingDetector {
    previous: f32,
    seeded: bool,
    debouncer: Debouncer,
}

impl ZeroCrossingDetector {
    /// Create an unseeded detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `signal`, calling `on_event(frame, direction)` for each crossing.
    pub fn process_block(
        &mut self,
        signal: &[f32],
        debounce_s: f32,
        rate: f32,
        mut on_event: impl FnMut(usize, Direction),
    ) {
        self.debouncer.configure(debounce_s, rate);
        if let (false, Some(&first)) = (self.seeded, signal.first()) {
            self.previous = first;
            self.seeded = true;
        }
        for (frame, &current) in signal.iter().enumerate() {
            self.debouncer.tick();
            let crossing = if self.previous <= 0.0 && current > 0.0 {
                Some(Direction::Rising)
            } else if self.previous >= 0.0 && current < 0.0 {
                Some(Direction::Falling)
            } else {
                None
            };
            self.previous = current;

            match crossing {
                Some(direction) if self.debouncer.ready() => {
                    self.debouncer.arm();
                    on_event(frame, direction);
                }
                _ => {}
            }
        }
    }

    /// Forget history; the next block re-seeds the previous sample.
    pub fn reset(&mut self) {
        self.previous = 0.0;
        self.seeded = false;
        self.debouncer.reset();
    }
}

/// Rising threshold test against the previous trigger sample.
///
/// The previous sample starts at 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdCrossing {
    previous: f32,
}

impl ThresholdCrossing {
    /// Create a detector with a previous sample of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// `previous < threshold && current >= threshold`.
    #[inline]
    pub fn reaches(&mut self, current: f32, threshold: f32) -> bool {
        let crossed = self.previous < threshold && current >= threshold;
        self.previous = current;
        crossed
    }

    /// `previous <= threshold && current > threshold`.
    #[inline]
    pub fn exceeds(&mut self, current: f32, threshold: f32) -> bool {
        let crossed = self.previous <= threshold && current > threshold;
        self.previous = current;
        crossed
    }

    /// Previous trigger sample.
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// Return the previous sample to 0.
    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn edges(detector: &mut EdgeDetector, signal: &[f32], debounce: f32) -> Vec<(usize, Direction)> {
        let mut events = Vec::new();
        detector.process_block(signal, debounce, 1000.0, |f, d| events.push((f, d)));
        events
    }

    #[test]
    fn debouncer_caches_length() {
        let mut debouncer = Debouncer::new();
        debouncer.configure(0.01, 1000.0);
        assert_eq!(debouncer.samples(), 10);
        debouncer.configure(0.01, 1000.0);
        assert_eq!(debouncer.samples(), 10);
        debouncer.configure(0.02, 1000.0);
        assert_eq!(debouncer.samples(), 20);
    }

    #[test]
    fn debouncer_counts_down() {
        let mut debouncer = Debouncer::new();
        debouncer.configure(0.003, 1000.0);
        assert!(debouncer.ready());
        debouncer.arm();
        for _ in 0..2 {
            debouncer.tick();
            assert!(!debouncer.ready());
        }
        debouncer.tick();
        assert!(debouncer.ready());
    }

    #[test]
    fn nonzero_start_is_not_an_edge() {
        let mut detector = EdgeDetector::new();
        assert!(edges(&mut detector, &[0.8; 16], 0.001).is_empty());
    }

    #[test]
    fn monotonic_ramp_fires_once() {
        let mut detector = EdgeDetector::new();
        let ramp: Vec<f32> = (0..32).map(|i| i as f32).collect();
        assert_eq!(edges(&mut detector, &ramp, 0.001), [(1, Direction::Rising)]);
        let more: Vec<f32> = (32..64).map(|i| i as f32).collect();
        assert!(edges(&mut detector, &more, 0.001).is_empty());
    }

    #[test]
    fn plateau_keeps_direction() {
        let mut detector = EdgeDetector::new();
        let signal = [0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0];
        assert_eq!(
            edges(&mut detector, &signal, 0.001),
            [(1, Direction::Rising), (6, Direction::Falling)]
        );
    }

    #[test]
    fn debounce_suppresses_close_edges() {
        let mut detector = EdgeDetector::new();
        // 5 ms debounce at 1 kHz = 5 samples
        let signal = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let events = edges(&mut detector, &signal, 0.005);
        assert_eq!(events, [(1, Direction::Rising), (6, Direction::Falling)]);
    }

    #[test]
    fn suppressed_fall_fires_after_window() {
        let mut detector = EdgeDetector::new();
        let signal: Vec<f32> = [0.0, 1.0, 2.0]
            .into_iter()
            .chain((1..=13).map(|i| 2.0 - i as f32))
            .collect();
        assert_eq!(
            edges(&mut detector, &signal, 0.005),
            [(1, Direction::Rising), (6, Direction::Falling)]
        );
    }

    #[test]
    fn fast_triangle_alternates_under_long_debounce() {
        let mut detector = EdgeDetector::new();
        // period 20, 15 ms debounce at 1 kHz = 15 samples
        let signal: Vec<f32> = (0..200)
            .map(|n| {
                let p = (n % 20) as f32;
                if p <= 10.0 { p } else { 20.0 - p }
            })
            .collect();
        let events = edges(&mut detector, &signal, 0.015);

        let rises: Vec<usize> = events
            .iter()
            .filter(|(_, d)| *d == Direction::Rising)
            .map(|(f, _)| *f)
            .collect();
        let falls: Vec<usize> = events
            .iter()
            .filter(|(_, d)| *d == Direction::Falling)
            .map(|(f, _)| *f)
            .collect();
        assert_eq!(rises, [1, 41, 81, 121, 161]);
        assert_eq!(falls, [16, 56, 96, 136, 176]);
        assert!(events.windows(2).all(|w| w[0].1 != w[1].1));
    }

    #[test]
    fn edge_reset_reseeds() {
        let mut detector = EdgeDetector::new();
        edges(&mut detector, &[0.0, 1.0], 0.001);
        detector.reset();
        assert!(edges(&mut detector, &[5.0, 5.0, 5.0], 0.001).is_empty());
    }

    #[test]
    fn zero_crossings_both_ways() {
        let mut detector = ZeroCrossingDetector::new();
        let signal = [-1.0, 0.0, 1.0, 0.0, -1.0, 1.0];
        let mut events = Vec::new();
        detector.process_block(&signal, 0.001, 1000.0, |f, d| events.push((f, d)));
        assert_eq!(
            events,
            [(2, Direction::Rising), (4, Direction::Falling), (5, Direction::Rising)]
        );
    }

    #[test]
    fn zero_crossing_seeds_from_first_sample() {
        let mut detector = ZeroCrossingDetector::new();
        let mut count = 0;
        detector.process_block(&[0.5, 0.6, 0.7], 0.001, 1000.0, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn threshold_rules() {
        let mut reach = ThresholdCrossing::new();
        assert!(!reach.reaches(0.0, 0.0));
        assert!(reach.reaches(0.5, 0.5));
        assert!(!reach.reaches(0.7, 0.5));

        let mut exceed = ThresholdCrossing::new();
        assert!(!exceed.exceeds(0.0, 0.0));
        assert!(exceed.exceeds(0.1, 0.0));
        assert!(!exceed.exceeds(0.2, 0.0));
        exceed.reset();
        assert_eq!(exceed.previous(), 0.0);
    }
}
