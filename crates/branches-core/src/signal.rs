//! Per-block signal containers.
//!
//! Three kinds of data cross a node boundary once per block:
//!
//! | Kind | Input view | Output storage |
//! |------|------------|----------------|
//! | Audio | `&[f32]` | `Vec<f32>` owned by the node |
//! | Scalar | `f32` / `i32` / `bool` | field owned by the node |
//! | Trigger | `&TriggerBuffer` | [`TriggerBuffer`] owned by the node |
//!
//! Inputs arrive through [`BlockInputs`], a borrowed slice with one optional
//! [`InputRef`] per declared input. Missing or mistyped inputs fall back to
//! silence, no events, or the caller's default.

use alloc::vec::Vec;

/// Sparse, ordered set of event frames within one block.
///
/// Frames are strictly increasing and lie in `[0, block_size)`. Firing the
/// same frame twice keeps one event; frames outside the block are dropped.
/// Storage is reserved for `block_size` events at construction, so
/// [`fire`](Self::fire) never allocates.
///
/// # Example
///
/// ```rust
/// use branches_core::TriggerBuffer;
///
/// let mut triggers = TriggerBuffer::new(8);
/// triggers.fire(5);
/// triggers.fire(2);
/// triggers.fire(5);
/// triggers.fire(9); // outside the block
///
/// assert_eq!(triggers.iter().collect::<Vec<_>>(), vec![2, 5]);
///
/// triggers.advance_block();
/// assert!(triggers.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerBuffer {
    frames: Vec<usize>,
    block_size: usize,
}

/// A trigger stream that never fires. Unbound trigger inputs read this.
pub static NO_TRIGGERS: TriggerBuffer = TriggerBuffer::empty();

impl TriggerBuffer {
    /// Create an empty trigger buffer for blocks of `block_size` frames.
    pub fn new(block_size: usize) -> Self {
        Self {
            frames: Vec::with_capacity(block_size),
            block_size,
        }
    }

    /// A zero-length stream with no events.
    pub const fn empty() -> Self {
        Self {
            frames: Vec::new(),
            block_size: 0,
        }
    }

    /// Build a buffer and fire every frame in `frames`.
    pub fn from_frames(block_size: usize, frames: impl IntoIterator<Item = usize>) -> Self {
        let mut buffer = Self::new(block_size);
        for frame in frames {
            buffer.fire(frame);
        }
        buffer
    }

    /// Clear all events. Called at the start of every `execute()`.
    #[inline]
    pub fn advance_block(&mut self) {
        self.frames.clear();
    }

    /// Record an event at `frame`.
    ///
    /// Returns `false` when the frame is outside the block or already fired.
    #[inline]
    pub fn fire(&mut self, frame: usize) -> bool {
        if frame >= self.block_size {
            return false;
        }
        match self.frames.last() {
            None => {
                self.frames.push(frame);
                true
            }
            Some(&last) if last < frame => {
                self.frames.push(frame);
                true
            }
            Some(_) => match self.frames.binary_search(&frame) {
                Ok(_) => false,
                Err(position) => {
                    self.frames.insert(position, frame);
                    true
                }
            },
        }
    }

    /// Iterate event frames in increasing order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.iter().copied()
    }

    /// Event frames as a sorted slice.
    #[inline]
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Whether an event fired at `frame`.
    pub fn contains(&self, frame: usize) -> bool {
        self.frames.binary_search(&frame).is_ok()
    }

    /// Number of events in the current block.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no events fired in the current block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames per block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

/// One bound input value for the current block.
#[derive(Debug, Clone, Copy)]
pub enum InputRef<'a> {
    /// Audio buffer, one sample per frame.
    Audio(&'a [f32]),
    /// Float scalar.
    Float(f32),
    /// Integer scalar.
    Int(i32),
    /// Boolean scalar.
    Bool(bool),
    /// Trigger stream.
    Trigger(&'a TriggerBuffer),
}

/// One output value, valid until the node's next `execute()`.
#[derive(Debug, Clone, Copy)]
pub enum OutputRef<'a> {
    /// Audio buffer.
    Audio(&'a [f32]),
    /// Float scalar.
    Float(f32),
    /// Trigger stream.
    Trigger(&'a TriggerBuffer),
}

impl<'a> OutputRef<'a> {
    /// The audio buffer, if this is an audio output.
    pub fn as_audio(&self) -> Option<&'a [f32]> {
        match *self {
            OutputRef::Audio(samples) => Some(samples),
            _ => None,
        }
    }

    /// The float value, if this is a float output.
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            OutputRef::Float(value) => Some(value),
            _ => None,
        }
    }

    /// The trigger stream, if this is a trigger output.
    pub fn as_trigger(&self) -> Option<&'a TriggerBuffer> {
        match *self {
            OutputRef::Trigger(triggers) => Some(triggers),
            _ => None,
        }
    }
}

/// Borrowed inputs for one `execute()` call.
///
/// `ports` holds one entry per declared input in signature order; `None`
/// marks an unconnected input. `silence` is a host-owned zero buffer of
/// block length that unbound audio inputs read.
///
/// # Example
///
/// ```rust
/// use branches_core::{BlockInputs, InputRef};
///
/// let signal = [0.5_f32; 4];
/// let silence = [0.0_f32; 4];
/// let ports = [Some(InputRef::Audio(&signal)), None];
/// let inputs = BlockInputs::new(&ports, &silence);
///
/// assert_eq!(inputs.audio(0), &signal);
/// assert_eq!(inputs.float(1, 0.01), 0.01);
/// assert!(inputs.trigger(3).is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlockInputs<'a> {
    ports: &'a [Option<InputRef<'a>>],
    silence: &'a [f32],
}

impl<'a> BlockInputs<'a> {
    /// Bind a port slice and a silence buffer.
    pub fn new(ports: &'a [Option<InputRef<'a>>], silence: &'a [f32]) -> Self {
        Self { ports, silence }
    }

    /// Inputs with nothing connected.
    pub fn unbound(silence: &'a [f32]) -> Self {
        Self { ports: &[], silence }
    }

    /// The raw binding for input `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<InputRef<'a>> {
        self.ports.get(index).copied().flatten()
    }

    /// Number of frames in the block.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.silence.len()
    }

    /// Audio input `index`, or silence when unbound.
    #[inline]
    pub fn audio(&self, index: usize) -> &'a [f32] {
        match self.get(index) {
            Some(InputRef::Audio(samples)) => samples,
            _ => self.silence,
        }
    }

    /// Float input `index`, or `default` when unbound.
    ///
    /// Integer and boolean bindings are widened.
    #[inline]
    pub fn float(&self, index: usize, default: f32) -> f32 {
        match self.get(index) {
            Some(InputRef::Float(value)) => value,
            Some(InputRef::Int(value)) => value as f32,
            Some(InputRef::Bool(value)) => {
                if value {
                    1.0
                } else {
                    0.0
                }
            }
            _ => default,
        }
    }

    /// Integer input `index`, or `default` when unbound.
    ///
    /// Float bindings are rounded to the nearest integer.
    #[inline]
    pub fn int(&self, index: usize, default: i32) -> i32 {
        match self.get(index) {
            Some(InputRef::Int(value)) => value,
            Some(InputRef::Float(value)) if value.is_finite() => libm::roundf(value) as i32,
            Some(InputRef::Bool(value)) => i32::from(value),
            _ => default,
        }
    }

    /// Boolean input `index`, or `default` when unbound.
    #[inline]
    pub fn bool(&self, index: usize, default: bool) -> bool {
        match self.get(index) {
            Some(InputRef::Bool(value)) => value,
            Some(InputRef::Int(value)) => value != 0,
            Some(InputRef::Float(value)) => value != 0.0,
            _ => default,
        }
    }

    /// Trigger input `index`, or an empty stream when unbound.
    #[inline]
    pub fn trigger(&self, index: usize) -> &'a TriggerBuffer {
        match self.get(index) {
            Some(InputRef::Trigger(triggers)) => triggers,
            _ => &NO_TRIGGERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fire_keeps_frames_sorted_and_unique() {
        let mut triggers = TriggerBuffer::new(16);
        for frame in [9, 3, 12, 3, 0, 9, 15] {
            triggers.fire(frame);
        }
        assert_eq!(triggers.frames(), &[0, 3, 9, 12, 15]);
        assert!(triggers.contains(12));
        assert!(!triggers.contains(4));
    }

    #[test]
    fn fire_drops_out_of_range_frames() {
        let mut triggers = TriggerBuffer::new(4);
        assert!(!triggers.fire(4));
        assert!(!triggers.fire(100));
        assert!(triggers.fire(3));
        assert_eq!(triggers.len(), 1);
    }

    #[test]
    fn fire_never_grows_past_reserved_capacity() {
        let mut triggers = TriggerBuffer::new(32);
        let capacity = triggers.frames.capacity();
        for frame in (0..32).rev() {
            triggers.fire(frame);
        }
        assert_eq!(triggers.len(), 32);
        assert_eq!(triggers.frames.capacity(), capacity);
    }

    #[test]
    fn iterator_is_restartable() {
        let triggers = TriggerBuffer::from_frames(8, [1, 4, 6]);
        let first: Vec<usize> = triggers.iter().collect();
        let second: Vec<usize> = triggers.iter().collect();
        assert_eq!(first, vec![1, 4, 6]);
        assert_eq!(first, second);
    }

    #[test]
    fn unbound_inputs_fall_back() {
        let silence = [0.0; 8];
        let inputs = BlockInputs::unbound(&silence);
        assert_eq!(inputs.audio(0), &silence);
        assert_eq!(inputs.float(0, 0.25), 0.25);
        assert_eq!(inputs.int(0, 12), 12);
        assert!(inputs.bool(0, true));
        assert!(inputs.trigger(0).is_empty());
        assert_eq!(inputs.block_len(), 8);
    }

    #[test]
    fn mistyped_inputs_fall_back_or_coerce() {
        let silence = [0.0; 4];
        let triggers = TriggerBuffer::from_frames(4, [2]);
        let ports = [
            Some(InputRef::Float(2.6)),
            Some(InputRef::Trigger(&triggers)),
            Some(InputRef::Bool(true)),
        ];
        let inputs = BlockInputs::new(&ports, &silence);

        assert_eq!(inputs.int(0, 0), 3);
        assert_eq!(inputs.audio(0), &silence);
        assert_eq!(inputs.float(1, -1.0), -1.0);
        assert_eq!(inputs.trigger(1).frames(), &[2]);
        assert_eq!(inputs.float(2, 0.0), 1.0);
        assert!(inputs.trigger(2).is_empty());
    }

    #[test]
    fn output_ref_accessors() {
        let samples = [1.0, 2.0];
        let audio = OutputRef::Audio(&samples);
        assert_eq!(audio.as_audio(), Some(&samples[..]));
        assert_eq!(audio.as_float(), None);
        assert_eq!(OutputRef::Float(3.0).as_float(), Some(3.0));
        assert!(OutputRef::Float(3.0).as_trigger().is_none());
    }
}
