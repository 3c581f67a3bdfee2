//! The block-processing contract shared by every node.
//!
//! A [`BlockProcessor`] owns its outputs and persistent state. The host
//! binds inputs, calls [`execute`](BlockProcessor::execute) once per block,
//! then reads results through [`output`](BlockProcessor::output) until the
//! next call.
//!
//! ## Design Decisions
//!
//! - **Object-safe**: hosts hold `Box<dyn BlockProcessor + Send>` built from
//!   the registry. Concrete nodes also expose a typed `process(...)` for
//!   static use; `execute` delegates to it.
//!
//! - **No allocations**: `execute` and `reset` never allocate. Output
//!   buffers and trigger storage are sized at construction.
//!
//! - **No failures**: unbound inputs take their declared defaults and
//!   out-of-range controls are clamped, so `execute` returns nothing.

use crate::port::NodeSignature;
use crate::signal::{BlockInputs, OutputRef};

/// Core trait for all nodes.
///
/// # Example
///
/// ```rust
/// use branches_core::{
///     BlockConfig, BlockInputs, BlockProcessor, InputRef, NodeSignature, OutputRef,
///     PortDescriptor,
/// };
///
/// static SIGNATURE: NodeSignature = NodeSignature::new(
///     &[
///         PortDescriptor::audio("Signal", "Input audio"),
///         PortDescriptor::float("Gain", "Linear gain", 1.0),
///     ],
///     &[PortDescriptor::audio("Out", "Scaled audio")],
/// );
///
/// struct Gain {
///     out: Vec<f32>,
/// }
///
/// impl BlockProcessor for Gain {
///     fn signature(&self) -> &'static NodeSignature {
///         &SIGNATURE
///     }
///
///     fn execute(&mut self, inputs: &BlockInputs<'_>) {
///         let gain = inputs.float(1, 1.0);
///         for (out, x) in self.out.iter_mut().zip(inputs.audio(0)) {
///             *out = x * gain;
///         }
///     }
///
///     fn output(&self, index: usize) -> Option<OutputRef<'_>> {
///         (index == 0).then(|| OutputRef::Audio(&self.out))
///     }
///
///     fn reset(&mut self) {
///         self.out.fill(0.0);
///     }
/// }
///
/// let config = BlockConfig::default().with_block_size(4);
/// let mut node = Gain { out: vec![0.0; config.block_size] };
/// let signal = [1.0; 4];
/// let silence = [0.0; 4];
/// let ports = [Some(InputRef::Audio(&signal)), Some(InputRef::Float(0.5))];
/// node.execute(&BlockInputs::new(&ports, &silence));
///
/// let out = node.output_by_name("out").and_then(|o| o.as_audio()).unwrap();
/// assert_eq!(out, &[0.5; 4]);
/// ```
pub trait BlockProcessor {
    /// Static port declaration of this node.
    fn signature(&self) -> &'static NodeSignature;

    /// Process one block.
    ///
    /// `inputs` holds one optional binding per declared input, in signature
    /// order. All bound audio buffers must have the block length the node
    /// was constructed with.
    fn execute(&mut self, inputs: &BlockInputs<'_>);

    /// Output `index` as computed by the last `execute()`.
    ///
    /// Returns `None` for indices past the declared outputs.
    fn output(&self, index: usize) -> Option<OutputRef<'_>>;

    /// Restore the documented initial state.
    ///
    /// Output storage keeps its size; time constants and cached
    /// configuration are kept.
    fn reset(&mut self);

    /// Output named `name`, ignoring ASCII case.
    fn output_by_name(&self, name: &str) -> Option<OutputRef<'_>> {
        let index = self.signature().output_index(name)?;
        self.output(index)
    }

    /// Number of declared outputs.
    fn output_count(&self) -> usize {
        self.signature().outputs.len()
    }
}
