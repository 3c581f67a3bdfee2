//! Static port declarations.
//!
//! Every node declares its inputs and outputs once, as `'static` data:
//!
//! ```rust
//! use branches_core::{NodeSignature, PortDescriptor};
//!
//! static SIGNATURE: NodeSignature = NodeSignature::new(
//!     &[
//!         PortDescriptor::audio("Signal", "Input audio"),
//!         PortDescriptor::float("Gain", "Linear gain", 1.0),
//!     ],
//!     &[PortDescriptor::audio("Out", "Scaled audio")],
//! );
//!
//! assert_eq!(SIGNATURE.input_index("gain"), Some(1));
//! assert_eq!(SIGNATURE.output_index("Missing"), None);
//! ```
//!
//! Hosts use the declaration to bind [`BlockInputs`](crate::BlockInputs) in
//! signature order and to build UIs; nodes use it to look up defaults.

/// Kind of data carried by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Block-length `f32` buffer.
    Audio,
    /// One `f32` per block.
    Float,
    /// One `i32` per block.
    Int,
    /// One `bool` per block.
    Bool,
    /// Sparse frame-indexed events.
    Trigger,
}

impl SignalKind {
    /// Whether the kind holds one value per block.
    pub const fn is_scalar(self) -> bool {
        matches!(self, SignalKind::Float | SignalKind::Int | SignalKind::Bool)
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            SignalKind::Audio => "audio",
            SignalKind::Float => "float",
            SignalKind::Int => "int",
            SignalKind::Bool => "bool",
            SignalKind::Trigger => "trigger",
        }
    }
}

/// Value an unbound scalar input takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortDefault {
    /// No scalar default (audio and trigger ports).
    None,
    /// Float default.
    Float(f32),
    /// Integer default.
    Int(i32),
    /// Boolean default.
    Bool(bool),
}

/// Declaration of a single input or output port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortDescriptor {
    /// Display name, unique within the node's inputs or outputs.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Data kind.
    pub kind: SignalKind,
    /// Default for unbound scalar inputs.
    pub default: PortDefault,
}

impl PortDescriptor {
    /// Audio port.
    pub const fn audio(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Audio,
            default: PortDefault::None,
        }
    }

    /// Float port with a default.
    pub const fn float(name: &'static str, description: &'static str, default: f32) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Float,
            default: PortDefault::Float(default),
        }
    }

    /// Integer port with a default.
    pub const fn int(name: &'static str, description: &'static str, default: i32) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Int,
            default: PortDefault::Int(default),
        }
    }

    /// Boolean port with a default.
    pub const fn bool(name: &'static str, description: &'static str, default: bool) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Bool,
            default: PortDefault::Bool(default),
        }
    }

    /// Trigger port.
    pub const fn trigger(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Trigger,
            default: PortDefault::None,
        }
    }

    /// Scalar output ports carry no default; this one is for those.
    pub const fn float_output(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: SignalKind::Float,
            default: PortDefault::None,
        }
    }
}

/// Input and output declaration of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSignature {
    /// Inputs in binding order.
    pub inputs: &'static [PortDescriptor],
    /// Outputs in `output(index)` order.
    pub outputs: &'static [PortDescriptor],
}

impl NodeSignature {
    /// Declare a signature.
    pub const fn new(
        inputs: &'static [PortDescriptor],
        outputs: &'static [PortDescriptor],
    ) -> Self {
        Self { inputs, outputs }
    }

    /// Index of the input named `name`, ignoring ASCII case.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs
            .iter()
            .position(|port| port.name.eq_ignore_ascii_case(name))
    }

    /// Index of the output named `name`, ignoring ASCII case.
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs
            .iter()
            .position(|port| port.name.eq_ignore_ascii_case(name))
    }

    /// Input descriptor at `index`.
    pub fn input(&self, index: usize) -> Option<&'static PortDescriptor> {
        self.inputs.get(index)
    }

    /// Output descriptor at `index`.
    pub fn output(&self, index: usize) -> Option<&'static PortDescriptor> {
        self.outputs.get(index)
    }
}
