//! Node registry and factory for branches control nodes.
//!
//! This crate provides a central table for discovering and instantiating
//! nodes by id. Hosts use it to list the catalog, read port signatures for
//! wiring, and build processors at graph instantiation time.
//!
//! # Features
//!
//! - **Node Discovery**: List all available nodes with metadata
//! - **Factory Pattern**: Create nodes by id at runtime
//! - **Category System**: Nodes grouped by role (detection, stereo, etc.)
//! - **Port Lookup**: Resolve input and output indices by name
//!
//! # Example
//!
//! ```rust
//! use branches_core::{BlockConfig, BlockInputs};
//! use branches_registry::{NodeCategory, NodeRegistry};
//!
//! let registry = NodeRegistry::new();
//!
//! for node in registry.all_nodes() {
//!     println!("{}: {}", node.name, node.description);
//! }
//!
//! let config = BlockConfig::default();
//! if let Some(mut width) = registry.create("width", &config) {
//!     let silence = vec![0.0; config.block_size];
//!     width.execute(&BlockInputs::unbound(&silence));
//! }
//!
//! for node in registry.nodes_in_category(NodeCategory::Stereo) {
//!     println!("Stereo node: {}", node.name);
//! }
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! branches-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use branches_core::{BlockConfig, BlockProcessor, NodeSignature};
use branches_nodes::{
    Balance, BoolToAudio, Click, ClockDivider, CrossfadeStereo, Dust, DustTrigger, Edge, Edo,
    Impulse, PhaseDisperser, PhaseDispersion, Sah, SahBank, ShiftRegister, Slew, SlewFloat,
    StereoBalance, StereoGain, StereoInverter, TriggerShiftRegister, Tuning, Width, ZeroCrossing,
    click, clock_divider, dust, edge, phase, sample_hold, shift_register, slew, stereo, tuning,
};

/// Role of a node, for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Edge and zero-crossing detectors
    Detection,
    /// Slew limiters and value-to-audio converters
    Smoothing,
    /// Sample-and-hold and shift registers
    Memory,
    /// Clock dividers
    Clock,
    /// Impulse and trigger generators
    Generator,
    /// Stereo balance, width, and routing
    Stereo,
    /// Allpass filters
    Filter,
    /// Frequency and tuning math
    Tuning,
}

impl NodeCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeCategory::Detection => "Detection",
            NodeCategory::Smoothing => "Smoothing",
            NodeCategory::Memory => "Memory",
            NodeCategory::Clock => "Clock",
            NodeCategory::Generator => "Generator",
            NodeCategory::Stereo => "Stereo",
            NodeCategory::Filter => "Filter",
            NodeCategory::Tuning => "Tuning",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            NodeCategory::Detection => "Direction-change and zero-crossing trigger detectors",
            NodeCategory::Smoothing => "Exponential slew limiters and scalar-to-audio converters",
            NodeCategory::Memory => "Sample-and-hold banks and shift registers",
            NodeCategory::Clock => "Clock division of trigger streams",
            NodeCategory::Generator => "Random and triggered impulse generators",
            NodeCategory::Stereo => "Balance, width, crossfade, and channel utilities",
            NodeCategory::Filter => "Allpass phase dispersion chains",
            NodeCategory::Tuning => "Equal-division and per-pitch-class tuning",
        }
    }
}

/// Describes a node in the registry.
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    /// Unique identifier for the node (lowercase, snake case).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the node.
    pub description: &'static str,
    /// Category for organization.
    pub category: NodeCategory,
    /// Input and output ports.
    pub signature: &'static NodeSignature,
}

/// Factory function type for creating nodes.
type NodeFactory = fn(&BlockConfig) -> Box<dyn BlockProcessor + Send>;

/// Internal entry in the registry.
struct RegistryEntry {
    descriptor: NodeDescriptor,
    factory: NodeFactory,
}

/// Registry of all available nodes.
///
/// All built-in nodes are registered by [`NodeRegistry::new`]. The table is
/// read-only afterwards.
pub struct NodeRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Create a new registry with all built-in nodes registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(24),
        };
        registry.register_builtin_nodes();

        #[cfg(feature = "tracing")]
        tracing::debug!(nodes = registry.entries.len(), "node registry built");

        registry
    }

    /// Register all built-in nodes.
    fn register_builtin_nodes(&mut self) {
        // Detection
        self.register(
            NodeDescriptor {
                id: "edge",
                name: "Edge",
                description: "Triggers when a signal starts rising or falling",
                category: NodeCategory::Detection,
                signature: &edge::EDGE_SIGNATURE,
            },
            |c| Box::new(Edge::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "zero_crossing",
                name: "Zero Crossing",
                description: "Triggers when a signal changes sign",
                category: NodeCategory::Detection,
                signature: &edge::ZERO_CROSSING_SIGNATURE,
            },
            |c| Box::new(ZeroCrossing::new(c)),
        );

        // Smoothing
        self.register(
            NodeDescriptor {
                id: "slew",
                name: "Slew",
                description: "Exponential slew limiter with separate rise and fall times",
                category: NodeCategory::Smoothing,
                signature: &slew::SLEW_SIGNATURE,
            },
            |c| Box::new(Slew::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "slew_float",
                name: "Slew (Float)",
                description: "Block-rate slew limiter for float controls",
                category: NodeCategory::Smoothing,
                signature: &slew::SLEW_FLOAT_SIGNATURE,
            },
            |c| Box::new(SlewFloat::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "bool_to_audio",
                name: "Bool To Audio",
                description: "Slewed 0/1 audio from a boolean",
                category: NodeCategory::Smoothing,
                signature: &slew::BOOL_TO_AUDIO_SIGNATURE,
            },
            |c| Box::new(BoolToAudio::new(c)),
        );

        // Memory
        self.register(
            NodeDescriptor {
                id: "sah",
                name: "Sample and Hold",
                description: "Latches the signal when the trigger crosses the threshold",
                category: NodeCategory::Memory,
                signature: &sample_hold::SAH_SIGNATURE,
            },
            |c| Box::new(Sah::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "sah_bank",
                name: "Sample and Hold Bank",
                description: "Four independent sample-and-hold channels",
                category: NodeCategory::Memory,
                signature: &sample_hold::SAH_BANK_SIGNATURE,
            },
            |c| Box::new(SahBank::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "shift_register",
                name: "Shift Register",
                description: "Eight-stage sampled cascade clocked by an audio threshold",
                category: NodeCategory::Memory,
                signature: &shift_register::SHIFT_REGISTER_SIGNATURE,
            },
            |c| Box::new(ShiftRegister::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "trigger_shift_register",
                name: "Trigger Shift Register",
                description: "Eight-stage float cascade clocked by triggers",
                category: NodeCategory::Memory,
                signature: &shift_register::TRIGGER_SHIFT_REGISTER_SIGNATURE,
            },
            |c| Box::new(TriggerShiftRegister::new(c)),
        );

        // Clock
        self.register(
            NodeDescriptor {
                id: "clock_divider",
                name: "Clock Divider",
                description: "Divides a trigger clock by 1 through 8",
                category: NodeCategory::Clock,
                signature: &clock_divider::CLOCK_DIVIDER_SIGNATURE,
            },
            |c| Box::new(ClockDivider::new(c)),
        );

        // Generators
        self.register(
            NodeDescriptor {
                id: "dust",
                name: "Dust",
                description: "Random impulses at a modulated density",
                category: NodeCategory::Generator,
                signature: &dust::DUST_SIGNATURE,
            },
            |c| Box::new(Dust::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "dust_trigger",
                name: "Dust (Trigger)",
                description: "Random triggers at a modulated density",
                category: NodeCategory::Generator,
                signature: &dust::DUST_TRIGGER_SIGNATURE,
            },
            |c| Box::new(DustTrigger::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "click",
                name: "Click",
                description: "Single-sample impulse on each trigger",
                category: NodeCategory::Generator,
                signature: &click::CLICK_SIGNATURE,
            },
            |c| Box::new(Click::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "impulse",
                name: "Impulse",
                description: "Single-sample impulse on each trigger",
                category: NodeCategory::Generator,
                signature: &click::CLICK_SIGNATURE,
            },
            |c| Box::new(Impulse::new(c)),
        );

        // Stereo
        self.register(
            NodeDescriptor {
                id: "balance",
                name: "Balance",
                description: "Constant-power stereo balance",
                category: NodeCategory::Stereo,
                signature: &stereo::BALANCE_SIGNATURE,
            },
            |c| Box::new(Balance::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "stereo_balance",
                name: "Stereo Balance",
                description: "Normalized stereo balance",
                category: NodeCategory::Stereo,
                signature: &stereo::STEREO_BALANCE_SIGNATURE,
            },
            |c| Box::new(StereoBalance::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "width",
                name: "Stereo Width",
                description: "Mid/side stereo width from mono to doubled side",
                category: NodeCategory::Stereo,
                signature: &stereo::WIDTH_SIGNATURE,
            },
            |c| Box::new(Width::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "crossfade_stereo",
                name: "Stereo Crossfade",
                description: "Constant-power crossfade between two stereo pairs",
                category: NodeCategory::Stereo,
                signature: &stereo::CROSSFADE_STEREO_SIGNATURE,
            },
            |c| Box::new(CrossfadeStereo::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "stereo_inverter",
                name: "Stereo Inverter",
                description: "Per-channel polarity inversion and channel swap",
                category: NodeCategory::Stereo,
                signature: &stereo::STEREO_INVERTER_SIGNATURE,
            },
            |c| Box::new(StereoInverter::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "stereo_gain",
                name: "Stereo Gain",
                description: "Linear gain applied to both channels",
                category: NodeCategory::Stereo,
                signature: &stereo::STEREO_GAIN_SIGNATURE,
            },
            |c| Box::new(StereoGain::new(c)),
        );

        // Filters
        self.register(
            NodeDescriptor {
                id: "phase_disperser",
                name: "Phase Disperser",
                description: "Allpass chain of 1 to 128 stages",
                category: NodeCategory::Filter,
                signature: &phase::PHASE_DISPERSER_SIGNATURE,
            },
            |c| Box::new(PhaseDisperser::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "phase_dispersion",
                name: "Phase Dispersion",
                description: "Fixed ten-stage allpass chain",
                category: NodeCategory::Filter,
                signature: &phase::PHASE_DISPERSION_SIGNATURE,
            },
            |c| Box::new(PhaseDispersion::new(c)),
        );

        // Tuning
        self.register(
            NodeDescriptor {
                id: "edo",
                name: "EDO",
                description: "Equal division of the octave frequency",
                category: NodeCategory::Tuning,
                signature: &tuning::EDO_SIGNATURE,
            },
            |c| Box::new(Edo::new(c)),
        );
        self.register(
            NodeDescriptor {
                id: "tuning",
                name: "Tuning",
                description: "MIDI note to frequency with per-pitch-class cents",
                category: NodeCategory::Tuning,
                signature: &tuning::TUNING_SIGNATURE,
            },
            |c| Box::new(Tuning::new(c)),
        );
    }

    /// Register a node with the registry.
    fn register(&mut self, descriptor: NodeDescriptor, factory: NodeFactory) {
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered nodes.
    pub fn all_nodes(&self) -> Vec<&NodeDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Returns descriptors for nodes in a specific category.
    pub fn nodes_in_category(&self, category: NodeCategory) -> Vec<&NodeDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Get a descriptor by node ID.
    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Create a node instance by ID.
    ///
    /// Returns `None` if the node ID is not found.
    pub fn create(&self, id: &str, config: &BlockConfig) -> Option<Box<dyn BlockProcessor + Send>> {
        let entry = self.entries.iter().find(|e| e.descriptor.id == id)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            id,
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            "creating node"
        );

        Some((entry.factory)(config))
    }

    /// Find an input index by name for a given node type.
    ///
    /// Names match case-insensitively. Returns `None` if the node or input
    /// is not found.
    pub fn input_index_by_name(&self, node_id: &str, input_name: &str) -> Option<usize> {
        self.get(node_id)?.signature.input_index(input_name)
    }

    /// Find an output index by name for a given node type.
    pub fn output_index_by_name(&self, node_id: &str, output_name: &str) -> Option<usize> {
        self.get(node_id)?.signature.output_index(output_name)
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
