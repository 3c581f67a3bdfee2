//! Preset management for branches nodes.
//!
//! A preset names one registered node and pins some of its scalar inputs
//! (times, levels, counts, switches) to values stored in a TOML file.
//!
//! # Features
//!
//! - **Preset Files**: Load and save presets as TOML
//! - **Unit Parsing**: Values like `"10ms"`, `"-6dB"`, `"1.2kHz"`, `"50%"`
//! - **Validation**: Node ids and input names are checked against the registry
//! - **Instances**: Build a processor whose unbound inputs take the preset values
//!
//! # Example
//!
//! ```rust,no_run
//! use branches_config::{NodePreset, PresetInstance, validate_preset};
//! use branches_registry::NodeRegistry;
//!
//! let registry = NodeRegistry::new();
//!
//! let preset = NodePreset::new("Slow Glide", "slew")
//!     .with_description("Long rise, fast fall")
//!     .with_input("Rise Time", "250ms")
//!     .with_input("Fall Time", "10ms");
//! validate_preset(&preset, &registry).unwrap();
//! preset.save("presets/slow_glide.toml").unwrap();
//!
//! let loaded = NodePreset::load("presets/slow_glide.toml").unwrap();
//! let instance = PresetInstance::from_preset(&loaded, &registry).unwrap();
//! ```

mod error;
mod instance;
mod preset;
mod validation;
mod value;

pub use error::ConfigError;
pub use instance::{MAX_INPUTS, PresetInstance};
pub use preset::NodePreset;
pub use validation::validate_preset;
pub use value::{ScalarValue, parse_input_value};

/// Re-export commonly used types from branches-registry
pub use branches_registry::{NodeCategory, NodeDescriptor, NodeRegistry};
