//! Node instances built from presets.
//!
//! # Example
//!
//! ```rust
//! use branches_config::{NodePreset, PresetInstance};
//! use branches_core::InputRef;
//! use branches_registry::NodeRegistry;
//!
//! let registry = NodeRegistry::new();
//! let preset = NodePreset::new("Mono", "width")
//!     .with_block_size(4)
//!     .with_input("Width", "0");
//! let mut instance = PresetInstance::from_preset(&preset, &registry).unwrap();
//!
//! let left = [1.0; 4];
//! let right = [0.0; 4];
//! instance.execute_with(&[Some(InputRef::Audio(&left)), Some(InputRef::Audio(&right))]);
//!
//! let out = instance.output_by_name("Out R").and_then(|o| o.as_audio()).unwrap();
//! assert_eq!(out, &[0.5; 4]);
//! ```

use branches_core::{BlockConfig, BlockInputs, BlockProcessor, InputRef, OutputRef};
use branches_registry::NodeRegistry;

use crate::error::ConfigError;
use crate::preset::NodePreset;
use crate::validation::{lookup_node, resolve_inputs};
use crate::value::ScalarValue;

/// Largest input count a node may declare.
pub const MAX_INPUTS: usize = 16;

/// A processor with its preset's scalar values pinned.
///
/// Inputs the host binds always win; pinned values fill the inputs the
/// host leaves unbound, and declared defaults cover the rest.
pub struct PresetInstance {
    node: String,
    config: BlockConfig,
    processor: Box<dyn BlockProcessor + Send>,
    pinned: [Option<ScalarValue>; MAX_INPUTS],
    silence: Vec<f32>,
}

impl PresetInstance {
    /// Validate `preset` and build its processor.
    ///
    /// # Errors
    ///
    /// Any error [`validate_preset`](crate::validate_preset) reports.
    pub fn from_preset(preset: &NodePreset, registry: &NodeRegistry) -> Result<Self, ConfigError> {
        let descriptor = lookup_node(preset, registry)?;
        let resolved = resolve_inputs(preset, descriptor)?;
        debug_assert!(descriptor.signature.inputs.len() <= MAX_INPUTS);

        let config = preset.block_config();
        let processor = registry
            .create(descriptor.id, &config)
            .ok_or_else(|| ConfigError::UnknownNode(preset.node.clone()))?;

        let mut pinned = [None; MAX_INPUTS];
        for &(index, value) in &resolved {
            if let Some(slot) = pinned.get_mut(index) {
                *slot = Some(value);
            }
        }

        tracing::info!(
            preset = %preset.name,
            node = descriptor.id,
            pinned = resolved.len(),
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            "preset loaded"
        );

        Ok(Self {
            node: descriptor.id.to_string(),
            config,
            processor,
            pinned,
            silence: vec![0.0; config.block_size],
        })
    }

    /// Run one block.
    ///
    /// `ports` is indexed like the node's inputs and may be shorter than the
    /// signature; missing entries count as unbound.
    pub fn execute_with(&mut self, ports: &[Option<InputRef<'_>>]) {
        let count = self.processor.signature().inputs.len().min(MAX_INPUTS);
        let mut merged: [Option<InputRef<'_>>; MAX_INPUTS] = [None; MAX_INPUTS];
        for (index, slot) in merged.iter_mut().enumerate().take(count) {
            *slot = ports
                .get(index)
                .copied()
                .flatten()
                .or_else(|| self.pinned[index].map(ScalarValue::as_input));
        }
        self.processor
            .execute(&BlockInputs::new(&merged[..count], &self.silence));
    }

    /// Output `index` of the last block.
    pub fn output(&self, index: usize) -> Option<OutputRef<'_>> {
        self.processor.output(index)
    }

    /// Output by name, case-insensitive.
    pub fn output_by_name(&self, name: &str) -> Option<OutputRef<'_>> {
        self.processor.output_by_name(name)
    }

    /// Pinned value of input `index`, if any.
    pub fn pinned(&self, index: usize) -> Option<ScalarValue> {
        self.pinned.get(index).copied().flatten()
    }

    /// Reset the processor state. Pinned values are kept.
    pub fn reset(&mut self) {
        self.processor.reset();
    }

    /// Registry id of the node.
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Block configuration the processor was built with.
    pub fn config(&self) -> BlockConfig {
        self.config
    }

    /// The underlying processor.
    pub fn processor(&self) -> &(dyn BlockProcessor + Send) {
        self.processor.as_ref()
    }
}
