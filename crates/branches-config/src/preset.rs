//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use branches_core::BlockConfig;

use crate::error::ConfigError;

/// A single node with pinned scalar inputs.
///
/// Presets are stored as TOML files. Input values are strings so they can
/// carry units, and are parsed against the node's port kinds when the
/// preset is validated or instantiated.
///
/// # TOML Format
///
/// ```toml
/// name = "Slow Glide"
/// description = "Long rise, fast fall"
/// node = "slew"
/// sample_rate = 48000
/// block_size = 256
///
/// [inputs]
/// "Rise Time" = "250ms"
/// "Fall Time" = "10ms"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodePreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Registry id of the node.
    pub node: String,

    /// Sample rate hint (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Block size hint (defaults to 256).
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Scalar inputs by port name.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_block_size() -> usize {
    BlockConfig::DEFAULT_BLOCK_SIZE
}

impl NodePreset {
    /// Create a preset for `node` with no pinned inputs.
    pub fn new(name: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            node: node.into(),
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            inputs: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the block size hint.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Pin an input to a value.
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Get a pinned input value as written.
    pub fn get_input(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// Block configuration from the preset's hints.
    pub fn block_config(&self) -> BlockConfig {
        BlockConfig::new(self.sample_rate as f32, self.block_size)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: NodePreset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), preset = %preset.name, "preset file read");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
