//! Error types for preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Unknown node id
    #[error("unknown node type: {0}")]
    UnknownNode(String),

    /// The node has no input with this name
    #[error("unknown input '{input}' for node '{node}'")]
    UnknownInput {
        /// Node id.
        node: String,
        /// Input name as written in the preset.
        input: String,
    },

    /// The input carries audio or triggers and cannot be pinned
    #[error("input '{input}' of node '{node}' is {kind}, only scalar inputs can be set")]
    NotScalar {
        /// Node id.
        node: String,
        /// Input name.
        input: String,
        /// Kind of the input.
        kind: &'static str,
    },

    /// The value does not parse as the input's kind
    #[error("invalid value '{value}' for {kind} input '{input}' of node '{node}'")]
    InvalidValue {
        /// Node id.
        node: String,
        /// Input name.
        input: String,
        /// Value as written in the preset.
        value: String,
        /// Kind of the input.
        kind: &'static str,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn write_and_create_dir_expose_source() {
        assert!(ConfigError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
    }

    #[test]
    fn read_file_display() {
        let msg = ConfigError::read_file("/a/b.toml", mock_io_err()).to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
    }

    #[test]
    fn unknown_node_display() {
        let err = ConfigError::UnknownNode("reverb".to_string());
        assert_eq!(err.to_string(), "unknown node type: reverb");
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_input_display() {
        let err = ConfigError::UnknownInput {
            node: "width".to_string(),
            input: "Depth".to_string(),
        };
        assert_eq!(err.to_string(), "unknown input 'Depth' for node 'width'");
    }

    #[test]
    fn not_scalar_display() {
        let err = ConfigError::NotScalar {
            node: "sah".to_string(),
            input: "Signal".to_string(),
            kind: "audio",
        };
        assert_eq!(
            err.to_string(),
            "input 'Signal' of node 'sah' is audio, only scalar inputs can be set"
        );
    }

    #[test]
    fn invalid_value_display() {
        let err = ConfigError::InvalidValue {
            node: "edo".to_string(),
            input: "Divisions".to_string(),
            value: "many".to_string(),
            kind: "int",
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'many' for int input 'Divisions' of node 'edo'"
        );
    }
}
