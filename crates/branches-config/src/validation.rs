//! Preset validation against the node registry.
//!
//! A preset is valid when its node id is registered and every pinned input
//! names a scalar input of that node with a value that parses as the
//! input's kind. Input names match case-insensitively. Values outside a
//! node's documented range are accepted; the node clamps them.

use branches_core::PortDescriptor;
use branches_registry::{NodeDescriptor, NodeRegistry};

use crate::error::ConfigError;
use crate::preset::NodePreset;
use crate::value::ScalarValue;

/// Check a preset against the registry.
///
/// # Errors
///
/// The first problem found, in input-name order: [`ConfigError::UnknownNode`],
/// [`ConfigError::UnknownInput`], [`ConfigError::NotScalar`], or
/// [`ConfigError::InvalidValue`].
pub fn validate_preset(preset: &NodePreset, registry: &NodeRegistry) -> Result<(), ConfigError> {
    let descriptor = lookup_node(preset, registry)?;
    resolve_inputs(preset, descriptor).map(|_| ())
}

pub(crate) fn lookup_node<'r>(
    preset: &NodePreset,
    registry: &'r NodeRegistry,
) -> Result<&'r NodeDescriptor, ConfigError> {
    registry
        .get(&preset.node)
        .ok_or_else(|| ConfigError::UnknownNode(preset.node.clone()))
}

/// Parse every pinned input into `(input index, value)`.
pub(crate) fn resolve_inputs(
    preset: &NodePreset,
    descriptor: &NodeDescriptor,
) -> Result<Vec<(usize, ScalarValue)>, ConfigError> {
    preset
        .inputs
        .iter()
        .map(|(name, raw)| {
            let index = descriptor
                .signature
                .input_index(name)
                .ok_or_else(|| ConfigError::UnknownInput {
                    node: preset.node.clone(),
                    input: name.clone(),
                })?;
            let port = &descriptor.signature.inputs[index];
            let value = parse_for_port(preset, port, raw)?;
            Ok((index, value))
        })
        .collect()
}

fn parse_for_port(
    preset: &NodePreset,
    port: &PortDescriptor,
    raw: &str,
) -> Result<ScalarValue, ConfigError> {
    if !port.kind.is_scalar() {
        return Err(ConfigError::NotScalar {
            node: preset.node.clone(),
            input: port.name.to_string(),
            kind: port.kind.name(),
        });
    }
    ScalarValue::parse(raw, port.kind).ok_or_else(|| ConfigError::InvalidValue {
        node: preset.node.clone(),
        input: port.name.to_string(),
        value: raw.to_string(),
        kind: port.kind.name(),
    })
}
