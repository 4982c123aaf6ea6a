// crates/gpinit-config/src/resolver.rs
// ============================================================================
// Module: Cluster Config Resolver
// Description: Builds a ClusterTopology from any supported config format.
// Purpose: One all-or-nothing pipeline behind `resolve(path, format)`.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! [`resolve`] dispatches on [`ConfigFormat`]:
//!
//! - `Declarative` and `Structured` files become a key/value mapping, which
//!   [`resolve_declarative`] turns into a topology with segment layouts.
//! - `Input` files carry positional descriptors, which
//!   [`resolve_input`] decodes and validates into concrete instances.
//!
//! Resolution is linear and fails closed: the first error is returned and
//! no partial topology is exposed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::coordinator::CoordinatorField;
use crate::coordinator::FieldLookup;
use crate::coordinator::resolve_coordinator;
use crate::descriptor::SegmentRecord;
use crate::descriptor::decode_descriptor;
use crate::error::ConfigError;
use crate::error::ValidationError;
use crate::error::ValidationFailure;
use crate::input_file::InputConfig;
use crate::input_file::parse_input_file;
use crate::key_value::KeyValueMap;
use crate::key_value::parse_key_value_file;
use crate::keys;
use crate::structured::parse_structured_file;
use crate::topology::ClusterTopology;
use crate::topology::NodeEndpoint;
use crate::topology::SegmentLayout;
use crate::topology::SegmentSet;
use crate::topology::parse_directory_list;
use crate::validate::parse_integer;
use crate::validate::validate_segment;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFormat {
    /// Line-oriented cluster configuration file.
    #[default]
    Declarative,
    /// Positional input configuration file.
    Input,
    /// TOML cluster configuration file.
    #[serde(rename = "toml")]
    Structured,
}

impl ConfigFormat {
    /// Canonical format label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declarative => "declarative",
            Self::Input => "input",
            Self::Structured => "toml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "declarative" => Ok(Self::Declarative),
            "input" => Ok(Self::Input),
            "toml" | "structured" => Ok(Self::Structured),
            other => Err(format!("unknown config format: {other}")),
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Resolves the configuration at `path` into a validated topology.
///
/// # Errors
///
/// Returns the first [`ConfigError`] raised by reading, parsing, decoding or
/// validation.
pub fn resolve(path: &Path, format: ConfigFormat) -> Result<ClusterTopology, ConfigError> {
    info!(path = %path.display(), %format, "checking configuration parameters");
    let topology = match format {
        ConfigFormat::Declarative => resolve_declarative(&parse_key_value_file(path)?)?,
        ConfigFormat::Structured => resolve_declarative(&parse_structured_file(path)?)?,
        ConfigFormat::Input => resolve_input(&parse_input_file(path)?)?,
    };
    debug!(
        primaries = topology.primary_segments.len(),
        mirrors = topology.mirror_segments.len(),
        standby = topology.standby.is_some(),
        "configuration resolved"
    );
    Ok(topology)
}

// ============================================================================
// SECTION: Declarative Resolution
// ============================================================================

/// Builds a topology from declarative key/value pairs.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequiredField`],
/// [`ConfigError::MissingCoordinatorField`],
/// [`ConfigError::MissingPrimaryPortBase`], [`ConfigError::Validation`] or
/// [`ConfigError::MirrorCountMismatch`].
pub fn resolve_declarative(map: &KeyValueMap) -> Result<ClusterTopology, ConfigError> {
    for key in keys::DECLARATIVE_REQUIRED_SCALARS {
        required(map, key)?;
    }
    let coordinator = resolve_coordinator(map)?;
    parse_integer(
        coordinator.source_key(CoordinatorField::Port),
        &coordinator.endpoint.port,
    )?;

    let port_base = map.present(keys::PORT_BASE).ok_or(ConfigError::MissingPrimaryPortBase)?;
    let primary = layout(map, keys::PORT_BASE, port_base, keys::DATA_DIRECTORY)?;

    let mirror = match map.present(keys::MIRROR_PORT_BASE) {
        Some(base) => SegmentSet::Layout(layout(
            map,
            keys::MIRROR_PORT_BASE,
            base,
            keys::MIRROR_DATA_DIRECTORY,
        )?),
        None => SegmentSet::Empty,
    };

    let topology = ClusterTopology {
        array_name: required(map, keys::ARRAY_NAME)?,
        machine_list_file: map.present(keys::MACHINE_LIST_FILE).map(str::to_string),
        segment_prefix: required(map, keys::SEG_PREFIX)?,
        trusted_shell: required(map, keys::TRUSTED_SHELL)?,
        checkpoint_segments: required(map, keys::CHECK_POINT_SEGMENTS)?,
        encoding: required(map, keys::ENCODING)?,
        default_max_connections: required(map, keys::DEFAULT_QD_MAX_CONNECT)?,
        query_executor_connect_factor: required(map, keys::QE_CONNECT_FACTOR)?,
        coordinator: coordinator.endpoint,
        standby: resolve_standby(map)?,
        primary_segments: SegmentSet::Layout(primary),
        mirror_segments: mirror,
    };
    topology.validate()?;
    Ok(topology)
}

/// Builds a segment layout from a port base and a directory-list key.
fn layout(
    map: &KeyValueMap,
    port_key: &str,
    port_base: &str,
    directory_key: &str,
) -> Result<SegmentLayout, ConfigError> {
    parse_integer(port_key, port_base)?;
    let raw = required(map, directory_key)?;
    let data_directories = parse_directory_list(&raw);
    if data_directories.is_empty() {
        return Err(ValidationError::new(directory_key, raw, ValidationFailure::Empty).into());
    }
    Ok(SegmentLayout {
        port_base: port_base.to_string(),
        data_directories,
    })
}

// ============================================================================
// SECTION: Input Resolution
// ============================================================================

/// Builds a topology from a parsed input configuration file.
///
/// Every descriptor is decoded and validated; the first failure aborts.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequiredField`],
/// [`ConfigError::MalformedDescriptor`], [`ConfigError::Validation`] or
/// [`ConfigError::MirrorCountMismatch`].
pub fn resolve_input(input: &InputConfig) -> Result<ClusterTopology, ConfigError> {
    let scalars = &input.scalars;
    let array_name = required(scalars, keys::ARRAY_NAME)?;
    let coordinator = decode_and_validate(&required(scalars, keys::QD_PRIMARY_ARRAY)?)?;

    let primaries = input
        .arrays
        .get(keys::PRIMARY_ARRAY)
        .ok_or_else(|| missing(keys::PRIMARY_ARRAY))?;
    if primaries.is_empty() {
        let empty = ValidationError::new(keys::PRIMARY_ARRAY, "()", ValidationFailure::Empty);
        return Err(empty.into());
    }
    let primaries = decode_all(primaries)?;
    let mirrors = match input.arrays.get(keys::MIRROR_ARRAY) {
        Some(entries) if !entries.is_empty() => SegmentSet::Instances(decode_all(entries)?),
        _ => SegmentSet::Empty,
    };

    let optional = |key: &str| scalars.lookup(key).unwrap_or_default().to_string();
    let topology = ClusterTopology {
        array_name,
        machine_list_file: scalars.present(keys::MACHINE_LIST_FILE).map(str::to_string),
        segment_prefix: optional(keys::SEG_PREFIX),
        trusted_shell: optional(keys::TRUSTED_SHELL),
        checkpoint_segments: optional(keys::CHECK_POINT_SEGMENTS),
        encoding: optional(keys::ENCODING),
        default_max_connections: optional(keys::DEFAULT_QD_MAX_CONNECT),
        query_executor_connect_factor: optional(keys::QE_CONNECT_FACTOR),
        coordinator: NodeEndpoint {
            host_name: coordinator.host_name,
            port: coordinator.port,
            data_directory: coordinator.data_directory,
        },
        standby: resolve_standby(scalars)?,
        primary_segments: SegmentSet::Instances(primaries),
        mirror_segments: mirrors,
    };
    topology.validate()?;
    Ok(topology)
}

/// Decodes and validates every descriptor, stopping at the first failure.
fn decode_all(descriptors: &[String]) -> Result<Vec<SegmentRecord>, ConfigError> {
    descriptors.iter().map(|descriptor| decode_and_validate(descriptor)).collect()
}

/// Decodes one descriptor and validates the resulting record.
fn decode_and_validate(descriptor: &str) -> Result<SegmentRecord, ConfigError> {
    let record = decode_descriptor(descriptor)?;
    validate_segment(&record)?;
    debug!(descriptor, "decoded segment descriptor");
    Ok(record)
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Resolves the optional standby trio; all three keys or none.
fn resolve_standby<L: FieldLookup + ?Sized>(
    source: &L,
) -> Result<Option<NodeEndpoint>, ConfigError> {
    let trio = [keys::STANDBY_HOSTNAME, keys::STANDBY_PORT, keys::STANDBY_DIRECTORY];
    let values = trio.map(|key| source.present(key));
    if values.iter().all(Option::is_none) {
        return Ok(None);
    }
    let [Some(host_name), Some(port), Some(data_directory)] = values else {
        let absent = trio
            .iter()
            .zip(values)
            .find_map(|(key, value)| value.is_none().then_some(*key))
            .unwrap_or(keys::STANDBY_HOSTNAME);
        return Err(missing(absent));
    };
    parse_integer(keys::STANDBY_PORT, port)?;
    Ok(Some(NodeEndpoint {
        host_name: host_name.to_string(),
        port: port.to_string(),
        data_directory: data_directory.to_string(),
    }))
}

/// Returns the value of a key that must exist (it may be empty).
fn required<L: FieldLookup + ?Sized>(source: &L, key: &str) -> Result<String, ConfigError> {
    source.lookup(key).map(str::to_string).ok_or_else(|| missing(key))
}

/// Builds a [`ConfigError::MissingRequiredField`] for `key`.
fn missing(key: &str) -> ConfigError {
    ConfigError::MissingRequiredField {
        key: key.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
