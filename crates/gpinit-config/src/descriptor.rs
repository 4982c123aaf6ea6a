// crates/gpinit-config/src/descriptor.rs
// ============================================================================
// Module: Positional Descriptor Decoder
// Description: Decodes compact `host~address~port~dir~dbid~content` strings.
// Purpose: Accept both the current 6-field and the legacy 5-field layouts.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! A descriptor names one segment instance (or the coordinator) as fields
//! joined by a separator: `~` when the string contains one, otherwise `:`.
//!
//! - 6 fields: `host~address~port~dir~dbid~content`.
//! - 5 fields: `address~port~dir~dbid~content`; the host name is taken from
//!   the address.
//! - 6 fields ending in `-1~0`: a legacy coordinator line carrying a
//!   deprecated trailing zero; the zero is dropped and the 5-field rule
//!   applies.
//!
//! Decoding is a pure function of its input, so independent descriptors may
//! be decoded in any order or in parallel.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Preferred field separator.
pub const PRIMARY_SEPARATOR: &str = "~";
/// Fallback field separator for descriptors without `~`.
pub const FALLBACK_SEPARATOR: &str = ":";
/// Field count of the current layout.
const CURRENT_FIELD_COUNT: usize = 6;
/// Field count of the legacy layout.
const LEGACY_FIELD_COUNT: usize = 5;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One decoded segment (or coordinator) instance.
///
/// `port`, `db_id` and `content_id` are kept as supplied; use
/// [`crate::validate_segment`] to enforce that they are integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SegmentRecord {
    /// Host name of the instance.
    pub host_name: String,
    /// Address used to reach the host.
    pub host_address: String,
    /// Listen port.
    pub port: String,
    /// Data directory path.
    pub data_directory: String,
    /// Instance identifier.
    pub db_id: String,
    /// Logical content group identifier.
    pub content_id: String,
}

impl SegmentRecord {
    /// Renders the record in the current 6-field `~` layout.
    #[must_use]
    pub fn to_descriptor(&self) -> String {
        [
            self.host_name.as_str(),
            self.host_address.as_str(),
            self.port.as_str(),
            self.data_directory.as_str(),
            self.db_id.as_str(),
            self.content_id.as_str(),
        ]
        .join(PRIMARY_SEPARATOR)
    }
}

impl fmt::Display for SegmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor())
    }
}

impl FromStr for SegmentRecord {
    type Err = ConfigError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        decode_descriptor(descriptor)
    }
}

/// Layout a descriptor was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorLayout {
    /// `host~address~port~dir~dbid~content`.
    Current,
    /// `address~port~dir~dbid~content`, optionally followed by `~0`.
    Legacy,
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Picks the separator for a descriptor: `~` if present, else `:`.
#[must_use]
pub fn detect_separator(descriptor: &str) -> &'static str {
    if descriptor.contains(PRIMARY_SEPARATOR) {
        PRIMARY_SEPARATOR
    } else {
        FALLBACK_SEPARATOR
    }
}

/// Decodes a descriptor, detecting its separator.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedDescriptor`] for empty input or an
/// unsupported field count.
pub fn decode_descriptor(descriptor: &str) -> Result<SegmentRecord, ConfigError> {
    decode_with_separator(descriptor, detect_separator(descriptor))
}

/// Decodes a descriptor using an explicit separator.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedDescriptor`] for empty input, an empty
/// separator, or a field count other than 5 or 6.
pub fn decode_with_separator(
    descriptor: &str,
    separator: &str,
) -> Result<SegmentRecord, ConfigError> {
    if descriptor.is_empty() {
        return Err(malformed(descriptor, "descriptor is empty"));
    }
    if separator.is_empty() {
        return Err(malformed(descriptor, "separator is empty"));
    }
    let mut fields: Vec<&str> = descriptor.split(separator).collect();
    let layout = classify(&fields).ok_or_else(|| {
        malformed(descriptor, &format!("has {} fields, expected 5 or 6", fields.len()))
    })?;
    if layout == DescriptorLayout::Legacy && fields.len() == CURRENT_FIELD_COUNT {
        warn!(descriptor, "dropping deprecated trailing zero from legacy descriptor");
        fields.truncate(LEGACY_FIELD_COUNT);
    }
    Ok(match (layout, fields.as_slice()) {
        (DescriptorLayout::Legacy, [address, port, dir, db_id, content]) => {
            build(address, address, port, dir, db_id, content)
        }
        (DescriptorLayout::Current, [host, address, port, dir, db_id, content]) => {
            build(host, address, port, dir, db_id, content)
        }
        _ => return Err(malformed(descriptor, "field layout mismatch")),
    })
}

/// Determines the layout from split fields; `None` for unsupported counts.
#[must_use]
pub fn classify(fields: &[&str]) -> Option<DescriptorLayout> {
    match fields {
        [_, _, _, _, _] => Some(DescriptorLayout::Legacy),
        [_, _, _, _, content, sentinel] if *content == "-1" && *sentinel == "0" => {
            Some(DescriptorLayout::Legacy)
        }
        [_, _, _, _, _, _] => Some(DescriptorLayout::Current),
        _ => None,
    }
}

/// Assembles a record from borrowed fields.
fn build(
    host: &str,
    address: &str,
    port: &str,
    dir: &str,
    db_id: &str,
    content: &str,
) -> SegmentRecord {
    SegmentRecord {
        host_name: host.to_string(),
        host_address: address.to_string(),
        port: port.to_string(),
        data_directory: dir.to_string(),
        db_id: db_id.to_string(),
        content_id: content.to_string(),
    }
}

/// Builds a [`ConfigError::MalformedDescriptor`].
fn malformed(descriptor: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedDescriptor {
        descriptor: descriptor.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
