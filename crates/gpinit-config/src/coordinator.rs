// crates/gpinit-config/src/coordinator.rs
// ============================================================================
// Module: Coordinator Alias Resolution
// Description: Resolves coordinator fields from current or legacy key names.
// Purpose: Accept `MASTER_*` files while preferring `COORDINATOR_*` keys.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! Each coordinator attribute (hostname, port, directory) is resolved on its
//! own: the `COORDINATOR_*` value wins when present, the `MASTER_*` value is
//! used otherwise and the fallback is recorded, and a field with neither is
//! reported individually.
//!
//! A value is present when its key exists with a non-blank value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::keys;
use crate::topology::NodeEndpoint;

// ============================================================================
// SECTION: Lookup Seam
// ============================================================================

/// Read-only source of configuration values by key.
pub trait FieldLookup {
    /// Returns the raw value stored under `key`.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Returns the value under `key` when it is non-blank.
    fn present(&self, key: &str) -> Option<&str> {
        self.lookup(key).filter(|value| !value.trim().is_empty())
    }
}

impl FieldLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: std::hash::BuildHasher> FieldLookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Coordinator attribute resolved from aliased keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorField {
    /// Coordinator host name.
    Hostname,
    /// Coordinator port.
    Port,
    /// Coordinator data directory.
    Directory,
}

impl CoordinatorField {
    /// All fields in resolution order.
    pub const ALL: [Self; 3] = [Self::Hostname, Self::Port, Self::Directory];

    /// Lowercase label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Port => "port",
            Self::Directory => "directory",
        }
    }

    /// Current key name.
    #[must_use]
    pub const fn coordinator_key(self) -> &'static str {
        match self {
            Self::Hostname => keys::COORDINATOR_HOSTNAME,
            Self::Port => keys::COORDINATOR_PORT,
            Self::Directory => keys::COORDINATOR_DIRECTORY,
        }
    }

    /// Legacy key name.
    #[must_use]
    pub const fn legacy_key(self) -> &'static str {
        match self {
            Self::Hostname => keys::MASTER_HOSTNAME,
            Self::Port => keys::MASTER_PORT,
            Self::Directory => keys::MASTER_DIRECTORY,
        }
    }
}

impl fmt::Display for CoordinatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved coordinator plus the fields that came from legacy keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorResolution {
    /// Coordinator endpoint.
    pub endpoint: NodeEndpoint,
    /// Fields resolved from `MASTER_*` keys, in resolution order.
    pub fallbacks: Vec<CoordinatorField>,
}

impl CoordinatorResolution {
    /// Key that supplied `field`.
    #[must_use]
    pub fn source_key(&self, field: CoordinatorField) -> &'static str {
        if self.fallbacks.contains(&field) {
            field.legacy_key()
        } else {
            field.coordinator_key()
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the coordinator endpoint from `source`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCoordinatorField`] for the first field with
/// neither a coordinator nor a legacy value.
pub fn resolve_coordinator<L: FieldLookup + ?Sized>(
    source: &L,
) -> Result<CoordinatorResolution, ConfigError> {
    let mut fallbacks = Vec::new();
    let endpoint = NodeEndpoint {
        host_name: resolve_field(source, CoordinatorField::Hostname, &mut fallbacks)?,
        port: resolve_field(source, CoordinatorField::Port, &mut fallbacks)?,
        data_directory: resolve_field(source, CoordinatorField::Directory, &mut fallbacks)?,
    };
    Ok(CoordinatorResolution {
        endpoint,
        fallbacks,
    })
}

/// Resolves one field, recording a legacy fallback in `fallbacks`.
fn resolve_field<L: FieldLookup + ?Sized>(
    source: &L,
    field: CoordinatorField,
    fallbacks: &mut Vec<CoordinatorField>,
) -> Result<String, ConfigError> {
    if let Some(value) = source.present(field.coordinator_key()) {
        return Ok(value.to_string());
    }
    let value = source.present(field.legacy_key()).ok_or(ConfigError::MissingCoordinatorField {
        field,
    })?;
    warn!(
        legacy = field.legacy_key(),
        replacement = field.coordinator_key(),
        "using deprecated coordinator key"
    );
    fallbacks.push(field);
    Ok(value.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn legacy_only_matches_current_only() {
        let legacy = source(&[
            ("MASTER_HOSTNAME", "mdw"),
            ("MASTER_PORT", "5432"),
            ("MASTER_DIRECTORY", "/data/master"),
        ]);
        let current = source(&[
            ("COORDINATOR_HOSTNAME", "mdw"),
            ("COORDINATOR_PORT", "5432"),
            ("COORDINATOR_DIRECTORY", "/data/master"),
        ]);
        let from_legacy = resolve_coordinator(&legacy).unwrap();
        let from_current = resolve_coordinator(&current).unwrap();
        assert_eq!(from_legacy.endpoint, from_current.endpoint);
        assert_eq!(from_legacy.fallbacks, CoordinatorField::ALL.to_vec());
        assert!(from_current.fallbacks.is_empty());
    }

    #[test]
    fn coordinator_key_wins_over_legacy() {
        let both = source(&[
            ("COORDINATOR_HOSTNAME", "cdw"),
            ("MASTER_HOSTNAME", "mdw"),
            ("MASTER_PORT", "5432"),
            ("COORDINATOR_DIRECTORY", "/data/coordinator"),
        ]);
        let resolved = resolve_coordinator(&both).unwrap();
        assert_eq!(resolved.endpoint.host_name, "cdw");
        assert_eq!(resolved.fallbacks, vec![CoordinatorField::Port]);
        assert_eq!(resolved.source_key(CoordinatorField::Port), "MASTER_PORT");
        assert_eq!(resolved.source_key(CoordinatorField::Hostname), "COORDINATOR_HOSTNAME");
    }

    #[test]
    fn blank_coordinator_value_falls_back() {
        let values = source(&[
            ("COORDINATOR_HOSTNAME", "  "),
            ("MASTER_HOSTNAME", "mdw"),
            ("COORDINATOR_PORT", "5432"),
            ("COORDINATOR_DIRECTORY", "/data/c"),
        ]);
        let resolved = resolve_coordinator(&values).unwrap();
        assert_eq!(resolved.endpoint.host_name, "mdw");
    }

    #[test]
    fn each_missing_field_is_reported_separately() {
        let cases = [
            (
                source(&[("MASTER_PORT", "5432"), ("MASTER_DIRECTORY", "/d")]),
                CoordinatorField::Hostname,
            ),
            (
                source(&[("MASTER_HOSTNAME", "mdw"), ("MASTER_DIRECTORY", "/d")]),
                CoordinatorField::Port,
            ),
            (
                source(&[("MASTER_HOSTNAME", "mdw"), ("COORDINATOR_PORT", "5432")]),
                CoordinatorField::Directory,
            ),
        ];
        for (values, field) in cases {
            assert_eq!(
                resolve_coordinator(&values).unwrap_err(),
                ConfigError::MissingCoordinatorField {
                    field,
                }
            );
        }
    }

    #[test]
    fn works_over_hash_map() {
        let values: HashMap<String, String> = source(&[
            ("COORDINATOR_HOSTNAME", "cdw"),
            ("COORDINATOR_PORT", "6000"),
            ("COORDINATOR_DIRECTORY", "/c"),
        ])
        .into_iter()
        .collect();
        assert_eq!(resolve_coordinator(&values).unwrap().endpoint.port, "6000");
    }

    #[test]
    fn missing_field_message_names_both_keys() {
        let err = ConfigError::MissingCoordinatorField {
            field: CoordinatorField::Directory,
        };
        assert_eq!(
            err.to_string(),
            "coordinator directory is not set (expected COORDINATOR_DIRECTORY or MASTER_DIRECTORY)"
        );
    }
}
