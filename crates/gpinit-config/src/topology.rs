// crates/gpinit-config/src/topology.rs
// ============================================================================
// Module: Cluster Topology
// Description: Normalized, validated description of one cluster.
// Purpose: Single model produced by every config front end.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ClusterTopology`] names one coordinator, an optional standby and the
//! primary/mirror segment sets. Declarative files describe segments as a
//! [`SegmentLayout`] (port base plus directories); input files list concrete
//! [`SegmentRecord`]s. Both shapes live in [`SegmentSet`].
//!
//! ## Invariants
//! - The primary set is never empty.
//! - A non-empty mirror set has exactly as many entries as the primary set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::descriptor::SegmentRecord;
use crate::error::ConfigError;
use crate::error::ValidationError;
use crate::error::ValidationFailure;
use crate::keys;

// ============================================================================
// SECTION: Endpoints
// ============================================================================

/// Host, port and data directory of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEndpoint {
    /// Host name.
    pub host_name: String,
    /// Listen port (numeric string).
    pub port: String,
    /// Data directory path.
    pub data_directory: String,
}

// ============================================================================
// SECTION: Segments
// ============================================================================

/// Port base plus an index-aligned list of data directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentLayout {
    /// Port of the first segment on each host; later ones add their index.
    pub port_base: String,
    /// Directory `i` belongs to logical segment `i`.
    pub data_directories: Vec<String>,
}

/// Segments of one role (primary or mirror).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "segments", rename_all = "snake_case")]
pub enum SegmentSet {
    /// No segments; used for disabled mirroring.
    #[default]
    Empty,
    /// Per-host layout from a declarative file.
    Layout(SegmentLayout),
    /// Concrete instances from an input file or expansion.
    Instances(Vec<SegmentRecord>),
}

impl SegmentSet {
    /// Number of logical segments in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Layout(layout) => layout.data_directories.len(),
            Self::Instances(records) => records.len(),
        }
    }

    /// Returns true when the set holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data directories in segment order.
    #[must_use]
    pub fn data_directories(&self) -> Vec<&str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Layout(layout) => layout.data_directories.iter().map(String::as_str).collect(),
            Self::Instances(records) => {
                records.iter().map(|record| record.data_directory.as_str()).collect()
            }
        }
    }
}

// ============================================================================
// SECTION: Topology
// ============================================================================

/// Fully resolved cluster description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterTopology {
    /// Cluster display name.
    pub array_name: String,
    /// Optional host list file named by the configuration.
    pub machine_list_file: Option<String>,
    /// Segment directory name prefix.
    pub segment_prefix: String,
    /// Remote shell command.
    pub trusted_shell: String,
    /// Checkpoint segment setting.
    pub checkpoint_segments: String,
    /// Database encoding.
    pub encoding: String,
    /// Coordinator max connections.
    pub default_max_connections: String,
    /// Segment connection multiplier.
    pub query_executor_connect_factor: String,
    /// Coordinator node.
    pub coordinator: NodeEndpoint,
    /// Optional hot standby for the coordinator.
    pub standby: Option<NodeEndpoint>,
    /// Primary segments.
    pub primary_segments: SegmentSet,
    /// Mirror segments; [`SegmentSet::Empty`] when mirroring is disabled.
    pub mirror_segments: SegmentSet,
}

impl ClusterTopology {
    /// Returns true when mirrors are configured.
    #[must_use]
    pub fn mirroring_enabled(&self) -> bool {
        !self.mirror_segments.is_empty()
    }

    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an empty primary set and
    /// [`ConfigError::MirrorCountMismatch`] for unpaired mirrors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_segments.is_empty() {
            let empty = ValidationError::new(keys::DATA_DIRECTORY, "", ValidationFailure::Empty);
            return Err(empty.into());
        }
        let primaries = self.primary_segments.len();
        let mirrors = self.mirror_segments.len();
        if mirrors != 0 && mirrors != primaries {
            return Err(ConfigError::MirrorCountMismatch {
                primaries,
                mirrors,
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Directory Lists
// ============================================================================

/// Decodes a `(dir1 dir2 ...)` list into its entries.
///
/// The enclosing parentheses are optional; entries split on whitespace.
#[must_use]
pub fn parse_directory_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value.strip_prefix('(').unwrap_or(value);
    let value = value.strip_suffix(')').unwrap_or(value);
    value.split_whitespace().map(str::to_string).collect()
}

/// Encodes directories as a `(dir1 dir2 ...)` list.
#[must_use]
pub fn format_directory_list<S: AsRef<str>>(directories: &[S]) -> String {
    let joined: Vec<&str> = directories.iter().map(AsRef::as_ref).collect();
    format!("({})", joined.join(" "))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
