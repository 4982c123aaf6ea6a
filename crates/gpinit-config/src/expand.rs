// crates/gpinit-config/src/expand.rs
// ============================================================================
// Module: Layout Expansion
// Description: Expands declarative segment layouts into concrete instances.
// Purpose: Produce the per-instance records an input configuration lists.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! A declarative topology says "these directories on every host, ports from
//! this base". Expansion applies that layout to a host list:
//!
//! - The coordinator is dbid 1, content -1, directory `<dir>/<prefix>-1`.
//! - Primaries walk hosts in order and directories by index; content ids
//!   ascend from 0, dbids from 2, and port is `PORT_BASE + index`.
//! - Mirrors use grouped placement: the mirrors of host `h` live on host
//!   `h + 1` (wrapping), with ports from `MIRROR_PORT_BASE`. Their dbids
//!   follow the last primary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::descriptor::SegmentRecord;
use crate::error::ConfigError;
use crate::error::ValidationError;
use crate::error::ValidationFailure;
use crate::keys;
use crate::topology::ClusterTopology;
use crate::topology::NodeEndpoint;
use crate::topology::SegmentLayout;
use crate::topology::SegmentSet;
use crate::validate::parse_integer;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Coordinator dbid.
pub const COORDINATOR_DB_ID: u32 = 1;
/// Coordinator content id.
pub const COORDINATOR_CONTENT_ID: i64 = -1;
/// Highest usable TCP port.
const MAX_PORT: i64 = 65_535;

// ============================================================================
// SECTION: Expansion
// ============================================================================

/// Expands `topology` across `hosts`; already expanded topologies are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::HostList`] for an empty host list,
/// [`ConfigError::InsufficientHosts`] when mirrors cannot be placed on a
/// different host, and [`ConfigError::Validation`] when a derived port is
/// out of range.
pub fn expand_topology(
    topology: &ClusterTopology,
    hosts: &[String],
) -> Result<ClusterTopology, ConfigError> {
    topology.validate()?;
    let primary = match &topology.primary_segments {
        SegmentSet::Layout(layout) => layout,
        SegmentSet::Instances(_) => return Ok(topology.clone()),
        SegmentSet::Empty => return Err(ConfigError::Unexpanded),
    };
    if hosts.is_empty() {
        return Err(ConfigError::HostList("no segment hosts supplied".to_string()));
    }
    let prefix = topology.segment_prefix.as_str();
    let mut db_id = COORDINATOR_DB_ID;

    let mut primaries = Vec::with_capacity(hosts.len() * primary.data_directories.len());
    for host in hosts {
        for (index, directory) in primary.data_directories.iter().enumerate() {
            db_id += 1;
            let content = primaries.len();
            primaries.push(instance(
                host,
                keys::PORT_BASE,
                primary,
                index,
                directory,
                prefix,
                db_id,
                content,
            )?);
        }
    }

    let mirrors = match &topology.mirror_segments {
        SegmentSet::Layout(mirror) => {
            if hosts.len() < 2 {
                return Err(ConfigError::InsufficientHosts {
                    hosts: hosts.len(),
                });
            }
            let per_host = primary.data_directories.len();
            let mut records = Vec::with_capacity(primaries.len());
            for host_index in 0..hosts.len() {
                let mirror_host = &hosts[(host_index + 1) % hosts.len()];
                for (index, directory) in mirror.data_directories.iter().enumerate() {
                    db_id += 1;
                    let content = host_index * per_host + index;
                    records.push(instance(
                        mirror_host,
                        keys::MIRROR_PORT_BASE,
                        mirror,
                        index,
                        directory,
                        prefix,
                        db_id,
                        content,
                    )?);
                }
            }
            SegmentSet::Instances(records)
        }
        SegmentSet::Instances(records) => SegmentSet::Instances(records.clone()),
        SegmentSet::Empty => SegmentSet::Empty,
    };

    debug!(
        hosts = hosts.len(),
        primaries = primaries.len(),
        mirrors = mirrors.len(),
        "expanded segment layout"
    );
    let expanded = ClusterTopology {
        coordinator: NodeEndpoint {
            data_directory: segment_directory(
                &topology.coordinator.data_directory,
                prefix,
                &COORDINATOR_CONTENT_ID.to_string(),
            ),
            ..topology.coordinator.clone()
        },
        primary_segments: SegmentSet::Instances(primaries),
        mirror_segments: mirrors,
        ..topology.clone()
    };
    expanded.validate()?;
    Ok(expanded)
}

/// Builds one instance record for `host`.
#[allow(clippy::too_many_arguments, reason = "Each argument is a distinct record attribute.")]
fn instance(
    host: &str,
    port_key: &str,
    layout: &SegmentLayout,
    index: usize,
    directory: &str,
    prefix: &str,
    db_id: u32,
    content: usize,
) -> Result<SegmentRecord, ConfigError> {
    let content = content.to_string();
    Ok(SegmentRecord {
        host_name: host.to_string(),
        host_address: host.to_string(),
        port: segment_port(port_key, &layout.port_base, index)?.to_string(),
        data_directory: segment_directory(directory, prefix, &content),
        db_id: db_id.to_string(),
        content_id: content,
    })
}

/// Derives the port at `offset` from `base`, rejecting out-of-range results.
fn segment_port(key: &str, base: &str, offset: usize) -> Result<i64, ConfigError> {
    let start = parse_integer(key, base)?;
    let out_of_range = || ValidationError::new(key, base, ValidationFailure::OutOfRange);
    let offset = i64::try_from(offset).map_err(|_| out_of_range())?;
    let port = start.checked_add(offset).ok_or_else(out_of_range)?;
    if (1..=MAX_PORT).contains(&port) {
        Ok(port)
    } else {
        Err(out_of_range().into())
    }
}

/// Joins a parent directory with `<prefix><content>`.
fn segment_directory(parent: &str, prefix: &str, content: &str) -> String {
    format!("{}/{prefix}{content}", parent.trim_end_matches('/'))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
