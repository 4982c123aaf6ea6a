// crates/gpinit-config/src/render.rs
// ============================================================================
// Module: Input Configuration Writer
// Description: Renders an expanded topology as an input configuration file.
// Purpose: Emit files that `resolve(_, ConfigFormat::Input)` reads back.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Output is deterministic: scalar keys first, then the standby trio, the
//! coordinator descriptor, and the primary and mirror blocks in segment
//! order, every descriptor in the 6-field `~` layout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use crate::descriptor::SegmentRecord;
use crate::error::ConfigError;
use crate::expand::COORDINATOR_CONTENT_ID;
use crate::expand::COORDINATOR_DB_ID;
use crate::keys;
use crate::topology::ClusterTopology;
use crate::topology::SegmentSet;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `topology` as input configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::Unexpanded`] when segments are still a layout.
pub fn render_input_config(topology: &ClusterTopology) -> Result<String, ConfigError> {
    let SegmentSet::Instances(primaries) = &topology.primary_segments else {
        return Err(ConfigError::Unexpanded);
    };
    let mirrors: &[SegmentRecord] = match &topology.mirror_segments {
        SegmentSet::Instances(records) => records,
        SegmentSet::Empty => &[],
        SegmentSet::Layout(_) => return Err(ConfigError::Unexpanded),
    };

    let mut out = String::new();
    out.push_str("# Input configuration generated from a cluster configuration file.\n");
    push_line(&mut out, keys::ARRAY_NAME, &format!("\"{}\"", topology.array_name));
    if let Some(machine_list) = &topology.machine_list_file {
        push_line(&mut out, keys::MACHINE_LIST_FILE, machine_list);
    }
    push_line(&mut out, keys::SEG_PREFIX, &topology.segment_prefix);
    push_line(&mut out, keys::TRUSTED_SHELL, &topology.trusted_shell);
    push_line(&mut out, keys::CHECK_POINT_SEGMENTS, &topology.checkpoint_segments);
    push_line(&mut out, keys::ENCODING, &topology.encoding);
    push_line(&mut out, keys::DEFAULT_QD_MAX_CONNECT, &topology.default_max_connections);
    push_line(&mut out, keys::QE_CONNECT_FACTOR, &topology.query_executor_connect_factor);
    if let Some(standby) = &topology.standby {
        push_line(&mut out, keys::STANDBY_HOSTNAME, &standby.host_name);
        push_line(&mut out, keys::STANDBY_PORT, &standby.port);
        push_line(&mut out, keys::STANDBY_DIRECTORY, &standby.data_directory);
    }

    let coordinator = SegmentRecord {
        host_name: topology.coordinator.host_name.clone(),
        host_address: topology.coordinator.host_name.clone(),
        port: topology.coordinator.port.clone(),
        data_directory: topology.coordinator.data_directory.clone(),
        db_id: COORDINATOR_DB_ID.to_string(),
        content_id: COORDINATOR_CONTENT_ID.to_string(),
    };
    push_line(&mut out, keys::QD_PRIMARY_ARRAY, &coordinator.to_descriptor());
    push_block(&mut out, keys::PRIMARY_ARRAY, primaries);
    if !mirrors.is_empty() {
        push_block(&mut out, keys::MIRROR_ARRAY, mirrors);
    }
    Ok(out)
}

/// Appends a `KEY=VALUE` line.
fn push_line(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{key}={value}");
}

/// Appends a `declare -a KEY=( ... )` block.
fn push_block(out: &mut String, key: &str, records: &[SegmentRecord]) {
    let _ = writeln!(out, "declare -a {key}=(");
    for record in records {
        let _ = writeln!(out, "{}", record.to_descriptor());
    }
    out.push_str(")\n");
}

// ============================================================================
// SECTION: Tests
// ============================================================================
