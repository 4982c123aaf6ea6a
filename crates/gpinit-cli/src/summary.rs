// crates/gpinit-cli/src/summary.rs
// ============================================================================
// Module: Topology Summary
// Description: Operator-facing text summary of a resolved topology.
// Purpose: Show what will be initialized before anything is created.
// Dependencies: gpinit-config
// ============================================================================

//! ## Overview
//! Renders a fixed-width `label : value` table.

use std::fmt::Write;

use gpinit_config::ClusterTopology;
use gpinit_config::NodeEndpoint;
use gpinit_config::SegmentSet;

/// Width of the label column.
const LABEL_WIDTH: usize = 28;

/// Renders a summary table for `topology`.
#[must_use]
pub fn render_summary(topology: &ClusterTopology) -> String {
    let mut out = String::new();
    row(&mut out, "Array name", &topology.array_name);
    row(&mut out, "Coordinator", &endpoint(&topology.coordinator));
    let standby = topology.standby.as_ref().map_or_else(|| "not configured".to_string(), endpoint);
    row(&mut out, "Standby coordinator", &standby);
    if let Some(machine_list) = &topology.machine_list_file {
        row(&mut out, "Machine list file", machine_list);
    }
    row(&mut out, "Segment prefix", &topology.segment_prefix);
    row(&mut out, "Primary segments", &segments(&topology.primary_segments));
    let mirroring = if topology.mirroring_enabled() { "on" } else { "off" };
    row(&mut out, "Mirroring", mirroring);
    if topology.mirroring_enabled() {
        row(&mut out, "Mirror segments", &segments(&topology.mirror_segments));
    }
    out
}

/// Appends one table row.
fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}: {value}");
}

/// Formats an endpoint as `host:port dir`.
fn endpoint(node: &NodeEndpoint) -> String {
    format!("{}:{} {}", node.host_name, node.port, node.data_directory)
}

/// Describes a segment set.
fn segments(set: &SegmentSet) -> String {
    match set {
        SegmentSet::Empty => "none".to_string(),
        SegmentSet::Layout(layout) => format!(
            "{} per host, ports from {}",
            layout.data_directories.len(),
            layout.port_base
        ),
        SegmentSet::Instances(records) => format!("{} instances", records.len()),
    }
}
