//! Expansion and input-file output tests for gpinit-config.
// crates/gpinit-config/tests/output_roundtrip.rs
// =============================================================================
// Module: Output Round-Trip Tests
// Description: Expand declarative layouts and read the written input file back.
// Purpose: Ensure generated input files resolve to the expanded topology.
// =============================================================================

mod common;

use common::Workspace;
use common::declarative_with;
use gpinit_config::ClusterTopology;
use gpinit_config::ConfigFormat;
use gpinit_config::SegmentSet;
use gpinit_config::expand_topology;
use gpinit_config::read_host_list;
use gpinit_config::render_input_config;
use gpinit_config::resolve;

type TestResult = Result<(), String>;

/// Creates every directory the expanded topology names.
fn create_instance_dirs(workspace: &Workspace, topology: &ClusterTopology) -> TestResult {
    let root = workspace.root().to_string_lossy().to_string();
    let mut dirs = vec![topology.coordinator.data_directory.clone()];
    for set in [&topology.primary_segments, &topology.mirror_segments] {
        if let SegmentSet::Instances(records) = set {
            dirs.extend(records.iter().map(|record| record.data_directory.clone()));
        }
    }
    for dir in dirs {
        let relative = dir.strip_prefix(&root).ok_or("directory outside workspace")?;
        workspace.data_dir(relative.trim_start_matches('/'))?;
    }
    Ok(())
}

fn expand_file(workspace: &Workspace, mirrored: bool) -> Result<ClusterTopology, String> {
    let root = workspace.root().to_string_lossy().to_string();
    let coordinator = format!("{root}/coordinator");
    let primaries = format!("({root}/p1 {root}/p2)");
    let mirrors = format!("({root}/m1 {root}/m2)");
    let mut overrides = vec![
        ("COORDINATOR_DIRECTORY", coordinator.as_str()),
        ("DATA_DIRECTORY", primaries.as_str()),
    ];
    if mirrored {
        overrides.push(("MIRROR_PORT_BASE", "7000"));
        overrides.push(("MIRROR_DATA_DIRECTORY", mirrors.as_str()));
    }
    let config = workspace.write("cluster.conf", &declarative_with(&overrides, &[]))?;
    let hostfile = workspace.write("hostfile", "sdw1\nsdw2\nsdw1\n")?;
    let topology = resolve(&config, ConfigFormat::Declarative).map_err(|err| err.to_string())?;
    let hosts = read_host_list(&hostfile).map_err(|err| err.to_string())?;
    expand_topology(&topology, &hosts).map_err(|err| err.to_string())
}

#[test]
fn written_input_file_resolves_to_expanded_topology() -> TestResult {
    let workspace = Workspace::new()?;
    let expanded = expand_file(&workspace, true)?;
    if expanded.primary_segments.len() != 4 || expanded.mirror_segments.len() != 4 {
        return Err("expected four primaries and four mirrors".to_string());
    }
    create_instance_dirs(&workspace, &expanded)?;
    let text = render_input_config(&expanded).map_err(|err| err.to_string())?;
    let output = workspace.write("gpinitsystem_input", &text)?;
    let reread = resolve(&output, ConfigFormat::Input).map_err(|err| err.to_string())?;
    if reread == expanded { Ok(()) } else { Err("input file did not round-trip".to_string()) }
}

#[test]
fn toml_expansion_round_trips_through_input_file() -> TestResult {
    let workspace = Workspace::new()?;
    let root = workspace.root().to_string_lossy().to_string();
    let text = format!(
        "ARRAY_NAME = \"Toml Cluster\"\nSEG_PREFIX = \"gpseg\"\nTRUSTED_SHELL = \"ssh\"\n\
         CHECK_POINT_SEGMENTS = 8\nENCODING = \"UTF-8\"\nDEFAULT_QD_MAX_CONNECT = 250\n\
         QE_CONNECT_FACTOR = 3\nCOORDINATOR_HOSTNAME = \"cdw\"\nCOORDINATOR_PORT = 5432\n\
         COORDINATOR_DIRECTORY = \"{root}/coordinator\"\nPORT_BASE = 6000\n\
         DATA_DIRECTORY = [\"{root}/p1\"]\n"
    );
    let config = workspace.write("cluster.toml", &text)?;
    let hostfile = workspace.write("hostfile", "sdw1\nsdw2\n")?;
    let topology = resolve(&config, ConfigFormat::Structured).map_err(|err| err.to_string())?;
    let hosts = read_host_list(&hostfile).map_err(|err| err.to_string())?;
    let expanded = expand_topology(&topology, &hosts).map_err(|err| err.to_string())?;
    create_instance_dirs(&workspace, &expanded)?;
    let rendered = render_input_config(&expanded).map_err(|err| err.to_string())?;
    let output = workspace.write("gpinitsystem_input", &rendered)?;
    let reread = resolve(&output, ConfigFormat::Input).map_err(|err| err.to_string())?;
    if reread == expanded { Ok(()) } else { Err("toml expansion did not round-trip".to_string()) }
}

#[test]
fn unmirrored_output_omits_mirror_block() -> TestResult {
    let workspace = Workspace::new()?;
    let expanded = expand_file(&workspace, false)?;
    let text = render_input_config(&expanded).map_err(|err| err.to_string())?;
    if text.contains("MIRROR_ARRAY") {
        return Err("unexpected mirror block".to_string());
    }
    if text.contains("declare -a PRIMARY_ARRAY=(") {
        Ok(())
    } else {
        Err("primary block missing".to_string())
    }
}
