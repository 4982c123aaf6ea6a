//! Declarative cluster configuration resolution tests for gpinit-config.
// crates/gpinit-config/tests/declarative_resolution.rs
// =============================================================================
// Module: Declarative Resolution Tests
// Description: Resolve KEY=VALUE cluster configuration files end to end.
// Purpose: Ensure mandatory keys, aliases, and layouts fail closed.
// =============================================================================

mod common;

use std::path::Path;

use common::BASE_DECLARATIVE;
use common::Workspace;
use common::declarative_with;
use gpinit_config::ClusterTopology;
use gpinit_config::ConfigError;
use gpinit_config::ConfigFormat;
use gpinit_config::SegmentSet;
use gpinit_config::cluster_config_example;
use gpinit_config::resolve;

type TestResult = Result<(), String>;

fn resolve_text(text: &str) -> Result<Result<ClusterTopology, ConfigError>, String> {
    let workspace = Workspace::new()?;
    let path = workspace.write("gpinitsystem_config", text)?;
    Ok(resolve(&path, ConfigFormat::Declarative))
}

fn expect_error(text: &str, expected: &ConfigError) -> TestResult {
    match resolve_text(text)? {
        Err(error) if &error == expected => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err(format!("expected failure: {expected}")),
    }
}

#[test]
fn resolves_complete_file() -> TestResult {
    let topology = resolve_text(&declarative_with(&[], &[]))?.map_err(|err| err.to_string())?;
    if topology.array_name != "Test Cluster" {
        return Err(format!("array name not unquoted: {}", topology.array_name));
    }
    if topology.coordinator.host_name != "cdw" || topology.coordinator.port != "5432" {
        return Err("coordinator endpoint not resolved".to_string());
    }
    let SegmentSet::Layout(layout) = &topology.primary_segments else {
        return Err("expected primary layout".to_string());
    };
    if layout.port_base != "6000" || layout.data_directories != ["/data/p1", "/data/p2"] {
        return Err("primary layout not resolved".to_string());
    }
    if topology.mirroring_enabled() || topology.standby.is_some() {
        return Err("mirrors and standby should be absent".to_string());
    }
    Ok(())
}

#[test]
fn each_mandatory_scalar_is_required() -> TestResult {
    for key in [
        "ARRAY_NAME",
        "SEG_PREFIX",
        "TRUSTED_SHELL",
        "CHECK_POINT_SEGMENTS",
        "ENCODING",
        "DEFAULT_QD_MAX_CONNECT",
        "QE_CONNECT_FACTOR",
        "DATA_DIRECTORY",
    ] {
        expect_error(
            &declarative_with(&[], &[key]),
            &ConfigError::MissingRequiredField {
                key: key.to_string(),
            },
        )?;
    }
    Ok(())
}

#[test]
fn missing_port_base_is_reported() -> TestResult {
    expect_error(&declarative_with(&[], &["PORT_BASE"]), &ConfigError::MissingPrimaryPortBase)
}

#[test]
fn legacy_coordinator_keys_resolve_identically() -> TestResult {
    let current = resolve_text(&declarative_with(&[], &[]))?.map_err(|err| err.to_string())?;
    let legacy_text = declarative_with(
        &[
            ("MASTER_HOSTNAME", "cdw"),
            ("MASTER_PORT", "5432"),
            ("MASTER_DIRECTORY", "/data/coordinator"),
        ],
        &["COORDINATOR_HOSTNAME", "COORDINATOR_PORT", "COORDINATOR_DIRECTORY"],
    );
    let legacy = resolve_text(&legacy_text)?.map_err(|err| err.to_string())?;
    if legacy == current { Ok(()) } else { Err("legacy keys resolved differently".to_string()) }
}

#[test]
fn coordinator_keys_win_over_legacy_keys() -> TestResult {
    let text = declarative_with(&[("MASTER_HOSTNAME", "mdw"), ("MASTER_PORT", "9999")], &[]);
    let topology = resolve_text(&text)?.map_err(|err| err.to_string())?;
    if topology.coordinator.host_name == "cdw" && topology.coordinator.port == "5432" {
        Ok(())
    } else {
        Err("legacy value overrode coordinator value".to_string())
    }
}

#[test]
fn missing_coordinator_field_names_both_keys() -> TestResult {
    let text = declarative_with(&[], &["COORDINATOR_DIRECTORY"]);
    let message = match resolve_text(&text)? {
        Err(error) => error.to_string(),
        Ok(_) => return Err("expected missing coordinator directory".to_string()),
    };
    if message.contains("COORDINATOR_DIRECTORY") && message.contains("MASTER_DIRECTORY") {
        Ok(())
    } else {
        Err(format!("message did not name both keys: {message}"))
    }
}

#[test]
fn mirror_layout_is_resolved() -> TestResult {
    let text = declarative_with(
        &[("MIRROR_PORT_BASE", "7000"), ("MIRROR_DATA_DIRECTORY", "(/data/m1 /data/m2)")],
        &[],
    );
    let topology = resolve_text(&text)?.map_err(|err| err.to_string())?;
    if topology.mirroring_enabled() && topology.mirror_segments.len() == 2 {
        Ok(())
    } else {
        Err("mirror layout not resolved".to_string())
    }
}

#[test]
fn mirror_directory_count_must_match() -> TestResult {
    let text = declarative_with(
        &[("MIRROR_PORT_BASE", "7000"), ("MIRROR_DATA_DIRECTORY", "(/data/m1)")],
        &[],
    );
    expect_error(
        &text,
        &ConfigError::MirrorCountMismatch {
            primaries: 2,
            mirrors: 1,
        },
    )
}

#[test]
fn malformed_line_reports_position() -> TestResult {
    let mut text = declarative_with(&[], &[]);
    text.push_str("THIS LINE HAS NO SEPARATOR\n");
    let line = BASE_DECLARATIVE.len() + 1;
    match resolve_text(&text)? {
        Err(ConfigError::MalformedLine {
            line: reported,
            content,
            ..
        }) if reported == line && content == "THIS LINE HAS NO SEPARATOR" => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err("expected malformed line".to_string()),
    }
}

#[test]
fn missing_file_is_reported() -> TestResult {
    let workspace = Workspace::new()?;
    let path = workspace.root().join("absent.conf");
    match resolve(&path, ConfigFormat::Declarative) {
        Err(ConfigError::FileNotFound {
            path: reported,
        }) if reported == path => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err("expected missing file".to_string()),
    }
}

#[test]
fn directory_path_is_unreadable() -> TestResult {
    let workspace = Workspace::new()?;
    match resolve(workspace.root(), ConfigFormat::Declarative) {
        Err(ConfigError::FileUnreadable { .. }) => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err("expected unreadable file".to_string()),
    }
}

#[test]
fn sample_configuration_resolves() -> TestResult {
    let topology = resolve_text(&cluster_config_example())?.map_err(|err| err.to_string())?;
    if topology.primary_segments.len() == 2 && !topology.mirroring_enabled() {
        Ok(())
    } else {
        Err("sample did not resolve as documented".to_string())
    }
}

#[test]
fn overlong_path_is_rejected_before_io() -> TestResult {
    let long = "a".repeat(5_000);
    match resolve(Path::new(&long), ConfigFormat::Declarative) {
        Err(error) if error.to_string().contains("config path exceeds max length") => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err("expected path rejection".to_string()),
    }
}
