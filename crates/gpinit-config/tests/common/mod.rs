// crates/gpinit-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared fixtures for cluster configuration integration tests.
// Purpose: Build config files and data directories inside temp workspaces.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

/// Declarative keys every cluster configuration file must carry.
pub const BASE_DECLARATIVE: &[(&str, &str)] = &[
    ("ARRAY_NAME", "\"Test Cluster\""),
    ("SEG_PREFIX", "gpseg"),
    ("TRUSTED_SHELL", "ssh"),
    ("CHECK_POINT_SEGMENTS", "8"),
    ("ENCODING", "UNICODE"),
    ("DEFAULT_QD_MAX_CONNECT", "250"),
    ("QE_CONNECT_FACTOR", "3"),
    ("COORDINATOR_HOSTNAME", "cdw"),
    ("COORDINATOR_PORT", "5432"),
    ("COORDINATOR_DIRECTORY", "/data/coordinator"),
    ("PORT_BASE", "6000"),
    ("DATA_DIRECTORY", "(/data/p1 /data/p2)"),
];

/// Temporary workspace holding config files and data directories.
pub struct Workspace {
    /// Backing temp directory, removed on drop.
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            dir: TempDir::new().map_err(|err| err.to_string())?,
        })
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `relative` (and parents) and returns its absolute path text.
    pub fn data_dir(&self, relative: &str) -> Result<String, String> {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).map_err(|err| err.to_string())?;
        path.to_str().map(str::to_string).ok_or_else(|| "non-utf8 temp path".to_string())
    }

    /// Writes `contents` to `name` inside the workspace.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf, String> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).map_err(|err| err.to_string())?;
        Ok(path)
    }
}

/// Renders `KEY=VALUE` lines.
pub fn declarative_text(pairs: &[(&str, &str)]) -> String {
    pairs.iter().map(|(key, value)| format!("{key}={value}\n")).collect()
}

/// Base declarative pairs with `overrides` replacing or adding keys and
/// `removed` keys dropped.
pub fn declarative_with(overrides: &[(&str, &str)], removed: &[&str]) -> String {
    let mut pairs: Vec<(&str, &str)> = BASE_DECLARATIVE
        .iter()
        .copied()
        .filter(|(key, _)| !removed.contains(key) && !overrides.iter().any(|(o, _)| o == key))
        .collect();
    pairs.extend_from_slice(overrides);
    declarative_text(&pairs)
}
