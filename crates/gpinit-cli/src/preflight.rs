// crates/gpinit-cli/src/preflight.rs
// ============================================================================
// Module: Preflight Checks
// Description: Environment checks run before cluster configuration.
// Purpose: Fail early when the host cannot initialize a cluster.
// Dependencies: nix, thiserror, tracing
// ============================================================================

//! ## Overview
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `GPHOME` is set and non-empty.
//! 2. An executable `initdb` is on `PATH`.
//! 3. The process is not running as root.
//!
//! The environment is captured in [`PreflightEnv`] so checks can run against
//! an injected environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Installation root variable.
pub const GPHOME_ENV: &str = "GPHOME";
/// Executable that must be reachable on `PATH`.
pub const INITDB_PROGRAM: &str = "initdb";
/// Superuser uid.
const ROOT_UID: u32 = 0;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Process environment inspected by the preflight checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightEnv {
    /// Value of `GPHOME`, if set.
    pub gphome: Option<OsString>,
    /// Value of `PATH`, if set.
    pub path: Option<OsString>,
    /// Effective uid; `None` on platforms without uids.
    pub effective_uid: Option<u32>,
}

impl PreflightEnv {
    /// Captures the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            gphome: std::env::var_os(GPHOME_ENV),
            path: std::env::var_os("PATH"),
            effective_uid: current_uid(),
        }
    }
}

/// Successful preflight outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    /// Installation root from `GPHOME`.
    pub gphome: PathBuf,
    /// Resolved `initdb` executable.
    pub initdb: PathBuf,
}

/// Preflight failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    /// `GPHOME` is unset or empty.
    #[error("environment variable {GPHOME_ENV} is not set")]
    GphomeUnset,
    /// No executable `initdb` was found on `PATH`.
    #[error("unable to locate {INITDB_PROGRAM} on PATH; source greenplum_path.sh first")]
    InitdbNotFound,
    /// The process is running as the superuser.
    #[error("cannot run as root; switch to the database administrator user")]
    RunningAsRoot,
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Runs every preflight check against `env`.
///
/// # Errors
///
/// Returns the first failing [`PreflightError`].
pub fn run_preflight(env: &PreflightEnv) -> Result<PreflightReport, PreflightError> {
    let gphome = env
        .gphome
        .as_ref()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(PreflightError::GphomeUnset)?;
    let initdb = env
        .path
        .as_deref()
        .and_then(|path| find_executable(path, INITDB_PROGRAM))
        .ok_or(PreflightError::InitdbNotFound)?;
    if env.effective_uid == Some(ROOT_UID) {
        return Err(PreflightError::RunningAsRoot);
    }
    debug!(gphome = %gphome.display(), initdb = %initdb.display(), "preflight checks passed");
    Ok(PreflightReport {
        gphome,
        initdb,
    })
}

/// Searches `path_var` for an executable named `program`.
#[must_use]
pub fn find_executable(path_var: &std::ffi::OsStr, program: &str) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

/// Returns true when `path` is a regular file with an execute bit set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Returns true when `path` is a regular file.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Effective uid of the running process.
#[cfg(unix)]
fn current_uid() -> Option<u32> {
    Some(nix::unistd::geteuid().as_raw())
}

/// Uid is not tracked on this platform.
#[cfg(not(unix))]
const fn current_uid() -> Option<u32> {
    None
}

// ============================================================================
// SECTION: Tests
// ============================================================================
