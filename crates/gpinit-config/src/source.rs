// crates/gpinit-config/src/source.rs
// ============================================================================
// Module: Config Source Reader
// Description: Bounded, UTF-8 checked reads of configuration files.
// Purpose: Share one fail-closed file loader across every front end.
// Dependencies: std
// ============================================================================

//! ## Overview
//! All front ends read their input through [`read_config_text`]. The file
//! handle is scoped to the call, so it is released on every exit path,
//! including size and encoding failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Reader
// ============================================================================

/// Reads a configuration file into a string, enforcing size and path limits.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`] when the path does not exist and
/// [`ConfigError::FileUnreadable`] on any other I/O or limit failure.
pub fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    validate_path(path)?;
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => unreadable(path, err.to_string()),
    })?;
    let limit = u64::try_from(MAX_CONFIG_FILE_SIZE).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    file.take(limit + 1)
        .read_to_end(&mut bytes)
        .map_err(|err| unreadable(path, err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(unreadable(path, "config file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes).map_err(|_| unreadable(path, "config file must be utf-8".to_string()))
}

/// Validates a path against length limits before touching the filesystem.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return Err(unreadable(path, "config path is empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(unreadable(path, "config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(unreadable(path, "config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Builds a [`ConfigError::FileUnreadable`] for `path`.
fn unreadable(path: &Path, reason: String) -> ConfigError {
    ConfigError::FileUnreadable {
        path: path.to_path_buf(),
        reason,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
