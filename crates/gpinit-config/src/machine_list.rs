// crates/gpinit-config/src/machine_list.rs
// ============================================================================
// Module: Machine List
// Description: Reads segment host lists.
// Purpose: Supply the hosts a segment layout is expanded across.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! One host per line; blank lines and `#` comments are skipped and repeated
//! hosts keep their first position.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::source::read_config_text;

/// Reads a host list file.
///
/// # Errors
///
/// Returns file access errors, or [`ConfigError::HostList`] when the file
/// names no hosts.
pub fn read_host_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let hosts = parse_host_list(&read_config_text(path)?);
    if hosts.is_empty() {
        return Err(ConfigError::HostList(format!("{} lists no hosts", path.display())));
    }
    debug!(path = %path.display(), hosts = hosts.len(), "read host list");
    Ok(hosts)
}

/// Parses host list text into distinct hosts in first-seen order.
#[must_use]
pub fn parse_host_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|host| seen.insert(*host))
        .map(str::to_string)
        .collect()
}
