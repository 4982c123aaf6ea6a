// crates/gpinit-config/src/key_value.rs
// ============================================================================
// Module: Key/Value File Parser
// Description: Line-oriented KEY=VALUE parsing for declarative config files.
// Purpose: Turn a shell-style declaration file into an unordered mapping.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! Lines are processed top to bottom. Blank lines and lines whose first
//! non-whitespace character is `#` are skipped. Every other line splits on
//! its first `=`; the key loses any declaration prefix (`declare -a`,
//! `export`) and surrounding whitespace, the value loses surrounding
//! whitespace and one pair of enclosing double quotes. Later keys overwrite
//! earlier ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::source::read_config_text;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parsed key/value pairs; duplicate keys keep the last occurrence.
pub type KeyValueMap = BTreeMap<String, String>;

/// Shell declaration keywords stripped from the front of a key.
const DECLARATION_PREFIXES: &[&str] = &["declare -a", "export"];

/// One classified line of a line-oriented config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Blank or comment line.
    Skip,
    /// A `KEY=VALUE` assignment with key and value normalized.
    Assignment(&'a str, &'a str),
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads and parses a declarative key/value file.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`], [`ConfigError::FileUnreadable`] or
/// [`ConfigError::MalformedLine`].
pub fn parse_key_value_file(path: &Path) -> Result<KeyValueMap, ConfigError> {
    let text = read_config_text(path)?;
    let map = parse_key_value_str(&text, path)?;
    debug!(path = %path.display(), keys = map.len(), "parsed key/value file");
    Ok(map)
}

/// Parses key/value text; `path` is only used for error reporting.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedLine`] for the first line without `=`.
pub fn parse_key_value_str(text: &str, path: &Path) -> Result<KeyValueMap, ConfigError> {
    let mut map = KeyValueMap::new();
    for (index, raw) in text.lines().enumerate() {
        match classify_line(raw, path, index + 1)? {
            Line::Skip => {}
            Line::Assignment(key, value) => {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    Ok(map)
}

/// Classifies a single raw line, normalizing assignments.
pub(crate) fn classify_line<'a>(
    raw: &'a str,
    path: &Path,
    line: usize,
) -> Result<Line<'a>, ConfigError> {
    let trimmed = raw.trim_end_matches(['\r', '\n']);
    let content = trimmed.trim_start();
    if content.is_empty() || content.starts_with('#') {
        return Ok(Line::Skip);
    }
    let malformed = || ConfigError::MalformedLine {
        path: path.to_path_buf(),
        line,
        content: trimmed.to_string(),
    };
    let (key, value) = content.split_once('=').ok_or_else(malformed)?;
    let key = strip_declaration(key).trim();
    if key.is_empty() {
        return Err(malformed());
    }
    Ok(Line::Assignment(key, unquote(value.trim())))
}

/// Removes a leading shell declaration keyword from a key.
fn strip_declaration(key: &str) -> &str {
    let key = key.trim_start();
    DECLARATION_PREFIXES
        .iter()
        .find_map(|prefix| {
            key.strip_prefix(prefix)
                .filter(|rest| rest.starts_with(char::is_whitespace))
        })
        .unwrap_or(key)
}

/// Strips one pair of enclosing double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
