// crates/gpinit-config/src/input_file.rs
// ============================================================================
// Module: Input Configuration Reader
// Description: Reads positional input configuration files.
// Purpose: Separate scalar assignments from descriptor arrays.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! An input configuration file is a key/value file whose array-valued keys
//! hold raw descriptor strings, written either inline or as a block:
//!
//! ```text
//! QD_PRIMARY_ARRAY=mdw~mdw~5432~/data/master/gpseg-1~1~-1
//! declare -a PRIMARY_ARRAY=(
//! sdw1~sdw1~40000~/data/primary/gpseg0~2~0
//! )
//! ```
//!
//! A block may also carry entries on its opening line after `(`, and the
//! closing `)` may end the line of its last entry.
//!
//! Descriptors are returned undecoded; decoding and validation belong to the
//! resolver.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::key_value::KeyValueMap;
use crate::key_value::Line;
use crate::key_value::classify_line;
use crate::source::read_config_text;
use crate::topology::parse_directory_list;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Scalars and descriptor arrays read from an input configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputConfig {
    /// Plain `KEY=VALUE` assignments.
    pub scalars: KeyValueMap,
    /// Array assignments, entries in file order.
    pub arrays: BTreeMap<String, Vec<String>>,
}

/// Array block being collected across lines.
struct OpenBlock {
    /// Key the block assigns.
    key: String,
    /// One-based line of the opening `(`.
    line: usize,
    /// Raw opening line.
    content: String,
    /// Entries seen so far.
    entries: Vec<String>,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads and parses an input configuration file.
///
/// # Errors
///
/// Returns file access errors or [`ConfigError::MalformedLine`].
pub fn parse_input_file(path: &Path) -> Result<InputConfig, ConfigError> {
    let text = read_config_text(path)?;
    let config = parse_input_str(&text, path)?;
    debug!(
        path = %path.display(),
        scalars = config.scalars.len(),
        arrays = config.arrays.len(),
        "parsed input configuration"
    );
    Ok(config)
}

/// Parses input configuration text; `path` is only used in errors.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedLine`] for a line without `=` outside a
/// block, or for a block that is never closed.
pub fn parse_input_str(text: &str, path: &Path) -> Result<InputConfig, ConfigError> {
    let mut config = InputConfig::default();
    let mut open: Option<OpenBlock> = None;
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if let Some(block) = open.as_mut() {
            let entry = raw.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let closing = entry.strip_suffix(')');
            block.entries.extend(closing.unwrap_or(entry).split_whitespace().map(str::to_string));
            if closing.is_some()
                && let Some(done) = open.take()
            {
                config.arrays.insert(done.key, done.entries);
            }
            continue;
        }
        let Line::Assignment(key, value) = classify_line(raw, path, line)? else {
            continue;
        };
        match value.strip_prefix('(') {
            Some(rest) if rest.ends_with(')') => {
                config.arrays.insert(key.to_string(), parse_directory_list(value));
            }
            Some(rest) => {
                open = Some(OpenBlock {
                    key: key.to_string(),
                    line,
                    content: raw.trim_end().to_string(),
                    entries: rest.split_whitespace().map(str::to_string).collect(),
                });
            }
            None => {
                config.scalars.insert(key.to_string(), value.to_string());
            }
        }
    }
    if let Some(block) = open {
        return Err(ConfigError::MalformedLine {
            path: path.to_path_buf(),
            line: block.line,
            content: block.content,
        });
    }
    Ok(config)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
