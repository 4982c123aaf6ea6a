// crates/gpinit-config/src/structured.rs
// ============================================================================
// Module: Structured Config Front End
// Description: Reads TOML cluster configuration into the key/value model.
// Purpose: Feed TOML files through the same pipeline as declarative files.
// Dependencies: toml, tracing
// ============================================================================

//! ## Overview
//! The TOML file uses the declarative top-level keys. Scalars are rendered
//! as text; a string array is turned into the `(dir1 dir2)` list form so the
//! declarative resolver sees one uniform mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use toml::Table;
use toml::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::key_value::KeyValueMap;
use crate::source::read_config_text;
use crate::topology::format_directory_list;

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads a TOML cluster configuration file into a key/value mapping.
///
/// # Errors
///
/// Returns file access errors or [`ConfigError::StructuredParse`].
pub fn parse_structured_file(path: &Path) -> Result<KeyValueMap, ConfigError> {
    let text = read_config_text(path)?;
    let map = parse_structured_str(&text, path)?;
    debug!(path = %path.display(), keys = map.len(), "parsed structured configuration");
    Ok(map)
}

/// Parses TOML text; `path` is only used in errors.
///
/// # Errors
///
/// Returns [`ConfigError::StructuredParse`] on syntax errors, nested tables
/// or arrays holding anything but strings.
pub fn parse_structured_str(text: &str, path: &Path) -> Result<KeyValueMap, ConfigError> {
    let table: Table = toml::from_str(text).map_err(|err| ConfigError::StructuredParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let mut map = KeyValueMap::new();
    for (key, value) in table {
        let text = scalar_text(&key, &value).map_err(|reason| ConfigError::StructuredParse {
            path: path.to_path_buf(),
            reason,
        })?;
        map.insert(key, text);
    }
    Ok(map)
}

/// Renders a TOML value as declarative text.
///
/// Strings may not carry control characters and array entries may not carry
/// whitespace; either would not survive the single-line declarative form.
fn scalar_text(key: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::String(text) => {
            if text.chars().any(char::is_control) {
                return Err(format!("{key} must not contain control characters"));
            }
            Ok(text.clone())
        }
        Value::Integer(number) => Ok(number.to_string()),
        Value::Float(number) => Ok(number.to_string()),
        Value::Boolean(flag) => Ok(flag.to_string()),
        Value::Datetime(stamp) => Ok(stamp.to_string()),
        Value::Array(items) => {
            let entries = items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<&str>>>()
                .ok_or_else(|| format!("{key} must be a scalar or an array of strings"))?;
            let spaced = entries.iter().find(|entry| entry.chars().any(char::is_whitespace));
            if let Some(entry) = spaced {
                return Err(format!("{key} entry \"{entry}\" must not contain whitespace"));
            }
            if entries.iter().any(|entry| entry.chars().any(char::is_control)) {
                return Err(format!("{key} must not contain control characters"));
            }
            Ok(format_directory_list(&entries))
        }
        Value::Table(_) => Err(format!("{key} must be a scalar or an array of strings")),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    fn parse(text: &str) -> Result<KeyValueMap, ConfigError> {
        parse_structured_str(text, Path::new("cluster.toml"))
    }

    #[test]
    fn renders_scalars_as_text() {
        let text = "ARRAY_NAME = \"demo\"\nPORT_BASE = 40000\nHEAP_CHECKSUM = true\n";
        let map = parse(text).unwrap();
        assert_eq!(map.get("ARRAY_NAME").map(String::as_str), Some("demo"));
        assert_eq!(map.get("PORT_BASE").map(String::as_str), Some("40000"));
        assert_eq!(map.get("HEAP_CHECKSUM").map(String::as_str), Some("true"));
    }

    #[test]
    fn string_arrays_become_directory_lists() {
        let map = parse("DATA_DIRECTORY = [\"/data/p1\", \"/data/p2\"]\n").unwrap();
        assert_eq!(map.get("DATA_DIRECTORY").map(String::as_str), Some("(/data/p1 /data/p2)"));
    }

    #[test]
    fn parenthesized_string_is_kept() {
        let map = parse("DATA_DIRECTORY = \"(/data/p1 /data/p2)\"\n").unwrap();
        assert_eq!(map.get("DATA_DIRECTORY").map(String::as_str), Some("(/data/p1 /data/p2)"));
    }

    #[test]
    fn nested_tables_are_rejected() {
        let err = parse("[coordinator]\nport = 5432\n").unwrap_err();
        assert!(err.to_string().contains("coordinator must be a scalar"));
    }

    #[test]
    fn mixed_arrays_are_rejected() {
        let err = parse("DATA_DIRECTORY = [\"/p1\", 2]\n").unwrap_err();
        assert!(matches!(err, ConfigError::StructuredParse { .. }));
    }

    #[test]
    fn array_entries_with_whitespace_are_rejected() {
        let err = parse("DATA_DIRECTORY = [\"/data/my dir\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::StructuredParse { .. }));
        assert!(err.to_string().contains("must not contain whitespace"), "{err}");
    }

    #[test]
    fn control_characters_in_strings_are_rejected() {
        let err = parse("ENCODING = \"a\\nb\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::StructuredParse { .. }));
        assert!(err.to_string().contains("ENCODING must not contain control"), "{err}");
    }

    #[test]
    fn syntax_errors_are_structured_parse_errors() {
        let err = parse("ARRAY_NAME = \n").unwrap_err();
        assert!(matches!(err, ConfigError::StructuredParse { .. }));
    }
}
