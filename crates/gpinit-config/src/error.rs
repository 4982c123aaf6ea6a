// crates/gpinit-config/src/error.rs
// ============================================================================
// Module: Resolution Errors
// Description: Typed failures for cluster configuration resolution.
// Purpose: Give the CLI layer one error kind per failure class.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure in file access, parsing, decoding or validation surfaces as a
//! [`ConfigError`]. The library never terminates the process; the caller maps
//! each variant to a message and an exit code.
//!
//! I/O failures are flattened to strings at the boundary so errors stay
//! `Clone + Eq` and can be compared directly in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::coordinator::CoordinatorField;

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Value does not parse as an integer.
    NotAnInteger,
    /// Value does not name an existing local directory.
    NotADirectory,
    /// Value is a list with no entries.
    Empty,
    /// Value parses but falls outside the accepted range.
    OutOfRange,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotAnInteger => "is not a valid number",
            Self::NotADirectory => "is not a valid directory",
            Self::Empty => "lists no entries",
            Self::OutOfRange => "is out of range",
        };
        f.write_str(text)
    }
}

/// A field that failed a numeric or filesystem check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: '{value}' {failure}")]
pub struct ValidationError {
    /// Name of the failing field (record field or config key).
    pub field: String,
    /// Offending value exactly as supplied.
    pub value: String,
    /// Failure classification.
    pub failure: ValidationFailure,
}

impl ValidationError {
    /// Builds a validation error for `field` holding `value`.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        failure: ValidationFailure,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            failure,
        }
    }
}

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Cluster configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration path does not exist.
    #[error("configuration file {} does not exist", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// Configuration file exists but could not be read.
    #[error("unable to read configuration file {}: {reason}", path.display())]
    FileUnreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O or limit failure.
        reason: String,
    },
    /// A non-comment, non-blank line lacks the `=` separator.
    #[error("{}:{line}: expected KEY=VALUE, found '{content}'", path.display())]
    MalformedLine {
        /// File containing the line.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Raw line content.
        content: String,
    },
    /// A positional descriptor could not be split into a known layout.
    #[error("descriptor '{descriptor}' is malformed: {reason}")]
    MalformedDescriptor {
        /// Offending descriptor string.
        descriptor: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A mandatory key is absent from the configuration file.
    #[error("required field {key} is not set")]
    MissingRequiredField {
        /// Key that was expected.
        key: String,
    },
    /// `PORT_BASE` is absent, so primary ports cannot be assigned.
    #[error("PORT_BASE is not set; primary segment ports cannot be assigned")]
    MissingPrimaryPortBase,
    /// Neither the coordinator nor the legacy key supplied a coordinator field.
    #[error(
        "coordinator {field} is not set (expected {} or {})",
        field.coordinator_key(),
        field.legacy_key()
    )]
    MissingCoordinatorField {
        /// Coordinator attribute that is missing.
        field: CoordinatorField,
    },
    /// A numeric or filesystem check failed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Mirror and primary segment counts differ.
    #[error("{primaries} primary segments but {mirrors} mirror segments")]
    MirrorCountMismatch {
        /// Number of primary segments.
        primaries: usize,
        /// Number of mirror segments.
        mirrors: usize,
    },
    /// The structured (TOML) front end rejected the file.
    #[error("unable to parse structured configuration {}: {reason}", path.display())]
    StructuredParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser or shape failure.
        reason: String,
    },
    /// The machine list could not supply hosts.
    #[error("host list error: {0}")]
    HostList(String),
    /// Mirroring was requested with too few hosts to separate mirrors.
    #[error("mirroring requires at least two hosts, found {hosts}")]
    InsufficientHosts {
        /// Number of distinct hosts available.
        hosts: usize,
    },
    /// A declarative layout was used where concrete instances are required.
    #[error("segment layout has not been expanded against a host list")]
    Unexpanded,
}
