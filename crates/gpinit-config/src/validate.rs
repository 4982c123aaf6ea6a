// crates/gpinit-config/src/validate.rs
// ============================================================================
// Module: Segment Record Validation
// Description: Numeric and filesystem checks for decoded descriptors.
// Purpose: Reject records whose identifiers or directories are unusable.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Checks run in a fixed order and the first failure wins: port, dbid,
//! content, then the data directory. The fixed order keeps error messages
//! reproducible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use crate::descriptor::SegmentRecord;
use crate::error::ValidationError;
use crate::error::ValidationFailure;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Field name reported for record ports.
pub const FIELD_PORT: &str = "port";
/// Field name reported for record dbids.
pub const FIELD_DB_ID: &str = "dbid";
/// Field name reported for record content ids.
pub const FIELD_CONTENT_ID: &str = "content";
/// Field name reported for record data directories.
pub const FIELD_DATA_DIRECTORY: &str = "dir";

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a decoded record.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in port, dbid, content, directory
/// order.
pub fn validate_segment(record: &SegmentRecord) -> Result<(), ValidationError> {
    parse_integer(FIELD_PORT, &record.port)?;
    parse_integer(FIELD_DB_ID, &record.db_id)?;
    parse_integer(FIELD_CONTENT_ID, &record.content_id)?;
    require_directory(FIELD_DATA_DIRECTORY, &record.data_directory)
}

/// Parses `value` as a signed integer, naming `field` on failure.
///
/// # Errors
///
/// Returns [`ValidationFailure::NotAnInteger`] when `value` is not an integer.
pub fn parse_integer(field: &str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, value, ValidationFailure::NotAnInteger))
}

/// Requires `value` to name an existing local directory.
fn require_directory(field: &str, value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && Path::new(value).is_dir() {
        Ok(())
    } else {
        Err(ValidationError::new(field, value, ValidationFailure::NotADirectory))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
