// crates/gpinit-cli/src/lib.rs
// ============================================================================
// Module: gpinit CLI Library
// Description: Host checks and report rendering shared by the CLI binary.
// Purpose: Keep process-facing logic testable outside `main`.
// Dependencies: gpinit-config, thiserror
// ============================================================================

//! ## Overview
//! [`preflight`] verifies the host can initialize a cluster before any
//! configuration is read; [`summary`] renders a resolved topology for
//! operators.

pub mod preflight;
pub mod summary;
