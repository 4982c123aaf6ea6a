// crates/gpinit-config/src/keys.rs
// ============================================================================
// Module: Config Keys
// Description: Recognized keys of the cluster and input configuration files.
// Purpose: Single source of truth for key spelling across parsers and writers.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Key names as they appear on disk. Coordinator keys come in two spellings:
//! the current `COORDINATOR_*` form and the legacy `MASTER_*` form.

/// Cluster display name.
pub const ARRAY_NAME: &str = "ARRAY_NAME";
/// Optional file listing segment hosts.
pub const MACHINE_LIST_FILE: &str = "MACHINE_LIST_FILE";
/// Segment directory name prefix.
pub const SEG_PREFIX: &str = "SEG_PREFIX";
/// Remote shell command.
pub const TRUSTED_SHELL: &str = "TRUSTED_SHELL";
/// Checkpoint segment setting.
pub const CHECK_POINT_SEGMENTS: &str = "CHECK_POINT_SEGMENTS";
/// Database encoding.
pub const ENCODING: &str = "ENCODING";
/// Coordinator max connections.
pub const DEFAULT_QD_MAX_CONNECT: &str = "DEFAULT_QD_MAX_CONNECT";
/// Segment connection multiplier.
pub const QE_CONNECT_FACTOR: &str = "QE_CONNECT_FACTOR";

/// Coordinator host name.
pub const COORDINATOR_HOSTNAME: &str = "COORDINATOR_HOSTNAME";
/// Coordinator port.
pub const COORDINATOR_PORT: &str = "COORDINATOR_PORT";
/// Coordinator data directory.
pub const COORDINATOR_DIRECTORY: &str = "COORDINATOR_DIRECTORY";
/// Legacy coordinator host name.
pub const MASTER_HOSTNAME: &str = "MASTER_HOSTNAME";
/// Legacy coordinator port.
pub const MASTER_PORT: &str = "MASTER_PORT";
/// Legacy coordinator data directory.
pub const MASTER_DIRECTORY: &str = "MASTER_DIRECTORY";

/// Standby host name.
pub const STANDBY_HOSTNAME: &str = "STANDBY_HOSTNAME";
/// Standby port.
pub const STANDBY_PORT: &str = "STANDBY_PORT";
/// Standby data directory.
pub const STANDBY_DIRECTORY: &str = "STANDBY_DIRECTORY";

/// Primary port base.
pub const PORT_BASE: &str = "PORT_BASE";
/// Primary data directory list.
pub const DATA_DIRECTORY: &str = "DATA_DIRECTORY";
/// Mirror port base.
pub const MIRROR_PORT_BASE: &str = "MIRROR_PORT_BASE";
/// Mirror data directory list.
pub const MIRROR_DATA_DIRECTORY: &str = "MIRROR_DATA_DIRECTORY";

/// Coordinator descriptor in input configuration files.
pub const QD_PRIMARY_ARRAY: &str = "QD_PRIMARY_ARRAY";
/// Primary descriptors in input configuration files.
pub const PRIMARY_ARRAY: &str = "PRIMARY_ARRAY";
/// Mirror descriptors in input configuration files.
pub const MIRROR_ARRAY: &str = "MIRROR_ARRAY";

/// Scalar keys every declarative file must carry, in check order.
pub const DECLARATIVE_REQUIRED_SCALARS: &[&str] = &[
    ARRAY_NAME,
    SEG_PREFIX,
    TRUSTED_SHELL,
    CHECK_POINT_SEGMENTS,
    ENCODING,
    DEFAULT_QD_MAX_CONNECT,
    QE_CONNECT_FACTOR,
];
