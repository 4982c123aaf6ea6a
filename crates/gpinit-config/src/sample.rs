// crates/gpinit-config/src/sample.rs
// ============================================================================
// Module: Sample Configuration
// Description: Canonical example cluster configuration file.
// Purpose: Deterministic starting point for operators and tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A commented declarative cluster configuration that resolves cleanly. The
//! coordinator uses the current `COORDINATOR_*` key names.

/// Returns a canonical example declarative cluster configuration file.
#[must_use]
pub fn cluster_config_example() -> String {
    String::from(
        r#"# Cluster configuration file.
# Lines are KEY=VALUE; lines starting with # are ignored.

# Name displayed for this cluster.
ARRAY_NAME="Example Cluster"

# Prefix for segment data directories (gpseg0, gpseg1, ...).
SEG_PREFIX=gpseg

# Remote shell used to reach segment hosts.
TRUSTED_SHELL=ssh

CHECK_POINT_SEGMENTS=8
ENCODING=UNICODE
DEFAULT_QD_MAX_CONNECT=250
QE_CONNECT_FACTOR=3

# Optional file listing segment hosts, one per line.
# MACHINE_LIST_FILE=/home/gpadmin/hostfile

# Coordinator node (MASTER_* names are accepted for older files).
COORDINATOR_HOSTNAME=cdw
COORDINATOR_PORT=5432
COORDINATOR_DIRECTORY=/data/coordinator

# Optional standby coordinator; set all three or none.
# STANDBY_HOSTNAME=scdw
# STANDBY_PORT=5432
# STANDBY_DIRECTORY=/data/standby

# Primary segments: one directory per segment on each host.
PORT_BASE=6000
declare -a DATA_DIRECTORY=(/data/primary /data/primary)

# Mirror segments: uncomment both lines to enable mirroring.
# MIRROR_PORT_BASE=7000
# declare -a MIRROR_DATA_DIRECTORY=(/data/mirror /data/mirror)
"#,
    )
}
