// crates/gpinit-config/src/lib.rs
// ============================================================================
// Module: gpinit Config Library
// Description: Cluster topology model, config front ends, and validation.
// Purpose: Resolve cluster description files into one validated topology.
// Dependencies: serde, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! `gpinit-config` resolves a human-edited cluster description into a
//! [`ClusterTopology`]: one coordinator, an optional standby, and the
//! primary/mirror segment sets. Three front ends feed one pipeline:
//!
//! - declarative `KEY=VALUE` cluster configuration files,
//! - positional input configuration files (`host~address~port~dir~dbid~content`),
//! - TOML cluster configuration files.
//!
//! Resolution is all-or-nothing and never exits the process; every failure is
//! a [`ConfigError`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod coordinator;
pub mod descriptor;
pub mod error;
pub mod expand;
pub mod input_file;
pub mod key_value;
pub mod keys;
pub mod machine_list;
pub mod render;
pub mod resolver;
pub mod sample;
pub mod structured;
pub mod topology;
pub mod validate;

mod source;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use coordinator::CoordinatorField;
pub use coordinator::CoordinatorResolution;
pub use coordinator::FieldLookup;
pub use coordinator::resolve_coordinator;
pub use descriptor::DescriptorLayout;
pub use descriptor::SegmentRecord;
pub use descriptor::decode_descriptor;
pub use descriptor::decode_with_separator;
pub use error::ConfigError;
pub use error::ValidationError;
pub use error::ValidationFailure;
pub use expand::expand_topology;
pub use input_file::InputConfig;
pub use input_file::parse_input_file;
pub use key_value::KeyValueMap;
pub use key_value::parse_key_value_file;
pub use key_value::parse_key_value_str;
pub use machine_list::read_host_list;
pub use render::render_input_config;
pub use resolver::ConfigFormat;
pub use resolver::resolve;
pub use resolver::resolve_declarative;
pub use resolver::resolve_input;
pub use sample::cluster_config_example;
pub use source::read_config_text;
pub use structured::parse_structured_file;
pub use topology::ClusterTopology;
pub use topology::NodeEndpoint;
pub use topology::SegmentLayout;
pub use topology::SegmentSet;
pub use topology::format_directory_list;
pub use topology::parse_directory_list;
pub use validate::validate_segment;
