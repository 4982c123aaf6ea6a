// crates/gpinit-cli/src/main.rs
// ============================================================================
// Module: gpinitsystem CLI Entry Point
// Description: Resolves cluster configuration files and reports the topology.
// Purpose: Validate a cluster description before initialization starts.
// Dependencies: clap, gpinit-config, serde_json, thiserror, tracing.
// ============================================================================

//! ## Overview
//! `gpinitsystem` checks the host environment, resolves a cluster
//! configuration (`-c`) or input configuration (`-I`) file, and prints a
//! summary of the topology. With `-O` the topology is expanded across the
//! segment host list and written as an input configuration file.
//!
//! Exit codes: 0 on success, 1 on any configuration or environment failure,
//! 2 for command-line usage errors.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use gpinit_cli::preflight::PreflightEnv;
use gpinit_cli::preflight::run_preflight;
use gpinit_cli::summary::render_summary;
use gpinit_config::ClusterTopology;
use gpinit_config::ConfigFormat;
use gpinit_config::cluster_config_example;
use gpinit_config::expand_topology;
use gpinit_config::read_host_list;
use gpinit_config::render_input_config;
use gpinit_config::resolve;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Help footer describing exit codes.
const AFTER_HELP: &str = "Return codes:\n  0 - cluster configuration is valid\n  1 - \
                          configuration or environment error\n  2 - invalid command line";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "gpinitsystem",
    about = "Validate a cluster configuration and describe the cluster it defines.",
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
struct Cli {
    /// Cluster configuration file (KEY=VALUE or TOML, see --format).
    #[arg(
        short = 'c',
        value_name = "CLUSTER_CONFIG",
        conflicts_with = "input_config",
        required_unless_present_any = ["input_config", "show_version", "sample"]
    )]
    cluster_config: Option<PathBuf>,
    /// Input configuration file listing every segment instance.
    #[arg(short = 'I', value_name = "INPUT_CONFIG")]
    input_config: Option<PathBuf>,
    /// Format of the cluster configuration file given with -c.
    #[arg(long, value_enum, default_value_t = FormatArg::Declarative)]
    format: FormatArg,
    /// Segment host list; overrides MACHINE_LIST_FILE.
    #[arg(short = 'h', value_name = "HOSTFILE")]
    hostfile: Option<PathBuf>,
    /// Write the expanded topology as an input configuration file.
    #[arg(short = 'O', value_name = "OUTPUT_CONFIG")]
    output_config: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short = 'D', conflicts_with = "quiet")]
    debug: bool,
    /// Only log warnings and errors.
    #[arg(short = 'q')]
    quiet: bool,
    /// Print the resolved topology as JSON instead of the summary.
    #[arg(long)]
    json: bool,
    /// Print an example cluster configuration file and exit.
    #[arg(long)]
    sample: bool,
    /// Print help information.
    #[allow(dead_code, reason = "Consumed by clap to print help.")]
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
}

/// Cluster configuration file formats accepted by `-c`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    /// `KEY=VALUE` lines.
    Declarative,
    /// TOML table.
    Toml,
}

impl From<FormatArg> for ConfigFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Declarative => Self::Declarative,
            FormatArg::Toml => Self::Structured,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("gpinitsystem {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    if cli.sample {
        write_stdout_bytes(cluster_config_example().as_bytes())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    run_preflight(&PreflightEnv::from_process())
        .map_err(|err| CliError::new(err.to_string()))?;

    let (path, format) = match (&cli.cluster_config, &cli.input_config) {
        (Some(path), None) => (path, ConfigFormat::from(cli.format)),
        (None, Some(path)) => (path, ConfigFormat::Input),
        _ => return Err(CliError::new("exactly one of -c or -I is required".to_string())),
    };
    let mut topology = resolve(path, format).map_err(|err| CliError::new(err.to_string()))?;

    if let Some(output) = &cli.output_config {
        topology = write_input_config(&topology, cli.hostfile.as_deref(), output)?;
    } else if let Some(hostfile) = &cli.hostfile {
        let hosts = read_host_list(hostfile).map_err(|err| CliError::new(err.to_string()))?;
        info!(hosts = hosts.len(), "segment host list is readable");
    }

    let report = if cli.json {
        serde_json::to_string_pretty(&topology)
            .map_err(|err| CliError::new(format!("unable to encode topology: {err}")))?
    } else {
        render_summary(&topology)
    };
    write_stdout_line(report.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the flags.
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================================================
// SECTION: Output Configuration
// ============================================================================

/// Expands `topology` and writes it to `output`, returning the expansion.
fn write_input_config(
    topology: &ClusterTopology,
    hostfile: Option<&Path>,
    output: &Path,
) -> CliResult<ClusterTopology> {
    let host_source = hostfile.map(Path::to_path_buf).or_else(|| {
        topology.machine_list_file.as_deref().map(PathBuf::from)
    });
    let hosts = match host_source {
        Some(path) => read_host_list(&path).map_err(|err| CliError::new(err.to_string()))?,
        None => Vec::new(),
    };
    let expanded =
        expand_topology(topology, &hosts).map_err(|err| CliError::new(err.to_string()))?;
    let text = render_input_config(&expanded).map_err(|err| CliError::new(err.to_string()))?;
    fs::write(output, text).map_err(|err| {
        CliError::new(format!("unable to write {}: {err}", output.display()))
    })?;
    info!(path = %output.display(), "wrote input configuration");
    Ok(expanded)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("gpinitsystem: error: {message}"));
    ExitCode::FAILURE
}
