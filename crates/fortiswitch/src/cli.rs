//! Clap derive structures for the `fortiswitch` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::{LogFormat, LogLevel, LogSink};
use crate::output::{OutputFormat, Shape};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fortiswitch -- print FortiSwitch telemetry as JSON
#[derive(Debug, Parser)]
#[command(
    name = "fortiswitch",
    version,
    about = "Fetch telemetry from a FortiSwitch management API and print it as JSON",
    long_about = "Fetch telemetry from a FortiSwitch management API and print it as JSON.\n\n\
        Every run logs in, reads one monitor endpoint, logs out, and prints the\n\
        reshaped result. Suitable for Telegraf's exec input.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch address (IP or DNS name)
    #[arg(long, short = 'H', env = "FORTISWITCH_HOST", global = true)]
    pub host: Option<String>,

    /// Management API port [default: 443]
    #[arg(long, env = "FORTISWITCH_PORT", global = true)]
    pub port: Option<u16>,

    /// Login username
    #[arg(long, short = 'u', env = "FORTISWITCH_USER", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "FORTISWITCH_PASS", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the switch's TLS certificate (true/false)
    #[arg(long, value_name = "BOOL", global = true)]
    pub verify_tls: Option<String>,

    /// Accept self-signed TLS certificates (same as --verify-tls false)
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "FORTISWITCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Configuration file (TOML)
    #[arg(long, env = "FORTISWITCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// URL scheme for lab setups
    #[arg(long, global = true, hide = true)]
    pub scheme: Option<String>,

    /// Output shape: cli wraps and tags with serial, telegraf tags with serial_number
    #[arg(long, global = true)]
    pub shape: Option<Shape>,

    /// Output format
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// Log verbosity
    #[arg(long, env = "LOGLEVEL", global = true, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Log destination
    #[arg(long, global = true)]
    pub log_sink: Option<LogSink>,

    /// Log file path (with --log-sink file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one telemetry operation and print the result
    Get(GetArgs),

    /// List supported operation names
    #[command(alias = "ops")]
    Operations,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Operation name, e.g. port_state or poe-summary
    pub operation: String,

    /// Print the vendor document without reshaping or enrichment
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
