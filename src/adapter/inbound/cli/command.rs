//! Command-line interface definitions.
//!
//! Defines the CLI structure for arbscan using `clap`: a scan runner, a
//! configuration check and a mapping listing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;
use crate::domain::ScanMode;

/// Read-only cross-venue arbitrage scanner for Kalshi and Polymarket
#[derive(Parser, Debug)]
#[command(name = "arbscan")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan mapped pairs for cross-venue opportunities
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// List the pairs a scan would cover
    Mappings(MappingsArgs),
}

/// Subcommands for `arbscan check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and scan environment.
    Config(ConfigPathArg),
}

/// Config path argument shared by simple subcommands.
#[derive(clap::Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `arbscan run`.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Mapping tiers to scan (safe, lab); overrides MODE
    #[arg(long)]
    pub mode: Option<ScanMode>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Use built-in fixture quotes and mappings instead of live venues
    #[arg(long)]
    pub stub: bool,

    /// Write each cycle report as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `arbscan mappings`.
#[derive(clap::Args, Debug)]
pub struct MappingsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Mapping tiers to list (safe, lab); overrides MODE
    #[arg(long)]
    pub mode: Option<ScanMode>,

    /// List the built-in fixture mappings
    #[arg(long)]
    pub stub: bool,
}
