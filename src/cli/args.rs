// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Enforcer - build-time rule checks
///
/// Verifies environment variables, file checksums and dependency
/// coordinates before a build proceeds.
#[derive(Parser, Debug)]
#[command(name = "enforcer")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Build-time enforcer rules", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ENFORCER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run every configured rule (default command)
    Check(CheckArgs),

    /// Test a coordinate against exclude/include patterns
    Match(MatchArgs),

    /// Print version information
    Version,

    /// Create an example enforcer.toml
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Stop at the first failing rule
    #[arg(long)]
    pub fail_fast: bool,

    /// Directory relative rule paths are resolved against
    /// (default: the configuration file's directory)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

/// Arguments for the match command.
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Coordinate as group[:artifact[:version[:type[:scope[:classifier]]]]]
    pub coordinate: String,

    /// Exclude pattern (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Include pattern (repeatable)
    #[arg(short = 'i', long = "include", value_name = "PATTERN")]
    pub includes: Vec<String>,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check(CheckArgs::default()))
    }
}
