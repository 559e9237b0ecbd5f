// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `duprun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "duprun",
    version,
    about = "Run backup profiles against a pinned duplicity installation.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DUPRUN_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Settings file (TOML) to use instead of the system/user candidates.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the profile's backup actions, then its cleanup actions.
    Backup(ProfileArgs),

    /// Like `backup`, but force a full backup.
    Full(ProfileArgs),

    /// Restore from a profile's destination (not implemented).
    Restore(ProfileArgs),

    /// List installed duplicity versions.
    Versions,

    /// Run the active duplicity version directly, passing all arguments through.
    Tool {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ProfileArgs {
    /// Path to the profile (JSON) that defines this job.
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Log every command that would run without running anything that
    /// touches the destination.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
