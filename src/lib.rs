// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod profile;
pub mod tool;

use tracing::debug;

use crate::cli::{CliArgs, Command, ProfileArgs};
use crate::config::{load_settings, Settings};
use crate::engine::{run_job, JobResult};
use crate::errors::{DuprunError, Result};
use crate::exec::passthrough::run_inherited;
use crate::exec::SupervisedRunner;
use crate::profile::load_and_validate;
use crate::tool::VersionManager;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit code on a normal finish. A failed job surfaces
/// as its primary error; the executor has already logged every failure.
pub async fn run(args: CliArgs) -> Result<i32> {
    let settings = load_settings(args.config.as_deref())?;
    let versions = VersionManager::from_settings(&settings);

    match args.command {
        Command::Backup(profile_args) => run_profile(&versions, &profile_args, false).await,
        Command::Full(profile_args) => run_profile(&versions, &profile_args, true).await,
        Command::Restore(_) => Err(DuprunError::Unimplemented("restore".to_string())),
        Command::Versions => {
            print_versions(&versions)?;
            Ok(0)
        }
        Command::Tool { args } => run_tool(&settings, &versions, args).await,
    }
}

async fn run_profile(versions: &VersionManager, args: &ProfileArgs, full: bool) -> Result<i32> {
    let profile = load_and_validate(&args.profile, versions)?.with_run_mode(args.dry_run, full);
    debug!(?profile, "loaded profile");

    match run_job(&profile, versions, SupervisedRunner::new()).await? {
        JobResult::Succeeded => Ok(0),
        JobResult::Failed(failure) => Err(failure.first.error),
    }
}

fn print_versions(versions: &VersionManager) -> Result<()> {
    println!("Installed versions:");
    println!();
    for version in versions.installed_versions()? {
        println!(" - {version}");
    }
    Ok(())
}

/// Launch the active duplicity version with `args`, in its isolated
/// environment and with inherited stdio.
async fn run_tool(settings: &Settings, versions: &VersionManager, args: Vec<String>) -> Result<i32> {
    let version = settings.active_version.as_deref().ok_or_else(|| {
        DuprunError::ConfigError(format!(
            "no active duplicity version; set active_version in a settings file or ${}",
            config::loader::TOOL_VERSION_ENV
        ))
    })?;

    let tool = versions.resolve(version)?;
    let invocation = tool.invocation(args, std::iter::empty::<(String, String)>());
    run_inherited(&invocation).await
}
