// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuprunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Profile error: {0}")]
    ProfileError(String),

    #[error("duplicity version {0} is not installed")]
    VersionNotInstalled(String),

    /// The executable could not be found or spawned.
    #[error("failed to launch {}: {source}", program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process was spawned but waiting on it failed.
    #[error("failed waiting for {}: {source}", program.display())]
    WaitFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess ran to completion and exited non-zero.
    #[error("action {action} failed with exit code {exit_code}")]
    ActionFailed { action: String, exit_code: i32 },

    /// The profile reached execution in a shape validation should have rejected.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("not implemented: {0}")]
    Unimplemented(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DuprunError {
    /// Exit code of the failed subprocess, if this error carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DuprunError::ActionFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DuprunError>;
