// src/engine/mod.rs

//! Action-execution engine.
//!
//! Control flows job -> interpreter -> runner:
//! - [`job`] walks the backup actions, then the cleanup actions, and owns
//!   the cleanup guarantee.
//! - [`interpreter`] maps one action to a process launch (or to nothing on
//!   a dry run).
//! - [`arguments`] builds duplicity's argument vectors.

pub mod arguments;
pub mod interpreter;
pub mod job;

use std::fmt;

use crate::errors::{DuprunError, Result};
use crate::exec::ProcessRunner;
use crate::profile::{Action, Profile};
use crate::tool::VersionManager;

pub use interpreter::ActionInterpreter;
pub use job::{JobExecutor, JobState};

/// One action that did not succeed, and why.
#[derive(Debug)]
pub struct ActionFailure {
    pub action: Action,
    pub error: DuprunError,
}

impl ActionFailure {
    pub fn exit_code(&self) -> Option<i32> {
        self.error.exit_code()
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.action, self.error)
    }
}

/// Why a job failed. `first` is the earliest failure and the reported
/// cause; `subsequent` holds later ones (cleanup failures) in order.
#[derive(Debug)]
pub struct JobFailure {
    pub first: ActionFailure,
    pub subsequent: Vec<ActionFailure>,
}

impl JobFailure {
    pub fn exit_code(&self) -> Option<i32> {
        self.first.exit_code()
    }

    pub fn all(&self) -> impl Iterator<Item = &ActionFailure> {
        std::iter::once(&self.first).chain(self.subsequent.iter())
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if !self.subsequent.is_empty() {
            write!(f, " (followed by {} more failure(s))", self.subsequent.len())?;
        }
        Ok(())
    }
}

/// Terminal outcome of a job.
#[derive(Debug)]
pub enum JobResult {
    Succeeded,
    Failed(JobFailure),
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Succeeded)
    }

    pub fn failure(&self) -> Option<&JobFailure> {
        match self {
            JobResult::Succeeded => None,
            JobResult::Failed(f) => Some(f),
        }
    }

    /// Collapse into the primary error, for callers that only propagate.
    pub fn into_result(self) -> Result<()> {
        match self {
            JobResult::Succeeded => Ok(()),
            JobResult::Failed(f) => Err(f.first.error),
        }
    }
}

/// Resolve the profile's duplicity version and run the job with `runner`.
///
/// The cleanup guarantee starts once the executor exists: if the version
/// cannot be resolved, no action (cleanup included) runs at all.
pub async fn run_job<R: ProcessRunner>(
    profile: &Profile,
    versions: &VersionManager,
    runner: R,
) -> Result<JobResult> {
    let tool = versions.resolve(&profile.duplicity_version)?;
    let executor = JobExecutor::new(profile, tool, runner);
    Ok(executor.run().await)
}
