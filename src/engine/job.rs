// src/engine/job.rs

//! Job state machine.
//!
//! ```text
//! Running(0) -> Running(1) -> ... -> Cleanup -> Succeeded
//!      \____________ first failure ___/   \---> Failed
//! ```
//!
//! Backup actions run strictly in order and the first failure skips the
//! rest. Cleanup always runs, exactly once, every entry in declared order,
//! whatever happened before it. The earliest failure stays the primary
//! cause; anything that fails afterwards is attached behind it.

use tracing::{error, info, warn};

use crate::engine::interpreter::ActionInterpreter;
use crate::engine::{ActionFailure, JobFailure, JobResult};
use crate::errors::DuprunError;
use crate::exec::ProcessRunner;
use crate::profile::{Action, Profile};
use crate::tool::ResolvedTool;

/// Where the executor currently is.
#[derive(Debug)]
pub enum JobState {
    Running(usize),
    Cleanup,
    Succeeded,
    Failed(JobFailure),
}

pub struct JobExecutor<'p, R: ProcessRunner> {
    interpreter: ActionInterpreter<'p, R>,
    failures: Vec<ActionFailure>,
}

impl<'p, R: ProcessRunner> JobExecutor<'p, R> {
    pub fn new(profile: &'p Profile, tool: ResolvedTool, runner: R) -> Self {
        Self {
            interpreter: ActionInterpreter::new(profile, tool, runner),
            failures: Vec::new(),
        }
    }

    /// Drive the state machine to a terminal state.
    pub async fn run(mut self) -> JobResult {
        let profile = self.interpreter.profile();
        info!(
            profile = %profile.name,
            actions = profile.backup_actions.len(),
            cleanup_actions = profile.cleanup_actions.len(),
            dry_run = profile.dry_run,
            full = profile.full,
            "starting job"
        );

        let mut state = JobState::Running(0);
        loop {
            state = match state {
                JobState::Running(index) => self.step(index).await,
                JobState::Cleanup => {
                    self.run_cleanup().await;
                    self.finish()
                }
                JobState::Succeeded => {
                    info!(profile = %profile.name, "job succeeded");
                    return JobResult::Succeeded;
                }
                JobState::Failed(failure) => {
                    error!(profile = %profile.name, %failure, "job failed");
                    return JobResult::Failed(failure);
                }
            };
        }
    }

    async fn step(&mut self, index: usize) -> JobState {
        let profile = self.interpreter.profile();
        let Some(action) = profile.backup_actions.get(index) else {
            return JobState::Cleanup;
        };

        match self.interpreter.invoke(action).await {
            Ok(()) => JobState::Running(index + 1),
            Err(error) => {
                let skipped = profile.backup_actions.len() - index - 1;
                error!(
                    profile = %profile.name,
                    %action,
                    %error,
                    skipped,
                    "backup action failed; skipping to cleanup"
                );
                self.failures.push(ActionFailure {
                    action: action.clone(),
                    error,
                });
                JobState::Cleanup
            }
        }
    }

    async fn run_cleanup(&mut self) {
        let profile = self.interpreter.profile();
        for action in &profile.cleanup_actions {
            let result = match action {
                Action::Directive(d) => Err(DuprunError::InvariantViolation(format!(
                    "cleanup actions must be scripts, got {d}"
                ))),
                Action::Script(_) => self.interpreter.invoke(action).await,
            };

            if let Err(error) = result {
                if self.failures.is_empty() {
                    error!(profile = %profile.name, %action, %error, "cleanup action failed");
                } else {
                    warn!(
                        profile = %profile.name,
                        %action,
                        %error,
                        "cleanup action failed after an earlier failure"
                    );
                }
                self.failures.push(ActionFailure {
                    action: action.clone(),
                    error,
                });
            }
        }
    }

    fn finish(&mut self) -> JobState {
        let mut failures = std::mem::take(&mut self.failures).into_iter();
        match failures.next() {
            None => JobState::Succeeded,
            Some(first) => JobState::Failed(JobFailure {
                first,
                subsequent: failures.collect(),
            }),
        }
    }
}
