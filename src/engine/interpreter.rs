// src/engine/interpreter.rs

use std::path::Path;

use tracing::{debug, error, info};

use crate::engine::arguments;
use crate::errors::{DuprunError, Result};
use crate::exec::{ProcessRunner, ToolInvocation};
use crate::profile::{Action, Directive, Profile};
use crate::tool::ResolvedTool;

/// Turns one [`Action`] into at most one process launch.
///
/// Scripts run with no arguments in the engine's environment. Directives run
/// the resolved duplicity with the profile's credentials added to its
/// isolated environment. On a dry run nothing is launched; the command that
/// would have run is still logged.
pub struct ActionInterpreter<'p, R: ProcessRunner> {
    profile: &'p Profile,
    tool: ResolvedTool,
    runner: R,
}

impl<'p, R: ProcessRunner> ActionInterpreter<'p, R> {
    pub fn new(profile: &'p Profile, tool: ResolvedTool, runner: R) -> Self {
        Self {
            profile,
            tool,
            runner,
        }
    }

    pub fn profile(&self) -> &'p Profile {
        self.profile
    }

    /// Run `action`; a non-zero exit becomes `ActionFailed`.
    pub async fn invoke(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Script(path) => self.run_script(path).await,
            Action::Directive(directive) => {
                let args = arguments::for_directive(*directive, self.profile)?;
                self.call_tool(*directive, args).await
            }
        }
    }

    async fn run_script(&mut self, path: &Path) -> Result<()> {
        info!(profile = %self.profile.name, script = %path.display(), "calling script");
        if self.profile.dry_run {
            debug!(script = %path.display(), "dry run; not calling script");
            return Ok(());
        }

        let invocation = ToolInvocation::script(path);
        let code = self.runner.run(&invocation).await?;
        if code != 0 {
            error!(
                profile = %self.profile.name,
                script = %path.display(),
                exit_code = code,
                "script call failed"
            );
            return Err(DuprunError::ActionFailed {
                action: path.display().to_string(),
                exit_code: code,
            });
        }

        info!(profile = %self.profile.name, script = %path.display(), "script call completed");
        Ok(())
    }

    async fn call_tool(&mut self, directive: Directive, args: Vec<String>) -> Result<()> {
        debug!(
            profile = %self.profile.name,
            action = %directive,
            version = %self.tool.version,
            ?args,
            "calling duplicity"
        );
        if self.profile.dry_run {
            debug!(action = %directive, "dry run; not calling duplicity");
            return Ok(());
        }

        let invocation = self
            .tool
            .invocation(args, self.profile.credentials.env_vars());
        let code = self.runner.run(&invocation).await?;
        if code != 0 {
            error!(
                profile = %self.profile.name,
                action = %directive,
                exit_code = code,
                "duplicity failed"
            );
            return Err(DuprunError::ActionFailed {
                action: directive.to_string(),
                exit_code: code,
            });
        }

        debug!(action = %directive, "duplicity run finished");
        Ok(())
    }
}
