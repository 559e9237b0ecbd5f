// src/exec/passthrough.rs

use tokio::process::Command;
use tracing::debug;

use crate::errors::{DuprunError, Result};
use crate::exec::ToolInvocation;

/// Run `invocation` with the engine's own stdio, for interactive use.
///
/// Output is not captured or logged; the caller sees the tool directly.
pub async fn run_inherited(invocation: &ToolInvocation) -> Result<i32> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    if let Some(env) = &invocation.env {
        cmd.env_clear().envs(env);
    }

    debug!(?invocation, "launching with inherited stdio");

    let mut child = cmd.spawn().map_err(|source| DuprunError::LaunchFailed {
        program: invocation.program.clone(),
        source,
    })?;

    let status = child
        .wait()
        .await
        .map_err(|source| DuprunError::WaitFailed {
            program: invocation.program.clone(),
            source,
        })?;

    Ok(status.code().unwrap_or(-1))
}
