// src/exec/supervisor.rs

//! Subprocess supervision.
//!
//! Both output pipes get their own reader task. Readers forward every
//! non-empty line into one channel, so a chatty stderr can never stall
//! stdout (or the other way round) and the child never blocks on a full
//! pipe buffer. The channel closes only after both readers hit EOF; the
//! child is waited on after that, so trailing output is never lost and the
//! returned exit code is always final.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::{DuprunError, Result};
use crate::exec::ToolInvocation;

const LINE_CHANNEL_CAPACITY: usize = 256;

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        }
    }
}

/// Run `invocation`, logging each output line at debug level, and return
/// its exit code. A process killed by a signal reports `-1`.
pub async fn run(invocation: &ToolInvocation) -> Result<i32> {
    let program = invocation.program.display().to_string();
    supervise(invocation, move |stream, line| {
        debug!(program = %program, stream = stream.as_str(), "{}", line);
    })
    .await
}

/// Like [`run`], but hands each line to `on_line` instead of the log.
///
/// Lines are stripped of trailing whitespace; empty lines are dropped.
pub async fn supervise<F>(invocation: &ToolInvocation, mut on_line: F) -> Result<i32>
where
    F: FnMut(OutputStream, &str) + Send,
{
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(env) = &invocation.env {
        cmd.env_clear().envs(env);
    }

    let mut child = cmd.spawn().map_err(|source| DuprunError::LaunchFailed {
        program: invocation.program.clone(),
        source,
    })?;

    let (tx, mut rx) = mpsc::channel::<(OutputStream, String)>(LINE_CHANNEL_CAPACITY);
    let mut readers = Vec::with_capacity(2);

    if let Some(stdout) = child.stdout.take() {
        readers.push(tokio::spawn(forward_lines(
            stdout,
            OutputStream::Stdout,
            tx.clone(),
        )));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(tokio::spawn(forward_lines(
            stderr,
            OutputStream::Stderr,
            tx.clone(),
        )));
    }
    drop(tx);

    while let Some((stream, line)) = rx.recv().await {
        on_line(stream, &line);
    }

    for reader in readers {
        if let Err(e) = reader.await {
            warn!(error = %e, "output reader task did not finish cleanly");
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|source| DuprunError::WaitFailed {
            program: invocation.program.clone(),
            source,
        })?;

    let code = status.code().unwrap_or(-1);
    debug!(
        program = %invocation.program.display(),
        exit_code = code,
        success = status.success(),
        "process exited"
    );

    Ok(code)
}

/// Read `reader` to EOF, sending each non-empty line to `tx`.
///
/// Bytes are decoded lossily so invalid UTF-8 never stops the draining.
async fn forward_lines<R>(reader: R, stream: OutputStream, tx: mpsc::Sender<(OutputStream, String)>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end();
                if line.is_empty() {
                    continue;
                }
                if tx.send((stream, line.to_string())).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(stream = stream.as_str(), error = %e, "failed reading process output");
                break;
            }
        }
    }
}
