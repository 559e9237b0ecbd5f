// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! The action interpreter talks to a `ProcessRunner` instead of spawning
//! processes itself. This makes it easy to swap in a fake runner in tests
//! while keeping the production implementation in [`supervisor`].
//!
//! - `SupervisedRunner` is the implementation used by `duprun`. It hands the
//!   invocation to the supervisor, which drains stdout/stderr into the log.
//! - Tests can provide their own `ProcessRunner` that records invocations
//!   and returns scripted exit codes.
//!
//! [`supervisor`]: super::supervisor

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::ToolInvocation;

use super::supervisor;

/// Trait abstracting how a single process launch is carried out.
pub trait ProcessRunner: Send {
    /// Run `invocation` to completion and return its exit code.
    ///
    /// A non-zero exit code is data, not an error; `Err` means the process
    /// could not be launched or waited on.
    fn run<'a>(
        &'a mut self,
        invocation: &'a ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>>;
}

/// Real runner used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SupervisedRunner;

impl SupervisedRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SupervisedRunner {
    fn run<'a>(
        &'a mut self,
        invocation: &'a ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        Box::pin(supervisor::run(invocation))
    }
}
