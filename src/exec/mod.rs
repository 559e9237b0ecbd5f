// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually launching scripts and duplicity,
//! using `tokio::process::Command`.
//!
//! - [`invocation`] defines the `ToolInvocation` value every launch is
//!   described by.
//! - [`supervisor`] runs a process with both output pipes drained into the
//!   log and returns its exit code.
//! - [`backend`] provides the `ProcessRunner` trait and the production
//!   `SupervisedRunner`, which tests replace with a fake.
//! - [`passthrough`] launches with inherited stdio (`duprun tool`).

pub mod backend;
pub mod invocation;
pub mod passthrough;
pub mod supervisor;

pub use backend::{ProcessRunner, SupervisedRunner};
pub use invocation::{EnvMap, ToolInvocation};
pub use supervisor::{supervise, OutputStream};
