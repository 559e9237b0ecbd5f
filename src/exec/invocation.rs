// src/exec/invocation.rs

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Complete environment handed to a child process.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// One concrete process launch: what to run, with which arguments, in which
/// environment. Built per call and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// `None` inherits the engine's own environment; `Some` replaces it
    /// entirely.
    pub env: Option<EnvMap>,
}

impl ToolInvocation {
    /// A script run with no arguments in the inherited environment.
    pub fn script(path: impl Into<PathBuf>) -> Self {
        Self {
            program: path.into(),
            args: Vec::new(),
            env: None,
        }
    }

    pub fn env_var(&self, key: &str) -> Option<&OsString> {
        self.env.as_ref().and_then(|env| env.get(&OsString::from(key)))
    }
}

// Environment values carry passphrases, so only variable names are shown.
impl fmt::Debug for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys = self
            .env
            .as_ref()
            .map(|env| env.keys().map(|k| k.to_string_lossy()).collect::<Vec<_>>());
        f.debug_struct("ToolInvocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env_keys", &env_keys)
            .finish()
    }
}
