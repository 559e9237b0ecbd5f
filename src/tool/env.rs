// src/tool/env.rs

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::exec::{EnvMap, ToolInvocation};

/// Module search path for the tool's interpreter.
pub const LIBRARY_PATH_VAR: &str = "PYTHONPATH";
/// Executable search path.
pub const SEARCH_PATH_VAR: &str = "PATH";

const SITE_PACKAGES_DIR: &str = "site-packages";
const BIN_DIR: &str = "bin";

/// A specific tool version, ready to be invoked.
#[derive(Clone)]
pub struct ResolvedTool {
    pub version: String,
    pub executable: PathBuf,
    pub env: EnvMap,
}

impl ResolvedTool {
    /// Build an invocation of this tool with `args` and any extra environment
    /// variables layered on top of the isolated environment.
    pub fn invocation<I, K, V>(&self, args: Vec<String>, extra_env: I) -> ToolInvocation
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut env = self.env.clone();
        for (k, v) in extra_env {
            env.insert(k.into(), v.into());
        }
        ToolInvocation {
            program: self.executable.clone(),
            args,
            env: Some(env),
        }
    }
}

impl std::fmt::Debug for ResolvedTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedTool")
            .field("version", &self.version)
            .field("executable", &self.executable)
            .field("env_vars", &self.env.len())
            .finish()
    }
}

/// Overlay the per-version search paths onto an ambient environment.
///
/// `<install_root>/site-packages` is prepended to [`LIBRARY_PATH_VAR`] and
/// `<install_root>/bin` to [`SEARCH_PATH_VAR`], each colon-joined with any
/// non-empty existing value. Every other variable passes through untouched.
pub fn isolated_environment<I>(install_root: &Path, ambient: I) -> EnvMap
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut env: EnvMap = ambient.into_iter().collect();

    let lib = install_root.join(SITE_PACKAGES_DIR);
    let bin = install_root.join(BIN_DIR);
    prepend_path(&mut env, LIBRARY_PATH_VAR, lib.as_os_str());
    prepend_path(&mut env, SEARCH_PATH_VAR, bin.as_os_str());

    env
}

pub(crate) fn executable_path(install_root: &Path) -> PathBuf {
    install_root.join(BIN_DIR).join(super::TOOL_NAME)
}

fn prepend_path(env: &mut EnvMap, key: &str, head: &OsStr) {
    let mut value = head.to_os_string();
    if let Some(existing) = env.get(OsStr::new(key)).filter(|v| !v.is_empty()) {
        value.push(":");
        value.push(existing);
    }
    env.insert(OsString::from(key), value);
}
