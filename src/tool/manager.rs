// src/tool/manager.rs

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Settings;
use crate::errors::{DuprunError, Result};
use crate::tool::env::{executable_path, isolated_environment, ResolvedTool};

/// Query side of the version manager: what is installed, and how to run it.
#[derive(Debug, Clone)]
pub struct VersionManager {
    install_base: PathBuf,
}

impl VersionManager {
    pub fn new(install_base: impl Into<PathBuf>) -> Self {
        Self {
            install_base: install_base.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.install_base.clone())
    }

    pub fn install_base(&self) -> &Path {
        &self.install_base
    }

    pub fn install_root(&self, version: &str) -> PathBuf {
        self.install_base.join(version)
    }

    pub fn is_installed(&self, version: &str) -> bool {
        is_version_name(version) && self.install_root(version).exists()
    }

    /// Names of all installed versions, sorted. A missing install base
    /// means nothing is installed.
    pub fn installed_versions(&self) -> Result<BTreeSet<String>> {
        let entries = match fs::read_dir(&self.install_base) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    install_base = %self.install_base.display(),
                    "install base does not exist; no versions installed"
                );
                return Ok(BTreeSet::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut versions = BTreeSet::new();
        for entry in entries {
            let name = entry?.file_name();
            if let Some(name) = name.to_str().filter(|n| is_version_name(n)) {
                versions.insert(name.to_string());
            }
        }
        Ok(versions)
    }

    /// Resolve `version` against the current process environment.
    pub fn resolve(&self, version: &str) -> Result<ResolvedTool> {
        self.resolve_with_env(version, std::env::vars_os())
    }

    /// Resolve `version` against an explicit ambient environment.
    pub fn resolve_with_env<I>(&self, version: &str, ambient: I) -> Result<ResolvedTool>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        if !self.is_installed(version) {
            return Err(DuprunError::VersionNotInstalled(version.to_string()));
        }

        let root = self.install_root(version);
        Ok(ResolvedTool {
            version: version.to_string(),
            executable: executable_path(&root),
            env: isolated_environment(&root, ambient),
        })
    }
}

fn is_version_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains('/')
}
