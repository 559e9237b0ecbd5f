// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_INSTALL_BASE: &str = "/opt/duplicities";

/// One settings file as read from disk.
///
/// ```toml
/// install_base = "/srv/duplicities"
/// active_version = "0.7.06"
/// ```
///
/// Both keys are optional; absent keys leave earlier values untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Directory holding one subdirectory per installed duplicity version.
    #[serde(default)]
    pub install_base: Option<PathBuf>,

    /// Version launched by `duprun tool`.
    #[serde(default)]
    pub active_version: Option<String>,
}

/// Fully resolved engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub install_base: PathBuf,
    pub active_version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_base: PathBuf::from(DEFAULT_INSTALL_BASE),
            active_version: None,
        }
    }
}

impl Settings {
    /// Overlay a settings file read from `origin` onto `self`.
    ///
    /// A later `install_base` replaces an earlier one, unless it is not an
    /// existing directory. `active_version` is taken from the first file
    /// that sets it to a non-empty value.
    pub fn merge_file(&mut self, file: SettingsFile, origin: &Path) {
        if let Some(base) = file.install_base {
            if base.is_dir() {
                self.install_base = base;
            } else {
                warn!(
                    file = %origin.display(),
                    install_base = %base.display(),
                    "install_base is not a valid directory; ignoring"
                );
            }
        }

        if self.active_version.is_some() {
            return;
        }
        if let Some(version) = file.active_version {
            let version = version.trim();
            if !version.is_empty() {
                self.active_version = Some(version.to_string());
            }
        }
    }
}
