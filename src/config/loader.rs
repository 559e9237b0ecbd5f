// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{Settings, SettingsFile};
use crate::errors::{DuprunError, Result};

pub const INSTALL_BASE_ENV: &str = "DUPRUN_INSTALL_BASE";
pub const TOOL_VERSION_ENV: &str = "DUPRUN_TOOL_VERSION";

const SYSTEM_SETTINGS: &str = "/etc/duprun/config.toml";

/// Settings files consulted when no `--config` is given, lowest priority
/// first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_SETTINGS)];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".config/duprun/config.toml"));
    }
    paths
}

/// Read a single settings file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SettingsFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let file: SettingsFile = toml::from_str(&contents)?;
    Ok(file)
}

/// Merge the given candidate files (skipping missing ones) and then apply
/// environment values looked up through `env`.
///
/// `DUPRUN_INSTALL_BASE` overrides the files. `DUPRUN_TOOL_VERSION` is only
/// a fallback for when no file names an active version.
///
/// `env` is injected so tests don't have to mutate the process environment.
pub fn resolve_settings<F>(candidates: &[PathBuf], env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        debug!(file = %path.display(), "reading settings file");
        let file = load_from_path(path).map_err(|e| {
            DuprunError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        settings.merge_file(file, path);
    }

    if let Some(base) = env(INSTALL_BASE_ENV).filter(|s| !s.trim().is_empty()) {
        settings.install_base = PathBuf::from(base.trim());
    }
    if settings.active_version.is_none() {
        settings.active_version = env(TOOL_VERSION_ENV)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }

    debug!(
        install_base = %settings.install_base.display(),
        active_version = ?settings.active_version,
        "resolved settings"
    );

    Ok(settings)
}

/// Entry point used by the binary.
///
/// An explicit path must exist; the default candidates are optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let candidates = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(DuprunError::ConfigError(format!(
                    "settings file {} does not exist",
                    path.display()
                )));
            }
            vec![path.to_path_buf()]
        }
        None => candidate_paths(),
    };

    resolve_settings(&candidates, |key| std::env::var(key).ok())
}
