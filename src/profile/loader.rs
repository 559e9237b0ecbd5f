// src/profile/loader.rs

use std::fs;
use std::path::Path;

use crate::errors::{DuprunError, Result};
use crate::profile::model::{Profile, RawProfile};
use crate::tool::VersionManager;

/// Load a profile and return the raw `RawProfile`.
///
/// This only performs JSON deserialization; use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProfile> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DuprunError::ProfileError(format!(
            "profile path {} must be a valid file",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path)?;
    let raw: RawProfile = serde_json::from_str(&contents)?;
    Ok(raw)
}

/// Load a profile from disk and validate it against the installed versions.
///
/// The profile is named after its file, which is what log lines use.
pub fn load_and_validate(path: impl AsRef<Path>, versions: &VersionManager) -> Result<Profile> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    raw.validate(&name, versions)
}
