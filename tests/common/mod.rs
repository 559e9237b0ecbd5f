// tests/common/mod.rs

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};

/// Tests that write scripts and then exec them must not overlap: a fork in
/// one test can inherit another test's still-open write handle, and the exec
/// then fails with "text file busy".
static SCRIPT_LOCK: Mutex<()> = Mutex::const_new(());

pub async fn script_lock() -> MutexGuard<'static, ()> {
    SCRIPT_LOCK.lock().await
}

/// Write an executable `/bin/sh` script.
pub fn write_script(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create script dir");
    }
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path.to_path_buf()
}

/// Lines appended to `path` so far.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
