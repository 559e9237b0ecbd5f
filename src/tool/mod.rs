// src/tool/mod.rs

//! Locating and isolating installed duplicity versions.
//!
//! Several versions live side by side under one install base:
//!
//! ```text
//! /opt/duplicities/
//!   0.7.06/bin/duplicity
//!   0.7.06/site-packages/...
//!   0.8.21/bin/duplicity
//!   .src/            (ignored: dot-entries are never versions)
//! ```
//!
//! - [`manager`] answers "which versions are installed" and hands out
//!   resolved tools.
//! - [`env`] builds the isolated environment each version runs with.

pub mod env;
pub mod manager;

pub use env::{isolated_environment, ResolvedTool, LIBRARY_PATH_VAR, SEARCH_PATH_VAR};
pub use manager::VersionManager;

/// Executable name inside `<install_root>/bin`.
pub const TOOL_NAME: &str = "duplicity";
