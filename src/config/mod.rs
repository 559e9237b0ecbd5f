// src/config/mod.rs

//! Engine settings for duprun.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Discover and merge settings files, then apply environment overrides
//!   (`loader.rs`).
//!
//! The resolved [`Settings`] value is handed to the version manager
//! explicitly; nothing here is global.

pub mod loader;
pub mod model;

pub use loader::{candidate_paths, load_settings, resolve_settings};
pub use model::{Settings, SettingsFile, DEFAULT_INSTALL_BASE};
