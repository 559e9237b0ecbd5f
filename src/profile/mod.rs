// src/profile/mod.rs

//! Backup job profiles.
//!
//! A profile is a JSON file describing one job:
//!
//! ```json
//! {
//!   "src": "/data",
//!   "dest": "sftp://backup@host/data",
//!   "duplicity_version": "0.7.06",
//!   "backup_actions": ["/usr/local/bin/stop-db", "!backup", "!remove_old"],
//!   "cleanup_actions": ["/usr/local/bin/start-db"],
//!   "options": { "full-if-older-than": "1M" },
//!   "remove-older-than": "6M",
//!   "encrypt_password": "..."
//! }
//! ```
//!
//! - [`action`] parses action tokens into the closed [`Action`] type.
//! - [`model`] holds the raw (deserialized) and validated forms.
//! - [`loader`] reads profiles from disk.
//! - [`validate`] turns a raw profile into a trusted [`Profile`].

pub mod action;
pub mod loader;
pub mod model;
pub mod validate;

pub use action::{Action, Directive};
pub use loader::{load_and_validate, load_from_path};
pub use model::{Credentials, Profile, RawProfile, Retention, RetentionKind};
