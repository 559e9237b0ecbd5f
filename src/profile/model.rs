// src/profile/model.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::profile::action::Action;

/// Profile exactly as deserialized from JSON.
///
/// Every field is optional here so that validation can report all missing
/// fields at once instead of stopping at the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub src: Option<String>,

    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub duplicity_version: Option<String>,

    #[serde(default)]
    pub backup_actions: Option<Vec<String>>,

    #[serde(default)]
    pub cleanup_actions: Vec<String>,

    /// Passed to duplicity as `--key value`.
    #[serde(default)]
    pub options: BTreeMap<String, Value>,

    #[serde(default)]
    pub ftp_password: Option<String>,

    #[serde(default)]
    pub encrypt_password: Option<String>,

    #[serde(default)]
    pub sign_password: Option<String>,

    /// Remaining top-level keys. Retention keys are picked up from here.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The three mutually exclusive pruning strategies duplicity offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionKind {
    OlderThan,
    AllButNFull,
    AllIncOfButNFull,
}

impl RetentionKind {
    pub const ALL: [RetentionKind; 3] = [
        RetentionKind::OlderThan,
        RetentionKind::AllButNFull,
        RetentionKind::AllIncOfButNFull,
    ];

    /// The duplicity command (and profile key) for this strategy.
    pub fn key(&self) -> &'static str {
        match self {
            RetentionKind::OlderThan => "remove-older-than",
            RetentionKind::AllButNFull => "remove-all-but-n-full",
            RetentionKind::AllIncOfButNFull => "remove-all-inc-of-but-n-full",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retention {
    pub kind: RetentionKind,
    /// A duplicity time string (`30D`) or a count (`3`).
    pub value: String,
}

/// Secrets handed to duplicity through its environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub ftp_password: Option<String>,
    pub encrypt_password: Option<String>,
    pub sign_password: Option<String>,
}

impl Credentials {
    pub const FTP_PASSWORD_VAR: &'static str = "FTP_PASSWORD";
    pub const PASSPHRASE_VAR: &'static str = "PASSPHRASE";
    pub const SIGN_PASSPHRASE_VAR: &'static str = "SIGN_PASSPHRASE";

    /// Environment variables for the duplicity child; absent values become
    /// empty strings.
    pub fn env_vars(&self) -> [(&'static str, String); 3] {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            (Self::FTP_PASSWORD_VAR, or_empty(&self.ftp_password)),
            (Self::PASSPHRASE_VAR, or_empty(&self.encrypt_password)),
            (Self::SIGN_PASSPHRASE_VAR, or_empty(&self.sign_password)),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("ftp_password", &mask(&self.ftp_password))
            .field("encrypt_password", &mask(&self.encrypt_password))
            .field("sign_password", &mask(&self.sign_password))
            .finish()
    }
}

/// A validated profile. Only `dry_run` and `full` change after
/// construction, and only at job start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Used to tag log lines, usually the profile's file name.
    pub name: String,
    pub src: String,
    pub dest: String,
    pub duplicity_version: String,
    pub backup_actions: Vec<Action>,
    pub cleanup_actions: Vec<Action>,
    pub options: BTreeMap<String, String>,
    pub retention: Option<Retention>,
    pub credentials: Credentials,
    pub dry_run: bool,
    pub full: bool,
}

impl Profile {
    pub fn with_run_mode(mut self, dry_run: bool, full: bool) -> Self {
        self.dry_run = dry_run;
        self.full = full;
        self
    }
}
