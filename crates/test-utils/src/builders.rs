use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use duprun::profile::{Action, Credentials, Profile, Retention, RetentionKind};

pub const TEST_VERSION: &str = "0.7.06";

/// Builder for `Profile` to simplify test setup.
///
/// Builds the validated form directly; nothing is checked on disk.
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    pub fn new(src: &str, dest: &str) -> Self {
        Self {
            profile: Profile {
                name: "test.json".to_string(),
                src: src.to_string(),
                dest: dest.to_string(),
                duplicity_version: TEST_VERSION.to_string(),
                backup_actions: vec![],
                cleanup_actions: vec![],
                options: BTreeMap::new(),
                retention: None,
                credentials: Credentials::default(),
                dry_run: false,
                full: false,
            },
        }
    }

    /// Append a backup action token such as `"!backup"` or `"/bin/true"`.
    pub fn action(mut self, token: &str) -> Self {
        let action: Action = token.parse().expect("invalid action token in test");
        self.profile.backup_actions.push(action);
        self
    }

    /// Append a cleanup action without any validation, so tests can smuggle
    /// in shapes the loader would reject.
    pub fn cleanup(mut self, token: &str) -> Self {
        let action: Action = token.parse().expect("invalid action token in test");
        self.profile.cleanup_actions.push(action);
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.profile.options.insert(key.to_string(), value.to_string());
        self
    }

    pub fn retention(mut self, kind: RetentionKind, value: &str) -> Self {
        self.profile.retention = Some(Retention {
            kind,
            value: value.to_string(),
        });
        self
    }

    pub fn credentials(mut self, ftp: &str, encrypt: &str, sign: &str) -> Self {
        self.profile.credentials = Credentials {
            ftp_password: Some(ftp.to_string()),
            encrypt_password: Some(encrypt.to_string()),
            sign_password: Some(sign.to_string()),
        };
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.profile.duplicity_version = version.to_string();
        self
    }

    pub fn dry_run(mut self, val: bool) -> Self {
        self.profile.dry_run = val;
        self
    }

    pub fn full(mut self, val: bool) -> Self {
        self.profile.full = val;
        self
    }

    pub fn build(self) -> Profile {
        self.profile
    }
}

/// Lay out `<base>/<version>/{bin,site-packages}` so the version counts as
/// installed. Returns the install root.
pub fn install_fake_version(base: &Path, version: &str) -> PathBuf {
    let root = base.join(version);
    fs::create_dir_all(root.join("bin")).expect("create bin dir");
    fs::create_dir_all(root.join("site-packages")).expect("create site-packages dir");
    root
}
