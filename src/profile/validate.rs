// src/profile/validate.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::errors::{DuprunError, Result};
use crate::profile::action::{Action, Directive};
use crate::profile::model::{Credentials, Profile, RawProfile, Retention, RetentionKind};
use crate::tool::VersionManager;

impl RawProfile {
    /// Check every invariant a [`Profile`] promises and build it.
    ///
    /// All problems are collected and reported together in one
    /// `ProfileError`, one per line.
    pub fn validate(self, name: &str, versions: &VersionManager) -> Result<Profile> {
        let mut problems = Vec::new();

        let src = required_field(&self.src, "src", &mut problems);
        let dest = required_field(&self.dest, "dest", &mut problems);
        let version = required_field(&self.duplicity_version, "duplicity_version", &mut problems);

        if let Some(src) = &src {
            ensure_exists(src, &mut problems);
        }

        let backup_actions = match &self.backup_actions {
            None => {
                problems.push("missing field backup_actions".to_string());
                Vec::new()
            }
            Some(tokens) if tokens.is_empty() => {
                problems.push("backup_actions must not be empty".to_string());
                Vec::new()
            }
            Some(tokens) => parse_backup_actions(tokens, &mut problems),
        };

        let cleanup_actions = parse_cleanup_actions(&self.cleanup_actions, &mut problems);

        if let Some(version) = &version {
            let installed = versions.installed_versions()?;
            if !installed.contains(version) {
                let list: Vec<_> = installed.iter().map(String::as_str).collect();
                problems.push(format!(
                    "duplicity version {version} is not installed, only [{}] are installed",
                    list.join(", ")
                ));
            }
        }

        let retention = extract_retention(&self.extra, &self.options, &mut problems);
        let prunes = backup_actions
            .iter()
            .any(|a| *a == Action::Directive(Directive::PruneOld));
        if prunes && retention.is_none() {
            let keys: Vec<_> = RetentionKind::ALL.iter().map(|k| k.key()).collect();
            problems.push(format!(
                "{} requires one of: {}",
                Directive::PruneOld,
                keys.join(", ")
            ));
        }

        let options = render_options(&self.options, &mut problems);

        for key in self.extra.keys() {
            if RetentionKind::from_key(key).is_none() {
                warn!(profile = %name, key = %key, "ignoring unknown profile field");
            }
        }

        if !problems.is_empty() {
            return Err(DuprunError::ProfileError(problems.join("\n")));
        }

        // Every required field was present, or `problems` would be non-empty.
        let (Some(src), Some(dest), Some(duplicity_version)) = (src, dest, version) else {
            return Err(DuprunError::InvariantViolation(
                "required profile fields vanished after validation".to_string(),
            ));
        };

        Ok(Profile {
            name: name.to_string(),
            src,
            dest,
            duplicity_version,
            backup_actions,
            cleanup_actions,
            options,
            retention,
            credentials: Credentials {
                ftp_password: self.ftp_password,
                encrypt_password: self.encrypt_password,
                sign_password: self.sign_password,
            },
            dry_run: false,
            full: false,
        })
    }
}

fn required_field(value: &Option<String>, field: &str, problems: &mut Vec<String>) -> Option<String> {
    match value.as_deref() {
        None => {
            problems.push(format!("missing field {field}"));
            None
        }
        Some(v) if v.trim().is_empty() => {
            problems.push(format!("field {field} must not be empty"));
            None
        }
        Some(v) if v.trim() != v => {
            problems.push(format!(
                "field {field} must not have leading or trailing whitespace, got {v:?}"
            ));
            None
        }
        Some(v) => Some(v.to_string()),
    }
}

fn ensure_exists(path: &str, problems: &mut Vec<String>) {
    if !Path::new(path).exists() {
        problems.push(format!("{path} does not exist"));
    }
}

fn parse_backup_actions(tokens: &[String], problems: &mut Vec<String>) -> Vec<Action> {
    let mut actions = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<Action>() {
            Ok(action) => {
                if let Action::Script(path) = &action {
                    ensure_exists(&path.to_string_lossy(), problems);
                }
                actions.push(action);
            }
            Err(e) => problems.push(e),
        }
    }
    actions
}

fn parse_cleanup_actions(tokens: &[String], problems: &mut Vec<String>) -> Vec<Action> {
    let mut actions = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<Action>() {
            Ok(Action::Script(path)) => {
                ensure_exists(&path.to_string_lossy(), problems);
                actions.push(Action::Script(path));
            }
            Ok(Action::Directive(d)) => {
                problems.push(format!("cleanup_actions may only contain scripts, got {d}"));
            }
            Err(e) => problems.push(e),
        }
    }
    actions
}

/// Find the single retention key, looking at top-level fields and options.
fn extract_retention(
    extra: &BTreeMap<String, Value>,
    options: &BTreeMap<String, Value>,
    problems: &mut Vec<String>,
) -> Option<Retention> {
    let mut found = Vec::new();
    for (key, value) in extra.iter().chain(options.iter()) {
        if let Some(kind) = RetentionKind::from_key(key) {
            match retention_value(value) {
                Some(value) => found.push(Retention { kind, value }),
                None => problems.push(format!("{key} must be a string or number")),
            }
        }
    }

    match found.len() {
        0 => None,
        1 => found.pop(),
        _ => {
            let keys: Vec<_> = found.iter().map(|r| r.kind.key()).collect();
            problems.push(format!(
                "only one retention key may be set, found: {}",
                keys.join(", ")
            ));
            None
        }
    }
}

/// Options as duplicity flags; retention keys are excluded.
fn render_options(options: &BTreeMap<String, Value>, problems: &mut Vec<String>) -> BTreeMap<String, String> {
    let mut rendered = BTreeMap::new();
    for (key, value) in options {
        if RetentionKind::from_key(key).is_some() {
            continue;
        }
        match scalar_to_string(value) {
            Some(v) => {
                rendered.insert(key.clone(), v);
            }
            None => problems.push(format!("option {key} must be a string, number or boolean")),
        }
    }
    rendered
}

/// A duplicity time string or a count; booleans make no sense here.
fn retention_value(value: &Value) -> Option<String> {
    match value {
        Value::Bool(_) => None,
        other => scalar_to_string(other),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
