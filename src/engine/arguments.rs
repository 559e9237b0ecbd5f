// src/engine/arguments.rs

//! Argument vectors for each directive.
//!
//! These are pure functions of the profile so they can be checked without
//! launching anything. Note the operand order: `backup` is `src dest`,
//! `verify` is `dest src`.

use crate::errors::{DuprunError, Result};
use crate::profile::{Directive, Profile};

pub fn for_directive(directive: Directive, profile: &Profile) -> Result<Vec<String>> {
    match directive {
        Directive::RunBackup => Ok(backup(profile)),
        Directive::Verify => Ok(verify(profile)),
        Directive::PruneOld => prune_old(profile),
        Directive::Cleanup => Ok(cleanup(profile)),
    }
}

/// `[full] [--key value]... src dest [--dry-run]`
pub fn backup(profile: &Profile) -> Vec<String> {
    let mut args = Vec::new();
    if profile.full {
        args.push("full".to_string());
    }
    args.extend(option_flags(profile));
    args.push(profile.src.clone());
    args.push(profile.dest.clone());
    if profile.dry_run {
        args.push("--dry-run".to_string());
    }
    args
}

/// `verify [--key value]... dest src`
pub fn verify(profile: &Profile) -> Vec<String> {
    let mut args = vec!["verify".to_string()];
    args.extend(option_flags(profile));
    args.push(profile.dest.clone());
    args.push(profile.src.clone());
    args
}

/// `<retention-key> <value> [--force] dest`
///
/// `--force` is left out on a dry run so duplicity only lists what it
/// would delete.
pub fn prune_old(profile: &Profile) -> Result<Vec<String>> {
    let retention = profile.retention.as_ref().ok_or_else(|| {
        DuprunError::InvariantViolation(format!(
            "profile {} uses {} without a retention key",
            profile.name,
            Directive::PruneOld
        ))
    })?;

    let mut args = vec![retention.kind.key().to_string(), retention.value.clone()];
    if !profile.dry_run {
        args.push("--force".to_string());
    }
    args.push(profile.dest.clone());
    Ok(args)
}

/// `cleanup --force dest`
pub fn cleanup(profile: &Profile) -> Vec<String> {
    vec![
        "cleanup".to_string(),
        "--force".to_string(),
        profile.dest.clone(),
    ]
}

fn option_flags(profile: &Profile) -> Vec<String> {
    profile
        .options
        .iter()
        .flat_map(|(key, value)| [format!("--{key}"), value.clone()])
        .collect()
}
