// tests/profile_validation.rs

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use duprun::errors::DuprunError;
use duprun::profile::{load_and_validate, Action, Directive, RetentionKind};
use duprun::tool::VersionManager;
use duprun_test_utils::install_fake_version;
use serde_json::json;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

struct Fixture {
    dir: TempDir,
    versions: VersionManager,
    src: PathBuf,
    script: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("duplicities");
    install_fake_version(&base, "0.7.06");

    let src = dir.path().join("data");
    fs::create_dir_all(&src).expect("create src");
    let script = dir.path().join("hook.sh");
    fs::write(&script, "#!/bin/sh\nexit 0\n").expect("write hook");

    Fixture {
        versions: VersionManager::new(base),
        src,
        script,
        dir,
    }
}

fn write_profile(dir: &Path, value: serde_json::Value) -> PathBuf {
    let path = dir.join("nightly.json");
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn profile_error(result: Result<duprun::profile::Profile, DuprunError>) -> String {
    match result {
        Err(DuprunError::ProfileError(msg)) => msg,
        Err(e) => panic!("expected ProfileError, got: {:?}", e),
        Ok(p) => panic!("expected error, got profile {:?}", p),
    }
}

#[test]
fn valid_profile_loads_with_all_fields() -> TestResult {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "sftp://host/b",
            "duplicity_version": "0.7.06",
            "backup_actions": [fx.script, "!backup", "!verify", "!remove_old"],
            "cleanup_actions": [fx.script],
            "options": { "volsize": 250, "allow-source-mismatch": true, "archive-dir": "/var/cache" },
            "remove-older-than": "6M",
            "encrypt_password": "secret"
        }),
    );

    let profile = load_and_validate(&path, &fx.versions)?;

    assert_eq!(profile.name, "nightly.json");
    assert_eq!(profile.dest, "sftp://host/b");
    assert_eq!(
        profile.backup_actions,
        vec![
            Action::Script(fx.script.clone()),
            Action::Directive(Directive::RunBackup),
            Action::Directive(Directive::Verify),
            Action::Directive(Directive::PruneOld),
        ]
    );
    assert_eq!(profile.cleanup_actions, vec![Action::Script(fx.script.clone())]);
    assert_eq!(profile.options["volsize"], "250");
    assert_eq!(profile.options["allow-source-mismatch"], "true");
    let retention = profile.retention.as_ref().expect("retention");
    assert_eq!(retention.kind, RetentionKind::OlderThan);
    assert_eq!(retention.value, "6M");
    assert_eq!(profile.credentials.encrypt_password.as_deref(), Some("secret"));
    assert_eq!(profile.credentials.ftp_password, None);
    assert!(!profile.dry_run && !profile.full);

    let debug = format!("{:?}", profile);
    assert!(!debug.contains("secret"));
    Ok(())
}

#[test]
fn retention_key_inside_options_is_not_a_flag() -> TestResult {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///backups",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!prune-old"],
            "options": { "remove-all-but-n-full": 3, "volsize": "100" }
        }),
    );

    let profile = load_and_validate(&path, &fx.versions)?;

    let retention = profile.retention.expect("retention");
    assert_eq!(retention.kind, RetentionKind::AllButNFull);
    assert_eq!(retention.value, "3");
    assert!(!profile.options.contains_key("remove-all-but-n-full"));
    assert_eq!(profile.options["volsize"], "100");
    Ok(())
}

#[test]
fn missing_fields_are_all_reported() {
    let fx = fixture();
    let path = write_profile(fx.dir.path(), json!({ "options": {} }));

    let msg = profile_error(load_and_validate(&path, &fx.versions));

    for field in ["src", "dest", "duplicity_version", "backup_actions"] {
        assert!(msg.contains(&format!("missing field {field}")), "{msg}");
    }
}

#[test]
fn empty_backup_actions_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": []
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("backup_actions must not be empty"));
}

#[test]
fn bad_action_tokens_are_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!restore", "relative/script.sh", "/no/such/script"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));

    assert!(msg.contains("!restore is not a valid action"));
    assert!(msg.contains("relative/script.sh"));
    assert!(msg.contains("/no/such/script does not exist"));
}

#[test]
fn directive_in_cleanup_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup"],
            "cleanup_actions": ["!cleanup"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("cleanup_actions may only contain scripts"));
}

#[test]
fn uninstalled_version_lists_installed_ones() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.6.26",
            "backup_actions": ["!backup"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("0.6.26 is not installed"));
    assert!(msg.contains("[0.7.06]"));
}

#[test]
fn multiple_retention_keys_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!remove_old"],
            "remove-older-than": "30D",
            "options": { "remove-all-but-n-full": 2 }
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("only one retention key"));
}

#[test]
fn prune_without_retention_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup", "!remove_old"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("!remove_old requires one of"));
}

#[test]
fn non_scalar_option_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup"],
            "options": { "exclude": ["/tmp"] }
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("option exclude"));
}

#[test]
fn missing_src_path_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.dir.path().join("not-there"),
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("not-there does not exist"));
}

#[test]
fn malformed_json_is_json_error() {
    let fx = fixture();
    let path = fx.dir.path().join("broken.json");
    fs::write(&path, "{ \"src\": ").unwrap();

    match load_and_validate(&path, &fx.versions) {
        Err(DuprunError::JsonError(_)) => {}
        other => panic!("expected JsonError, got {:?}", other),
    }
}

#[test]
fn missing_profile_file_is_profile_error() {
    let fx = fixture();
    let msg = profile_error(load_and_validate(fx.dir.path().join("nope.json"), &fx.versions));
    assert!(msg.contains("must be a valid file"));
}

#[test]
fn padded_fields_are_rejected_not_trimmed() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "sftp://host/b ",
            "duplicity_version": " 0.7.06",
            "backup_actions": ["!backup"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));

    assert!(msg.contains("field dest must not have leading or trailing whitespace"), "{msg}");
    assert!(
        msg.contains("field duplicity_version must not have leading or trailing whitespace"),
        "{msg}"
    );
}

#[test]
fn blank_field_is_reported_as_empty() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "   ",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup"]
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("field dest must not be empty"), "{msg}");
}

#[test]
fn boolean_retention_value_rejected() {
    let fx = fixture();
    let path = write_profile(
        fx.dir.path(),
        json!({
            "src": fx.src,
            "dest": "file:///b",
            "duplicity_version": "0.7.06",
            "backup_actions": ["!backup"],
            "options": { "remove-older-than": true }
        }),
    );

    let msg = profile_error(load_and_validate(&path, &fx.versions));
    assert!(msg.contains("remove-older-than must be a string or number"), "{msg}");
}
