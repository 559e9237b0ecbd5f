// tests/arguments.rs

use duprun::engine::arguments;
use duprun::errors::DuprunError;
use duprun::profile::{Directive, RetentionKind};
use duprun_test_utils::ProfileBuilder;
use proptest::prelude::*;

const SRC: &str = "/data";
const DEST: &str = "sftp://host/b";

#[test]
fn backup_with_no_options_is_src_then_dest() {
    let profile = ProfileBuilder::new(SRC, DEST).action("!backup").build();
    assert_eq!(arguments::backup(&profile), vec![SRC, DEST]);
}

#[test]
fn backup_renders_options_as_flag_pairs_before_operands() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .option("volsize", "250")
        .option("full-if-older-than", "1M")
        .build();

    // Options are kept sorted by key.
    assert_eq!(
        arguments::backup(&profile),
        vec!["--full-if-older-than", "1M", "--volsize", "250", SRC, DEST]
    );
}

#[test]
fn backup_dry_run_appends_flag_and_full_prepends_token() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .option("volsize", "250")
        .dry_run(true)
        .full(true)
        .build();

    assert_eq!(
        arguments::backup(&profile),
        vec!["full", "--volsize", "250", SRC, DEST, "--dry-run"]
    );
}

#[test]
fn verify_puts_dest_before_src() {
    let profile = ProfileBuilder::new(SRC, DEST).option("volsize", "250").build();
    assert_eq!(
        arguments::verify(&profile),
        vec!["verify", "--volsize", "250", DEST, SRC]
    );
}

#[test]
fn prune_old_with_older_than() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .retention(RetentionKind::OlderThan, "30D")
        .build();

    assert_eq!(
        arguments::prune_old(&profile).unwrap(),
        vec!["remove-older-than", "30D", "--force", DEST]
    );
}

#[test]
fn prune_old_dry_run_drops_force() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .retention(RetentionKind::AllButNFull, "3")
        .dry_run(true)
        .build();

    assert_eq!(
        arguments::prune_old(&profile).unwrap(),
        vec!["remove-all-but-n-full", "3", DEST]
    );
}

#[test]
fn prune_old_ignores_general_options() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .option("volsize", "250")
        .retention(RetentionKind::AllIncOfButNFull, "2")
        .build();

    assert_eq!(
        arguments::prune_old(&profile).unwrap(),
        vec!["remove-all-inc-of-but-n-full", "2", "--force", DEST]
    );
}

#[test]
fn prune_old_without_retention_is_invariant_violation() {
    let profile = ProfileBuilder::new(SRC, DEST).build();

    match arguments::prune_old(&profile) {
        Err(DuprunError::InvariantViolation(msg)) => {
            assert!(msg.contains("!remove_old"));
        }
        other => panic!("expected InvariantViolation, got {:?}", other),
    }
}

#[test]
fn cleanup_is_fixed() {
    let profile = ProfileBuilder::new(SRC, DEST)
        .option("volsize", "250")
        .dry_run(true)
        .build();

    assert_eq!(arguments::cleanup(&profile), vec!["cleanup", "--force", DEST]);
    assert_eq!(
        arguments::for_directive(Directive::Cleanup, &profile).unwrap(),
        arguments::cleanup(&profile)
    );
}

fn option_map() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z][a-z-]{0,12}", "[A-Za-z0-9]{1,8}"), 0..6)
}

proptest! {
    #[test]
    fn full_flag_only_prepends_full(opts in option_map(), dry_run in any::<bool>()) {
        let mut builder = ProfileBuilder::new(SRC, DEST).dry_run(dry_run);
        for (k, v) in &opts {
            builder = builder.option(k, v);
        }
        let incremental = builder.build();
        let full = incremental.clone().with_run_mode(dry_run, true);

        let mut expected = vec!["full".to_string()];
        expected.extend(arguments::backup(&incremental));
        prop_assert_eq!(arguments::backup(&full), expected);
    }

    #[test]
    fn operand_order_never_swaps(opts in option_map()) {
        let mut builder = ProfileBuilder::new(SRC, DEST);
        for (k, v) in &opts {
            builder = builder.option(k, v);
        }
        let profile = builder.build();

        let backup = arguments::backup(&profile);
        let n = backup.len();
        prop_assert_eq!(&backup[n - 2..], &[SRC.to_string(), DEST.to_string()]);

        let verify = arguments::verify(&profile);
        let n = verify.len();
        prop_assert_eq!(&verify[0], "verify");
        prop_assert_eq!(&verify[n - 2..], &[DEST.to_string(), SRC.to_string()]);

        // Every option appears exactly once as a `--key value` pair.
        prop_assert_eq!(backup.len(), 2 + 2 * profile.options.len());
    }
}
