use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn test_version_flag() {
    let env = TestEnv::new();
    env.cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    let env = TestEnv::new();
    env.cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("create")
            .and(predicate::str::contains("wheelhouse"))
            .and(predicate::str::contains("install"))
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("list-wheels")),
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let env = TestEnv::new();
    env.cmd().arg("frobnicate").assert().failure();
}
