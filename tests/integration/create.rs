use predicates::prelude::*;

use crate::common::TestEnv;

#[cfg(unix)]
#[test]
fn test_create_is_idempotent() {
    let env = TestEnv::new();
    let venv = crate::common::FakeVenv::create(&env.path().join("env"), &[]);

    // an interpreter that does not exist proves no creation is attempted
    for _ in 0..2 {
        env.cmd()
            .args(["--python", "definitely-not-a-python-xyz", "-v", "create", "env"])
            .assert()
            .success()
            .stderr(predicate::str::contains("already exists"));
    }
    assert!(venv.calls().is_empty());
}

#[test]
fn test_alias_virtualenv() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.path().join("env").join(if cfg!(windows) { "Scripts" } else { "bin" }))
        .unwrap();
    let marker = env.path().join("env").join(if cfg!(windows) { "Scripts" } else { "bin" }).join("activate");
    std::fs::write(marker, "").unwrap();

    env.cmd()
        .args(["--python", "definitely-not-a-python-xyz", "virtualenv", "env"])
        .assert()
        .success();
}

#[test]
fn test_create_without_python_fails_cleanly() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--python", "definitely-not-a-python-xyz", "create", "env"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Python interpreter not found"));
    assert!(!env.path().join("env").exists());
}
