use predicates::prelude::*;
use std::fs;

use crate::common::{TestEnv, python_version};

#[test]
fn test_missing_wheelhouse_is_reported() {
    if python_version().is_none() {
        return;
    }
    let env = TestEnv::new();
    env.cmd()
        .args(["-w", "wheels", "list-wheels"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist - use the `wheelhouse` subcommand"));
}

#[test]
fn test_lists_sorted_wheel_names() {
    let Some(version) = python_version() else {
        return;
    };
    let env = TestEnv::new();
    let wheelhouse = env.path().join("wheels").join(&version);
    fs::create_dir_all(wheelhouse.join("cache")).unwrap();
    for name in ["six-1.16.0-py2.py3-none-any.whl", "attrs-23.2.0-py3-none-any.whl", "README"] {
        fs::write(wheelhouse.join(name), "").unwrap();
    }

    env.cmd()
        .args(["-w", "wheels", "list-wheels"])
        .assert()
        .success()
        .stdout("attrs-23.2.0-py3-none-any.whl\nsix-1.16.0-py2.py3-none-any.whl\n")
        .stderr(predicate::str::contains(format!("# Wheels in {}/", wheelhouse.display())));
}

#[test]
fn test_quiet_hides_header() {
    let Some(version) = python_version() else {
        return;
    };
    let env = TestEnv::new();
    fs::create_dir_all(env.path().join("wheels").join(&version)).unwrap();

    env.cmd()
        .args(["-q", "-w", "wheels", "list-wheels"])
        .assert()
        .success()
        .stderr(predicate::str::contains("# Wheels").not());
}

#[test]
fn test_dollar_in_wheelstreet_is_literal() {
    let Some(version) = python_version() else {
        return;
    };
    let env = TestEnv::new();
    let wheelhouse = env.path().join("$mkvenv_unset_xyz").join(&version);
    fs::create_dir_all(&wheelhouse).unwrap();
    fs::write(wheelhouse.join("six-1.16.0-py2.py3-none-any.whl"), "").unwrap();

    env.cmd()
        .args(["-w", "$mkvenv_unset_xyz", "list-wheels"])
        .assert()
        .success()
        .stdout("six-1.16.0-py2.py3-none-any.whl\n");
}
