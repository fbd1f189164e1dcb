use predicates::prelude::*;
use std::fs;

use crate::common::TestEnv;

#[test]
fn test_malformed_config_is_reported() {
    let env = TestEnv::new();
    let config = env.path().join("config.toml");
    fs::write(&config, "wheelstret = \"/typo\"\n").unwrap();

    env.cmd()
        .args(["--config", config.to_str().unwrap(), "install", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_from_environment_variable() {
    let env = TestEnv::new();
    let config = env.path().join("broken.toml");
    fs::write(&config, "not = [valid\n").unwrap();

    env.cmd()
        .env("MKVENV_CONFIG", &config)
        .args(["install", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_wheelstreet_is_used() {
    let Some(version) = crate::common::python_version() else {
        return;
    };
    let env = TestEnv::new();
    let wheelstreet = env.path().join("from-config");
    fs::create_dir_all(wheelstreet.join(&version)).unwrap();
    fs::write(env.path().join("config.toml"), format!("wheelstreet = {:?}\n", wheelstreet.to_str().unwrap()))
        .unwrap();

    env.cmd()
        .args(["--config", "config.toml", "list-wheels"])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("# Wheels in {}/", wheelstreet.join(&version).display())));
}
