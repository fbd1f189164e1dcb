use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn test_install_without_target_fails_without_mutation() {
    let env = TestEnv::new();
    let before = env.entries();

    env.cmd()
        .args(["-w", "wheels", "install", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no virtualenv is defined").and(predicate::str::contains("--system")));

    assert_eq!(env.entries(), before);
}

#[test]
fn test_missing_requirements_file_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["install", "--venv", "env", "--no-cache", "-r", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"));
    assert!(!env.path().join("env").exists());
}

#[cfg(unix)]
mod with_fake_venv {
    use super::*;
    use crate::common::FakeVenv;
    use std::fs;

    #[test]
    fn test_requirements_install_before_packages() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("env"), &[]);
        fs::write(env.path().join("requirements.txt"), "# pinned\n-e .\n./local\n\nfoo\n").unwrap();

        env.cmd()
            .args(["--python", "definitely-not-a-python-xyz"])
            .args(["install", "--venv", "env", "--no-cache", "-r", "requirements.txt", "bar"])
            .assert()
            .success();

        assert_eq!(venv.calls(), vec!["install foo --upgrade", "install bar --upgrade"]);
    }

    #[test]
    fn test_undecodable_requirement_lines_are_skipped() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("env"), &[]);
        fs::write(env.path().join("req.txt"), b"# caf\xe9 deps\nfoo\n").unwrap();

        env.cmd()
            .args(["install", "--venv", "env", "--no-cache", "-r", "req.txt"])
            .assert()
            .success();

        assert_eq!(venv.calls(), vec!["install foo --upgrade"]);
    }

    #[test]
    fn test_active_virtualenv_is_default_target() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("active"), &[]);

        env.cmd()
            .env("VIRTUAL_ENV", &venv.root)
            .args(["install", "--no-cache", "requests"])
            .assert()
            .success();

        assert_eq!(venv.calls(), vec!["install requests --upgrade"]);
    }

    #[test]
    fn test_quiet_is_passed_to_pip() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("env"), &[]);

        env.cmd().args(["-q", "install", "--venv", "env", "--no-cache", "foo"]).assert().success();

        assert_eq!(venv.calls(), vec!["install foo --upgrade --quiet"]);
    }

    #[test]
    fn test_failing_pip_stops_and_propagates_status() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("env"), &[]);

        env.cmd()
            .env("MKVENV_TEST_FAIL_ON", "broken")
            .args(["install", "--venv", "env", "--no-cache", "first", "broken", "never"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("pip install broken failed"));

        assert_eq!(venv.calls(), vec!["install first --upgrade", "install broken --upgrade"]);
    }

    #[test]
    fn test_cached_install_requires_wheelhouse() {
        if crate::common::python_version().is_none() {
            return;
        }
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("env"), &[]);

        env.cmd()
            .args(["-w", "wheels", "install", "--venv", "env", "foo"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("does not exist").and(predicate::str::contains("wheelhouse")));

        assert!(venv.calls().is_empty());
        assert!(!env.path().join("wheels").exists());
    }

    #[test]
    fn test_cached_install_builds_then_installs() {
        let Some(version) = crate::common::python_version() else {
            return;
        };
        let env = TestEnv::new();
        let wheelhouse = env.path().join("wheels").join(&version);
        let cache_env = FakeVenv::create(&wheelhouse.join("venv"), &[]);
        let target = FakeVenv::create(&env.path().join("env"), &[]);

        env.cmd().args(["-w", "wheels", "install", "--venv", "env", "foo"]).assert().success();

        let wh = wheelhouse.display().to_string();
        assert_eq!(
            cache_env.calls(),
            vec![
                format!("wheel foo --cache-dir {wh}/cache --find-links {wh} --wheel-dir {wh}"),
                format!("install foo --upgrade --find-links {wh} --no-index"),
            ]
        );
        assert_eq!(target.calls(), vec![format!("install foo --upgrade --find-links {wh} --no-index")]);
        assert!(env.path().join("wheels").join(".locks").join(format!("{version}.lock")).exists());
    }

    #[test]
    fn test_wheelstreet_from_environment() {
        let Some(version) = crate::common::python_version() else {
            return;
        };
        let env = TestEnv::new();
        let cache_env = FakeVenv::create(&env.path().join("ws").join(&version).join("venv"), &[]);
        let target = FakeVenv::create(&env.path().join("env"), &[]);

        env.cmd()
            .env("WHEELSTREET", env.path().join("ws"))
            .args(["install", "--venv", "env", "foo"])
            .assert()
            .success();

        assert_eq!(cache_env.calls().len(), 2);
        assert_eq!(target.calls().len(), 1);
    }
}
