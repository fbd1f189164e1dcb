use predicates::prelude::*;
use std::fs;

use crate::common::TestEnv;

#[cfg(unix)]
mod with_fake_venv {
    use super::*;
    use crate::common::FakeVenv;

    #[test]
    fn test_show_installed_package() {
        let env = TestEnv::new();
        FakeVenv::create(&env.path().join("env"), &["requests"]);

        env.cmd()
            .args(["show", "requests", "--venv", "env"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Name: requests"));
    }

    #[test]
    fn test_show_missing_package() {
        let env = TestEnv::new();
        FakeVenv::create(&env.path().join("env"), &["requests"]);

        env.cmd()
            .args(["show", "flask", "--venv", "env"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("package flask is not installed in"));
    }

    #[test]
    fn test_show_uses_active_virtualenv() {
        let env = TestEnv::new();
        let venv = FakeVenv::create(&env.path().join("active"), &["numpy"]);

        env.cmd().env("VIRTUAL_ENV", &venv.root).args(["show", "numpy"]).assert().code(0);
        assert_eq!(venv.calls(), vec!["show numpy"]);
    }
}

#[test]
fn test_show_wheel_in_wheelhouse() {
    let Some(version) = crate::common::python_version() else {
        return;
    };
    let env = TestEnv::new();
    let wheelhouse = env.path().join("wheels").join(&version);
    fs::create_dir_all(&wheelhouse).unwrap();
    fs::write(wheelhouse.join("typing_extensions-4.9.0-py3-none-any.whl"), "").unwrap();

    env.cmd()
        .args(["-w", "wheels", "show", "typing-extensions"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("typing_extensions-4.9.0-py3-none-any.whl"));

    env.cmd()
        .args(["-w", "wheels", "show", "scipy"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no wheel for scipy in"));
}
