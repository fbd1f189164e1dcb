#[cfg(unix)]
mod with_fake_venv {
    use crate::common::{FakeVenv, TestEnv};
    use std::fs;

    #[test]
    fn test_wheelhouse_builds_in_order() {
        let Some(version) = crate::common::python_version() else {
            return;
        };
        let env = TestEnv::new();
        let wheelhouse = env.path().join("wheels").join(&version);
        let cache_env = FakeVenv::create(&wheelhouse.join("venv"), &[]);
        fs::write(env.path().join("req.txt"), "foo\n").unwrap();

        env.cmd().args(["-w", "wheels", "wheelhouse", "-r", "req.txt", "bar"]).assert().success();

        let wh = wheelhouse.display().to_string();
        assert_eq!(
            cache_env.calls(),
            vec![
                "install wheel>=0.24.0 --upgrade".to_string(),
                format!("wheel foo --cache-dir {wh}/cache --find-links {wh} --wheel-dir {wh}"),
                format!("install foo --upgrade --find-links {wh} --no-index"),
                format!("wheel bar --cache-dir {wh}/cache --find-links {wh} --wheel-dir {wh}"),
                format!("install bar --upgrade --find-links {wh} --no-index"),
            ]
        );
        assert!(wheelhouse.join("cache").is_dir());
    }

    #[test]
    fn test_wheel_alias_without_packages_prepares_wheelhouse() {
        let Some(version) = crate::common::python_version() else {
            return;
        };
        let env = TestEnv::new();
        let wheelhouse = env.path().join("wheels").join(&version);
        let cache_env = FakeVenv::create(&wheelhouse.join("venv"), &[]);

        env.cmd().args(["-w", "wheels", "wheel"]).assert().success();

        assert_eq!(cache_env.calls(), vec!["install wheel>=0.24.0 --upgrade"]);
        assert!(wheelhouse.join("cache").is_dir());
    }

    #[test]
    fn test_wheel_requirement_from_config() {
        let Some(version) = crate::common::python_version() else {
            return;
        };
        let env = TestEnv::new();
        let wheelhouse = env.path().join("wheels").join(&version);
        let cache_env = FakeVenv::create(&wheelhouse.join("venv"), &[]);
        fs::write(env.path().join("mkvenv.toml"), "wheel_requirement = \"wheel==0.43.0\"\n").unwrap();

        env.cmd()
            .args(["--config", "mkvenv.toml", "-w", "wheels", "wheelhouse"])
            .assert()
            .success();

        assert_eq!(cache_env.calls(), vec!["install wheel==0.43.0 --upgrade"]);
    }
}
