//! Common test utilities for mkvenv integration tests
//!
//! Tests run the compiled binary with `HOME` pointed at a temporary directory
//! and every mkvenv-related environment variable cleared, so the user's own
//! wheelstreet and config are never touched.

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home directory plus helpers for running mkvenv inside it.
pub struct TestEnv {
    _temp: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        // mkvenv resolves relative paths against the canonical working directory
        let root = temp.path().canonicalize().unwrap();
        Self {
            _temp: temp,
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `mkvenv` with a clean environment rooted at the temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("mkvenv").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("VIRTUAL_ENV")
            .env_remove("WHEELSTREET")
            .env_remove("MKVENV_PYTHON")
            .env_remove("MKVENV_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Names of the entries directly inside the temp dir.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// A directory that looks like a virtualenv, with a `bin/pip` that records its arguments.
pub struct FakeVenv {
    pub root: PathBuf,
    pub log: PathBuf,
}

impl FakeVenv {
    /// Create a fake environment at `root`.
    ///
    /// `pip show <pkg>` succeeds only for packages in `installed`. Any pip
    /// call whose second argument equals `$MKVENV_TEST_FAIL_ON` exits with 3.
    #[cfg(unix)]
    pub fn create(root: &Path, installed: &[&str]) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("activate"), "# fake\n").unwrap();

        let log = root.join("pip.log");
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
if [ "$1" = "show" ]; then
  for pkg in {installed}; do
    if [ "$2" = "$pkg" ]; then
      echo "Name: $pkg"
      echo "Version: 1.0"
      exit 0
    fi
  done
  exit 1
fi
if [ -n "$MKVENV_TEST_FAIL_ON" ] && [ "$2" = "$MKVENV_TEST_FAIL_ON" ]; then
  exit 3
fi
exit 0
"#,
            log = log.display(),
            installed = installed.join(" "),
        );
        let pip = bin.join("pip");
        fs::write(&pip, script).unwrap();
        fs::set_permissions(&pip, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            root: root.to_path_buf(),
            log,
        }
    }

    /// Recorded pip invocations, one argument string per call.
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(&self.log) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// `X.Y.Z` of the Python mkvenv will discover, or `None` when there is none.
pub fn python_version() -> Option<String> {
    let python = which::which("python3").or_else(|_| which::which("python")).ok()?;
    let output = std::process::Command::new(python)
        .args(["-c", "import sys; sys.stdout.write('%d.%d.%d' % tuple(sys.version_info[:3]))"])
        .output()
        .ok()?;
    output.status.success().then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}
