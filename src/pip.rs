//! pip invocations.
//!
//! Every package operation mkvenv performs is a pip subprocess:
//!
//! - `install` into the target environment or the wheelhouse's cache environment
//! - `wheel` to build artifacts into the wheelhouse
//! - `show` to report whether a package is installed

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::Verbosity;
use crate::process::ToolCommand;
use crate::utils::{env_bin_dir, executable_name};

/// Result of `pip show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowOutput {
    /// Metadata printed by pip
    pub metadata: String,
    /// Whether pip succeeded and mentioned the package
    pub installed: bool,
}

/// How to reach pip.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PipProgram {
    /// `<env>/bin/pip`
    Environment(PathBuf),
    /// `<python> -m pip`
    Module(PathBuf),
}

/// A pip executable plus the flags every call shares.
#[derive(Debug, Clone)]
pub struct Pip {
    program: PipProgram,
    verbosity: Verbosity,
    timeout: Option<Duration>,
}

impl Pip {
    /// pip inside the virtual environment at `env`.
    #[must_use]
    pub fn for_environment(env: &Path) -> Self {
        Self {
            program: PipProgram::Environment(env_bin_dir(env).join(executable_name("pip"))),
            verbosity: Verbosity::default(),
            timeout: None,
        }
    }

    /// pip run as a module of the given interpreter, for `--system` installs.
    #[must_use]
    pub fn for_interpreter(python: &Path) -> Self {
        Self {
            program: PipProgram::Module(python.to_path_buf()),
            verbosity: Verbosity::default(),
            timeout: None,
        }
    }

    /// Pass `--quiet`/`-v` to pip according to `verbosity`.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Kill pip calls that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn base(&self, subcommand: &str) -> ToolCommand {
        let command = match &self.program {
            PipProgram::Environment(pip) => ToolCommand::new(pip),
            PipProgram::Module(python) => ToolCommand::new(python).args(["-m", "pip"]),
        };
        command.arg(subcommand).with_timeout(self.timeout)
    }

    /// `pip install <pkg> --upgrade`, restricted to `find_links` when given.
    ///
    /// Restricting means `--find-links <dir> --no-index`: the package must
    /// already be in the wheelhouse.
    #[must_use]
    pub fn install_command(&self, package: &str, find_links: Option<&Path>) -> ToolCommand {
        let mut command = self.base("install").args([package, "--upgrade"]);
        if let Some(wheelhouse) = find_links {
            command = command.arg("--find-links").arg(wheelhouse).arg("--no-index");
        }
        command
            .args(self.verbosity.tool_flags().iter().copied())
            .with_operation(format!("pip install {package}"))
    }

    /// `pip wheel <pkg>` building into `wheelhouse`, using its download cache.
    #[must_use]
    pub fn wheel_command(&self, package: &str, wheelhouse: &Path, cache_dir: &Path) -> ToolCommand {
        self.base("wheel")
            .arg(package)
            .arg("--cache-dir")
            .arg(cache_dir)
            .arg("--find-links")
            .arg(wheelhouse)
            .arg("--wheel-dir")
            .arg(wheelhouse)
            .args(self.verbosity.tool_flags().iter().copied())
            .with_operation(format!("pip wheel {package}"))
    }

    /// Install `package`; see [`Pip::install_command`].
    pub async fn install(&self, package: &str, find_links: Option<&Path>) -> Result<()> {
        self.install_command(package, find_links).execute().await?;
        Ok(())
    }

    /// Ask pip whether `package` is installed.
    ///
    /// A failing `pip show` is reported as "not installed" rather than as an
    /// error; pip exits non-zero for unknown packages.
    pub async fn show(&self, package: &str) -> Result<ShowOutput> {
        let output = self
            .base("show")
            .arg(package)
            .capture_output()
            .with_operation(format!("pip show {package}"))
            .output()
            .await?;

        let installed =
            output.success() && output.stdout.to_lowercase().contains(&package.to_lowercase());
        Ok(ShowOutput {
            metadata: output.stdout.trim().to_string(),
            installed,
        })
    }
}
