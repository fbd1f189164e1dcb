//! Ways of running `virtualenv`.
//!
//! Two implementations exist: the copy installed for the interpreter
//! ([`SystemVirtualenv`]) and a copy unpacked from a downloaded source archive
//! ([`FetchedVirtualenv`]). [`SystemVirtualenv::detect`] decides whether the
//! installed copy is usable.
//!
//! Only releases that ship a standalone `virtualenv.py` (1.x) run from an
//! unpacked tree. Later releases import `distlib`, `filelock` and
//! `platformdirs`, which the source archive does not contain.

use anyhow::Result;
use regex::Regex;
use semver::Version;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::MkvenvError;
use crate::logging::Verbosity;
use crate::process::ToolCommand;

/// Something that can create a virtual environment at a path.
pub trait EnvironmentCreator {
    /// Short description for log messages.
    fn describe(&self) -> String;

    /// Create an environment at `target`.
    fn create(&self, target: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Parse the first version-looking token of `text`, padding missing parts with zero.
///
/// `virtualenv --version` prints `1.11.6` for old releases and
/// `virtualenv 20.26.3 from /path/...` for new ones; both are accepted.
#[must_use]
pub fn parse_loose_version(text: &str) -> Option<Version> {
    let re = Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").ok()?;
    let caps = re.captures(text)?;
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// The `virtualenv` module installed for the interpreter.
#[derive(Debug, Clone)]
pub struct SystemVirtualenv {
    python: PathBuf,
    version: Version,
    verbosity: Verbosity,
    timeout: Option<Duration>,
}

impl SystemVirtualenv {
    /// Return the installed `virtualenv` if it is at least `minimum`.
    ///
    /// A missing module, an unparsable version and an older version all
    /// yield `None`.
    pub async fn detect(
        python: &Path,
        minimum: &str,
        verbosity: Verbosity,
        timeout: Option<Duration>,
    ) -> Result<Option<Self>> {
        let output = ToolCommand::new(python)
            .args(["-m", "virtualenv", "--version"])
            .capture_output()
            .with_timeout(timeout)
            .with_operation("query virtualenv version")
            .output()
            .await?;

        if !output.success() {
            tracing::debug!("no system virtualenv for {}", python.display());
            return Ok(None);
        }

        let Some(found) = parse_loose_version(&output.stdout) else {
            tracing::debug!("unrecognised virtualenv version: {}", output.stdout.trim());
            return Ok(None);
        };
        let Some(required) = parse_loose_version(minimum) else {
            anyhow::bail!("Invalid virtualenv version in config: {minimum}");
        };

        if found < required {
            tracing::info!("system virtualenv {} is older than {}", found, required);
            return Ok(None);
        }

        Ok(Some(Self {
            python: python.to_path_buf(),
            version: found,
            verbosity,
            timeout,
        }))
    }
}

impl EnvironmentCreator for SystemVirtualenv {
    fn describe(&self) -> String {
        format!("system version of virtualenv ({})", self.version)
    }

    fn create(&self, target: &Path) -> impl Future<Output = Result<()>> + Send {
        let command = ToolCommand::new(&self.python)
            .args(["-m", "virtualenv"])
            .args(self.verbosity.tool_flags().iter().copied())
            .arg(target)
            .with_timeout(self.timeout)
            .with_operation(format!("create virtualenv {}", target.display()));
        async move {
            command.execute().await?;
            Ok(())
        }
    }
}

/// A `virtualenv` source tree extracted from a release archive.
#[derive(Debug, Clone)]
pub struct FetchedVirtualenv {
    python: PathBuf,
    tree: PathBuf,
    verbosity: Verbosity,
    timeout: Option<Duration>,
}

impl FetchedVirtualenv {
    /// Use the extracted tree rooted at `tree`.
    #[must_use]
    pub fn new(python: &Path, tree: PathBuf, verbosity: Verbosity, timeout: Option<Duration>) -> Self {
        Self {
            python: python.to_path_buf(),
            tree,
            verbosity,
            timeout,
        }
    }

    /// Build the command that runs the tree's `virtualenv.py` to create `target`.
    pub fn command(&self, target: &Path) -> Result<ToolCommand> {
        let script = self.tree.join("virtualenv.py");
        if !script.is_file() {
            return Err(MkvenvError::EnvironmentCreationFailed {
                path: target.display().to_string(),
                reason: format!(
                    "{} has no virtualenv.py; releases from 20.0 on need distlib, filelock \
                     and platformdirs installed, so pin a 1.x [virtualenv] version or install \
                     virtualenv for the interpreter",
                    self.tree.display()
                ),
            }
            .into());
        }
        Ok(ToolCommand::new(&self.python)
            .arg(script)
            .args(self.verbosity.tool_flags().iter().copied())
            .arg(target)
            .with_timeout(self.timeout)
            .with_operation(format!("create virtualenv {}", target.display())))
    }
}

impl EnvironmentCreator for FetchedVirtualenv {
    fn describe(&self) -> String {
        format!("virtualenv source in {}", self.tree.display())
    }

    fn create(&self, target: &Path) -> impl Future<Output = Result<()>> + Send {
        let command = self.command(target);
        async move {
            command?.execute().await?;
            Ok(())
        }
    }
}
