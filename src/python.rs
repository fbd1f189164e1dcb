//! Python interpreter discovery.
//!
//! The wheelhouse is partitioned by the exact `major.minor.patch` version of
//! the interpreter mkvenv drives, so the version must come from the
//! interpreter itself rather than from its file name.

use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::sync::OnceCell;

use crate::core::MkvenvError;
use crate::process::ToolCommand;

/// Prints `sys.version_info[:3]` as `X.Y.Z`; works on Python 2 and 3.
const VERSION_QUERY: &str = "import sys; sys.stdout.write('%d.%d.%d' % tuple(sys.version_info[:3]))";

/// An interpreter version triple, displayed as `X.Y.Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch level
    pub patch: u32,
}

impl PythonVersion {
    /// Construct a version from its parts.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for PythonVersion {
    type Err = MkvenvError;

    /// Parse the first `X.Y.Z` found in `s`, so both `3.12.1` and
    /// `Python 3.12.1` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MkvenvError::InvalidPythonVersion {
            output: s.trim().to_string(),
        };
        let re = Regex::new(r"(\d+)\.(\d+)\.(\d+)").map_err(|_| invalid())?;
        let caps = re.captures(s).ok_or_else(invalid)?;
        let part = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());
        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

/// A Python interpreter and the version it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Path to the executable
    pub executable: PathBuf,
    /// Version reported by the executable
    pub version: PythonVersion,
}

impl Interpreter {
    /// Locate an interpreter and query its version.
    ///
    /// `requested` is the first of `--python`, `$MKVENV_PYTHON` or the config
    /// file's `python` that is set. A bare name is looked up on `PATH`. With
    /// nothing requested, `python3` and then `python` are tried.
    pub async fn discover(requested: Option<&str>) -> Result<Self> {
        let executable = Self::locate(requested)?;
        let version = Self::query_version(&executable).await?;
        tracing::info!("using {} ({})", executable.display(), version);
        Ok(Self {
            executable,
            version,
        })
    }

    /// Find the interpreter executable without running it.
    pub fn locate(requested: Option<&str>) -> Result<PathBuf> {
        match requested {
            Some(name) => which::which(name).map_err(|_| {
                anyhow::Error::from(MkvenvError::PythonNotFound {
                    searched: name.to_string(),
                })
            }),
            None => ["python3", "python"]
                .iter()
                .find_map(|name| which::which(name).ok())
                .ok_or_else(|| {
                    anyhow::Error::from(MkvenvError::PythonNotFound {
                        searched: "python3 or python on PATH".to_string(),
                    })
                }),
        }
    }

    /// Ask `executable` for its exact version.
    pub async fn query_version(executable: &Path) -> Result<PythonVersion> {
        let output = ToolCommand::new(executable)
            .args(["-c", VERSION_QUERY])
            .capture_output()
            .with_operation("query Python version")
            .execute()
            .await
            .with_context(|| format!("Failed to run {}", executable.display()))?;
        Ok(output.stdout.parse::<PythonVersion>()?)
    }
}

/// An interpreter that is discovered on first use.
///
/// Commands that never need Python (creating over an existing environment,
/// uncached installs into an explicit environment) never pay for discovery.
#[derive(Debug, Default)]
pub struct LazyInterpreter {
    requested: Option<String>,
    cell: OnceCell<Interpreter>,
}

impl LazyInterpreter {
    /// Defer discovery of `requested` (see [`Interpreter::discover`]).
    #[must_use]
    pub fn new(requested: Option<String>) -> Self {
        Self {
            requested,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already-discovered interpreter.
    #[must_use]
    pub fn ready(interpreter: Interpreter) -> Self {
        Self {
            requested: None,
            cell: OnceCell::new_with(Some(interpreter)),
        }
    }

    /// Discover the interpreter if that has not happened yet.
    pub async fn get(&self) -> Result<&Interpreter> {
        self.cell.get_or_try_init(|| Interpreter::discover(self.requested.as_deref())).await
    }

    /// Best-effort name of the interpreter for messages, without running it.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.cell.get() {
            Some(interpreter) => interpreter.executable.display().to_string(),
            None => Interpreter::locate(self.requested.as_deref())
                .map(|path| path.display().to_string())
                .unwrap_or_else(|_| self.requested.clone().unwrap_or_else(|| "python3".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_version() {
        let version: PythonVersion = "3.12.1".parse().unwrap();
        assert_eq!(version, PythonVersion::new(3, 12, 1));
        assert_eq!(version.to_string(), "3.12.1");
    }

    #[test]
    fn test_parse_banner() {
        let version: PythonVersion = "Python 2.7.18\n".parse().unwrap();
        assert_eq!(version, PythonVersion::new(2, 7, 18));
    }

    #[test]
    fn test_parse_rejects_partial_version() {
        let err = "3.12".parse::<PythonVersion>().unwrap_err();
        assert!(matches!(err, MkvenvError::InvalidPythonVersion { .. }));
    }

    #[test]
    fn test_version_ordering() {
        assert!(PythonVersion::new(3, 9, 18) < PythonVersion::new(3, 10, 0));
    }

    #[test]
    fn test_locate_missing_interpreter() {
        let err = Interpreter::locate(Some("definitely-not-a-python-xyz")).unwrap_err();
        assert!(matches!(err.downcast_ref::<MkvenvError>(), Some(MkvenvError::PythonNotFound { .. })));
    }

    #[tokio::test]
    async fn test_lazy_ready_skips_discovery() {
        let interpreter = Interpreter {
            executable: PathBuf::from("/nonexistent/python"),
            version: PythonVersion::new(3, 8, 0),
        };
        let lazy = LazyInterpreter::ready(interpreter.clone());
        assert_eq!(lazy.get().await.unwrap(), &interpreter);
        assert_eq!(lazy.describe(), "/nonexistent/python");
    }

    #[tokio::test]
    async fn test_lazy_reports_missing_interpreter() {
        let lazy = LazyInterpreter::new(Some("definitely-not-a-python-xyz".to_string()));
        assert!(lazy.get().await.is_err());
        assert_eq!(lazy.describe(), "definitely-not-a-python-xyz");
    }

    #[tokio::test]
    async fn test_discover_reports_exact_version() {
        // Only meaningful when a Python interpreter is installed
        let Ok(executable) = Interpreter::locate(None) else {
            return;
        };
        let interpreter = Interpreter::discover(executable.to_str()).await.unwrap();
        assert_eq!(interpreter.version.to_string().split('.').count(), 3);
    }
}
