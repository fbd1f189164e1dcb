//! Wheelstreet and wheelhouse paths.
//!
//! The *wheelstreet* is the root of the wheel cache. Inside it, every Python
//! version gets its own *wheelhouse*, named by the exact interpreter version:
//!
//! ```text
//! ~/.mkvenv/                  <- wheelstreet
//! ├── .locks/3.12.1.lock      <- advisory lock for the 3.12.1 wheelhouse
//! └── 3.12.1/                 <- wheelhouse
//!     ├── *.whl               <- cached artifacts
//!     ├── cache/              <- pip download cache
//!     └── venv/               <- cache-maintenance environment
//! ```
//!
//! Wheels built under one interpreter version are therefore never picked up by
//! another.
//!
//! The wheelstreet is chosen by precedence: `-w/--wheelstreet`, then
//! `$WHEELSTREET`, then the config file, then `~/.mkvenv`.

pub mod lock;

pub use lock::WheelhouseLock;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::{WHEELHOUSE_CACHE_DIR, WHEELHOUSE_VENV_DIR};
use crate::python::PythonVersion;
use crate::utils::resolve_path;

/// Pick the wheelstreet by precedence and make it absolute.
///
/// Empty strings count as unset.
pub fn resolve_wheelstreet(
    override_value: Option<&str>,
    env_value: Option<&str>,
    default: &str,
) -> Result<PathBuf> {
    let chosen = [override_value, env_value]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or(default);
    resolve_path(chosen)
}

/// Resolved cache locations for one interpreter version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelPaths {
    /// Root of the wheel cache
    pub wheelstreet: PathBuf,
    /// `<wheelstreet>/<X.Y.Z>`
    pub wheelhouse: PathBuf,
    /// Whether the wheelhouse existed when these paths were resolved
    pub exists: bool,
}

impl WheelPaths {
    /// Resolve the wheelstreet and derive the wheelhouse for `version`.
    ///
    /// The existence check is made on every call; nothing is cached.
    pub fn resolve(
        override_value: Option<&str>,
        env_value: Option<&str>,
        default: &str,
        version: &PythonVersion,
    ) -> Result<Self> {
        let wheelstreet = resolve_wheelstreet(override_value, env_value, default)?;
        Ok(Self::for_wheelstreet(wheelstreet, version))
    }

    /// Derive the wheelhouse for an already-resolved wheelstreet.
    #[must_use]
    pub fn for_wheelstreet(wheelstreet: PathBuf, version: &PythonVersion) -> Self {
        let wheelhouse = wheelstreet.join(version.to_string());
        let exists = wheelhouse.is_dir();
        Self {
            wheelstreet,
            wheelhouse,
            exists,
        }
    }

    /// Download cache used by `pip wheel`.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.wheelhouse.join(WHEELHOUSE_CACHE_DIR)
    }

    /// The cache-maintenance environment.
    #[must_use]
    pub fn venv_dir(&self) -> PathBuf {
        self.wheelhouse.join(WHEELHOUSE_VENV_DIR)
    }

    /// Sorted basenames of the `*.whl` files in the wheelhouse.
    pub fn list_wheels(&self) -> Result<Vec<String>> {
        self.glob_names("*.whl")
    }

    /// Full paths of artifacts whose file name starts with `package`.
    ///
    /// Wheel file names replace `-` with `_`, so both spellings are searched.
    pub fn find_artifacts(&self, package: &str) -> Result<Vec<PathBuf>> {
        let mut found = self.glob_paths(&format!("{}*", glob::Pattern::escape(package)))?;
        let normalized = package.replace('-', "_");
        if normalized != package {
            found.extend(self.glob_paths(&format!("{}*", glob::Pattern::escape(&normalized)))?);
        }
        found.retain(|path| path.is_file());
        found.sort();
        found.dedup();
        Ok(found)
    }

    fn glob_paths(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let escaped_dir = glob::Pattern::escape(&self.wheelhouse.to_string_lossy());
        let full = format!("{}/{}", escaped_dir, pattern);
        let paths = glob::glob(&full)
            .with_context(|| format!("Invalid wheel pattern: {full}"))?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(paths)
    }

    fn glob_names(&self, pattern: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .glob_paths(pattern)?
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}
