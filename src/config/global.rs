//! Global configuration file handling.
//!
//! The global config lives at `~/.mkvenv/config.toml` (or wherever `--config`
//! / `$MKVENV_CONFIG` point). Every key is optional; a missing file is the
//! same as an empty one.

use crate::constants::{
    CONFIG_ENV, DEFAULT_FETCH_TIMEOUT, VIRTUALENV_BASE_URL, VIRTUALENV_VERSION, WHEEL_REQUIREMENT,
};
use crate::core::MkvenvError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

fn default_wheel_requirement() -> String {
    WHEEL_REQUIREMENT.to_string()
}

const fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

const fn default_true() -> bool {
    true
}

/// Settings for bootstrapping `virtualenv` from a source archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VirtualenvConfig {
    /// Minimum acceptable version of a system `virtualenv`; also the version fetched.
    #[serde(default = "VirtualenvConfig::default_version")]
    pub version: String,

    /// Directory URL holding `virtualenv-<version>.tar.gz`.
    #[serde(default = "VirtualenvConfig::default_base_url")]
    pub base_url: String,
}

impl VirtualenvConfig {
    fn default_version() -> String {
        VIRTUALENV_VERSION.to_string()
    }

    fn default_base_url() -> String {
        VIRTUALENV_BASE_URL.to_string()
    }

    /// Full URL of the pinned source archive.
    #[must_use]
    pub fn archive_url(&self) -> String {
        format!("{}/virtualenv-{}.tar.gz", self.base_url.trim_end_matches('/'), self.version)
    }
}

impl Default for VirtualenvConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            base_url: Self::default_base_url(),
        }
    }
}

/// Contents of the global config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Wheelstreet used when neither `-w` nor `$WHEELSTREET` is given.
    #[serde(default)]
    pub wheelstreet: Option<String>,

    /// Python interpreter used when neither `--python` nor `$MKVENV_PYTHON` is given.
    #[serde(default)]
    pub python: Option<String>,

    /// Requirement used to install the wheel builder into the cache environment.
    #[serde(default = "default_wheel_requirement")]
    pub wheel_requirement: String,

    /// Timeout for each delegated pip/virtualenv command. Unset means wait forever.
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,

    /// Timeout for downloading the virtualenv source archive.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Hold an advisory lock on the wheelhouse while building or installing.
    #[serde(default = "default_true")]
    pub lock_wheelhouse: bool,

    /// Virtualenv bootstrap settings.
    #[serde(default)]
    pub virtualenv: VirtualenvConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            wheelstreet: None,
            python: None,
            wheel_requirement: default_wheel_requirement(),
            command_timeout_secs: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            lock_wheelhouse: true,
            virtualenv: VirtualenvConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load the config from an explicit path, `$MKVENV_CONFIG`, or the default location.
    ///
    /// A missing file yields the defaults; an explicitly named file must exist.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path)).await;
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and parse the config file at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| MkvenvError::ConfigError {
            message: format!("{}: {}", path.display(), e.message()),
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `~/.mkvenv/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(".mkvenv").join("config.toml"))
    }

    /// Timeout applied to delegated commands, if configured.
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    /// Timeout applied to archive downloads.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
