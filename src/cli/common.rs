//! Shared state for CLI commands

use anyhow::Result;
use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::constants::{DEFAULT_WHEELSTREET, VIRTUAL_ENV_ENV, WHEELSTREET_ENV};
use crate::logging::Verbosity;
use crate::pip::Pip;
use crate::python::LazyInterpreter;
use crate::utils::resolve_path;
use crate::venv::Bootstrapper;
use crate::wheelhouse::{WheelPaths, WheelhouseLock};

/// Everything a command needs besides its own arguments.
///
/// The interpreter is discovered lazily, the first time a command asks for
/// the wheelhouse or has to create an environment.
#[derive(Debug)]
pub struct CommandContext {
    /// Loaded global configuration
    pub config: GlobalConfig,
    /// Output level for this invocation
    pub verbosity: Verbosity,
    /// Interpreter from `--python`, `$MKVENV_PYTHON` or the config file
    pub python: LazyInterpreter,
    wheelstreet: Option<String>,
}

impl CommandContext {
    /// Build a context from the global options.
    ///
    /// `python` takes precedence over the config file's `python` key.
    #[must_use]
    pub fn new(
        config: GlobalConfig,
        verbosity: Verbosity,
        wheelstreet: Option<String>,
        python: Option<String>,
    ) -> Self {
        let requested = python.filter(|p| !p.is_empty()).or_else(|| config.python.clone());
        Self {
            python: LazyInterpreter::new(requested),
            config,
            verbosity,
            wheelstreet,
        }
    }

    /// Resolve the wheelstreet and this interpreter's wheelhouse.
    pub async fn wheel_paths(&self) -> Result<WheelPaths> {
        let interpreter = self.python.get().await?;
        let env_value = std::env::var(WHEELSTREET_ENV).ok();
        let default = self.config.wheelstreet.as_deref().unwrap_or(DEFAULT_WHEELSTREET);
        WheelPaths::resolve(
            self.wheelstreet.as_deref(),
            env_value.as_deref(),
            default,
            &interpreter.version,
        )
    }

    /// Lock the wheelhouse unless locking is disabled in the config.
    pub async fn lock(&self, paths: &WheelPaths) -> Result<Option<WheelhouseLock>> {
        if !self.config.lock_wheelhouse {
            return Ok(None);
        }
        let interpreter = self.python.get().await?;
        Ok(Some(WheelhouseLock::acquire(&paths.wheelstreet, &interpreter.version).await?))
    }

    /// Environment creator wired to this invocation's settings.
    #[must_use]
    pub fn bootstrapper(&self) -> Bootstrapper<'_> {
        Bootstrapper::new(
            &self.python,
            &self.config.virtualenv,
            self.verbosity,
            self.config.command_timeout(),
            self.config.fetch_timeout(),
        )
    }

    /// pip of the environment at `env`, with this invocation's flags.
    #[must_use]
    pub fn pip_for(&self, env: &std::path::Path) -> Pip {
        Pip::for_environment(env)
            .with_verbosity(self.verbosity)
            .with_timeout(self.config.command_timeout())
    }
}

/// The environment named by `--venv`, or else the active one (`$VIRTUAL_ENV`).
///
/// Empty values count as unset. The result is absolute.
pub fn target_environment(explicit: Option<&str>) -> Result<Option<PathBuf>> {
    let active = std::env::var(VIRTUAL_ENV_ENV).ok();
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| active.as_deref().filter(|value| !value.is_empty()))
        .map(resolve_path)
        .transpose()
}
