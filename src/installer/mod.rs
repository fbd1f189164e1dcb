//! Cache-aware, strictly ordered package installation.
//!
//! Installation happens in two phases. [`InstallPlan::new`] turns the ordered
//! package list and an [`InstallMode`] into a flat list of [`InstallStep`]s
//! without touching anything. [`Installer::run`] then executes the steps one at
//! a time, in order, and stops at the first failure. Nothing is rolled back: a
//! failure part-way through leaves earlier packages installed and earlier
//! wheels in the wheelhouse.
//!
//! Per package, the modes produce:
//!
//! | Mode        | Steps                                                  |
//! |-------------|--------------------------------------------------------|
//! | `Cached`    | build wheel, install into cache env, install into target |
//! | `Uncached`  | install into target                                    |
//! | `BuildOnly` | build wheel, install into cache env                    |
//!
//! Packages are never batched into one pip call, because some packages only
//! build once an earlier one is installed.

use anyhow::Result;
use std::fmt;
use std::time::Duration;

use crate::logging::Verbosity;
use crate::pip::Pip;
use crate::process::ToolCommand;
use crate::wheelhouse::WheelPaths;

/// Where packages come from and go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMode {
    /// Build into the wheelhouse, then install from it.
    Cached {
        /// The (existing) wheelhouse
        wheelhouse: WheelPaths,
    },
    /// Install straight from the package index.
    Uncached,
    /// Only build wheels and refresh the cache environment (`wheelhouse` command).
    BuildOnly {
        /// The wheelhouse being filled
        wheelhouse: WheelPaths,
    },
}

impl InstallMode {
    fn wheelhouse(&self) -> Option<&WheelPaths> {
        match self {
            Self::Cached {
                wheelhouse,
            }
            | Self::BuildOnly {
                wheelhouse,
            } => Some(wheelhouse),
            Self::Uncached => None,
        }
    }
}

/// One pip call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStep {
    /// `pip wheel` into the wheelhouse
    BuildWheel(String),
    /// `pip install` into the wheelhouse's own environment
    InstallIntoCacheEnv(String),
    /// `pip install` into the target environment
    InstallIntoTarget(String),
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildWheel(package) => write!(f, "build wheel for {package}"),
            Self::InstallIntoCacheEnv(package) => write!(f, "install {package} into cache env"),
            Self::InstallIntoTarget(package) => write!(f, "install {package}"),
        }
    }
}

/// Ordered list of steps for a set of packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    steps: Vec<InstallStep>,
}

impl InstallPlan {
    /// Expand `packages`, in order, into steps for `mode`.
    #[must_use]
    pub fn new(packages: &[String], mode: &InstallMode) -> Self {
        let steps = packages
            .iter()
            .flat_map(|package| {
                let package = package.clone();
                match mode {
                    InstallMode::Cached {
                        ..
                    } => vec![
                        InstallStep::BuildWheel(package.clone()),
                        InstallStep::InstallIntoCacheEnv(package.clone()),
                        InstallStep::InstallIntoTarget(package),
                    ],
                    InstallMode::Uncached => vec![InstallStep::InstallIntoTarget(package)],
                    InstallMode::BuildOnly {
                        ..
                    } => vec![
                        InstallStep::BuildWheel(package.clone()),
                        InstallStep::InstallIntoCacheEnv(package),
                    ],
                }
            })
            .collect();
        Self {
            steps,
        }
    }

    /// The steps, in execution order.
    #[must_use]
    pub fn steps(&self) -> &[InstallStep] {
        &self.steps
    }

    /// Whether there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Runs install plans against a target and a wheelhouse.
#[derive(Debug, Clone)]
pub struct Installer {
    mode: InstallMode,
    target: Option<Pip>,
    cache_env: Option<Pip>,
}

impl Installer {
    /// Installer for `mode`.
    ///
    /// `target` is the pip of the environment being installed into; it may be
    /// `None` only for [`InstallMode::BuildOnly`]. The cache environment's pip
    /// is derived from the wheelhouse.
    #[must_use]
    pub fn new(
        mode: InstallMode,
        target: Option<Pip>,
        verbosity: Verbosity,
        timeout: Option<Duration>,
    ) -> Self {
        let cache_env = mode.wheelhouse().map(|paths| {
            Pip::for_environment(&paths.venv_dir()).with_verbosity(verbosity).with_timeout(timeout)
        });
        Self {
            mode,
            target: target.map(|pip| pip.with_verbosity(verbosity).with_timeout(timeout)),
            cache_env,
        }
    }

    /// Plan `packages` for this installer's mode.
    #[must_use]
    pub fn plan(&self, packages: &[String]) -> InstallPlan {
        InstallPlan::new(packages, &self.mode)
    }

    /// The pip command that performs `step`.
    pub fn command_for(&self, step: &InstallStep) -> Result<ToolCommand> {
        let wheelhouse = self.mode.wheelhouse();
        match step {
            InstallStep::BuildWheel(package) => {
                let (Some(pip), Some(paths)) = (&self.cache_env, wheelhouse) else {
                    anyhow::bail!("Cannot build a wheel for {package} without a wheelhouse");
                };
                Ok(pip.wheel_command(package, &paths.wheelhouse, &paths.cache_dir()))
            }
            InstallStep::InstallIntoCacheEnv(package) => {
                let (Some(pip), Some(paths)) = (&self.cache_env, wheelhouse) else {
                    anyhow::bail!("Cannot install {package} into a cache env without a wheelhouse");
                };
                Ok(pip.install_command(package, Some(&paths.wheelhouse)))
            }
            InstallStep::InstallIntoTarget(package) => {
                let Some(pip) = &self.target else {
                    anyhow::bail!("No target environment to install {package} into");
                };
                Ok(pip.install_command(package, wheelhouse.map(|paths| paths.wheelhouse.as_path())))
            }
        }
    }

    /// Execute `plan` step by step, stopping at the first failure.
    pub async fn run(&self, plan: &InstallPlan) -> Result<()> {
        for step in plan.steps() {
            tracing::debug!("{}", step);
            self.command_for(step)?.execute().await?;
        }
        Ok(())
    }
}
