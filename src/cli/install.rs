//! Install packages into a virtualenv, optionally through the wheelhouse.
//!
//! The target is `--venv`, else the active virtualenv (`$VIRTUAL_ENV`), else
//! the interpreter itself when `--system` is given. A target virtualenv that
//! does not exist yet is created.
//!
//! By default every package is first built into the wheelhouse, so the
//! wheelhouse must already exist (see the `wheelhouse` command). With
//! `--no-cache` packages come straight from the package index.
//!
//! All checks run before anything on disk is touched.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{CommandContext, target_environment};
use crate::core::MkvenvError;
use crate::installer::{InstallMode, Installer};
use crate::pip::Pip;
use crate::requirements::{ordered_packages, read_requirements};

/// Install packages to a virtualenv, optionally building and caching wheels
#[derive(Args, Debug)]
pub struct InstallCommand {
    /// Packages to install, after those listed in the requirements file
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Path to a virtualenv (defaults to the active virtualenv)
    #[arg(long, value_name = "PATH")]
    venv: Option<String>,

    /// File containing a list of packages to install
    #[arg(short = 'r', long, value_name = "FILE")]
    requirements: Option<PathBuf>,

    /// Install into the Python interpreter itself when no virtualenv is defined
    #[arg(long)]
    system: bool,

    /// Do not build and cache wheels in the wheelhouse
    #[arg(long)]
    no_cache: bool,
}

impl InstallCommand {
    /// Validate the target and wheelhouse, then install in order.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let target = target_environment(self.venv.as_deref())?;
        if target.is_none() && !self.system {
            return Err(MkvenvError::NoTargetEnvironment {
                python: ctx.python.describe(),
            }
            .into());
        }

        let requirements = read_requirements(self.requirements.as_deref())?;

        let mode = if self.no_cache {
            InstallMode::Uncached
        } else {
            let paths = ctx.wheel_paths().await?;
            if !paths.exists {
                return Err(MkvenvError::WheelhouseMissing {
                    wheelhouse: paths.wheelhouse.display().to_string(),
                }
                .into());
            }
            tracing::info!("caching wheels to {}", paths.wheelhouse.display());
            InstallMode::Cached {
                wheelhouse: paths,
            }
        };

        let _lock = match &mode {
            InstallMode::Cached {
                wheelhouse,
            } => ctx.lock(wheelhouse).await?,
            _ => None,
        };

        let pip = match &target {
            Some(env) => {
                ctx.bootstrapper().ensure_environment(env, None).await?;
                tracing::info!("installing packages to virtualenv {}", env.display());
                Pip::for_environment(env)
            }
            None => {
                let interpreter = ctx.python.get().await?;
                tracing::info!("installing packages using {}", interpreter.executable.display());
                Pip::for_interpreter(&interpreter.executable)
            }
        };

        let packages = ordered_packages(requirements, &self.packages)?;
        let installer = Installer::new(mode, Some(pip), ctx.verbosity, ctx.config.command_timeout());
        installer.run(&installer.plan(&packages)).await
    }
}
