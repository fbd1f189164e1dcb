//! Create the wheelhouse and build wheels into it.
//!
//! The wheelhouse for the current interpreter gets a download cache and its
//! own virtualenv with `wheel` installed. Each requested package is then
//! built into the wheelhouse and installed into that virtualenv, one at a
//! time, requirements-file packages first.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::CommandContext;
use crate::installer::{InstallMode, Installer};
use crate::requirements::{ordered_packages, read_requirements};
use crate::utils::ensure_dir;

/// Create the WHEELHOUSE, optionally building wheels
#[derive(Args, Debug)]
pub struct WheelhouseCommand {
    /// Packages to build, after those listed in the requirements file
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// File containing a list of packages to build
    #[arg(short = 'r', long, value_name = "FILE")]
    requirements: Option<PathBuf>,
}

impl WheelhouseCommand {
    /// Set up the wheelhouse, then build every requested package.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let requirements = read_requirements(self.requirements.as_deref())?;
        let paths = ctx.wheel_paths().await?;
        let _lock = ctx.lock(&paths).await?;

        ensure_dir(&paths.cache_dir())?;
        let venv = paths.venv_dir();
        ctx.bootstrapper().ensure_environment(&venv, None).await?;
        ctx.pip_for(&venv).install(&ctx.config.wheel_requirement, None).await?;

        let packages = ordered_packages(requirements, &self.packages)?;
        if packages.is_empty() {
            tracing::info!("wheelhouse {} is ready", paths.wheelhouse.display());
            return Ok(());
        }

        let installer = Installer::new(
            InstallMode::BuildOnly {
                wheelhouse: paths,
            },
            None,
            ctx.verbosity,
            ctx.config.command_timeout(),
        );
        installer.run(&installer.plan(&packages)).await
    }
}
