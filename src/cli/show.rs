//! Check the status of a package.
//!
//! With a virtualenv (`--venv` or `$VIRTUAL_ENV`) pip is asked whether the
//! package is installed there. Without one the wheelhouse is searched for
//! artifacts whose file name starts with the package name. Either way the
//! exit status is 0 only if something was found.

use anyhow::Result;
use clap::Args;

use super::common::{CommandContext, target_environment};

/// Check the status of a package
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Name of a package
    #[arg(value_name = "PKG")]
    pkg: String,

    /// Path to a virtualenv
    #[arg(long, value_name = "PATH")]
    venv: Option<String>,
}

impl ShowCommand {
    /// Print what was found and return the exit status.
    pub async fn execute(self, ctx: &CommandContext) -> Result<i32> {
        if let Some(env) = target_environment(self.venv.as_deref())? {
            let shown = ctx.pip_for(&env).show(&self.pkg).await?;
            if shown.installed {
                println!("{}", shown.metadata);
                return Ok(0);
            }
            println!("package {} is not installed in {}", self.pkg, env.display());
            return Ok(1);
        }

        let paths = ctx.wheel_paths().await?;
        let found = paths.find_artifacts(&self.pkg)?;
        if found.is_empty() {
            println!("no wheel for {} in {}", self.pkg, paths.wheelhouse.display());
            return Ok(1);
        }
        for artifact in found {
            println!("{}", artifact.display());
        }
        Ok(0)
    }
}
