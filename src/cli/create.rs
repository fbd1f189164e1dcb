//! Create a virtual environment.
//!
//! ```bash
//! mkvenv create ./env
//! mkvenv create ./env --src ~/src/virtualenv   # keep the downloaded source
//! ```
//!
//! Running the command against an existing environment does nothing.

use anyhow::Result;
use clap::Args;

use super::common::CommandContext;
use crate::utils::resolve_path;

/// Create a new virtualenv
#[derive(Args, Debug)]
pub struct CreateCommand {
    /// Path to the virtualenv
    #[arg(value_name = "PATH")]
    venv: String,

    /// Download and unpack the virtualenv source into DIR and keep it there
    #[arg(long, value_name = "DIR")]
    src: Option<String>,
}

impl CreateCommand {
    /// Create the environment unless it already exists.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let target = resolve_path(&self.venv)?;
        let src_dir = self.src.as_deref().map(resolve_path).transpose()?;

        if ctx.bootstrapper().ensure_environment(&target, src_dir.as_deref()).await? {
            tracing::info!("created virtualenv {}", target.display());
        }
        Ok(())
    }
}
