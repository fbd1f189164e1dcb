//! List the wheels in the wheelhouse.

use anyhow::Result;
use clap::Args;

use super::common::CommandContext;

/// List wheels
#[derive(Args, Debug)]
pub struct ListWheelsCommand {}

impl ListWheelsCommand {
    /// Print one wheel file name per line; a missing wheelhouse is only reported.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let paths = ctx.wheel_paths().await?;
        if !paths.exists {
            tracing::warn!(
                "The directory {} does not exist - use the `wheelhouse` subcommand to create it",
                paths.wheelhouse.display()
            );
            return Ok(());
        }

        tracing::warn!("# Wheels in {}/", paths.wheelhouse.display());
        for name in paths.list_wheels()? {
            println!("{name}");
        }
        Ok(())
    }
}
