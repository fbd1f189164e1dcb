//! Command-line interface for mkvenv.
//!
//! mkvenv wraps virtualenv, pip and wheel:
//!
//! - `create` (alias `virtualenv`) - create a virtualenv, downloading the
//!   `virtualenv` source when the installed one is missing or out of date
//! - `wheelhouse` (alias `wheel`) - create the wheel cache for the current
//!   interpreter and build wheels into it
//! - `install` - install packages into a virtualenv, through the wheel cache
//!   unless `--no-cache` is given
//! - `show` - report whether a package is installed or cached
//! - `list-wheels` - list the cached wheels
//!
//! # Typical Workflow
//!
//! ```bash
//! # build wheels once
//! mkvenv wheelhouse -r requirements.txt
//!
//! # then create environments from the cache, quickly and offline
//! mkvenv install --venv ./env -r requirements.txt
//! ```
//!
//! # Global Options
//!
//! `-w/--wheelstreet` overrides `$WHEELSTREET` and the config file; `-v` and
//! `-q` set the [`Verbosity`]; `--python` picks the interpreter; `--config`
//! picks the config file. Each command runs with its own tracing subscriber
//! built from the verbosity.

mod common;
mod create;
mod install;
mod list_wheels;
mod show;
mod wheelhouse;

pub use common::{CommandContext, target_environment};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument::WithSubscriber;

use crate::config::GlobalConfig;
use crate::constants::PYTHON_ENV;
use crate::logging::Verbosity;

/// Wrapper for virtualenv, pip, and wheel
#[derive(Parser, Debug)]
#[command(
    name = "mkvenv",
    version,
    about = "Wrapper for virtualenv, pip, and wheel",
    long_about = "Create virtualenvs and install packages into them from a per-interpreter \
                  cache of wheels.\n\nWheels are kept in WHEELSTREET/<python version>, where \
                  WHEELSTREET is -w/--wheelstreet, $WHEELSTREET, the config file's \
                  `wheelstreet`, or ~/.mkvenv. Packages are installed one at a time, in the \
                  order given."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keep wheels in WHEELSTREET/<python version> instead of the default location
    /// (may also be set with $WHEELSTREET)
    #[arg(short = 'w', long, global = true, value_name = "PATH")]
    wheelstreet: Option<String>,

    /// Increase verbosity (-v is verbose, -vv more so)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress screen output from pip commands
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Python interpreter to use
    #[arg(long, global = true, env = PYTHON_ENV, value_name = "PATH")]
    python: Option<String>,

    /// Path to the config file (default: ~/.mkvenv/config.toml, or $MKVENV_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new virtualenv
    #[command(visible_alias = "virtualenv")]
    Create(create::CreateCommand),

    /// Create the WHEELHOUSE, optionally building wheels
    #[command(visible_alias = "wheel")]
    Wheelhouse(wheelhouse::WheelhouseCommand),

    /// Install packages to a virtualenv, optionally building and caching wheels
    Install(install::InstallCommand),

    /// Check the status of a package
    Show(show::ShowCommand),

    /// List wheels
    ListWheels(list_wheels::ListWheelsCommand),
}

impl Cli {
    /// Output level selected by `-v`/`-q`.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }

    /// Run the selected command and return the process exit status.
    ///
    /// Logging for the command goes to a subscriber built from
    /// [`Cli::verbosity`]; nothing is installed globally.
    pub async fn execute(self) -> Result<i32> {
        let verbosity = self.verbosity();
        self.run(verbosity).with_subscriber(verbosity.subscriber()).await
    }

    async fn run(self, verbosity: Verbosity) -> Result<i32> {
        let config = GlobalConfig::load_with_optional(self.config).await?;
        let ctx = CommandContext::new(config, verbosity, self.wheelstreet, self.python);

        match self.command {
            Commands::Create(cmd) => cmd.execute(&ctx).await.map(|()| 0),
            Commands::Wheelhouse(cmd) => cmd.execute(&ctx).await.map(|()| 0),
            Commands::Install(cmd) => cmd.execute(&ctx).await.map(|()| 0),
            Commands::Show(cmd) => cmd.execute(&ctx).await,
            Commands::ListWheels(cmd) => cmd.execute(&ctx).await.map(|()| 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["mkvenv", "virtualenv", "env"]).unwrap();
        assert!(matches!(cli.command, Commands::Create(_)));

        let cli = Cli::try_parse_from(["mkvenv", "wheel", "numpy"]).unwrap();
        assert!(matches!(cli.command, Commands::Wheelhouse(_)));

        let cli = Cli::try_parse_from(["mkvenv", "list-wheels"]).unwrap();
        assert!(matches!(cli.command, Commands::ListWheels(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mkvenv", "install", "foo", "-vv", "-w", "/tmp/ws"]).unwrap();
        assert_eq!(cli.verbosity().level(), 3);
        assert_eq!(cli.wheelstreet.as_deref(), Some("/tmp/ws"));
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["mkvenv", "-q", "list-wheels"]).unwrap();
        assert!(cli.verbosity().is_quiet());
    }

    #[test]
    fn test_create_requires_path() {
        assert!(Cli::try_parse_from(["mkvenv", "create"]).is_err());
    }
}
