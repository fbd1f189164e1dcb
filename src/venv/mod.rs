//! Virtual environment creation.
//!
//! [`Bootstrapper::ensure_environment`] guarantees that a target directory is a
//! virtual environment when it returns. A directory that already holds the
//! activation marker (`bin/activate`, or `Scripts/activate` on Windows) is left
//! alone. Otherwise an [`EnvironmentCreator`] is chosen:
//!
//! 1. the interpreter's own `virtualenv`, if it is at least the configured version
//! 2. otherwise the configured release, downloaded and extracted into a scratch
//!    directory
//!
//! The scratch directory is either supplied by the caller (and kept) or a
//! temporary directory that is removed however creation ends.

pub mod archive;
pub mod creator;

pub use creator::{EnvironmentCreator, FetchedVirtualenv, SystemVirtualenv};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use crate::config::VirtualenvConfig;
use crate::core::MkvenvError;
use crate::fetch::{FetchOptions, fetch};
use crate::logging::Verbosity;
use crate::python::LazyInterpreter;
use crate::utils::{activation_marker, ensure_dir};

/// Whether `target` already looks like a virtual environment.
#[must_use]
pub fn is_environment(target: &Path) -> bool {
    activation_marker(target).exists()
}

/// Scratch space for an unpacked `virtualenv` release.
enum Scratch {
    Kept(PathBuf),
    Temporary(TempDir),
}

impl Scratch {
    fn new(src_dir: Option<&Path>) -> Result<Self> {
        match src_dir {
            Some(dir) => {
                ensure_dir(dir)?;
                Ok(Self::Kept(dir.to_path_buf()))
            }
            None => {
                let temp = TempDir::with_prefix("mkvenv-")
                    .context("Failed to create temporary directory")?;
                Ok(Self::Temporary(temp))
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Kept(path) => path,
            Self::Temporary(temp) => temp.path(),
        }
    }
}

/// Creates virtual environments on demand.
#[derive(Debug)]
pub struct Bootstrapper<'a> {
    python: &'a LazyInterpreter,
    settings: &'a VirtualenvConfig,
    verbosity: Verbosity,
    command_timeout: Option<Duration>,
    fetch_timeout: Duration,
}

impl<'a> Bootstrapper<'a> {
    /// Bootstrapper that will use `python` once an environment actually needs creating.
    #[must_use]
    pub const fn new(
        python: &'a LazyInterpreter,
        settings: &'a VirtualenvConfig,
        verbosity: Verbosity,
        command_timeout: Option<Duration>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            python,
            settings,
            verbosity,
            command_timeout,
            fetch_timeout,
        }
    }

    /// Make sure `target` is a virtual environment.
    ///
    /// Returns `true` when an environment was created and `false` when one
    /// already existed. `src_dir` keeps the downloaded `virtualenv` source
    /// for reuse; without it a temporary directory is used and removed.
    pub async fn ensure_environment(&self, target: &Path, src_dir: Option<&Path>) -> Result<bool> {
        if is_environment(target) {
            tracing::info!("virtualenv {} already exists", target.display());
            return Ok(false);
        }

        let interpreter = self.python.get().await?;
        let system = SystemVirtualenv::detect(
            &interpreter.executable,
            &self.settings.version,
            self.verbosity,
            self.command_timeout,
        )
        .await?;

        match system {
            Some(creator) => self.create_with(&creator, target).await?,
            None => {
                let scratch = Scratch::new(src_dir)?;
                tracing::info!(
                    "downloading and extracting virtualenv source to {}",
                    scratch.path().display()
                );
                let tree = self.unpack_release(scratch.path()).await?;
                let creator = FetchedVirtualenv::new(
                    &interpreter.executable,
                    tree,
                    self.verbosity,
                    self.command_timeout,
                );
                self.create_with(&creator, target).await?;
                // a temporary scratch directory is removed here, or on any early return above
                drop(scratch);
            }
        }

        if !is_environment(target) {
            return Err(MkvenvError::EnvironmentCreationFailed {
                path: target.display().to_string(),
                reason: format!("{} was not created", activation_marker(target).display()),
            }
            .into());
        }
        Ok(true)
    }

    async fn unpack_release(&self, scratch: &Path) -> Result<PathBuf> {
        let options = FetchOptions {
            timeout: self.fetch_timeout,
            verbosity: self.verbosity,
        };
        let archive = fetch(&self.settings.archive_url(), scratch, &options).await?;
        archive::extract_tar_gz(&archive, scratch).await
    }

    async fn create_with(&self, creator: &impl EnvironmentCreator, target: &Path) -> Result<()> {
        tracing::info!("using {}", creator.describe());
        tracing::info!("creating virtualenv {}", target.display());
        creator
            .create(target)
            .await
            .with_context(|| format!("Failed to create virtualenv {}", target.display()))
    }
}
