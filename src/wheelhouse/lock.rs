//! Advisory locking for a wheelhouse.
//!
//! Building a wheel and then installing it is a two-step sequence; two mkvenv
//! processes working on the same wheelhouse could interleave those steps. A
//! [`WheelhouseLock`] serializes them. The lock is advisory: only other mkvenv
//! processes honour it.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::constants::LOCKS_DIR;
use crate::python::PythonVersion;

/// Exclusive lock on one version's wheelhouse, released on drop.
#[derive(Debug)]
pub struct WheelhouseLock {
    file: File,
    path: PathBuf,
}

impl WheelhouseLock {
    /// Block until the lock for `version` under `wheelstreet` is held.
    ///
    /// The lock file lives at `<wheelstreet>/.locks/<X.Y.Z>.lock`, outside the
    /// wheelhouse itself, so taking the lock never makes the wheelhouse
    /// appear to exist. Lock files are left in place after release.
    ///
    /// Waiting happens on the blocking thread pool; there is no timeout.
    pub async fn acquire(wheelstreet: &Path, version: &PythonVersion) -> Result<Self> {
        let locks_dir = wheelstreet.join(LOCKS_DIR);
        tokio::fs::create_dir_all(&locks_dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                anyhow::anyhow!(
                    "Permission denied: cannot create locks directory at {}",
                    locks_dir.display()
                )
            } else {
                anyhow::anyhow!("Failed to create directory {}: {}", locks_dir.display(), e)
            }
        })?;

        let path = locks_dir.join(format!("{version}.lock"));
        let lock_path = path.clone();

        tracing::debug!("waiting for {}", path.display());
        let file = tokio::task::spawn_blocking(move || -> Result<File> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&lock_path)
                .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

            Ok(file)
        })
        .await
        .context("Failed to spawn blocking task for lock acquisition")??;

        tracing::debug!("locked {}", path.display());
        Ok(Self {
            file,
            path,
        })
    }

    /// Path of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WheelhouseLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
