//! Unpacking of `.tar.gz` source archives.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;

use crate::core::MkvenvError;

/// Directory a source archive unpacks into: its basename without `.tar.gz`.
#[must_use]
pub fn tree_root(archive: &Path, dest: &Path) -> PathBuf {
    let name = archive.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let stem = name
        .strip_suffix(".tar.gz")
        .or_else(|| name.strip_suffix(".tgz"))
        .unwrap_or(&name);
    dest.join(stem)
}

/// Extract `archive` into `dest` and return the source tree root.
///
/// Runs on the blocking thread pool. Entries that would land outside `dest`
/// are skipped by `tar`.
pub async fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<PathBuf> {
    tracing::info!("extracting {} to {}", archive.display(), dest.display());

    let archive_path = archive.to_path_buf();
    let dest_path = dest.to_path_buf();
    tokio::task::spawn_blocking(move || unpack(&archive_path, &dest_path))
        .await
        .context("Failed to spawn blocking task for archive extraction")??;

    let root = tree_root(archive, dest);
    if !root.is_dir() {
        return Err(MkvenvError::ArchiveExtractionFailed {
            archive: archive.display().to_string(),
            reason: format!("expected source tree at {}", root.display()),
        }
        .into());
    }
    Ok(root)
}

fn unpack(archive: &Path, dest: &Path) -> Result<()> {
    let failed = |reason: String| MkvenvError::ArchiveExtractionFailed {
        archive: archive.display().to_string(),
        reason,
    };

    let file = File::open(archive).map_err(|e| failed(e.to_string()))?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    tarball.unpack(dest).map_err(|e| failed(e.to_string()))?;
    Ok(())
}
