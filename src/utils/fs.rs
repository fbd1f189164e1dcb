//! File system helpers.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Ensure a directory exists, creating it and any missing parents.
///
/// An already-existing directory is not an error. Any other failure, or a
/// non-directory already sitting at `path`, is propagated.
///
/// # Examples
///
/// ```rust,no_run
/// use mkvenv::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("wheels/3.12.1/cache"))?;
/// ensure_dir(Path::new("wheels/3.12.1/cache"))?; // no-op
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Lexically normalize a path, dropping `.` and folding `..` into its parent.
///
/// No filesystem access happens, so symlinks are not resolved.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // never pop past the root
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}
