//! Platform-specific helpers.
//!
//! Virtual environments are laid out differently on Windows (`Scripts/`,
//! `.exe` suffixes) than everywhere else (`bin/`). The helpers here hide that
//! difference, and [`resolve_path`] turns user-supplied paths into absolute
//! ones the way a shell would.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::fs::normalize_path;

/// Returns true if running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Expand `~` and environment variables, then make the path absolute.
///
/// Relative paths are resolved against the current directory and `..`
/// components are folded lexically. A `$` that does not name a set variable
/// is kept literally, so only `~` is expanded in that case.
///
/// # Examples
///
/// ```rust,no_run
/// use mkvenv::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let wheelstreet = resolve_path("~/.mkvenv")?;
/// assert!(wheelstreet.is_absolute());
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = match shellexpand::full(path) {
        Ok(expanded) => expanded,
        Err(e) => {
            tracing::debug!("not expanding variables in {}: {}", path, e);
            shellexpand::tilde(path)
        }
    };
    let expanded = PathBuf::from(expanded.as_ref());

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir().context("Failed to read current directory")?.join(expanded)
    };

    Ok(normalize_path(&absolute))
}

/// Directory holding executables inside a virtual environment.
#[must_use]
pub fn env_bin_dir(env: &Path) -> PathBuf {
    if is_windows() {
        env.join("Scripts")
    } else {
        env.join("bin")
    }
}

/// Platform spelling of an executable name (`pip` / `pip.exe`).
#[must_use]
pub fn executable_name(name: &str) -> String {
    if is_windows() {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// The file whose presence marks a directory as an existing virtual environment.
#[must_use]
pub fn activation_marker(env: &Path) -> PathBuf {
    env_bin_dir(env).join("activate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_absolute_stays() {
        let tmp = std::env::temp_dir();
        let resolved = resolve_path(tmp.to_str().unwrap()).unwrap();
        assert_eq!(resolved, normalize_path(&tmp));
    }

    #[test]
    fn test_resolve_path_relative_becomes_absolute() {
        let resolved = resolve_path("some/relative/../dir").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/dir"));
    }

    #[test]
    fn test_resolve_path_expands_tilde() {
        let home = dirs::home_dir().unwrap();
        let resolved = resolve_path("~/.mkvenv").unwrap();
        assert_eq!(resolved, normalize_path(&home.join(".mkvenv")));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_path_keeps_unknown_variable() {
        let resolved = resolve_path("/data/$mkvenv_unset_variable_xyz/wheels").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/$mkvenv_unset_variable_xyz/wheels"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_path_keeps_unknown_variable_with_tilde() {
        let home = dirs::home_dir().unwrap();
        let resolved = resolve_path("~/$mkvenv_unset_variable_xyz").unwrap();
        assert_eq!(resolved, normalize_path(&home.join("$mkvenv_unset_variable_xyz")));
    }

    #[cfg(unix)]
    #[test]
    fn test_env_layout_unix() {
        let env = Path::new("/envs/demo");
        assert_eq!(activation_marker(env), PathBuf::from("/envs/demo/bin/activate"));
        assert_eq!(env_bin_dir(env).join(executable_name("pip")), PathBuf::from("/envs/demo/bin/pip"));
    }
}
