//! Global constants used throughout the mkvenv codebase.
//!
//! Pinned versions, download locations, directory names and environment
//! variable names live here so the defaults are discoverable in one place.

use std::time::Duration;

/// Base URL for `virtualenv` source archives.
pub const VIRTUALENV_BASE_URL: &str = "https://pypi.python.org/packages/source/v/virtualenv";

/// Minimum acceptable `virtualenv` version, and the version fetched when the
/// system copy is missing or older than this.
pub const VIRTUALENV_VERSION: &str = "1.11.6";

/// Default constraint used to install the wheel builder into the cache environment.
pub const WHEEL_REQUIREMENT: &str = "wheel>=0.24.0";

/// Default wheelstreet when neither `-w` nor `$WHEELSTREET` nor the config file name one.
pub const DEFAULT_WHEELSTREET: &str = "~/.mkvenv";

/// Environment variable naming the wheelstreet.
pub const WHEELSTREET_ENV: &str = "WHEELSTREET";

/// Environment variable set by an activated virtualenv.
pub const VIRTUAL_ENV_ENV: &str = "VIRTUAL_ENV";

/// Environment variable naming the Python interpreter to use.
pub const PYTHON_ENV: &str = "MKVENV_PYTHON";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MKVENV_CONFIG";

/// Download cache subdirectory of a wheelhouse.
pub const WHEELHOUSE_CACHE_DIR: &str = "cache";

/// Cache-maintenance environment subdirectory of a wheelhouse.
pub const WHEELHOUSE_VENV_DIR: &str = "venv";

/// Lock directory inside the wheelstreet.
pub const LOCKS_DIR: &str = ".locks";

/// Default timeout for archive downloads (5 minutes).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Connect timeout for archive downloads.
pub const FETCH_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
