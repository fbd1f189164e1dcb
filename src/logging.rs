//! Verbosity handling and log output.
//!
//! mkvenv has four output levels driven by `-v` and `-q`:
//!
//! | Flags   | Level | Log filter | Delegated tools        |
//! |---------|-------|------------|------------------------|
//! | `-q`    | 0     | error      | run with `--quiet`     |
//! | (none)  | 1     | warn       | default output         |
//! | `-v`    | 2     | info       | default output         |
//! | `-vv`   | 3+    | debug      | run with `-v`          |
//!
//! The level is carried around as a [`Verbosity`] value instead of being read
//! back from global state. [`Verbosity::subscriber`] builds the tracing
//! subscriber for a command, which the CLI attaches to the command future.

use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Output verbosity for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(u8);

impl Default for Verbosity {
    fn default() -> Self {
        Self(1)
    }
}

impl Verbosity {
    /// Build from the number of `-v` flags and the `--quiet` flag.
    ///
    /// `--quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            Self(0)
        } else {
            Self(verbose.saturating_add(1))
        }
    }

    /// Raw level: 0 quiet, 1 default, 2 verbose, 3+ debug.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Whether delegated tools should be silenced.
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        self.0 == 0
    }

    /// Log filter for this crate.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self.0 {
            0 => LevelFilter::ERROR,
            1 => LevelFilter::WARN,
            2 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }

    /// Extra flags passed through to pip and virtualenv.
    #[must_use]
    pub fn tool_flags(self) -> &'static [&'static str] {
        match self.0 {
            0 => &["--quiet"],
            1 | 2 => &[],
            _ => &["-v"],
        }
    }

    /// Whether progress bars may be drawn.
    #[must_use]
    pub fn show_progress(self) -> bool {
        self.0 > 0 && std::io::stderr().is_terminal()
    }

    /// Filter directives for this level; `$RUST_LOG` takes precedence when set.
    #[must_use]
    pub fn env_filter(self) -> EnvFilter {
        if std::env::var_os("RUST_LOG").is_some() {
            return EnvFilter::from_default_env();
        }
        let others = if self.0 == 0 {
            LevelFilter::ERROR
        } else {
            LevelFilter::WARN
        };
        EnvFilter::new(format!("{others},mkvenv={}", self.level_filter()))
    }

    /// Build a subscriber writing to stderr at this level.
    ///
    /// Messages are printed bare at the default level and prefixed with their
    /// level name when `-v` is given.
    #[must_use]
    pub fn subscriber(self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .without_time()
            .with_target(false)
            .with_level(self.0 > 1)
            .finish()
    }
}
