//! Configuration for mkvenv.
//!
//! Configuration comes from three places, in decreasing precedence:
//!
//! 1. Command-line options (`-w/--wheelstreet`, `--python`)
//! 2. Environment variables (`$WHEELSTREET`, `$MKVENV_PYTHON`)
//! 3. The optional global config file, `~/.mkvenv/config.toml`
//!
//! Anything left unset falls back to the built-in defaults in
//! [`crate::constants`].
//!
//! # Example config file
//!
//! ```toml
//! wheelstreet = "~/wheels"
//! python = "/usr/local/bin/python3.12"
//! wheel_requirement = "wheel==0.43.0"
//! command_timeout_secs = 1800
//!
//! [virtualenv]
//! version = "20.26.3"
//! ```

pub mod global;

pub use global::{GlobalConfig, VirtualenvConfig};
