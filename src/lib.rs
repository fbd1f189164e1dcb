//! mkvenv - a wrapper for virtualenv, pip, and wheel
//!
//! mkvenv creates virtualenvs and installs packages into them from a local
//! cache of wheels. The cache root (the *wheelstreet*) holds one *wheelhouse*
//! per exact Python version, so wheels built for one interpreter are never
//! reused by another.
//!
//! Nothing is reimplemented: every environment, build and install step is a
//! `virtualenv` or `pip` subprocess, run one at a time.
//!
//! # Modules
//!
//! ## Command Line
//! - [`cli`] - argument parsing and the five subcommands
//! - [`config`] - the optional `~/.mkvenv/config.toml`
//! - [`logging`] - verbosity levels and the tracing subscriber
//! - [`core`] - error types, user-facing error reports and exit codes
//!
//! ## Environments and Packages
//! - [`python`] - interpreter discovery and exact version
//! - [`venv`] - virtualenv creation, bootstrapping `virtualenv` when needed
//! - [`fetch`] - downloading the `virtualenv` source archive
//! - [`wheelhouse`] - wheel cache layout and locking
//! - [`requirements`] - requirements file reading
//! - [`pip`] - pip command lines
//! - [`installer`] - ordered, cache-aware installation plans
//!
//! ## Support
//! - [`process`] - subprocess execution
//! - [`utils`] - filesystem and platform helpers
//! - [`constants`] - defaults and well-known names

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetch;
pub mod installer;
pub mod logging;
pub mod pip;
pub mod process;
pub mod python;
pub mod requirements;
pub mod utils;
pub mod venv;
pub mod wheelhouse;
