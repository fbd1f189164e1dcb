//! End-to-end tests for the mkvenv binary
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Tests that need a target virtualenv use a fake one whose `bin/pip` is a
//! shell script recording its arguments, so they run on Unix only. Tests that
//! need to know the interpreter version skip themselves when no Python is
//! installed.

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod config;
mod create;
mod install;
mod list_wheels;
mod show;
mod wheelhouse;
