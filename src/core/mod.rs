//! Core types for mkvenv
//!
//! This module holds the error taxonomy shared by every other module and the
//! helpers that turn errors into terminal output and exit codes.
//!
//! # Error Handling Pattern
//!
//! ```rust,no_run
//! use mkvenv::core::{exit_code, user_friendly_error, MkvenvError};
//!
//! fn run() -> anyhow::Result<()> {
//!     Err(MkvenvError::NoTargetEnvironment {
//!         python: "python3".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = run() {
//!     let code = exit_code(&e);
//!     user_friendly_error(e).display();
//!     std::process::exit(code);
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, MkvenvError, exit_code, user_friendly_error};
