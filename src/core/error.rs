//! Error handling for mkvenv
//!
//! This module provides the error types and user-facing error reporting for
//! mkvenv. The design follows two rules:
//! 1. **Strongly-typed errors** ([`MkvenvError`]) for every failure category the
//!    tool distinguishes
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!
//! # Error Categories
//!
//! - **Configuration**: [`MkvenvError::NoTargetEnvironment`],
//!   [`MkvenvError::WheelhouseMissing`], [`MkvenvError::ConfigError`]
//! - **Interpreter**: [`MkvenvError::PythonNotFound`],
//!   [`MkvenvError::InvalidPythonVersion`]
//! - **Network**: [`MkvenvError::FetchFailed`]
//! - **Delegated tools**: [`MkvenvError::CommandFailed`],
//!   [`MkvenvError::CommandTimedOut`], [`MkvenvError::EnvironmentCreationFailed`],
//!   [`MkvenvError::ArchiveExtractionFailed`]
//!
//! Requirement file lines that cannot be used are never errors; they are
//! skipped by [`crate::requirements`].
//!
//! # Exit Codes
//!
//! [`exit_code`] maps an error to the process exit status: a failed delegated
//! command propagates its own exit code, everything else exits with `1`.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failure categories reported by mkvenv.
#[derive(Error, Debug)]
pub enum MkvenvError {
    /// `install` was run with no `--venv`, no `$VIRTUAL_ENV` and no `--system`.
    #[error("no virtualenv is defined")]
    NoTargetEnvironment {
        /// The interpreter `--system` would install into, if one could be named
        python: String,
    },

    /// Caching was requested but the wheelhouse has not been created yet.
    #[error("{wheelhouse} does not exist")]
    WheelhouseMissing {
        /// The wheelhouse path that was expected to exist
        wheelhouse: String,
    },

    /// No usable Python interpreter could be located.
    #[error("Python interpreter not found: {searched}")]
    PythonNotFound {
        /// Description of what was searched for
        searched: String,
    },

    /// The interpreter reported a version string that could not be parsed.
    #[error("Could not parse Python version from '{output}'")]
    InvalidPythonVersion {
        /// Raw output of the version query
        output: String,
    },

    /// A delegated tool exited with a non-zero status.
    #[error("{operation} failed: {program} exited with {}", describe_code(.code))]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Short description of the step (e.g. "pip install requests")
        operation: String,
        /// Exit code, `None` when the child was terminated by a signal
        code: Option<i32>,
        /// Captured standard error, empty when stdio was inherited
        stderr: String,
    },

    /// A delegated tool did not finish within the configured timeout.
    #[error("{operation} timed out after {seconds} seconds")]
    CommandTimedOut {
        /// Short description of the step
        operation: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// Downloading an archive failed.
    #[error("Failed to download {url}: {reason}")]
    FetchFailed {
        /// URL that was requested
        url: String,
        /// HTTP status or transport error
        reason: String,
    },

    /// A downloaded archive could not be unpacked.
    #[error("Failed to extract {archive}: {reason}")]
    ArchiveExtractionFailed {
        /// Path of the archive
        archive: String,
        /// Underlying error
        reason: String,
    },

    /// Environment creation finished but the activation marker is missing.
    #[error("Failed to create virtualenv at {path}: {reason}")]
    EnvironmentCreationFailed {
        /// Target environment path
        path: String,
        /// What went wrong
        reason: String,
    },

    /// The configuration file is malformed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: the main message in red
/// 2. **Details**: additional context in yellow (optional)
/// 3. **Suggestion**: actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use mkvenv::core::{ErrorContext, MkvenvError};
///
/// let context = ErrorContext::new(MkvenvError::WheelhouseMissing {
///     wheelhouse: "/home/me/.mkvenv/3.12.1".to_string(),
/// })
/// .with_suggestion("Create it using the `wheelhouse` command");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MkvenvError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MkvenvError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Find the first [`MkvenvError`] in an anyhow error chain.
fn find_mkvenv_error(error: &anyhow::Error) -> Option<&MkvenvError> {
    error.chain().find_map(|cause| cause.downcast_ref::<MkvenvError>())
}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// Walks the anyhow chain looking for a [`MkvenvError`]; if one is found the
/// outer context messages become the details. Otherwise the whole chain is
/// rendered into a generic message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(mkvenv_error) = find_mkvenv_error(&error) {
        let mut context = create_error_context(mkvenv_error);
        let outer: Vec<String> = error
            .chain()
            .take_while(|cause| cause.downcast_ref::<MkvenvError>().is_none())
            .map(ToString::to_string)
            .collect();
        if !outer.is_empty() && context.details.is_none() {
            context.details = Some(outer.join(": "));
        }
        return context;
    }

    let permission_denied = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io_error| io_error.kind() == std::io::ErrorKind::PermissionDenied);
    if permission_denied {
        return ErrorContext::new(MkvenvError::Other {
            message: error.to_string(),
        })
        .with_suggestion("Check file ownership, or choose a wheelstreet you can write to with -w");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(MkvenvError::Other {
        message,
    })
}

/// Process exit status for an error.
///
/// A failed delegated command propagates its own exit code; everything else
/// (including a child killed by a signal) exits with `1`.
#[must_use]
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match find_mkvenv_error(error) {
        Some(MkvenvError::CommandFailed {
            code: Some(code),
            ..
        }) if *code != 0 => *code,
        _ => 1,
    }
}

fn create_error_context(error: &MkvenvError) -> ErrorContext {
    let copy = clone_error(error);
    match error {
        MkvenvError::NoTargetEnvironment {
            python,
        } => ErrorContext::new(copy).with_suggestion(format!(
            "Activate a virtualenv, pass --venv PATH, or use --system to install using \
             the current Python interpreter ({python})"
        )),
        MkvenvError::WheelhouseMissing {
            ..
        } => ErrorContext::new(copy)
            .with_suggestion("You can create it using the `wheelhouse` command, or pass --no-cache"),
        MkvenvError::PythonNotFound {
            ..
        } => ErrorContext::new(copy).with_suggestion(
            "Install Python, or point mkvenv at an interpreter with --python or $MKVENV_PYTHON",
        ),
        MkvenvError::CommandFailed {
            stderr,
            ..
        } => {
            let context = ErrorContext::new(copy)
                .with_suggestion("Re-run with -vv to see the full command line");
            if stderr.trim().is_empty() {
                context
            } else {
                context.with_details(stderr.trim().to_string())
            }
        }
        MkvenvError::CommandTimedOut {
            ..
        } => ErrorContext::new(copy)
            .with_suggestion("Raise command_timeout_secs in the config file, or remove it"),
        MkvenvError::FetchFailed {
            ..
        } => ErrorContext::new(copy).with_suggestion(
            "Check your network connection, or install a recent virtualenv for the interpreter",
        ),
        MkvenvError::ConfigError {
            ..
        } => ErrorContext::new(copy)
            .with_suggestion("Check the syntax of the mkvenv config file (~/.mkvenv/config.toml)"),
        _ => ErrorContext::new(copy),
    }
}

/// Rebuild an owned copy of an error borrowed from an anyhow chain.
fn clone_error(error: &MkvenvError) -> MkvenvError {
    match error {
        MkvenvError::NoTargetEnvironment {
            python,
        } => MkvenvError::NoTargetEnvironment {
            python: python.clone(),
        },
        MkvenvError::WheelhouseMissing {
            wheelhouse,
        } => MkvenvError::WheelhouseMissing {
            wheelhouse: wheelhouse.clone(),
        },
        MkvenvError::PythonNotFound {
            searched,
        } => MkvenvError::PythonNotFound {
            searched: searched.clone(),
        },
        MkvenvError::InvalidPythonVersion {
            output,
        } => MkvenvError::InvalidPythonVersion {
            output: output.clone(),
        },
        MkvenvError::CommandFailed {
            program,
            operation,
            code,
            stderr,
        } => MkvenvError::CommandFailed {
            program: program.clone(),
            operation: operation.clone(),
            code: *code,
            stderr: stderr.clone(),
        },
        MkvenvError::CommandTimedOut {
            operation,
            seconds,
        } => MkvenvError::CommandTimedOut {
            operation: operation.clone(),
            seconds: *seconds,
        },
        MkvenvError::FetchFailed {
            url,
            reason,
        } => MkvenvError::FetchFailed {
            url: url.clone(),
            reason: reason.clone(),
        },
        MkvenvError::ArchiveExtractionFailed {
            archive,
            reason,
        } => MkvenvError::ArchiveExtractionFailed {
            archive: archive.clone(),
            reason: reason.clone(),
        },
        MkvenvError::EnvironmentCreationFailed {
            path,
            reason,
        } => MkvenvError::EnvironmentCreationFailed {
            path: path.clone(),
            reason: reason.clone(),
        },
        MkvenvError::ConfigError {
            message,
        } => MkvenvError::ConfigError {
            message: message.clone(),
        },
        MkvenvError::Other {
            message,
        } => MkvenvError::Other {
            message: message.clone(),
        },
    }
}
