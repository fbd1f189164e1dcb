//! Builder for delegated tool invocations.
//!
//! Every external program mkvenv runs (Python, pip, virtualenv) goes through
//! [`ToolCommand`], so logging, timeouts and error reporting behave the same
//! for all of them.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::MkvenvError;

/// Fluent builder for running an external program and checking its result.
///
/// By default the child inherits stdout/stderr, so pip's own progress output
/// reaches the user, and no timeout is applied.
///
/// # Examples
///
/// ```rust,ignore
/// use mkvenv::process::ToolCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// ToolCommand::new("/envs/demo/bin/pip")
///     .args(["install", "requests", "--upgrade"])
///     .with_operation("pip install requests")
///     .execute()
///     .await?;
///
/// let output = ToolCommand::new("python3")
///     .args(["-c", "import sys; print(sys.version)"])
///     .capture_output()
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    capture_output: bool,
    timeout_duration: Option<Duration>,
    operation: Option<String>,
}

/// Output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout (empty when stdio was inherited)
    pub stdout: String,
    /// Captured stderr (empty when stdio was inherited)
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with status 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl ToolCommand {
    /// Start building an invocation of `program`.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            capture_output: false,
            timeout_duration: None,
            operation: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Capture stdout and stderr instead of passing them through.
    pub const fn capture_output(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// Kill the child if it runs longer than `duration`.
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Human-readable label used in logs and errors.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// The program that will be run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the program, lossily converted for display and tests.
    #[must_use]
    pub fn arg_strings(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    /// The command line as a single string.
    #[must_use]
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.arg_strings());
        parts.join(" ")
    }

    fn operation_label(&self) -> String {
        self.operation.clone().unwrap_or_else(|| self.display())
    }

    /// Run the command and fail unless it exits with status 0.
    pub async fn execute(self) -> Result<CommandOutput> {
        let operation = self.operation_label();
        let program = self.program.display().to_string();
        let output = self.output().await?;

        if !output.success() {
            tracing::debug!("{} exited with {:?}", operation, output.code);
            return Err(MkvenvError::CommandFailed {
                program,
                operation,
                code: output.code,
                stderr: output.stderr,
            }
            .into());
        }

        Ok(output)
    }

    /// Run the command and return its output whatever the exit status.
    ///
    /// Spawning failures and timeouts are still errors.
    pub async fn output(self) -> Result<CommandOutput> {
        let operation = self.operation_label();
        tracing::info!("{}", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        if self.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }
        cmd.kill_on_drop(true);

        let future = cmd.output();
        let output = match self.timeout_duration {
            Some(duration) => match timeout(duration, future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        "Command timed out after {} seconds: {}",
                        duration.as_secs(),
                        self.display()
                    );
                    return Err(MkvenvError::CommandTimedOut {
                        operation,
                        seconds: duration.as_secs(),
                    }
                    .into());
                }
            },
            None => future.await,
        }
        .with_context(|| format!("Failed to execute {}", self.program.display()))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
