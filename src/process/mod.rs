//! Subprocess execution.
//!
//! mkvenv never reimplements the Python packaging tools; it runs them. All of
//! those runs are sequential: each [`ToolCommand`] is awaited to completion and
//! its exit status inspected before the next step starts.

pub mod command_builder;

pub use command_builder::{CommandOutput, ToolCommand};
