//! Cross-platform utilities and helpers
//!
//! - [`fs`] - idempotent directory creation and lexical path normalization
//! - [`platform`] - home/tilde expansion, absolute paths, and the per-platform
//!   layout of virtual environments

pub mod fs;
pub mod platform;

pub use fs::{ensure_dir, normalize_path};
pub use platform::{activation_marker, env_bin_dir, executable_name, resolve_path};
