//! Requirements file reading.
//!
//! A requirements file lists one package per line, in the same format pip
//! uses. Only plain requirement specifiers are installed; everything else is
//! skipped with a logged notice:
//!
//! - blank lines
//! - comments (`#...`)
//! - editable installs (`-e ...`)
//! - anything containing a path separator (`/`), such as local paths or VCS URLs
//! - requirements that are not valid UTF-8
//!
//! Unlike pip, mkvenv installs the packages one at a time, in file order, so a
//! package whose build needs an earlier one installed can be listed after it.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Why a requirements line was not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// `#`-prefixed comment
    Comment,
    /// `-e` editable install
    Editable,
    /// Contains a path separator
    Path,
    /// Not valid UTF-8
    InvalidEncoding,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Blank => "blank line",
            Self::Comment => "comment",
            Self::Editable => "editable install",
            Self::Path => "contains a path",
            Self::InvalidEncoding => "not valid UTF-8",
        };
        f.write_str(reason)
    }
}

/// Decide whether a raw line names a package.
///
/// Returns the trimmed requirement, or the reason it is skipped.
pub fn classify(line: &str) -> Result<&str, SkipReason> {
    let line = line.trim();
    if line.is_empty() {
        Err(SkipReason::Blank)
    } else if line.starts_with('#') {
        Err(SkipReason::Comment)
    } else if line.starts_with("-e") {
        Err(SkipReason::Editable)
    } else if line.contains('/') {
        Err(SkipReason::Path)
    } else {
        Ok(line)
    }
}

/// Lazy, single-pass iterator over the usable lines of a requirements source.
///
/// Read errors are yielded as they happen; skipped lines are logged and never
/// yielded. Lines are read as bytes, so undecodable text is skipped rather than
/// ending the read.
pub struct Requirements<R> {
    reader: Option<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Requirements<R> {
    /// Read requirements from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            buf: Vec::new(),
        }
    }
}

impl<R> Requirements<R> {
    /// A source with no requirements at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            reader: None,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Requirements<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        loop {
            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            let valid = std::str::from_utf8(&self.buf).is_ok();
            let line = String::from_utf8_lossy(&self.buf);
            let classified = match classify(&line) {
                Ok(_) if !valid => Err(SkipReason::InvalidEncoding),
                other => other,
            };
            match classified {
                Ok(requirement) => {
                    tracing::info!("{}", requirement);
                    return Some(Ok(requirement.to_string()));
                }
                Err(reason) => tracing::info!("skipping {} ({})", line.trim(), reason),
            }
        }
    }
}

/// Open a requirements file; `None` yields an empty sequence.
pub fn read_requirements(path: Option<&Path>) -> Result<Requirements<BufReader<File>>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open requirements file {}", path.display()))?;
            Ok(Requirements::new(BufReader::new(file)))
        }
        None => Ok(Requirements::empty()),
    }
}

/// Requirements-file entries first, then packages named on the command line.
pub fn ordered_packages<R: BufRead>(
    requirements: Requirements<R>,
    packages: &[String],
) -> Result<Vec<String>> {
    let mut ordered = requirements.collect::<io::Result<Vec<_>>>().context("Failed to read requirements")?;
    ordered.extend(packages.iter().cloned());
    Ok(ordered)
}
