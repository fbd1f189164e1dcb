//! Archive downloads.
//!
//! [`fetch`] downloads a URL into a directory unless a file with the same
//! basename is already there. An existing file is trusted as-is: a truncated
//! earlier download is not detected and will not be re-fetched.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::constants::{DEFAULT_FETCH_TIMEOUT, FETCH_CONNECT_TIMEOUT};
use crate::core::MkvenvError;
use crate::logging::Verbosity;
use crate::utils::ensure_dir;

/// Knobs for [`fetch`].
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Overall request timeout
    pub timeout: Duration,
    /// Output level; progress bars are drawn only above quiet
    pub verbosity: Verbosity,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            verbosity: Verbosity::default(),
        }
    }
}

/// Last path segment of a URL, ignoring any query string or fragment.
#[must_use]
pub fn url_basename(url: &str) -> &str {
    let without_suffix = url.split(['?', '#']).next().unwrap_or(url);
    without_suffix.trim_end_matches('/').rsplit('/').next().unwrap_or(without_suffix)
}

/// Download `url` into `dest_dir` and return the local file path.
///
/// `dest_dir` is created if needed. When `dest_dir/<basename>` already exists
/// no request is made.
pub async fn fetch(url: &str, dest_dir: &Path, options: &FetchOptions) -> Result<PathBuf> {
    tracing::info!("downloading {} to {}", url, dest_dir.display());

    ensure_dir(dest_dir)?;
    let basename = url_basename(url);
    if basename.is_empty() {
        return Err(MkvenvError::FetchFailed {
            url: url.to_string(),
            reason: "URL has no file name".to_string(),
        }
        .into());
    }
    let fname = dest_dir.join(basename);
    if fname.exists() {
        tracing::debug!("{} already downloaded", fname.display());
        return Ok(fname);
    }

    let client = reqwest::Client::builder()
        .connect_timeout(FETCH_CONNECT_TIMEOUT)
        .timeout(options.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let fetch_failed = |reason: String| MkvenvError::FetchFailed {
        url: url.to_string(),
        reason,
    };

    let mut response = client.get(url).send().await.map_err(|e| fetch_failed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_failed(format!("HTTP {}", response.status())).into());
    }

    let progress = if options.verbosity.show_progress() {
        let bar = ProgressBar::new(response.content_length().unwrap_or(0));
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.set_message(basename.to_string());
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut file = tokio::fs::File::create(&fname)
        .await
        .with_context(|| format!("Failed to create {}", fname.display()))?;
    while let Some(chunk) = response.chunk().await.map_err(|e| fetch_failed(e.to_string()))? {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", fname.display()))?;
        progress.inc(chunk.len() as u64);
    }
    file.flush().await.with_context(|| format!("Failed to write {}", fname.display()))?;
    progress.finish_and_clear();

    Ok(fname)
}
