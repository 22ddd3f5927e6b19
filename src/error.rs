//! Unified error types for song-timeliner
//!
//! Error strategy:
//! - Per-file and per-job errors (tags, fetch, move): Recoverable, log and continue
//! - Catalog-wide errors (no sources, report output): Fatal, abort the run
//!
//! All errors include actionable suggestions where possible.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio extensions recognised when cataloging, for helpful error messages
pub const SUPPORTED_EXTENSIONS: &str = "mp3, m4a, opus, ogg, flac, wav";

/// Top-level error type for song-timeliner operations
#[derive(Debug, Error)]
pub enum TimelinerError {
    // =========================================================================
    // Recoverable errors - degrade to a best-effort record, continue batch
    // =========================================================================
    #[error("No metadata in '{path}': {reason}")]
    NoMetadata { path: PathBuf, reason: String },

    #[error("No tags found in '{0}'")]
    NoTags(PathBuf),

    #[error("Fetch failed for {url}: {reason}\n  Tip: Check the identifier is correct and that yt-dlp is installed and up to date")]
    FetchFailure { url: String, reason: String },

    #[error("Skipped moving '{0}': file is no longer at the expected path")]
    FileMoveSkipped(PathBuf),

    // =========================================================================
    // Fatal errors - abort the run, no report written
    // =========================================================================
    #[error("No source directories found in '{root}'\n  Tip: Pass artist identifiers, or run with -d to download them first.\n  Supported audio files: {SUPPORTED_EXTENSIONS}")]
    EmptyCatalog { root: PathBuf },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the working directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for song-timeliner operations
pub type Result<T> = std::result::Result<T, TimelinerError>;

impl TimelinerError {
    /// Returns true if this error is recoverable (contain it, keep processing siblings)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TimelinerError::NoMetadata { .. }
                | TimelinerError::NoTags(_)
                | TimelinerError::FetchFailure { .. }
                | TimelinerError::FileMoveSkipped(_)
        )
    }

    /// Create a metadata error for a file
    pub fn no_metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TimelinerError::NoMetadata {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a fetch error for a URL
    pub fn fetch_failure(url: impl Into<String>, reason: impl Into<String>) -> Self {
        TimelinerError::FetchFailure {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        TimelinerError::OutputError { path, reason }
    }
}

/// Extension trait for adding file context to errors
pub trait ErrorContext<T> {
    /// Turn any error into `NoMetadata` for the given file
    fn metadata_context(self, path: &Path) -> Result<T>;
}

impl<T, E: std::fmt::Display> ErrorContext<T> for std::result::Result<T, E> {
    fn metadata_context(self, path: &Path) -> Result<T> {
        self.map_err(|e| TimelinerError::no_metadata(path, e.to_string()))
    }
}
