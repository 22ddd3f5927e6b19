//! yt-dlp process fetcher

use super::traits::{Fetcher, OUTPUT_TEMPLATE};
use crate::error::{Result, TimelinerError};
use crate::types::AudioPolicy;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Default fetcher binary, looked up in PATH
pub const DEFAULT_BINARY: &str = "yt-dlp";

/// Fetches audio by running yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Check if the binary can be executed
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary).arg("--version").output().is_ok()
    }

    /// Arguments for one download: extract audio, convert, embed tags
    fn args(url: &str, target_dir: &Path, policy: &AudioPolicy) -> Vec<OsString> {
        vec![
            "--extract-audio".into(),
            "--audio-format".into(),
            policy.format.extension().into(),
            "--audio-quality".into(),
            policy.quality.as_str().into(),
            "--embed-metadata".into(),
            "--no-progress".into(),
            "--output".into(),
            target_dir.join(OUTPUT_TEMPLATE).into_os_string(),
            url.into(),
        ]
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl Fetcher for YtDlpFetcher {
    fn fetch(&self, url: &str, target_dir: &Path, policy: &AudioPolicy) -> Result<()> {
        let args = Self::args(url, target_dir, policy);
        debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TimelinerError::fetch_failure(
                    url,
                    format!("{} not found in PATH", self.binary.display()),
                ),
                _ => TimelinerError::fetch_failure(url, e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TimelinerError::fetch_failure(
                url,
                format!("exit code {:?}: {}", output.status.code(), stderr.trim()),
            ));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
