//! Runtime configuration settings

use crate::types::AudioPolicy;
use std::path::PathBuf;

/// Runtime settings for the cataloging pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Working directory holding the source folders
    pub root: PathBuf,
    /// Raw identifier and group tokens
    pub tokens: Vec<String>,
    /// Fetch before cataloging
    pub download: bool,
    /// Move tracks into album folders
    pub organize: bool,
    /// Render the Album column
    pub include_album: bool,
    /// Format and quality handed to the fetcher
    pub policy: AudioPolicy,
    /// Fetcher binary
    pub fetcher_binary: PathBuf,
    /// Show progress bars
    pub show_progress: bool,
    /// Dry run mode - show jobs without fetching or writing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        let policy = if cli.lossless {
            AudioPolicy::lossless()
        } else {
            AudioPolicy::default()
        };

        Self {
            root: cli.root.clone(),
            tokens: cli.tokens.clone(),
            download: cli.download,
            organize: cli.organize,
            include_album: cli.album || cli.organize,
            policy,
            fetcher_binary: cli.yt_dlp.clone(),
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            tokens: Vec::new(),
            download: false,
            organize: false,
            include_album: false,
            policy: AudioPolicy::default(),
            fetcher_binary: PathBuf::from(crate::fetch::ytdlp::DEFAULT_BINARY),
            show_progress: true,
            dry_run: false,
        }
    }
}
