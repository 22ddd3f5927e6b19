//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// song-timeliner - Catalog downloaded tracks into a release timeline
///
/// Tokens are artist identifiers (YouTube channel IDs starting with UC, or
/// SoundCloud profile names). Wrap `bc <artist> <album>... cb` to fetch
/// Bandcamp albums. With no tokens, every folder in the working directory is
/// cataloged.
#[derive(Parser, Debug)]
#[command(name = "song-timeliner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Artist identifiers and bc/cb album groups
    #[arg(value_name = "TOKENS")]
    pub tokens: Vec<String>,

    /// Download new content before cataloging
    #[arg(short, long, default_value = "false")]
    pub download: bool,

    /// Move tracks into album folders after reading their tags
    #[arg(short, long, default_value = "false")]
    pub organize: bool,

    /// Fetch lossless FLAC instead of 192 kbps MP3
    #[arg(long, default_value = "false")]
    pub lossless: bool,

    /// Add an Album column to the report (always on with --organize)
    #[arg(long, default_value = "false")]
    pub album: bool,

    /// Working directory holding one folder per artist
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// yt-dlp binary used for downloads
    #[arg(long = "yt-dlp", value_name = "PATH", env = "STL_YT_DLP", default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - show compiled jobs and source folders without touching anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tokens_and_flags() {
        let cli = Cli::parse_from([
            "song-timeliner",
            "-d",
            "-o",
            "UCabc",
            "bc",
            "artist",
            "some-album",
            "cb",
        ]);
        assert!(cli.download);
        assert!(cli.organize);
        assert!(!cli.lossless);
        assert_eq!(cli.tokens, vec!["UCabc", "bc", "artist", "some-album", "cb"]);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["song-timeliner", "-vv"]);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
        let cli = Cli::parse_from(["song-timeliner", "-vv", "-q"]);
        assert_eq!(cli.log_level(), tracing::Level::ERROR);
    }
}
