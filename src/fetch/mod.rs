//! Fetching audio for compiled jobs
//!
//! The [`Fetcher`] trait hides the downloader; [`YtDlpFetcher`] shells out to
//! yt-dlp. Failures are opaque and never retried.

pub mod traits;
pub mod ytdlp;

pub use traits::{fetch_jobs, FetchSummary, Fetcher};
pub use ytdlp::YtDlpFetcher;
