//! Fetcher trait and job dispatch

use crate::error::Result;
use crate::types::{AudioPolicy, JobSet, SourceDir, SourceKind};
use std::path::Path;
use tracing::{info, warn};

/// Output file name template, keyed by track title
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Download backend
pub trait Fetcher {
    /// Populate `target_dir` with the audio behind `url`.
    ///
    /// Files are named with [`OUTPUT_TEMPLATE`]. Any failure is reported as
    /// `FetchFailure` and is not retried.
    fn fetch(&self, url: &str, target_dir: &Path, policy: &AudioPolicy) -> Result<()>;

    /// Get the name of this fetcher (for logging)
    fn name(&self) -> &'static str;
}

/// Fetch outcome counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Run every job in order, creating source folders as needed.
///
/// A failed fetch is logged and the remaining jobs still run. Only failing to
/// create a source folder is returned as an error.
pub fn fetch_jobs(
    jobs: &JobSet,
    root: &Path,
    fetcher: &dyn Fetcher,
    policy: &AudioPolicy,
) -> Result<FetchSummary> {
    let channel_targets = jobs.channel_jobs().iter().map(|job| {
        (
            SourceDir::new(root, &job.id, SourceKind::Channel),
            job.url.clone(),
        )
    });
    let album_targets = jobs.album_groups().iter().flat_map(|group| {
        let source = SourceDir::new(root, &group.source_id, SourceKind::AlbumGroup);
        group
            .urls()
            .into_iter()
            .map(move |url| (source.clone(), url))
    });

    let mut summary = FetchSummary::default();
    for (source, url) in channel_targets.chain(album_targets) {
        std::fs::create_dir_all(&source.path)?;

        info!("Fetching {} into {} with {}", url, source.path.display(), fetcher.name());
        match fetcher.fetch(&url, &source.path, policy) {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                warn!("{}", e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Fetched {} of {} URLs",
        summary.succeeded,
        summary.succeeded + summary.failed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelinerError;
    use crate::jobs::compile;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records calls and fails for URLs containing "bad"
    #[derive(Default)]
    struct RecordingFetcher {
        calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, url: &str, target_dir: &Path, _policy: &AudioPolicy) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), target_dir.to_path_buf()));
            if url.contains("bad") {
                return Err(TimelinerError::fetch_failure(url, "exit status 1"));
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[test]
    fn test_dispatches_channels_then_albums() {
        let root = TempDir::new().expect("temp dir");
        let jobs = compile(&["UCabc", "bc", "x", "a1", "a2", "cb", "y"]);
        let fetcher = RecordingFetcher::default();

        let summary = fetch_jobs(&jobs, root.path(), &fetcher, &AudioPolicy::default()).unwrap();
        assert_eq!(summary, FetchSummary { succeeded: 4, failed: 0 });

        let calls = fetcher.calls.borrow();
        let urls: Vec<_> = calls.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.youtube.com/channel/UCabc",
                "https://soundcloud.com/y",
                "https://x.bandcamp.com/album/a1",
                "https://x.bandcamp.com/album/a2",
            ]
        );
        assert_eq!(calls[2].1, root.path().join("bc-x"));
        assert!(root.path().join("UCabc").is_dir());
        assert!(root.path().join("bc-x").is_dir());
    }

    #[test]
    fn test_failure_does_not_stop_later_jobs() {
        let root = TempDir::new().expect("temp dir");
        let jobs = compile(&["bad-artist", "good-artist"]);
        let fetcher = RecordingFetcher::default();

        let summary = fetch_jobs(&jobs, root.path(), &fetcher, &AudioPolicy::default()).unwrap();
        assert_eq!(summary, FetchSummary { succeeded: 1, failed: 1 });
        assert_eq!(fetcher.calls.borrow().len(), 2);
    }
}
