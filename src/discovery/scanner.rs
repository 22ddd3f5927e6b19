//! Source folder resolution and audio file scanning

use crate::error::Result;
use crate::types::{AudioFormat, JobSet, SourceDir, SourceKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Source folder plus album subfolders
const SCAN_DEPTH: usize = 2;

/// Resolve the source folders to catalog.
///
/// With no compiled jobs every subdirectory of `root` is a source, except
/// hidden ones. Otherwise each channel job maps to `{id}/` and each album group
/// to `bc-{id}/`; folders that do not exist are skipped with a warning.
pub fn resolve_sources(root: &Path, jobs: &JobSet) -> Result<Vec<SourceDir>> {
    if jobs.is_empty() {
        return list_source_dirs(root);
    }

    let wanted = jobs
        .channel_jobs()
        .iter()
        .map(|job| SourceDir::new(root, &job.id, SourceKind::Channel))
        .chain(
            jobs.album_groups()
                .iter()
                .map(|group| SourceDir::new(root, &group.source_id, SourceKind::AlbumGroup)),
        );

    let sources: Vec<SourceDir> = wanted
        .filter(|source| {
            let exists = source.path.is_dir();
            if !exists {
                warn!(
                    "Source folder {} does not exist, skipping (use -d to download it)",
                    source.path.display()
                );
            }
            exists
        })
        .collect();

    info!("Resolved {} source folders", sources.len());
    Ok(sources)
}

/// Every non-hidden subdirectory of `root`, sorted by name
pub fn list_source_dirs(root: &Path) -> Result<Vec<SourceDir>> {
    let mut names: Vec<String> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();

    let sources: Vec<SourceDir> = names
        .iter()
        .map(|name| SourceDir::from_dir_name(root, name))
        .collect();

    info!(
        "Found {} source folders in {}",
        sources.len(),
        root.display()
    );
    Ok(sources)
}

/// Jobs that refresh every existing channel folder under `root`.
///
/// Used when downloading without tokens. Album-group folders are skipped
/// since their album slugs are not recorded on disk.
pub fn refresh_jobs(root: &Path) -> Result<JobSet> {
    let mut jobs = JobSet::default();
    for source in list_source_dirs(root)? {
        match source.kind {
            SourceKind::Channel => {
                jobs.insert_channel(&source.name);
            }
            SourceKind::AlbumGroup => {
                debug!(
                    "Not refreshing {}: album slugs are unknown",
                    source.path.display()
                );
            }
        }
    }
    Ok(jobs)
}

/// Audio files under a source folder, including album subfolders
pub fn scan_audio_files(source: &SourceDir) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(&source.path)
        .max_depth(SCAN_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| AudioFormat::is_supported_path(path))
        .collect();

    debug!(
        "Discovered {} audio files in {}",
        files.len(),
        source.path.display()
    );
    if files.is_empty() {
        warn!("No audio files found in {}", source.path.display());
    }
    files
}
