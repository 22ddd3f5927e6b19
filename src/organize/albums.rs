//! Moves cataloged tracks into per-album folders
//!
//! `{source}/{title}.{ext}` becomes `{source}/{album}/{title}.{ext}`. Tracks
//! without a real album get a folder named after their own title.

use crate::error::{Result, TimelinerError};
use crate::types::{LocatedTrack, TrackRecord, UNKNOWN};
use std::fs;
use tracing::{debug, info, warn};

/// Organize outcome counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub moved: usize,
    /// Source file no longer at the expected flat path
    pub skipped: usize,
    pub failed: usize,
}

/// Folder name a track is organized into
pub fn effective_album(record: &TrackRecord) -> &str {
    let album = record.album.trim();
    if album.is_empty() || album == UNKNOWN {
        &record.title
    } else {
        &record.album
    }
}

/// Make a tag value usable as a single path component.
///
/// Path separators and NUL become `_`; names that would resolve to the current
/// or parent directory, or are empty, become `_`.
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    if matches!(cleaned.trim(), "" | "." | "..") {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Move every track into its album folder.
///
/// Per-file problems never stop the remaining tracks: a missing source file
/// is skipped, a failed move is logged.
pub fn organize(tracks: &[LocatedTrack]) -> OrganizeSummary {
    let mut summary = OrganizeSummary::default();

    for track in tracks {
        match organize_one(track) {
            Ok(()) => summary.moved += 1,
            Err(TimelinerError::FileMoveSkipped(path)) => {
                debug!("Skipped moving {}: not at expected path", path.display());
                summary.skipped += 1;
            }
            Err(e) => {
                warn!("Failed to organize {}: {}", track.path.display(), e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Organized {} tracks ({} skipped, {} failed)",
        summary.moved, summary.skipped, summary.failed
    );
    summary
}

fn organize_one(track: &LocatedTrack) -> Result<()> {
    let file_name = match track.path.extension() {
        Some(ext) => format!(
            "{}.{}",
            sanitize_component(&track.record.title),
            ext.to_string_lossy()
        ),
        None => sanitize_component(&track.record.title),
    };

    let source_dir = &track.source.path;
    let from = source_dir.join(&file_name);
    if !from.is_file() {
        return Err(TimelinerError::FileMoveSkipped(from));
    }

    let album_dir = source_dir.join(sanitize_component(effective_album(&track.record)));
    fs::create_dir_all(&album_dir)?;

    let to = album_dir.join(&file_name);
    if to.exists() {
        warn!("{} already exists, leaving {} in place", to.display(), from.display());
        return Err(TimelinerError::FileMoveSkipped(from));
    }

    fs::rename(&from, &to)?;
    debug!("Moved {} -> {}", from.display(), to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceDir, SourceKind};
    use std::path::Path;
    use tempfile::TempDir;

    fn record(title: &str, album: &str) -> TrackRecord {
        TrackRecord {
            source_label: "artist".into(),
            title: title.into(),
            release_date: String::new(),
            album: album.into(),
        }
    }

    fn located(root: &Path, title: &str, album: &str) -> LocatedTrack {
        let source = SourceDir::new(root, "artist", SourceKind::Channel);
        let path = source.path.join(format!("{}.mp3", title));
        LocatedTrack {
            source,
            path,
            record: record(title, album),
        }
    }

    #[test]
    fn test_effective_album() {
        assert_eq!(effective_album(&record("Song", "LP")), "LP");
        assert_eq!(effective_album(&record("Song", "Unknown")), "Song");
        assert_eq!(effective_album(&record("Song", "")), "Song");
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("AC/DC"), "AC_DC");
        assert_eq!(sanitize_component("a\\b"), "a_b");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("  "), "_");
        assert_eq!(sanitize_component("Live: 1999"), "Live: 1999");
    }

    #[test]
    fn test_moves_into_album_and_single_folders() {
        let root = TempDir::new().expect("temp dir");
        let album_track = located(root.path(), "Track One", "The LP");
        let single = located(root.path(), "Lone Single", "Unknown");
        fs::create_dir_all(&album_track.source.path).unwrap();
        fs::write(&album_track.path, b"a").unwrap();
        fs::write(&single.path, b"b").unwrap();

        let summary = organize(&[album_track.clone(), single.clone()]);
        assert_eq!(summary, OrganizeSummary { moved: 2, skipped: 0, failed: 0 });

        let source = &album_track.source.path;
        assert!(source.join("The LP").join("Track One.mp3").is_file());
        assert!(source.join("Lone Single").join("Lone Single.mp3").is_file());
        assert!(!album_track.path.exists());
    }

    #[test]
    fn test_missing_source_file_is_noop() {
        let root = TempDir::new().expect("temp dir");
        let track = located(root.path(), "Gone", "LP");
        fs::create_dir_all(&track.source.path).unwrap();

        let summary = organize(&[track.clone()]);
        assert_eq!(summary, OrganizeSummary { moved: 0, skipped: 1, failed: 0 });
        assert!(!track.source.path.join("LP").exists());
    }

    #[test]
    fn test_already_organized_is_skipped() {
        let root = TempDir::new().expect("temp dir");
        let mut track = located(root.path(), "Song", "LP");
        let organized = track.source.path.join("LP").join("Song.mp3");
        fs::create_dir_all(organized.parent().unwrap()).unwrap();
        fs::write(&organized, b"x").unwrap();
        track.path = organized.clone();

        let summary = organize(&[track]);
        assert_eq!(summary.skipped, 1);
        assert!(organized.is_file());
    }

    #[test]
    fn test_album_with_separator_stays_inside_source() {
        let root = TempDir::new().expect("temp dir");
        let track = located(root.path(), "Song", "Side A/B");
        fs::create_dir_all(&track.source.path).unwrap();
        fs::write(&track.path, b"x").unwrap();

        organize(&[track.clone()]);
        assert!(track.source.path.join("Side A_B").join("Song.mp3").is_file());
    }
}
