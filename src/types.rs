//! Core data types for song-timeliner
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Platforms and URLs
// =============================================================================

/// Prefix that marks an identifier as a video-platform channel
pub const CHANNEL_ID_PREFIX: &str = "UC";

/// Folder prefix for sources fetched through album groups
pub const ALBUM_SOURCE_DIR_PREFIX: &str = "bc-";

/// Label suffix for tracks that came from an album-group source
pub const ALBUM_SOURCE_SUFFIX: &str = " (bandcamp)";

/// Placeholder used when a tag is missing
pub const UNKNOWN: &str = "Unknown";

/// URL for a standalone source identifier.
///
/// Identifiers starting with `UC` are treated as YouTube channel IDs, everything
/// else as a SoundCloud profile. Anything else that happens to start with `UC`
/// is misclassified; this is a known limitation.
pub fn channel_url(id: &str) -> String {
    if id.starts_with(CHANNEL_ID_PREFIX) {
        format!("https://www.youtube.com/channel/{}", id)
    } else {
        format!("https://soundcloud.com/{}", id)
    }
}

/// URL for one album under an album-group source
pub fn album_url(source_id: &str, slug: &str) -> String {
    format!("https://{}.bandcamp.com/album/{}", source_id, slug)
}

// =============================================================================
// Jobs
// =============================================================================

/// Download job for a single channel or profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelJob {
    pub id: String,
    pub url: String,
}

impl ChannelJob {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let url = channel_url(&id);
        Self { id, url }
    }
}

/// Download job for a set of albums under one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumGroupJob {
    pub source_id: String,
    pub album_slugs: Vec<String>,
}

impl AlbumGroupJob {
    /// One URL per album slug, in slug order
    pub fn urls(&self) -> Vec<String> {
        self.album_slugs
            .iter()
            .map(|slug| album_url(&self.source_id, slug))
            .collect()
    }
}

/// Compiled download jobs, keyed by source identifier.
///
/// Both collections keep insertion order. A source may have a channel job and an
/// album group at the same time, but never two entries in the same collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSet {
    channel_jobs: Vec<ChannelJob>,
    album_groups: Vec<AlbumGroupJob>,
    /// Identifier to position in `channel_jobs`
    channel_index: HashMap<String, usize>,
    /// Source identifier to position in `album_groups`
    group_index: HashMap<String, usize>,
}

impl JobSet {
    /// Add a channel job unless one already exists for `id`.
    ///
    /// Returns false if the identifier was already present.
    pub fn insert_channel(&mut self, id: &str) -> bool {
        if self.channel_index.contains_key(id) {
            return false;
        }
        self.channel_index
            .insert(id.to_string(), self.channel_jobs.len());
        self.channel_jobs.push(ChannelJob::new(id));
        true
    }

    /// Make sure an album group exists for `source_id`, returning its position
    pub fn open_group(&mut self, source_id: &str) -> usize {
        if let Some(&pos) = self.group_index.get(source_id) {
            return pos;
        }
        let pos = self.album_groups.len();
        self.album_groups.push(AlbumGroupJob {
            source_id: source_id.to_string(),
            album_slugs: Vec::new(),
        });
        self.group_index.insert(source_id.to_string(), pos);
        pos
    }

    /// Append an album slug to the group for `source_id`, creating it if needed
    pub fn push_album(&mut self, source_id: &str, slug: &str) {
        let pos = self.open_group(source_id);
        self.album_groups[pos].album_slugs.push(slug.to_string());
    }

    pub fn channel(&self, id: &str) -> Option<&ChannelJob> {
        self.channel_index.get(id).map(|&pos| &self.channel_jobs[pos])
    }

    pub fn group(&self, source_id: &str) -> Option<&AlbumGroupJob> {
        self.group_index.get(source_id).map(|&pos| &self.album_groups[pos])
    }

    pub fn channel_jobs(&self) -> &[ChannelJob] {
        &self.channel_jobs
    }

    pub fn album_groups(&self) -> &[AlbumGroupJob] {
        &self.album_groups
    }

    /// Check if no jobs were compiled
    pub fn is_empty(&self) -> bool {
        self.channel_jobs.is_empty() && self.album_groups.is_empty()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Where a source directory's tracks came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A channel or profile folder, named after the identifier
    Channel,
    /// An album-group folder, named `bc-{identifier}`
    AlbumGroup,
}

/// A source folder under the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    /// Logical source name (the identifier, without folder prefix)
    pub name: String,
    /// Folder holding the source's tracks
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceDir {
    /// Folder name used on disk for a source
    pub fn dir_name(name: &str, kind: SourceKind) -> String {
        match kind {
            SourceKind::Channel => name.to_string(),
            SourceKind::AlbumGroup => format!("{}{}", ALBUM_SOURCE_DIR_PREFIX, name),
        }
    }

    /// Source rooted at `root` for an identifier
    pub fn new(root: &Path, name: &str, kind: SourceKind) -> Self {
        Self {
            name: name.to_string(),
            path: root.join(Self::dir_name(name, kind)),
            kind,
        }
    }

    /// Classify an existing folder by its name
    pub fn from_dir_name(root: &Path, dir_name: &str) -> Self {
        match dir_name.strip_prefix(ALBUM_SOURCE_DIR_PREFIX) {
            Some(name) if !name.is_empty() => Self {
                name: name.to_string(),
                path: root.join(dir_name),
                kind: SourceKind::AlbumGroup,
            },
            _ => Self {
                name: dir_name.to_string(),
                path: root.join(dir_name),
                kind: SourceKind::Channel,
            },
        }
    }

    /// Artist label for report rows
    pub fn label(&self) -> String {
        match self.kind {
            SourceKind::Channel => self.name.clone(),
            SourceKind::AlbumGroup => format!("{}{}", self.name, ALBUM_SOURCE_SUFFIX),
        }
    }
}

// =============================================================================
// Track representation
// =============================================================================

/// Canonical metadata for one track, as rendered in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Source the track was cataloged under (with platform suffix if any)
    #[serde(rename = "Artist")]
    pub source_label: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Release date as tagged, empty if unknown
    #[serde(rename = "Release Date")]
    pub release_date: String,
    /// Album as tagged, empty if not read
    #[serde(rename = "Album", default)]
    pub album: String,
}

impl TrackRecord {
    /// Record for a file whose tags could not be read
    pub fn untagged(source_label: impl Into<String>, path: &Path) -> Self {
        Self {
            source_label: source_label.into(),
            title: file_stem(path),
            release_date: String::new(),
            album: String::new(),
        }
    }
}

/// A cataloged track together with where it lives on disk
#[derive(Debug, Clone)]
pub struct LocatedTrack {
    pub source: SourceDir,
    pub path: PathBuf,
    pub record: TrackRecord,
}

/// File name without extension, or empty if the path has none
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// Audio formats and fetch policy
// =============================================================================

/// Audio formats picked up when cataloging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    M4a,
    Opus,
    Ogg,
    Flac,
    Wav,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" => Some(AudioFormat::M4a),
            "opus" => Some(AudioFormat::Opus),
            "ogg" => Some(AudioFormat::Ogg),
            "flac" => Some(AudioFormat::Flac),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }

    /// Extension / codec name understood by the fetcher
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
        }
    }

    /// Check if a path has a supported extension
    pub fn is_supported_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }
}

/// Output format and quality handed to the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPolicy {
    pub format: AudioFormat,
    /// Quality argument, e.g. "192K" or "0" for best
    pub quality: String,
}

impl AudioPolicy {
    /// Lossless FLAC at best quality
    pub fn lossless() -> Self {
        Self {
            format: AudioFormat::Flac,
            quality: "0".to_string(),
        }
    }
}

impl Default for AudioPolicy {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            quality: "192K".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_url_heuristic() {
        assert_eq!(
            channel_url("UC123"),
            "https://www.youtube.com/channel/UC123"
        );
        assert_eq!(channel_url("abc"), "https://soundcloud.com/abc");
        // Lowercase prefix is not a channel
        assert_eq!(channel_url("uc123"), "https://soundcloud.com/uc123");
        // Known false positive, kept as-is
        assert_eq!(
            channel_url("UCLAband"),
            "https://www.youtube.com/channel/UCLAband"
        );
    }

    #[test]
    fn test_album_urls() {
        let group = AlbumGroupJob {
            source_id: "x".into(),
            album_slugs: vec!["a1".into(), "a2".into()],
        };
        assert_eq!(
            group.urls(),
            vec![
                "https://x.bandcamp.com/album/a1",
                "https://x.bandcamp.com/album/a2"
            ]
        );
    }

    #[test]
    fn test_source_dir_classification() {
        let root = Path::new("/music");
        let bc = SourceDir::from_dir_name(root, "bc-artist");
        assert_eq!(bc.kind, SourceKind::AlbumGroup);
        assert_eq!(bc.name, "artist");
        assert_eq!(bc.label(), "artist (bandcamp)");
        assert_eq!(bc.path, root.join("bc-artist"));

        let plain = SourceDir::from_dir_name(root, "artist");
        assert_eq!(plain.kind, SourceKind::Channel);
        assert_eq!(plain.label(), "artist");

        // A bare prefix is just a folder name
        let bare = SourceDir::from_dir_name(root, "bc-");
        assert_eq!(bare.kind, SourceKind::Channel);
        assert_eq!(bare.name, "bc-");
    }

    #[test]
    fn test_untagged_record_uses_file_stem() {
        let record = TrackRecord::untagged("src", Path::new("/m/src/My Song.mp3"));
        assert_eq!(record.title, "My Song");
        assert!(record.release_date.is_empty());
        assert!(record.album.is_empty());
    }

    #[test]
    fn test_job_set_first_channel_wins() {
        let mut jobs = JobSet::default();
        assert!(jobs.insert_channel("a"));
        assert!(!jobs.insert_channel("a"));
        assert_eq!(jobs.channel_jobs().len(), 1);
    }

    #[test]
    fn test_job_set_lookup_after_many_inserts() {
        let mut jobs = JobSet::default();
        for i in 0..500 {
            assert!(jobs.insert_channel(&format!("artist-{}", i)));
            jobs.push_album(&format!("label-{}", i % 7), &format!("album-{}", i));
        }
        assert!(!jobs.insert_channel("artist-250"));
        assert_eq!(jobs.channel_jobs().len(), 500);
        assert_eq!(jobs.channel("artist-499").map(|j| j.id.as_str()), Some("artist-499"));

        // Groups stay in first-seen order, slugs in push order
        let sources: Vec<_> = jobs.album_groups().iter().map(|g| g.source_id.as_str()).collect();
        assert_eq!(sources, (0..7).map(|i| format!("label-{}", i)).collect::<Vec<_>>());
        let group = jobs.group("label-3").expect("group");
        assert_eq!(group.album_slugs.len(), 71);
        assert_eq!(group.album_slugs[0], "album-3");
        assert_eq!(group.album_slugs[1], "album-10");
    }

    #[test]
    fn test_audio_format_from_extension() {
        assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_extension("txt"), None);
        assert!(AudioFormat::is_supported_path(Path::new("a/b.flac")));
        assert!(!AudioFormat::is_supported_path(Path::new("a/cover.jpg")));
    }
}
