//! Canonical (artist, title, date, album) extraction
//!
//! Reads the common tag view first and only re-reads the file with the
//! extended view when the common view has no usable date.

use crate::error::{Result, TimelinerError};
use crate::tags::traits::{self, EXTENDED_DATE_KEYS};
use crate::tags::{TagReader, TagView};
use crate::types::{file_stem, TrackRecord, UNKNOWN};
use std::path::Path;
use tracing::debug;

/// Metadata resolved from a file's tags, with fallbacks applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMetadata {
    pub artist: String,
    pub title: String,
    /// Empty if no date-like tag was found
    pub date: String,
    pub album: String,
}

impl NormalizedMetadata {
    /// Report record for this track under the given source label
    pub fn into_record(self, source_label: impl Into<String>) -> TrackRecord {
        TrackRecord {
            source_label: source_label.into(),
            title: self.title,
            release_date: self.date,
            album: self.album,
        }
    }
}

/// Normalizes metadata using a [`TagReader`]
pub struct MetadataNormalizer<'a> {
    reader: &'a dyn TagReader,
}

impl<'a> MetadataNormalizer<'a> {
    pub fn new(reader: &'a dyn TagReader) -> Self {
        Self { reader }
    }

    /// Extract canonical metadata from a file.
    ///
    /// Any failure to read tags, including a file with no tags at all, comes
    /// back as `NoMetadata`.
    pub fn normalize(&self, path: &Path) -> Result<NormalizedMetadata> {
        let common = self
            .reader
            .read_tags(path, TagView::Common)
            .map_err(|e| no_metadata(path, e))?;

        let title = common
            .get(traits::TITLE)
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(path));
        let artist = common.get(traits::ARTIST).unwrap_or(UNKNOWN).to_string();
        let album = common.get(traits::ALBUM).unwrap_or(UNKNOWN).to_string();

        let date = match common.get(traits::DATE) {
            Some(date) => date.to_string(),
            None => self.extended_date(path),
        };

        Ok(NormalizedMetadata {
            artist,
            title,
            date,
            album,
        })
    }

    fn extended_date(&self, path: &Path) -> String {
        match self.reader.read_tags(path, TagView::Extended) {
            Ok(extended) => extended
                .first_of(&EXTENDED_DATE_KEYS)
                .map(str::to_string)
                .unwrap_or_default(),
            Err(e) => {
                debug!("Extended tag read failed for {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}

fn no_metadata(path: &Path, err: TimelinerError) -> TimelinerError {
    match err {
        TimelinerError::NoMetadata { .. } => err,
        TimelinerError::NoTags(_) => TimelinerError::no_metadata(path, "file has no tags"),
        other => TimelinerError::no_metadata(path, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::RawTags;
    use crate::types::{SourceDir, SourceKind};
    use std::cell::Cell;

    /// Serves fixed tags per view and counts extended reads
    struct FixedTags {
        common: Option<RawTags>,
        extended: RawTags,
        extended_reads: Cell<usize>,
    }

    impl FixedTags {
        fn new(common: Option<RawTags>, extended: RawTags) -> Self {
            Self {
                common,
                extended,
                extended_reads: Cell::new(0),
            }
        }
    }

    impl TagReader for FixedTags {
        fn read_tags(&self, path: &Path, view: TagView) -> Result<RawTags> {
            match view {
                TagView::Common => self
                    .common
                    .clone()
                    .ok_or_else(|| TimelinerError::NoTags(path.to_path_buf())),
                TagView::Extended => {
                    self.extended_reads.set(self.extended_reads.get() + 1);
                    Ok(self.extended.clone())
                }
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn tags(pairs: &[(&str, &str)]) -> RawTags {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_date_falls_back_to_extended_view() {
        let reader = FixedTags::new(
            Some(tags(&[("title", "Song"), ("artist", "A"), ("date", "")])),
            tags(&[("original-release-year", "1999")]),
        );
        let normalizer = MetadataNormalizer::new(&reader);

        let metadata = normalizer.normalize(Path::new("x/Song.mp3")).expect("metadata");
        assert_eq!(metadata.date, "1999");
        assert_eq!(metadata.title, "Song");
        assert_eq!(metadata.artist, "A");
        assert_eq!(reader.extended_reads.get(), 1);
    }

    #[test]
    fn test_extended_priority_order() {
        let reader = FixedTags::new(
            Some(tags(&[("title", "Song")])),
            tags(&[
                ("release-date", "2003-01-01"),
                ("original-release-year", "1999"),
                ("recording-date", "1998-05-02"),
            ]),
        );
        let normalizer = MetadataNormalizer::new(&reader);
        let metadata = normalizer.normalize(Path::new("Song.mp3")).expect("metadata");
        assert_eq!(metadata.date, "1998-05-02");
    }

    #[test]
    fn test_common_date_skips_extended_read() {
        let reader = FixedTags::new(
            Some(tags(&[("title", "Song"), ("date", "2010")])),
            tags(&[("recording-date", "1990")]),
        );
        let normalizer = MetadataNormalizer::new(&reader);
        let metadata = normalizer.normalize(Path::new("Song.mp3")).expect("metadata");
        assert_eq!(metadata.date, "2010");
        assert_eq!(reader.extended_reads.get(), 0);
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let reader = FixedTags::new(Some(tags(&[("genre", "rock")])), RawTags::new());
        let normalizer = MetadataNormalizer::new(&reader);
        let metadata = normalizer
            .normalize(Path::new("dir/Track Name.opus"))
            .expect("metadata");
        assert_eq!(metadata.title, "Track Name");
        assert_eq!(metadata.artist, "Unknown");
        assert_eq!(metadata.album, "Unknown");
        assert_eq!(metadata.date, "");
    }

    #[test]
    fn test_no_tags_is_no_metadata() {
        let reader = FixedTags::new(None, RawTags::new());
        let normalizer = MetadataNormalizer::new(&reader);
        let result = normalizer.normalize(Path::new("Song.mp3"));
        assert!(matches!(result, Err(TimelinerError::NoMetadata { .. })));
    }

    #[test]
    fn test_into_record_uses_source_label_not_tag_artist() {
        let reader = FixedTags::new(
            Some(tags(&[("title", "Song"), ("artist", "Someone Else"), ("album", "LP")])),
            RawTags::new(),
        );
        let normalizer = MetadataNormalizer::new(&reader);
        let source = SourceDir::new(Path::new("/m"), "artist", SourceKind::AlbumGroup);

        let record = normalizer
            .normalize(Path::new("/m/bc-artist/Song.mp3"))
            .expect("metadata")
            .into_record(source.label());
        assert_eq!(record.source_label, "artist (bandcamp)");
        assert_eq!(record.title, "Song");
        assert_eq!(record.album, "LP");
    }
}
