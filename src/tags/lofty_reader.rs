//! Tag reading backed by lofty
//!
//! The common view reads the primary tag's generic fields. The extended view
//! walks every tag in the file (ID3v2, ID3v1, APE, Vorbis comments...) and also
//! exposes the format-specific date frames.

use super::traits::{self, RawTags, TagReader, TagView};
use crate::error::{ErrorContext, Result, TimelinerError};
use lofty::config::ParseOptions;
use lofty::file::{TaggedFile, TaggedFileExt};
use lofty::prelude::Accessor;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use std::path::Path;
use tracing::debug;

/// Reads tags with lofty
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path, view: TagView) -> Result<RawTags> {
        let tagged_file = open(path)?;

        if tagged_file.tags().is_empty() {
            debug!("No tags found in {}", path.display());
            return Err(TimelinerError::NoTags(path.to_path_buf()));
        }

        let tags = match view {
            TagView::Common => common_view(&tagged_file),
            TagView::Extended => extended_view(&tagged_file),
        };
        debug!(
            "Read {} {:?} tags from {}",
            tags.len(),
            view,
            path.display()
        );
        Ok(tags)
    }

    fn name(&self) -> &'static str {
        "lofty"
    }
}

fn open(path: &Path) -> Result<TaggedFile> {
    let options = ParseOptions::new()
        .read_properties(false)
        .read_cover_art(false);

    Probe::open(path)
        .and_then(|probe| probe.options(options).read())
        .metadata_context(path)
}

fn common_view(file: &TaggedFile) -> RawTags {
    let mut tags = RawTags::new();
    let Some(tag) = file.primary_tag().or_else(|| file.first_tag()) else {
        return tags;
    };

    insert_generic_fields(&mut tags, tag);
    if let Some(date) = common_date(tag) {
        tags.insert(traits::DATE, date);
    }
    tags
}

/// Cross-format date: TDRC / DATE / ©day, else a bare year
fn common_date(tag: &Tag) -> Option<&str> {
    [ItemKey::RecordingDate, ItemKey::Year]
        .into_iter()
        .filter_map(|key| tag.get_string(key))
        .find(|value| !value.trim().is_empty())
}

fn extended_view(file: &TaggedFile) -> RawTags {
    let mut tags = RawTags::new();

    // Primary tag first so its values win over secondary tags
    let ordered = file
        .primary_tag()
        .into_iter()
        .chain(file.tags().iter());

    for tag in ordered {
        insert_generic_fields(&mut tags, tag);
        if tags.get(traits::DATE).is_none() {
            if let Some(date) = common_date(tag) {
                tags.insert(traits::DATE, date);
            }
        }
        for (key, name) in [
            (ItemKey::RecordingDate, traits::RECORDING_DATE),
            (ItemKey::OriginalReleaseDate, traits::ORIGINAL_RELEASE_YEAR),
            (ItemKey::ReleaseDate, traits::RELEASE_DATE),
        ] {
            if tags.get(name).is_none() {
                if let Some(value) = tag.get_string(key) {
                    tags.insert(name, value);
                }
            }
        }
    }
    tags
}

fn insert_generic_fields(tags: &mut RawTags, tag: &Tag) {
    let fields = [
        (traits::TITLE, tag.title()),
        (traits::ARTIST, tag.artist()),
        (traits::ALBUM, tag.album()),
    ];
    for (name, value) in fields {
        if tags.get(name).is_some() {
            continue;
        }
        if let Some(value) = value {
            tags.insert(name, value.into_owned());
        }
    }
}
