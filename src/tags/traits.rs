//! Tag reader trait abstraction

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Common view keys
pub const TITLE: &str = "title";
pub const ARTIST: &str = "artist";
pub const ALBUM: &str = "album";
pub const DATE: &str = "date";

/// Extended view keys, probed in this order when the common date is empty
pub const RECORDING_DATE: &str = "recording-date";
pub const ORIGINAL_RELEASE_YEAR: &str = "original-release-year";
pub const RELEASE_DATE: &str = "release-date";

pub const EXTENDED_DATE_KEYS: [&str; 3] = [RECORDING_DATE, ORIGINAL_RELEASE_YEAR, RELEASE_DATE];

/// How much of a file's tagging to expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagView {
    /// Cross-format fields (title, artist, album, date)
    Common,
    /// Raw per-format fields, including the extended date keys
    Extended,
}

/// Tag name to value mapping as read from one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags(BTreeMap<String, String>);

impl RawTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`, trimmed, or None if missing or blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-empty value among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Tag reading backend
pub trait TagReader {
    /// Read tags from a file.
    ///
    /// Fails with `NoTags` when the file carries no tags at all, or with any
    /// other error when the file cannot be read.
    fn read_tags(&self, path: &Path, view: TagView) -> Result<RawTags>;

    /// Get the name of this reader (for logging)
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_missing() {
        let tags: RawTags = [("title", "  "), ("artist", "A")].into_iter().collect();
        assert_eq!(tags.get("title"), None);
        assert_eq!(tags.get("artist"), Some("A"));
        assert_eq!(tags.get("album"), None);
    }

    #[test]
    fn test_first_of_respects_priority() {
        let tags: RawTags = [(RELEASE_DATE, "2001"), (ORIGINAL_RELEASE_YEAR, "1999")]
            .into_iter()
            .collect();
        assert_eq!(tags.first_of(&EXTENDED_DATE_KEYS), Some("1999"));
    }
}
