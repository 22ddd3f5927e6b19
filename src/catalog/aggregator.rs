//! Folds track records into a [`CatalogReport`]

use crate::error::{Result, TimelinerError};
use crate::types::{SourceDir, TrackRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Report file name prefix
pub const REPORT_PREFIX: &str = "stl-";

/// Fixed report header; the album column is optional
pub static HEADER: [&str; 4] = ["Artist", "Title", "Release Date", "Album"];

/// Rows ready to be written, plus where they go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    /// `stl-{sources}.csv`
    pub file_name: String,
    /// Whether the Album column is rendered
    pub include_album: bool,
    pub rows: Vec<TrackRecord>,
}

impl CatalogReport {
    /// Header row for this report
    pub fn header(&self) -> &'static [&'static str] {
        if self.include_album {
            &HEADER
        } else {
            &HEADER[..3]
        }
    }

    /// Cells for one row, matching [`Self::header`]
    pub fn cells<'a>(&self, row: &'a TrackRecord) -> Vec<&'a str> {
        let mut cells = vec![
            row.source_label.as_str(),
            row.title.as_str(),
            row.release_date.as_str(),
        ];
        if self.include_album {
            cells.push(row.album.as_str());
        }
        cells
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Report file name from source names, deduplicated in first-seen order.
///
/// A `bc-x` folder and an `x` folder both contribute `x` once.
pub fn report_file_name(sources: &[SourceDir]) -> String {
    let mut seen = HashSet::new();
    let names: Vec<&str> = sources
        .iter()
        .map(|s| s.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect();
    format!("{}{}.csv", REPORT_PREFIX, names.join("-"))
}

/// Build the report for the cataloged sources.
///
/// Fails with `EmptyCatalog` when there are no sources at all. Sources without
/// tracks still produce a (header-only) report.
pub fn aggregate<I>(
    root: &Path,
    sources: &[SourceDir],
    records: I,
    include_album: bool,
) -> Result<CatalogReport>
where
    I: IntoIterator<Item = TrackRecord>,
{
    if sources.is_empty() {
        return Err(TimelinerError::EmptyCatalog {
            root: root.to_path_buf(),
        });
    }

    let rows = records.into_iter().fold(Vec::new(), |mut rows, record| {
        debug!("Row: {} - {}", record.source_label, record.title);
        rows.push(record);
        rows
    });

    let report = CatalogReport {
        file_name: report_file_name(sources),
        include_album,
        rows,
    };
    info!(
        "Cataloged {} tracks from {} sources",
        report.len(),
        sources.len()
    );
    Ok(report)
}
