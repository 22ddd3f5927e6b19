//! CSV timeline report

use crate::catalog::CatalogReport;
use crate::error::{Result, TimelinerError};
use crate::types::TrackRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header and rows read back from a report file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContents {
    pub header: Vec<String>,
    pub rows: Vec<TrackRecord>,
}

/// Write the report into `dir`, returning the file path.
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// The header is always written, even with no rows.
pub fn write_report(report: &CatalogReport, dir: &Path) -> Result<PathBuf> {
    let output_path = dir.join(&report.file_name);
    let temp_path = output_path.with_extension("csv.tmp");

    let file = File::create(&temp_path).map_err(|e| TimelinerError::output_error(&output_path, e))?;

    if let Err(e) = write_rows(report, BufWriter::new(file)) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(TimelinerError::OutputError {
            path: output_path,
            reason: e.to_string(),
        });
    }

    std::fs::rename(&temp_path, &output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        TimelinerError::OutputError {
            path: output_path.clone(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!("Wrote {} tracks to {}", report.len(), output_path.display());
    Ok(output_path)
}

fn write_rows<W: std::io::Write>(report: &CatalogReport, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(report.header())?;
    for row in &report.rows {
        out.write_record(report.cells(row))?;
    }
    out.flush()?;
    Ok(())
}

/// Read a report written by [`write_report`]
pub fn read_report(path: &Path) -> Result<ReportContents> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<TrackRecord>, _>>()?;

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(ReportContents { header, rows })
}
