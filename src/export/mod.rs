//! Export module for the CSV timeline report

pub mod csv;

pub use self::csv::{read_report, write_report, ReportContents};
