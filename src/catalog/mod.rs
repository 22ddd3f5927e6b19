//! Catalog aggregation into report rows

pub mod aggregator;

pub use aggregator::{aggregate, report_file_name, CatalogReport, REPORT_PREFIX};
