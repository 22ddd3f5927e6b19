//! Source folder discovery and file scanning

pub mod scanner;

pub use scanner::{list_source_dirs, refresh_jobs, resolve_sources, scan_audio_files};
