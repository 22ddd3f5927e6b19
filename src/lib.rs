//! song-timeliner - Catalog locally downloaded tracks into a release timeline
//!
//! A command-line utility that optionally fetches audio per artist, reads
//! each track's tags, optionally sorts tracks into album folders and writes a
//! `stl-*.csv` report of artist, title and release date.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `jobs`: Compiles argument tokens into channel and album-group jobs
//! - `fetch`: Downloads audio for jobs (yt-dlp behind a trait)
//! - `discovery`: Source folder resolution and audio file scanning
//! - `tags`: Tag reading with common and extended views (lofty behind a trait)
//! - `metadata`: Canonical title/artist/date/album with fallbacks
//! - `organize`: Moves tracks into album folders
//! - `catalog`: Folds records into the report
//! - `export`: CSV output
//! - `pipeline`: Runs the stages in order
//!
//! # Example
//!
//! ```no_run
//! use song_timeliner::{config::Settings, pipeline};
//!
//! let settings = Settings {
//!     tokens: vec!["UCxyz".into(), "bc".into(), "artist".into(), "album".into()],
//!     ..Settings::default()
//! };
//! let result = pipeline::run(&settings).expect("Catalog failed");
//! println!("Cataloged {} tracks", result.tracks);
//! ```

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod fetch;
pub mod jobs;
pub mod metadata;
pub mod organize;
pub mod pipeline;
pub mod tags;
pub mod types;

// Re-export key types at crate root
pub use error::{Result, TimelinerError};
pub use types::{AlbumGroupJob, ChannelJob, JobSet, TrackRecord};
