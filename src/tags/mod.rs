//! Tag reading
//!
//! Provides the [`TagReader`] trait with a common and an extended view, and a
//! lofty-backed implementation. The trait keeps the normalizer testable without
//! real audio files.

pub mod lofty_reader;
pub mod traits;

pub use lofty_reader::LoftyTagReader;
pub use traits::{RawTags, TagReader, TagView};
