//! Metadata normalization from embedded tags

pub mod normalizer;

pub use normalizer::{MetadataNormalizer, NormalizedMetadata};
