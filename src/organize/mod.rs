//! Album folder organization

pub mod albums;

pub use albums::{effective_album, organize, sanitize_component, OrganizeSummary};
