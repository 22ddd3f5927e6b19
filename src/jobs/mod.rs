//! Download job compilation

pub mod compiler;

pub use compiler::{compile, GROUP_CLOSE, GROUP_OPEN};
