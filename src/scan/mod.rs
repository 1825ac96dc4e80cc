//! Source file discovery

pub mod filter;
pub mod walker;

pub use filter::PathFilter;
pub use walker::{ScanError, SourceTreeWalker};
