//! telemetry-docs - static documentation for telemetry instruments
//!
//! Scans Rust sources for span and metric declarations written as
//! `SpanDocumentation` / `MeterDocumentation` struct literals, and renders
//! them into one deterministic AsciiDoc document. Declarations are read
//! purely syntactically with `syn`; nothing is compiled or executed.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use telemetry_docs::progress::LoggingHandler;
//! use telemetry_docs::{DocsConfig, DocsGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DocsConfig::new(".", r".*/src/.*\.rs$", "target/docs")?;
//! let report = DocsGenerator::new(config, Arc::new(LoggingHandler)).generate()?;
//! println!("Wrote {}", report.output_file.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: inclusion filter and source tree walker
//! - [`extract`]: declaration recognition and extraction
//! - [`model`]: entries, keys and the ordered entry collection
//! - [`render`]: AsciiDoc rendering of one entry
//! - [`generator`]: the end-to-end pipeline and document assembly

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod model;
pub mod progress;
pub mod render;
pub mod scan;
pub mod util;

pub use config::{ConfigError, DocsConfig};
pub use error::DocsError;
pub use extract::{DeclarationExtractor, ExtractError};
pub use generator::{DocsGenerator, DocsSummary, GenerationReport};
pub use model::{Entry, EntryCollection, EntryError, InstrumentKind, KeyValue};
pub use scan::{PathFilter, ScanError, SourceTreeWalker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
