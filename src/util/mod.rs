//! Utility modules for telemetry-docs

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
