use crate::config::ConfigError;
use crate::extract::ExtractError;
use crate::scan::ScanError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a documentation run. No document is written when one occurs.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to walk source tree: {0}")]
    Scan(#[from] ScanError),
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Invalid declaration in {path}: {source}")]
    Extract { path: PathBuf, source: ExtractError },
    #[error("{identifier}: key `{key}` must be prefixed with `{prefix}`")]
    PrefixViolation {
        identifier: String,
        key: String,
        prefix: String,
    },
}

impl DocsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DocsError::Io {
            path: path.into(),
            source,
        }
    }
}
