//! Run configuration for telemetry-docs
//!
//! A [`DocsConfig`] is built from the three positional CLI arguments plus
//! options. Options that are not given on the command line fall back to
//! environment variables, then to the defaults below.
//!
//! # Environment Variables
//!
//! - `TELEMETRY_DOCS_KIND`: `spans` or `metrics` - default: `spans`
//! - `TELEMETRY_DOCS_STRICT_PREFIXES`: fail on prefix violations (true|false) - default: `false`
//! - `TELEMETRY_DOCS_LOG_LEVEL` / `TELEMETRY_DOCS_LOG_JSON`: see [`crate::util::logging`]

use crate::cli::CliArgs;
use crate::model::InstrumentKind;
use crate::scan::PathFilter;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_KIND: InstrumentKind = InstrumentKind::Span;
const DEFAULT_STRICT_PREFIXES: bool = false;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Project root does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Project root is not a directory: {0}")]
    RootNotADirectory(PathBuf),
    #[error("Output path exists and is not a directory: {0}")]
    OutputNotADirectory(PathBuf),
    #[error("Invalid inclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Invalid instrument kind: {0}. Valid options: spans, metrics")]
    InvalidKind(String),
}

/// Everything one documentation run needs
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Directory whose files are scanned
    pub project_root: PathBuf,

    /// Regex over file paths, authored with `/` separators
    pub inclusion_pattern: String,

    /// Directory the document is written into
    pub output_dir: PathBuf,

    pub kind: InstrumentKind,

    /// Treat prefix violations as fatal
    pub strict_prefixes: bool,
}

impl DocsConfig {
    /// Creates a configuration with options taken from the environment
    pub fn new(
        project_root: impl Into<PathBuf>,
        inclusion_pattern: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::with_explicit_kind(project_root, inclusion_pattern, output_dir, None)
    }

    /// Creates a configuration from command-line arguments.
    ///
    /// `TELEMETRY_DOCS_KIND` is only consulted when `--kind` is absent.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let config = Self::with_explicit_kind(
            &args.project_root,
            &args.inclusion_pattern,
            &args.output_dir,
            args.kind.map(Into::into),
        )?;
        if args.strict_prefixes {
            return Ok(config.with_strict_prefixes(true));
        }
        Ok(config)
    }

    fn with_explicit_kind(
        project_root: impl Into<PathBuf>,
        inclusion_pattern: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        kind: Option<InstrumentKind>,
    ) -> Result<Self, ConfigError> {
        let kind = resolve_kind(kind, env::var("TELEMETRY_DOCS_KIND").ok().as_deref())?;

        let strict_prefixes = env::var("TELEMETRY_DOCS_STRICT_PREFIXES")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_STRICT_PREFIXES);

        Ok(Self {
            project_root: project_root.into(),
            inclusion_pattern: inclusion_pattern.into(),
            output_dir: output_dir.into(),
            kind,
            strict_prefixes,
        })
    }

    pub fn with_kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_strict_prefixes(mut self, strict: bool) -> Self {
        self.strict_prefixes = strict;
        self
    }

    /// Path of the generated document
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(self.kind.output_file_name())
    }

    /// Checks the paths and compiles the inclusion pattern
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.project_root.exists() {
            return Err(ConfigError::RootNotFound(self.project_root.clone()));
        }
        if !self.project_root.is_dir() {
            return Err(ConfigError::RootNotADirectory(self.project_root.clone()));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ConfigError::OutputNotADirectory(self.output_dir.clone()));
        }
        PathFilter::new(&self.project_root, &self.inclusion_pattern)?;
        Ok(())
    }
}

/// An explicit kind wins; the environment value is parsed only without one
fn resolve_kind(
    explicit: Option<InstrumentKind>,
    env_value: Option<&str>,
) -> Result<InstrumentKind, ConfigError> {
    match (explicit, env_value) {
        (Some(kind), _) => Ok(kind),
        (None, Some(value)) => parse_kind(value),
        (None, None) => Ok(DEFAULT_KIND),
    }
}

/// Parses `spans`/`metrics` (and their singular forms), case-insensitively
pub fn parse_kind(value: &str) -> Result<InstrumentKind, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "span" | "spans" => Ok(InstrumentKind::Span),
        "metric" | "metrics" | "meter" | "meters" => Ok(InstrumentKind::Meter),
        _ => Err(ConfigError::InvalidKind(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path, pattern: &str) -> DocsConfig {
        DocsConfig::new(root, pattern, root.join("docs"))
            .unwrap()
            .with_kind(InstrumentKind::Span)
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("spans").unwrap(), InstrumentKind::Span);
        assert_eq!(parse_kind("Span").unwrap(), InstrumentKind::Span);
        assert_eq!(parse_kind("metrics").unwrap(), InstrumentKind::Meter);
        assert_eq!(parse_kind(" METER ").unwrap(), InstrumentKind::Meter);
        assert!(matches!(
            parse_kind("logs"),
            Err(ConfigError::InvalidKind(value)) if value == "logs"
        ));
    }

    #[test]
    fn test_explicit_kind_ignores_environment_value() {
        assert_eq!(
            resolve_kind(Some(InstrumentKind::Meter), Some("logs")).unwrap(),
            InstrumentKind::Meter
        );
        assert_eq!(
            resolve_kind(None, Some("metrics")).unwrap(),
            InstrumentKind::Meter
        );
        assert_eq!(resolve_kind(None, None).unwrap(), DEFAULT_KIND);
        assert!(matches!(
            resolve_kind(None, Some("logs")),
            Err(ConfigError::InvalidKind(_))
        ));
    }

    #[test]
    fn test_from_args() {
        use clap::Parser;

        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let args = CliArgs::parse_from([
            "telemetry-docs",
            "--kind",
            "metrics",
            "--strict-prefixes",
            root.as_str(),
            ".*",
            "out",
        ]);

        let config = DocsConfig::from_args(&args).unwrap();
        assert_eq!(config.kind, InstrumentKind::Meter);
        assert!(config.strict_prefixes);
        assert_eq!(config.project_root, dir.path());
        assert_eq!(config.output_file(), PathBuf::from("out/_metrics.adoc"));
    }

    #[test]
    fn test_output_file_per_kind() {
        let dir = TempDir::new().unwrap();
        let spans = config(dir.path(), ".*");
        assert_eq!(spans.output_file(), dir.path().join("docs/_spans.adoc"));

        let metrics = spans.with_kind(InstrumentKind::Meter);
        assert_eq!(metrics.output_file(), dir.path().join("docs/_metrics.adoc"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        assert!(config(dir.path(), r".*/src/.*\.rs$").validate().is_ok());
    }

    #[test]
    fn test_validate_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = config(&missing, ".*").validate().unwrap_err();
        assert!(matches!(err, ConfigError::RootNotFound(path) if path == missing));
    }

    #[test]
    fn test_validate_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "content").unwrap();
        let err = config(&file, ".*").validate().unwrap_err();
        assert!(matches!(err, ConfigError::RootNotADirectory(_)));
    }

    #[test]
    fn test_validate_output_is_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("docs"), "not a directory").unwrap();
        let err = config(dir.path(), ".*").validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutputNotADirectory(_)));
    }

    #[test]
    fn test_validate_agrees_with_path_filter() {
        let dir = TempDir::new().unwrap();
        for pattern in [r".*/src/.*\.rs$", "/", "a/(b", r"[/]"] {
            let filter_ok = PathFilter::new(dir.path(), pattern).is_ok();
            let config_ok = config(dir.path(), pattern).validate().is_ok();
            assert_eq!(config_ok, filter_ok, "{}", pattern);
        }
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let err = config(dir.path(), "(unclosed").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("Invalid inclusion pattern"));
    }
}
