//! Structured logging setup for telemetry-docs
//!
//! Logs go to stderr so the generated document and any piped output stay
//! separate from diagnostics. `RUST_LOG` takes precedence over every setting
//! here.
//!
//! # Example
//!
//! ```no_run
//! use telemetry_docs::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(root = "/repo", "Scanning project");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

const CRATE_TARGET: &str = "telemetry_docs";

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for this crate
    pub level: Level,

    /// Emit JSON lines instead of human-readable output
    pub use_json: bool,

    /// Include the module target in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `TELEMETRY_DOCS_LOG_LEVEL` and `TELEMETRY_DOCS_LOG_JSON`
    pub fn from_env() -> Self {
        let level = env::var("TELEMETRY_DOCS_LOG_LEVEL")
            .map(|s| parse_level(&s))
            .unwrap_or(Level::INFO);

        let use_json = env::var("TELEMETRY_DOCS_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Applies command-line overrides on top of the environment.
    ///
    /// An explicit level wins over `--verbose`, which wins over `--quiet`.
    pub fn from_cli(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let mut config = Self::from_env();
        if let Some(level) = log_level {
            config.level = parse_level(level);
        } else if verbose {
            config.level = Level::DEBUG;
            config.include_target = true;
        } else if quiet {
            config.level = Level::ERROR;
        }
        config
    }
}

/// Parses a log level, falling back to `INFO` for unknown values
///
/// ```
/// use telemetry_docs::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn crate_directive(level: Level) -> Option<Directive> {
    format!("{}={}", CRATE_TARGET, level).parse().ok()
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            if let Some(directive) = crate_directive(config.level) {
                filter = filter.add_directive(directive);
            }
        }

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}
