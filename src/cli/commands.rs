use crate::model::InstrumentKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generates documentation for telemetry span and metric declarations
#[derive(Parser, Debug)]
#[command(
    name = "telemetry-docs",
    about = "Generates documentation for telemetry span and metric declarations",
    version,
    long_about = "telemetry-docs scans Rust sources under a project root for SpanDocumentation \
                  or MeterDocumentation declarations and renders them into a single AsciiDoc \
                  document. Nothing is compiled or executed.\n\n\
                  Examples:\n  \
                  telemetry-docs . '.*/src/.*\\.rs$' target/docs\n  \
                  telemetry-docs --kind metrics . '.*/src/.*\\.rs$' target/docs"
)]
pub struct CliArgs {
    #[arg(value_name = "PROJECT_ROOT", help = "Directory to scan")]
    pub project_root: PathBuf,

    #[arg(
        value_name = "INCLUSION_PATTERN",
        help = "Regular expression over file paths; '/' matches the platform separator"
    )]
    pub inclusion_pattern: String,

    #[arg(value_name = "OUTPUT_DIR", help = "Directory the document is written to")]
    pub output_dir: PathBuf,

    #[arg(
        short = 'k',
        long,
        value_enum,
        help = "Kind of instrument to document [default: spans, or TELEMETRY_DOCS_KIND]"
    )]
    pub kind: Option<KindArg>,

    #[arg(long, help = "Fail when a tag or event name lacks its declared prefix")]
    pub strict_prefixes: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Spans,
    Metrics,
}

impl From<KindArg> for InstrumentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Spans => InstrumentKind::Span,
            KindArg::Metrics => InstrumentKind::Meter,
        }
    }
}
