use telemetry_docs::cli::CliArgs;
use telemetry_docs::progress::LoggingHandler;
use telemetry_docs::util::{init_logging, LoggingConfig};
use telemetry_docs::{DocsConfig, DocsGenerator, VERSION};

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, error};

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("telemetry-docs v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            1
        }
    };

    std::process::exit(exit_code);
}

fn run(args: &CliArgs) -> Result<()> {
    let config = DocsConfig::from_args(args)?;

    DocsGenerator::new(config, Arc::new(LoggingHandler))
        .generate()
        .with_context(|| {
            format!(
                "Failed to generate documentation for {}",
                args.project_root.display()
            )
        })?;
    Ok(())
}
