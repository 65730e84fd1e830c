//! mod-plugin Binary
//!
//! Entry point invoked by the host build tool.

use anyhow::Context;
use clap::Parser;
use mod_plugin::logging::init_logging;
use mod_plugin::tooling::cli::{report_result, Cli, CliContext, EXIT_FAILURE};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    let context = match bootstrap(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            let _ = writeln!(stdout, "Error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = context.execute(&cli.command, &mut stdout);
    ExitCode::from(report_result(result, &mut stdout))
}

/// Load configuration and start logging before any command runs.
fn bootstrap(cli: &Cli) -> anyhow::Result<CliContext> {
    let context = CliContext::new(cli.project_dir.clone(), cli.config.clone())
        .with_context(|| format!("failed to load configuration for {}", cli.project_dir.display()))?;

    let mut logging = context.config().logging.clone();
    if cli.debug {
        logging.level = "debug".to_string();
    }
    init_logging(Some(&logging)).context("failed to initialize logging")?;

    Ok(context)
}
