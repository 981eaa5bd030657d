//! Entry point for the `fiedler` binary.
//!
//! Initialises logging, parses arguments, runs the command and prints the
//! report to stdout. Failures are logged with their stable error codes and
//! mapped to a non-zero exit status.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use fiedler_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let mut writer = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, stage_code) = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => (Some(core.code().as_str()), core.stage_code()),
            _ => (None, None),
        };
        error!(
            error = %err,
            cause = %err.root_cause(),
            code = code.map(field::display),
            stage_code = stage_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is unavailable until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
