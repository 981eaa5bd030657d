//! Small helpers shared across CLI tests.

use std::path::Path;

use fiedler_core::Graph;
use tempfile::TempDir;

use super::{CliError, ExecutionSummary, RunCommand, run_command};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Options for a quiet run that writes figures into `dir`.
pub(super) fn command_in(dir: &Path) -> RunCommand {
    RunCommand {
        plot_dir: dir.join("plots"),
        ..RunCommand::default()
    }
}

pub(super) fn run_reference(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    run_command(&Graph::reference(), command)
}

pub(super) fn run_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    match run_reference(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render_to_string(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = super::render_summary(summary, &mut buffer) {
        panic!("rendering into memory failed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("report is not UTF-8: {err}"),
    }
}
