//! Command-line interface for the spectral clustering pipeline.
//!
//! The `run` command clusters the built-in reference graph, prints a text
//! report and writes one SVG figure per cluster count.

mod commands;
mod plot;
mod report;

pub use commands::{
    Cli, CliError, Command, DEFAULT_EIGENVALUES, DEFAULT_PLOT_DIR, ExecutionSummary,
    LaplacianArg, RunCommand, run_cli, run_command,
};
pub use plot::{PLOT_SIZE, PlotError, plot_path, render_partition};
pub use report::{format_matrix, render_summary};

#[cfg(test)]
mod test_helpers;
