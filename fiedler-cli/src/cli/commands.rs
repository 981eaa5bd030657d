//! Argument parsing and command execution for the `fiedler` binary.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use fiedler_core::{
    DEFAULT_CLUSTER_COUNTS, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_LAYOUT_SEED, DEFAULT_RESTARTS,
    DEFAULT_SEED, FiedlerError, Graph, LaplacianKind, SpectralClusteringBuilder, SpectralReport,
    SpringLayoutParams, spring_layout,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::plot::{PlotError, plot_path, render_partition};

/// Number of leading eigenvalues printed unless overridden.
pub const DEFAULT_EIGENVALUES: usize = 5;
/// Directory receiving SVG figures unless overridden.
pub const DEFAULT_PLOT_DIR: &str = "plots";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fiedler",
    about = "Spectral clustering of a small undirected graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster the reference graph and report the result.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Cluster counts to evaluate, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_CLUSTER_COUNTS)]
    pub clusters: Vec<usize>,

    /// Number of non-trivial eigenvectors in the embedding.
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIMENSIONS)]
    pub dimensions: usize,

    /// Seed for k-means centre initialisation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of k-means restarts; the lowest inertia wins.
    #[arg(long, default_value_t = DEFAULT_RESTARTS)]
    pub restarts: usize,

    /// Laplacian to decompose.
    #[arg(long, value_enum, default_value_t = LaplacianArg::Unnormalised)]
    pub laplacian: LaplacianArg,

    /// Number of leading eigenvalues to print.
    #[arg(long, default_value_t = DEFAULT_EIGENVALUES)]
    pub eigenvalues: usize,

    /// Seed for the spring layout used in figures.
    #[arg(long = "layout-seed", default_value_t = DEFAULT_LAYOUT_SEED)]
    pub layout_seed: u64,

    /// Directory receiving one SVG per cluster count.
    #[arg(long = "plot-dir", default_value = DEFAULT_PLOT_DIR)]
    pub plot_dir: PathBuf,

    /// Skip writing figures.
    #[arg(long = "no-plots")]
    pub no_plots: bool,
}

impl Default for RunCommand {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTER_COUNTS.to_vec(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            seed: DEFAULT_SEED,
            restarts: DEFAULT_RESTARTS,
            laplacian: LaplacianArg::default(),
            eigenvalues: DEFAULT_EIGENVALUES,
            layout_seed: DEFAULT_LAYOUT_SEED,
            plot_dir: PathBuf::from(DEFAULT_PLOT_DIR),
            no_plots: false,
        }
    }
}

/// Laplacian variants selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LaplacianArg {
    /// Combinatorial Laplacian `D - A`.
    #[default]
    Unnormalised,
    /// Symmetric normalised Laplacian `D^-1/2 (D - A) D^-1/2`.
    Normalised,
}

impl From<LaplacianArg> for LaplacianKind {
    fn from(value: LaplacianArg) -> Self {
        match value {
            LaplacianArg::Unnormalised => Self::Unnormalised,
            LaplacianArg::Normalised => Self::SymmetricNormalised,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The plot directory could not be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Directory that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Rendering a figure failed.
    #[error(transparent)]
    Plot(#[from] PlotError),
    /// The clustering pipeline failed.
    #[error(transparent)]
    Core(#[from] FiedlerError),
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Everything computed by the pipeline.
    pub report: SpectralReport,
    /// How many leading eigenvalues to print.
    pub eigenvalues: usize,
    /// Figures written, in cluster-count order.
    pub plots: Vec<PathBuf>,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the pipeline rejects the options, the plot
/// directory cannot be created or a figure cannot be written.
///
/// # Examples
/// ```
/// use fiedler_cli::cli::{Cli, Command, RunCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         clusters: vec![2],
///         no_plots: true,
///         ..RunCommand::default()
///     }),
/// };
/// let summary = run_cli(cli).expect("run must succeed");
/// assert_eq!(summary.report.partitions().len(), 1);
/// assert!(summary.plots.is_empty());
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&Graph::reference(), run)
        }
    }
}

/// Clusters `graph` with the options in `command`.
///
/// # Errors
/// See [`run_cli`].
#[instrument(
    name = "cli.execute",
    err,
    skip(graph, command),
    fields(graph = %graph.name(), plots = !command.no_plots),
)]
pub fn run_command(graph: &Graph, command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let report = SpectralClusteringBuilder::new()
        .with_cluster_counts(command.clusters)
        .with_embedding_dimensions(command.dimensions)
        .with_seed(command.seed)
        .with_restarts(command.restarts)
        .with_laplacian(command.laplacian.into())
        .build()?
        .run(graph)?;

    let plots = if command.no_plots {
        Vec::new()
    } else {
        let params = SpringLayoutParams::default().with_seed(command.layout_seed);
        write_plots(graph, &report, &params, &command.plot_dir)?
    };

    info!(
        partitions = report.partitions().len(),
        plots = plots.len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        report,
        eigenvalues: command.eigenvalues,
        plots,
    })
}

fn write_plots(
    graph: &Graph,
    report: &SpectralReport,
    params: &SpringLayoutParams,
    dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let layout = spring_layout(graph, params);
    report
        .partitions()
        .iter()
        .map(|partition| {
            let path = plot_path(dir, partition.cluster_count());
            render_partition(&path, graph, &layout, partition)?;
            Ok(path)
        })
        .collect()
}
