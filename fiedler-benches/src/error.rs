//! Benchmark setup error types.
//!
//! Setup functions propagate failures with `?` instead of panicking, and
//! each bench reports the aggregated error once.

use fiedler_core::{FiedlerError, GraphError, KMeansError, SpectrumError};

/// Errors raised while generating synthetic graphs.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// No blocks were requested.
    #[error("block count must be greater than zero")]
    ZeroBlocks,
    /// Blocks must hold at least one node.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,
    /// `block_count * block_size` overflowed `usize`.
    #[error("block_count * block_size overflows usize")]
    Overflow,
    /// An edge probability was outside `[0, 1]`.
    #[error("probability `{parameter}` must lie in [0, 1], got {value}")]
    InvalidProbability {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// The generated edges did not form a valid graph.
    #[error("generated graph is invalid: {0}")]
    Graph(#[from] GraphError),
}

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Eigendecomposition or embedding failed.
    #[error("spectral decomposition failed: {0}")]
    Spectrum(#[from] SpectrumError),
    /// K-means parameter validation failed.
    #[error("k-means setup failed: {0}")]
    KMeans(#[from] KMeansError),
    /// Pipeline configuration failed.
    #[error("pipeline setup failed: {0}")]
    Pipeline(#[from] FiedlerError),
}
