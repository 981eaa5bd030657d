//! Spectral clustering orchestration.
//!
//! [`SpectralClusteringBuilder`] validates configuration up front;
//! [`SpectralClustering::run`] then derives the graph matrices, decomposes
//! the Laplacian, embeds the nodes and runs k-means once per requested
//! cluster count.

use std::{collections::HashSet, sync::Arc};

use tracing::{info, instrument, warn};

use crate::{
    Result,
    embedding::Embedding,
    error::FiedlerError,
    graph::Graph,
    kmeans::{DEFAULT_MAX_ITERATIONS, DEFAULT_RESTARTS, DEFAULT_SEED, DEFAULT_TOLERANCE},
    kmeans::{KMeans, KMeansParams},
    matrices::{GraphMatrices, LaplacianKind},
    result::Partition,
    spectrum::Spectrum,
};

/// Cluster counts evaluated unless overridden.
pub const DEFAULT_CLUSTER_COUNTS: [usize; 3] = [2, 3, 4];
/// Number of non-trivial eigenvectors in the embedding unless overridden.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 2;
/// Eigenvalues within this distance of zero count as zero.
pub const ZERO_EIGENVALUE_TOLERANCE: f64 = 1e-9;

/// Configures and constructs [`SpectralClustering`] instances.
///
/// # Examples
/// ```
/// use fiedler_core::{LaplacianKind, SpectralClusteringBuilder};
///
/// let clustering = SpectralClusteringBuilder::new()
///     .with_cluster_counts([2, 5])
///     .with_laplacian(LaplacianKind::SymmetricNormalised)
///     .with_seed(11)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(clustering.cluster_counts(), &[2, 5]);
/// assert_eq!(clustering.laplacian(), LaplacianKind::SymmetricNormalised);
/// ```
#[derive(Debug, Clone)]
pub struct SpectralClusteringBuilder {
    cluster_counts: Vec<usize>,
    embedding_dimensions: usize,
    laplacian: LaplacianKind,
    seed: u64,
    restarts: usize,
    max_iterations: usize,
    tolerance: f64,
}

impl Default for SpectralClusteringBuilder {
    fn default() -> Self {
        Self {
            cluster_counts: DEFAULT_CLUSTER_COUNTS.to_vec(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            laplacian: LaplacianKind::default(),
            seed: DEFAULT_SEED,
            restarts: DEFAULT_RESTARTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SpectralClusteringBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::SpectralClusteringBuilder;
    ///
    /// let builder = SpectralClusteringBuilder::new();
    /// assert_eq!(builder.cluster_counts(), &[2, 3, 4]);
    /// assert_eq!(builder.embedding_dimensions(), 2);
    /// assert_eq!(builder.seed(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cluster counts to evaluate, in order.
    #[must_use]
    pub fn with_cluster_counts(mut self, counts: impl IntoIterator<Item = usize>) -> Self {
        self.cluster_counts = counts.into_iter().collect();
        self
    }

    /// Returns the configured cluster counts.
    #[must_use]
    pub fn cluster_counts(&self) -> &[usize] {
        &self.cluster_counts
    }

    /// Overrides how many non-trivial eigenvectors form the embedding.
    #[must_use]
    pub fn with_embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.embedding_dimensions = dimensions;
        self
    }

    /// Returns the configured embedding width.
    #[must_use]
    pub fn embedding_dimensions(&self) -> usize {
        self.embedding_dimensions
    }

    /// Selects which Laplacian is decomposed.
    #[must_use]
    pub fn with_laplacian(mut self, kind: LaplacianKind) -> Self {
        self.laplacian = kind;
        self
    }

    /// Seeds k-means centre initialisation.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Overrides the number of k-means restarts.
    #[must_use]
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Overrides the k-means iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Overrides the k-means convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates the configuration and constructs a [`SpectralClustering`].
    ///
    /// # Errors
    /// Returns [`FiedlerError::InvalidConfiguration`] when no cluster counts
    /// are given, a cluster count is repeated, a cluster count or the
    /// embedding width is zero, or the k-means parameters are invalid.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::{FiedlerError, SpectralClusteringBuilder};
    ///
    /// let err = SpectralClusteringBuilder::new()
    ///     .with_cluster_counts([2, 0])
    ///     .build()
    ///     .unwrap_err();
    /// assert!(matches!(err, FiedlerError::InvalidConfiguration { .. }));
    /// ```
    pub fn build(self) -> Result<SpectralClustering> {
        let invalid = |reason: String| FiedlerError::InvalidConfiguration {
            reason: Arc::from(reason),
        };
        if self.cluster_counts.is_empty() {
            return Err(invalid("at least one cluster count is required".to_owned()));
        }
        if self.cluster_counts.contains(&0) {
            return Err(invalid("cluster counts must be at least 1".to_owned()));
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = self.cluster_counts.iter().find(|&&k| !seen.insert(k)) {
            return Err(invalid(format!("cluster count {repeated} is repeated")));
        }
        if self.embedding_dimensions == 0 {
            return Err(invalid("embedding_dimensions must be at least 1".to_owned()));
        }

        let runners = self
            .cluster_counts
            .iter()
            .map(|&clusters| {
                let params = KMeansParams::new(clusters)
                    .with_seed(self.seed)
                    .with_restarts(self.restarts)
                    .with_max_iterations(self.max_iterations)
                    .with_tolerance(self.tolerance);
                KMeans::new(params).map_err(|error| invalid(error.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SpectralClustering {
            cluster_counts: self.cluster_counts,
            embedding_dimensions: self.embedding_dimensions,
            laplacian: self.laplacian,
            runners,
        })
    }
}

/// Entry point for running spectral clustering over a [`Graph`].
///
/// # Examples
/// ```
/// use fiedler_core::{Graph, SpectralClusteringBuilder};
///
/// let clustering = SpectralClusteringBuilder::new()
///     .build()
///     .expect("defaults are valid");
/// let report = clustering.run(&Graph::reference()).expect("run must succeed");
/// assert_eq!(report.partitions().len(), 3);
/// for partition in report.partitions() {
///     assert_eq!(partition.node_count(), 16);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SpectralClustering {
    cluster_counts: Vec<usize>,
    embedding_dimensions: usize,
    laplacian: LaplacianKind,
    runners: Vec<KMeans>,
}

impl SpectralClustering {
    /// Returns the cluster counts evaluated by [`Self::run`].
    #[must_use]
    pub fn cluster_counts(&self) -> &[usize] {
        &self.cluster_counts
    }

    /// Returns the embedding width.
    #[must_use]
    pub fn embedding_dimensions(&self) -> usize {
        self.embedding_dimensions
    }

    /// Returns which Laplacian is decomposed.
    #[must_use]
    pub fn laplacian(&self) -> LaplacianKind {
        self.laplacian
    }

    /// Runs the full pipeline against `graph`.
    ///
    /// # Errors
    /// Returns [`FiedlerError::GraphTooSmall`] when the graph cannot supply
    /// the embedding width, [`FiedlerError::TooManyClusters`] when a cluster
    /// count exceeds the number of nodes, and wraps any decomposition or
    /// clustering failure in [`FiedlerError::Spectrum`],
    /// [`FiedlerError::KMeans`] or [`FiedlerError::Partition`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph),
        fields(
            graph = %graph.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            laplacian = ?self.laplacian,
        ),
    )]
    pub fn run(&self, graph: &Graph) -> Result<SpectralReport> {
        let graph_name: Arc<str> = Arc::from(graph.name());
        let nodes = graph.node_count();
        let required = self.embedding_dimensions.saturating_add(1);
        if nodes < required {
            return Err(FiedlerError::GraphTooSmall {
                graph: graph_name,
                nodes,
                required,
            });
        }
        if let Some(&clusters) = self.cluster_counts.iter().find(|&&k| k > nodes) {
            return Err(FiedlerError::TooManyClusters {
                graph: graph_name,
                clusters,
                nodes,
            });
        }

        let matrices = GraphMatrices::from_graph(graph);
        let spectrum = Spectrum::decompose(&matrices.laplacian_of(self.laplacian)).map_err(
            |error| FiedlerError::Spectrum {
                graph: graph_name.clone(),
                error,
            },
        )?;

        let components = graph.component_count();
        if components > 1 {
            warn!(
                graph = %graph_name,
                components,
                "graph is disconnected; the embedding mixes component indicators"
            );
        }

        let embedding = spectrum
            .embedding(self.embedding_dimensions)
            .map_err(|error| FiedlerError::Spectrum {
                graph: graph_name.clone(),
                error,
            })?;

        let partitions = self
            .runners
            .iter()
            .map(|runner| cluster_once(runner, &embedding, &graph_name))
            .collect::<Result<Vec<_>>>()?;

        info!(
            fiedler_value = ?spectrum.algebraic_connectivity(),
            partitions = partitions.len(),
            "spectral clustering completed"
        );
        Ok(SpectralReport {
            graph: graph_name,
            matrices,
            spectrum,
            embedding,
            partitions,
        })
    }
}

fn cluster_once(runner: &KMeans, embedding: &Embedding, graph: &Arc<str>) -> Result<Partition> {
    let clusters = runner.params().clusters();
    let fit = runner
        .fit(embedding)
        .map_err(|error| FiedlerError::KMeans {
            graph: graph.clone(),
            clusters,
            error,
        })?;
    let inertia = fit.inertia();
    let partition = Partition::try_from_labels(clusters, fit.into_labels()).map_err(|error| {
        FiedlerError::Partition {
            graph: graph.clone(),
            clusters,
            error,
        }
    })?;
    Ok(partition.with_inertia(inertia))
}

/// Everything computed by one [`SpectralClustering::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralReport {
    graph: Arc<str>,
    matrices: GraphMatrices,
    spectrum: Spectrum,
    embedding: Embedding,
    partitions: Vec<Partition>,
}

impl SpectralReport {
    /// Returns the name of the clustered graph.
    #[must_use]
    pub fn graph_name(&self) -> &str {
        &self.graph
    }

    /// Returns the adjacency, degree and Laplacian matrices.
    #[must_use]
    pub fn matrices(&self) -> &GraphMatrices {
        &self.matrices
    }

    /// Returns the eigendecomposition of the selected Laplacian.
    #[must_use]
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Returns the node embedding fed to k-means.
    #[must_use]
    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }

    /// Returns one partition per requested cluster count, in request order.
    #[must_use]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Returns the first partition computed for `clusters`.
    #[must_use]
    pub fn partition(&self, clusters: usize) -> Option<&Partition> {
        self.partitions
            .iter()
            .find(|partition| partition.cluster_count() == clusters)
    }

    /// Returns the number of connected components implied by the spectrum.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.spectrum.zero_eigenvalue_count(ZERO_EIGENVALUE_TOLERANCE)
    }
}
