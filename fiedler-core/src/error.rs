//! Error types for the Fiedler core library.
//!
//! Each pipeline stage owns an error enum; [`FiedlerError`] wraps them with
//! the name of the graph being processed. Every enum exposes a stable
//! machine-readable code through `code()`.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The graph would contain no nodes.
    #[error("graph must contain at least one node")]
    Empty,
    /// An edge connected a node to itself.
    #[error("edge ({node}, {node}) is a self-loop")]
    SelfLoop {
        /// Node named on both ends of the edge.
        node: usize,
    },
    /// An edge referenced a node outside the declared node range.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// Offending node identifier.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The graph would exceed the supported node count.
    #[error("graph with {node_count} nodes exceeds the limit of {limit}")]
    TooManyNodes {
        /// Requested number of nodes.
        node_count: usize,
        /// Largest supported number of nodes.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The graph would contain no nodes.
        Empty => Empty => "FIEDLER_GRAPH_EMPTY",
        /// An edge connected a node to itself.
        SelfLoop => SelfLoop { .. } => "FIEDLER_GRAPH_SELF_LOOP",
        /// An edge referenced a node outside the declared node range.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "FIEDLER_GRAPH_NODE_OUT_OF_BOUNDS",
        /// The graph would exceed the supported node count.
        TooManyNodes => TooManyNodes { .. } => "FIEDLER_GRAPH_TOO_MANY_NODES",
    }
}

/// An error produced while decomposing a matrix into a [`crate::Spectrum`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpectrumError {
    /// The matrix had no rows.
    #[error("cannot decompose an empty matrix")]
    EmptyMatrix,
    /// The matrix was not square.
    #[error("matrix must be square (got {rows}x{cols})")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// The matrix contained a NaN or infinite entry.
    #[error("matrix entry ({row}, {col}) is not finite")]
    NonFinite {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },
    /// The matrix was not symmetric.
    #[error("matrix is not symmetric at ({row}, {col}): difference {difference}")]
    Asymmetric {
        /// Row of the first mismatching pair.
        row: usize,
        /// Column of the first mismatching pair.
        col: usize,
        /// Absolute difference between the mirrored entries.
        difference: f64,
    },
    /// More eigenvectors were requested than the decomposition provides.
    #[error("requested eigenvectors 1..={requested} but only {available} are available")]
    InsufficientEigenvectors {
        /// Highest eigenvector index requested.
        requested: usize,
        /// Number of eigenvectors in the decomposition.
        available: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SpectrumError`] variants.
    enum SpectrumErrorCode for SpectrumError {
        /// The matrix had no rows.
        EmptyMatrix => EmptyMatrix => "FIEDLER_SPECTRUM_EMPTY_MATRIX",
        /// The matrix was not square.
        NotSquare => NotSquare { .. } => "FIEDLER_SPECTRUM_NOT_SQUARE",
        /// The matrix contained a NaN or infinite entry.
        NonFinite => NonFinite { .. } => "FIEDLER_SPECTRUM_NON_FINITE",
        /// The matrix was not symmetric.
        Asymmetric => Asymmetric { .. } => "FIEDLER_SPECTRUM_ASYMMETRIC",
        /// More eigenvectors were requested than available.
        InsufficientEigenvectors => InsufficientEigenvectors { .. } => "FIEDLER_SPECTRUM_INSUFFICIENT_EIGENVECTORS",
    }
}

/// An error produced by [`crate::KMeans`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum KMeansError {
    /// A k-means parameter was outside its accepted range.
    #[error("invalid k-means parameters: {reason}")]
    InvalidParameters {
        /// Description of the violated constraint.
        reason: String,
    },
    /// The embedding contained no points.
    #[error("cannot cluster an empty embedding")]
    EmptyEmbedding,
    /// Fewer points than requested clusters.
    #[error("{points} points cannot form {clusters} clusters")]
    TooFewPoints {
        /// Number of points in the embedding.
        points: usize,
        /// Requested number of clusters.
        clusters: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("point {point} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        point: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`KMeansError`] variants.
    enum KMeansErrorCode for KMeansError {
        /// A k-means parameter was outside its accepted range.
        InvalidParameters => InvalidParameters { .. } => "FIEDLER_KMEANS_INVALID_PARAMETERS",
        /// The embedding contained no points.
        EmptyEmbedding => EmptyEmbedding => "FIEDLER_KMEANS_EMPTY_EMBEDDING",
        /// Fewer points than requested clusters.
        TooFewPoints => TooFewPoints { .. } => "FIEDLER_KMEANS_TOO_FEW_POINTS",
        /// A coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "FIEDLER_KMEANS_NON_FINITE_COORDINATE",
    }
}

/// Error returned when labels cannot form a [`crate::Partition`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// A partition must have at least one cluster.
    #[error("a partition needs at least one cluster")]
    ZeroClusters,
    /// A node carried a label outside `0..cluster_count`.
    #[error("node {node} has label {label} but only {cluster_count} clusters exist")]
    LabelOutOfRange {
        /// Node carrying the label.
        node: usize,
        /// Offending label.
        label: usize,
        /// Declared number of clusters.
        cluster_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// A partition must have at least one cluster.
        ZeroClusters => ZeroClusters => "FIEDLER_PARTITION_ZERO_CLUSTERS",
        /// A node carried a label outside `0..cluster_count`.
        LabelOutOfRange => LabelOutOfRange { .. } => "FIEDLER_PARTITION_LABEL_OUT_OF_RANGE",
    }
}

/// Error type produced when configuring or running [`crate::SpectralClustering`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FiedlerError {
    /// The builder configuration was rejected.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the violated constraint.
        reason: Arc<str>,
    },
    /// The graph has too few nodes for the requested embedding width.
    #[error("graph `{graph}` has {nodes} nodes but the embedding needs at least {required}")]
    GraphTooSmall {
        /// Name of the graph.
        graph: Arc<str>,
        /// Number of nodes in the graph.
        nodes: usize,
        /// Minimum number of nodes required.
        required: usize,
    },
    /// A requested cluster count exceeds the number of nodes.
    #[error("graph `{graph}` has {nodes} nodes and cannot be split into {clusters} clusters")]
    TooManyClusters {
        /// Name of the graph.
        graph: Arc<str>,
        /// Requested cluster count.
        clusters: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// The Laplacian eigendecomposition failed.
    #[error("spectral decomposition of `{graph}` failed: {error}")]
    Spectrum {
        /// Name of the graph.
        graph: Arc<str>,
        #[source]
        /// Underlying decomposition error.
        error: SpectrumError,
    },
    /// K-means clustering of the embedding failed.
    #[error("k-means with k={clusters} on `{graph}` failed: {error}")]
    KMeans {
        /// Name of the graph.
        graph: Arc<str>,
        /// Requested cluster count.
        clusters: usize,
        #[source]
        /// Underlying clustering error.
        error: KMeansError,
    },
    /// K-means labels could not be turned into a partition.
    #[error("partition with k={clusters} on `{graph}` is invalid: {error}")]
    Partition {
        /// Name of the graph.
        graph: Arc<str>,
        /// Requested cluster count.
        clusters: usize,
        #[source]
        /// Underlying partition error.
        error: PartitionError,
    },
}

define_error_codes! {
    /// Stable codes describing [`FiedlerError`] variants.
    enum FiedlerErrorCode for FiedlerError {
        /// The builder configuration was rejected.
        InvalidConfiguration => InvalidConfiguration { .. } => "FIEDLER_INVALID_CONFIGURATION",
        /// The graph has too few nodes for the requested embedding width.
        GraphTooSmall => GraphTooSmall { .. } => "FIEDLER_GRAPH_TOO_SMALL",
        /// A requested cluster count exceeds the number of nodes.
        TooManyClusters => TooManyClusters { .. } => "FIEDLER_TOO_MANY_CLUSTERS",
        /// The Laplacian eigendecomposition failed.
        SpectrumFailure => Spectrum { .. } => "FIEDLER_SPECTRUM_FAILURE",
        /// K-means clustering of the embedding failed.
        KMeansFailure => KMeans { .. } => "FIEDLER_KMEANS_FAILURE",
        /// K-means labels could not be turned into a partition.
        PartitionFailure => Partition { .. } => "FIEDLER_PARTITION_FAILURE",
    }
}

impl FiedlerError {
    /// Retrieve the code of the wrapped stage error, if any.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use fiedler_core::{FiedlerError, KMeansError};
    ///
    /// let err = FiedlerError::KMeans {
    ///     graph: Arc::from("demo"),
    ///     clusters: 3,
    ///     error: KMeansError::EmptyEmbedding,
    /// };
    /// assert_eq!(err.stage_code(), Some("FIEDLER_KMEANS_EMPTY_EMBEDDING"));
    /// ```
    #[must_use]
    pub const fn stage_code(&self) -> Option<&'static str> {
        match self {
            Self::Spectrum { error, .. } => Some(error.code().as_str()),
            Self::KMeans { error, .. } => Some(error.code().as_str()),
            Self::Partition { error, .. } => Some(error.code().as_str()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, FiedlerError>;
