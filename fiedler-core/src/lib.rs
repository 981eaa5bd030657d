//! Fiedler core library: spectral clustering of small undirected graphs.
//!
//! The pipeline derives adjacency, degree and Laplacian matrices from a
//! [`Graph`], eigendecomposes the Laplacian into a [`Spectrum`], embeds the
//! nodes using the eigenvectors after the trivial one and partitions that
//! [`Embedding`] with seeded k-means for each requested cluster count.
//!
//! ```
//! use fiedler_core::{Graph, SpectralClusteringBuilder};
//!
//! let report = SpectralClusteringBuilder::new()
//!     .with_cluster_counts([2])
//!     .build()?
//!     .run(&Graph::reference())?;
//! let partition = report.partition(2).expect("k = 2 was requested");
//! assert_eq!(partition.members().concat().len(), 16);
//! # Ok::<(), fiedler_core::FiedlerError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod embedding;
mod error;
mod graph;
mod kmeans;
mod layout;
mod matrices;
mod pipeline;
mod result;
mod spectrum;

pub use crate::{
    embedding::{Embedding, PointView},
    error::{
        FiedlerError, FiedlerErrorCode, GraphError, GraphErrorCode, KMeansError, KMeansErrorCode,
        PartitionError, PartitionErrorCode, Result, SpectrumError, SpectrumErrorCode,
    },
    graph::{Edge, Graph, MAX_NODE_COUNT, REFERENCE_EDGES, REFERENCE_NODE_COUNT},
    kmeans::{
        DEFAULT_MAX_ITERATIONS, DEFAULT_RESTARTS, DEFAULT_SEED, DEFAULT_TOLERANCE, KMeans,
        KMeansFit, KMeansParams,
    },
    layout::{
        DEFAULT_LAYOUT_ITERATIONS, DEFAULT_LAYOUT_SEED, Layout, SpringLayoutParams, spring_layout,
    },
    matrices::{GraphMatrices, LaplacianKind},
    pipeline::{
        DEFAULT_CLUSTER_COUNTS, DEFAULT_EMBEDDING_DIMENSIONS, SpectralClustering,
        SpectralClusteringBuilder, SpectralReport, ZERO_EIGENVALUE_TOLERANCE,
    },
    result::{ClusterId, Partition},
    spectrum::{SIGN_TIE_TOLERANCE, SYMMETRY_TOLERANCE, Spectrum},
};
