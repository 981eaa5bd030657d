//! Benchmark parameter types used as Criterion benchmark ids.

use std::fmt;

/// Shape of a planted-partition benchmark graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of planted communities.
    pub block_count: usize,
    /// Nodes per community.
    pub block_size: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blocks={},size={}", self.block_count, self.block_size)
    }
}

/// Parameters for a k-means benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct KMeansBenchParams {
    /// Number of embedded points.
    pub point_count: usize,
    /// Requested cluster count.
    pub clusters: usize,
    /// Number of restarts.
    pub restarts: usize,
}

impl fmt::Display for KMeansBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},k={},restarts={}",
            self.point_count, self.clusters, self.restarts
        )
    }
}
