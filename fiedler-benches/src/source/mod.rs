//! Planted-partition graph generators for benchmarking.
//!
//! Nodes are split into equally sized blocks. Each pair inside a block is
//! joined with probability `p_in`, each pair across blocks with `p_out`.

use std::iter;

use fiedler_core::Graph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::SyntheticError;

/// Configuration for [`PlantedPartition::generate`].
#[derive(Clone, Debug)]
pub struct PlantedPartitionConfig {
    /// Number of planted communities.
    pub block_count: usize,
    /// Nodes per community.
    pub block_size: usize,
    /// Edge probability within a community.
    pub p_in: f64,
    /// Edge probability across communities.
    pub p_out: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A generated graph together with the community of every node.
#[derive(Clone, Debug)]
pub struct PlantedPartition {
    graph: Graph,
    blocks: Vec<usize>,
}

impl PlantedPartition {
    /// Generates a graph from `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when a size is zero, the node count
    /// overflows or a probability lies outside `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use fiedler_benches::source::{PlantedPartition, PlantedPartitionConfig};
    ///
    /// let planted = PlantedPartition::generate(&PlantedPartitionConfig {
    ///     block_count: 3,
    ///     block_size: 4,
    ///     p_in: 1.0,
    ///     p_out: 0.0,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(planted.graph().node_count(), 12);
    /// assert_eq!(planted.graph().component_count(), 3);
    /// # Ok::<(), fiedler_benches::error::SyntheticError>(())
    /// ```
    pub fn generate(config: &PlantedPartitionConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let node_count = config
            .block_count
            .checked_mul(config.block_size)
            .ok_or(SyntheticError::Overflow)?;
        let blocks: Vec<usize> = (0..config.block_count)
            .flat_map(|block| iter::repeat_n(block, config.block_size))
            .collect();

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut edges = Vec::new();
        for (a, &block_a) in blocks.iter().enumerate() {
            for (b, &block_b) in blocks.iter().enumerate().skip(a + 1) {
                let probability = if block_a == block_b {
                    config.p_in
                } else {
                    config.p_out
                };
                if rng.r#gen::<f64>() < probability {
                    edges.push((a, b));
                }
            }
        }

        let graph = Graph::with_node_count("planted-partition", node_count, edges)?;
        Ok(Self { graph, blocks })
    }

    /// Returns the generated graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the planted community of every node.
    #[must_use]
    pub fn blocks(&self) -> &[usize] {
        &self.blocks
    }
}

fn validate(config: &PlantedPartitionConfig) -> Result<(), SyntheticError> {
    if config.block_count == 0 {
        return Err(SyntheticError::ZeroBlocks);
    }
    if config.block_size == 0 {
        return Err(SyntheticError::ZeroBlockSize);
    }
    for (parameter, value) in [("p_in", config.p_in), ("p_out", config.p_out)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(SyntheticError::InvalidProbability { parameter, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
