//! Cluster assignments produced for a single cluster count.
//!
//! A [`Partition`] pairs every node with a [`ClusterId`] below the requested
//! cluster count. Clusters that received no nodes are kept so the membership
//! view always lists exactly `cluster_count` clusters.

use std::fmt;

use crate::error::PartitionError;

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use fiedler_core::ClusterId;
///
/// let id = ClusterId::new(2);
/// assert_eq!(id.get(), 2);
/// assert_eq!(id.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Labels for every node under one cluster count.
///
/// # Examples
/// ```
/// use fiedler_core::Partition;
///
/// let partition = Partition::try_from_labels(3, vec![0, 2, 0, 2])?;
/// assert_eq!(partition.cluster_count(), 3);
/// assert_eq!(partition.members(), vec![vec![0, 2], vec![], vec![1, 3]]);
/// assert_eq!(partition.cluster_sizes(), vec![2, 0, 2]);
/// # Ok::<(), fiedler_core::PartitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    cluster_count: usize,
    assignments: Vec<ClusterId>,
    inertia: Option<f64>,
}

impl Partition {
    /// Builds a partition from raw labels.
    ///
    /// # Errors
    /// Returns [`PartitionError::ZeroClusters`] when `cluster_count` is zero
    /// and [`PartitionError::LabelOutOfRange`] when a label is not below
    /// `cluster_count`.
    pub fn try_from_labels(
        cluster_count: usize,
        labels: Vec<usize>,
    ) -> Result<Self, PartitionError> {
        if cluster_count == 0 {
            return Err(PartitionError::ZeroClusters);
        }
        if let Some((node, &label)) = labels
            .iter()
            .enumerate()
            .find(|&(_, &label)| label >= cluster_count)
        {
            return Err(PartitionError::LabelOutOfRange {
                node,
                label,
                cluster_count,
            });
        }
        Ok(Self {
            cluster_count,
            assignments: labels.into_iter().map(ClusterId::new).collect(),
            inertia: None,
        })
    }

    /// Attaches the k-means objective value that produced this partition.
    #[must_use]
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = Some(inertia);
        self
    }

    /// Returns the requested number of clusters, including empty ones.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Returns the assignment of every node, indexed by node.
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }

    /// Returns the number of labelled nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the cluster of `node`, or `None` when out of range.
    #[must_use]
    pub fn label(&self, node: usize) -> Option<ClusterId> {
        self.assignments.get(node).copied()
    }

    /// Returns the sum of squared distances to cluster centres, when known.
    #[must_use]
    pub fn inertia(&self) -> Option<f64> {
        self.inertia
    }

    /// Lists the nodes of each cluster in ascending order, indexed by
    /// cluster id.
    #[must_use]
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.cluster_count];
        for (node, id) in self.assignments.iter().enumerate() {
            if let Some(list) = members.get_mut(id.get()) {
                list.push(node);
            }
        }
        members
    }

    /// Returns how many nodes each cluster holds, indexed by cluster id.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.cluster_count];
        for id in &self.assignments {
            if let Some(size) = sizes.get_mut(id.get()) {
                *size += 1;
            }
        }
        sizes
    }

    /// Returns how many clusters received at least one node.
    #[must_use]
    pub fn occupied_clusters(&self) -> usize {
        self.cluster_sizes().iter().filter(|&&size| size > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn members_partition_every_node_once() {
        let partition =
            Partition::try_from_labels(2, vec![1, 0, 1, 1, 0]).expect("labels are in range");
        let members = partition.members();
        assert_eq!(members, vec![vec![1, 4], vec![0, 2, 3]]);
        let mut union: Vec<usize> = members.into_iter().flatten().collect();
        union.sort_unstable();
        assert_eq!(union, (0..5).collect::<Vec<_>>());
    }

    #[rstest]
    fn empty_clusters_are_reported() {
        let partition = Partition::try_from_labels(4, vec![0, 0, 3]).expect("labels are in range");
        assert_eq!(partition.members().len(), 4);
        assert_eq!(partition.occupied_clusters(), 2);
    }

    #[rstest]
    #[case::zero_clusters(0, vec![], PartitionError::ZeroClusters)]
    #[case::label_too_large(
        2,
        vec![0, 1, 2],
        PartitionError::LabelOutOfRange { node: 2, label: 2, cluster_count: 2 }
    )]
    fn try_from_labels_rejects_invalid_input(
        #[case] cluster_count: usize,
        #[case] labels: Vec<usize>,
        #[case] expected: PartitionError,
    ) {
        let err = Partition::try_from_labels(cluster_count, labels)
            .expect_err("labels must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn label_lookup_is_bounds_checked() {
        let partition = Partition::try_from_labels(2, vec![1]).expect("labels are in range");
        assert_eq!(partition.label(0), Some(ClusterId::new(1)));
        assert_eq!(partition.label(1), None);
        assert_eq!(partition.inertia(), None);
        assert_eq!(partition.with_inertia(0.5).inertia(), Some(0.5));
    }
}
