//! Undirected, unweighted graphs over dense node identifiers.
//!
//! Nodes are `0..node_count` and node `i` always maps to row and column `i`
//! of every derived matrix.

use std::{collections::BTreeSet, sync::Arc};

use crate::error::GraphError;

/// Edge list of the built-in sixteen-node graph.
pub const REFERENCE_EDGES: [(usize, usize); 23] = [
    (0, 1),
    (0, 3),
    (0, 5),
    (1, 2),
    (1, 4),
    (2, 3),
    (3, 4),
    (4, 5),
    (4, 6),
    (5, 6),
    (6, 7),
    (6, 8),
    (7, 8),
    (8, 10),
    (8, 12),
    (9, 10),
    (9, 11),
    (9, 12),
    (10, 11),
    (11, 12),
    (10, 13),
    (13, 14),
    (13, 15),
];

/// Number of nodes in the built-in graph.
pub const REFERENCE_NODE_COUNT: usize = 16;

/// Largest graph accepted. Every derived matrix is dense, so memory grows
/// with the square of the node count.
pub const MAX_NODE_COUNT: usize = 4096;

/// An undirected edge stored with `source < target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Builds an edge, ordering the endpoints.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::Edge;
    ///
    /// let edge = Edge::new(4, 1);
    /// assert_eq!((edge.source(), edge.target()), (1, 4));
    /// ```
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            source: a.min(b),
            target: a.max(b),
        }
    }

    /// Returns the lower endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn source(self) -> usize { self.source }

    /// Returns the higher endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn target(self) -> usize { self.target }
}

/// Immutable undirected graph.
///
/// # Examples
/// ```
/// use fiedler_core::Graph;
///
/// let graph = Graph::from_edges("triangle", [(0, 1), (1, 2), (2, 0)])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degree(1), Some(2));
/// # Ok::<(), fiedler_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    name: Arc<str>,
    node_count: usize,
    edges: Vec<Edge>,
    neighbours: Vec<Vec<usize>>,
}

impl Graph {
    /// Builds a graph whose node count is one past the largest endpoint.
    ///
    /// Duplicate edges, in either orientation, collapse into one.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] when `edges` is empty,
    /// [`GraphError::SelfLoop`] when an edge joins a node to itself and
    /// [`GraphError::TooManyNodes`] when an endpoint is not below
    /// [`MAX_NODE_COUNT`].
    pub fn from_edges(
        name: impl Into<Arc<str>>,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let edges: Vec<(usize, usize)> = edges.into_iter().collect();
        let node_count = edges
            .iter()
            .map(|&(a, b)| a.max(b).saturating_add(1))
            .max()
            .unwrap_or(0);
        Self::with_node_count(name, node_count, edges)
    }

    /// Builds a graph with an explicit node count, allowing isolated nodes.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] when `node_count` is zero,
    /// [`GraphError::SelfLoop`] for self-loops and
    /// [`GraphError::NodeOutOfBounds`] when an endpoint is not below
    /// `node_count`. Returns [`GraphError::TooManyNodes`] when `node_count`
    /// exceeds [`MAX_NODE_COUNT`].
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::{Graph, GraphError};
    ///
    /// let graph = Graph::with_node_count("pair", 3, [(0, 1)])?;
    /// assert_eq!(graph.degree(2), Some(0));
    ///
    /// let err = Graph::with_node_count("bad", 2, [(0, 2)]).unwrap_err();
    /// assert_eq!(err, GraphError::NodeOutOfBounds { node: 2, node_count: 2 });
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn with_node_count(
        name: impl Into<Arc<str>>,
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::Empty);
        }
        if node_count > MAX_NODE_COUNT {
            return Err(GraphError::TooManyNodes {
                node_count,
                limit: MAX_NODE_COUNT,
            });
        }
        let mut unique = BTreeSet::new();
        for (a, b) in edges {
            if a == b {
                return Err(GraphError::SelfLoop { node: a });
            }
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfBounds { node, node_count });
                }
            }
            unique.insert(Edge::new(a, b));
        }
        Ok(Self::assemble(name.into(), node_count, unique.into_iter().collect()))
    }

    /// Returns the built-in sixteen-node graph used by the `fiedler` binary.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::Graph;
    ///
    /// let graph = Graph::reference();
    /// assert_eq!(graph.node_count(), 16);
    /// assert_eq!(graph.edge_count(), 23);
    /// assert!(graph.is_connected());
    /// ```
    #[must_use]
    pub fn reference() -> Self {
        let unique: BTreeSet<Edge> = REFERENCE_EDGES
            .iter()
            .map(|&(a, b)| Edge::new(a, b))
            .collect();
        Self::assemble(
            Arc::from("reference"),
            REFERENCE_NODE_COUNT,
            unique.into_iter().collect(),
        )
    }

    fn assemble(name: Arc<str>, node_count: usize, edges: Vec<Edge>) -> Self {
        let mut neighbours = vec![Vec::new(); node_count];
        for edge in &edges {
            if let Some(list) = neighbours.get_mut(edge.source) {
                list.push(edge.target);
            }
            if let Some(list) = neighbours.get_mut(edge.target) {
                list.push(edge.source);
            }
        }
        for list in &mut neighbours {
            list.sort_unstable();
        }
        Self {
            name,
            node_count,
            edges,
            neighbours,
        }
    }

    /// Returns the human-readable name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges in ascending `(source, target)` order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the sorted neighbours of `node`, or `None` when out of range.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> Option<&[usize]> {
        self.neighbours.get(node).map(Vec::as_slice)
    }

    /// Returns the degree of `node`, or `None` when out of range.
    #[must_use]
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.neighbours.get(node).map(Vec::len)
    }

    /// Returns whether `a` and `b` share an edge.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbours(a)
            .is_some_and(|list| list.binary_search(&b).is_ok())
    }

    /// Counts connected components with a breadth-first sweep.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::Graph;
    ///
    /// let graph = Graph::with_node_count("split", 4, [(0, 1), (2, 3)])?;
    /// assert_eq!(graph.component_count(), 2);
    /// # Ok::<(), fiedler_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut visited = vec![false; self.node_count];
        let mut components = 0;
        let mut queue = std::collections::VecDeque::new();
        for start in 0..self.node_count {
            if visited.get(start).copied().unwrap_or(true) {
                continue;
            }
            components += 1;
            if let Some(flag) = visited.get_mut(start) {
                *flag = true;
            }
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                for &next in self.neighbours(node).unwrap_or_default() {
                    if let Some(flag) = visited.get_mut(next) {
                        if !*flag {
                            *flag = true;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        components
    }

    /// Returns whether every node is reachable from every other node.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::error::GraphErrorCode;

    #[rstest]
    fn reference_graph_matches_edge_list() {
        let graph = Graph::reference();
        assert_eq!(graph.name(), "reference");
        for &(a, b) in &REFERENCE_EDGES {
            assert!(graph.has_edge(a, b));
            assert!(graph.has_edge(b, a));
        }
        assert!(!graph.has_edge(0, 15));
    }

    #[rstest]
    #[case::node_six(6, &[4, 5, 7, 8])]
    #[case::leaf(14, &[13])]
    #[case::hub(10, &[8, 9, 11, 13])]
    fn reference_neighbours_are_sorted(#[case] node: usize, #[case] expected: &[usize]) {
        let graph = Graph::reference();
        assert_eq!(graph.neighbours(node), Some(expected));
    }

    #[rstest]
    fn duplicate_edges_collapse() {
        let graph = Graph::from_edges("dup", [(0, 1), (1, 0), (0, 1), (1, 2)])
            .expect("edges are valid");
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(1), Some(2));
    }

    #[rstest]
    #[case::self_loop(vec![(0, 1), (2, 2)], GraphError::SelfLoop { node: 2 })]
    #[case::empty(vec![], GraphError::Empty)]
    #[case::huge_endpoint(
        vec![(0, 1 << 40)],
        GraphError::TooManyNodes { node_count: (1 << 40) + 1, limit: MAX_NODE_COUNT }
    )]
    #[case::saturated_endpoint(
        vec![(0, usize::MAX)],
        GraphError::TooManyNodes { node_count: usize::MAX, limit: MAX_NODE_COUNT }
    )]
    fn from_edges_rejects_invalid_input(
        #[case] edges: Vec<(usize, usize)>,
        #[case] expected: GraphError,
    ) {
        let err = Graph::from_edges("bad", edges).expect_err("edges must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn out_of_range_queries_return_none() {
        let graph = Graph::reference();
        assert_eq!(graph.degree(16), None);
        assert_eq!(graph.neighbours(99), None);
        assert!(!graph.has_edge(16, 0));
    }

    #[rstest]
    fn node_count_limit_is_inclusive() {
        let graph = Graph::with_node_count("largest", MAX_NODE_COUNT, [(0, MAX_NODE_COUNT - 1)])
            .expect("limit itself is accepted");
        assert_eq!(graph.node_count(), MAX_NODE_COUNT);
        let err = Graph::with_node_count("too-large", MAX_NODE_COUNT + 1, [(0, 1)])
            .expect_err("one past the limit is rejected");
        assert_eq!(err.code(), GraphErrorCode::TooManyNodes);
    }

    #[rstest]
    fn isolated_nodes_form_their_own_components() {
        let graph = Graph::with_node_count("isolated", 5, [(0, 1), (1, 2)])
            .expect("edges are valid");
        assert_eq!(graph.component_count(), 3);
        assert!(!graph.is_connected());
    }
}
