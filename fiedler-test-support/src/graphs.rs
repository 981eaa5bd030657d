//! Small graphs with known spectral structure.

use fiedler_core::Graph;

/// Two complete graphs of `size` nodes joined by a single bridge edge
/// between node `size - 1` and node `size`.
///
/// # Panics
/// Panics when `size` is zero.
///
/// # Examples
/// ```
/// use fiedler_test_support::graphs::bridged_cliques;
///
/// let graph = bridged_cliques(4);
/// assert_eq!(graph.node_count(), 8);
/// assert_eq!(graph.edge_count(), 2 * 6 + 1);
/// ```
#[must_use]
pub fn bridged_cliques(size: usize) -> Graph {
    assert!(size > 0, "cliques need at least one node");
    let mut edges = clique_edges(0, size);
    edges.extend(clique_edges(size, size));
    edges.push((size - 1, size));
    Graph::with_node_count("bridged-cliques", 2 * size, edges).expect("fixture graph is valid")
}

/// `count` disjoint triangles with no edges between them.
#[must_use]
pub fn disjoint_triangles(count: usize) -> Graph {
    let edges = (0..count).flat_map(|block| clique_edges(3 * block, 3));
    Graph::with_node_count("disjoint-triangles", 3 * count, edges).expect("fixture graph is valid")
}

/// A simple path over `nodes` nodes.
#[must_use]
pub fn path(nodes: usize) -> Graph {
    let edges = (1..nodes).map(|node| (node - 1, node));
    Graph::with_node_count("path", nodes, edges).expect("fixture graph is valid")
}

/// A cycle over `nodes` nodes.
///
/// # Panics
/// Panics when `nodes` is below three.
#[must_use]
pub fn cycle(nodes: usize) -> Graph {
    assert!(nodes >= 3, "cycles need at least three nodes");
    let edges = (0..nodes).map(|node| (node, (node + 1) % nodes));
    Graph::with_node_count("cycle", nodes, edges).expect("fixture graph is valid")
}

fn clique_edges(offset: usize, size: usize) -> Vec<(usize, usize)> {
    (0..size)
        .flat_map(|a| ((a + 1)..size).map(move |b| (offset + a, offset + b)))
        .collect()
}
