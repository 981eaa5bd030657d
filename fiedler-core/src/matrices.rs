//! Dense adjacency, degree and Laplacian matrices for a [`Graph`].

use nalgebra::{DMatrix, DVector};

use crate::graph::Graph;

/// Selects which Laplacian feeds the eigendecomposition.
///
/// # Examples
/// ```
/// use fiedler_core::LaplacianKind;
///
/// assert_eq!(LaplacianKind::default(), LaplacianKind::Unnormalised);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaplacianKind {
    /// The combinatorial Laplacian `D - A`.
    #[default]
    Unnormalised,
    /// The symmetric normalised Laplacian `D^-1/2 (D - A) D^-1/2`.
    SymmetricNormalised,
}

/// Matrices derived from a graph, indexed by node identifier.
///
/// # Examples
/// ```
/// use fiedler_core::{Graph, GraphMatrices};
///
/// let graph = Graph::from_edges("path", [(0, 1), (1, 2)])?;
/// let matrices = GraphMatrices::from_graph(&graph);
/// assert_eq!(matrices.adjacency()[(0, 1)], 1.0);
/// assert_eq!(matrices.degree()[(1, 1)], 2.0);
/// assert_eq!(matrices.laplacian()[(1, 2)], -1.0);
/// # Ok::<(), fiedler_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphMatrices {
    adjacency: DMatrix<f64>,
    degrees: DVector<f64>,
    degree: DMatrix<f64>,
    laplacian: DMatrix<f64>,
}

impl GraphMatrices {
    /// Derives `A`, `D` and `L = D - A` from `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.node_count();
        let mut adjacency = DMatrix::<f64>::zeros(n, n);
        for edge in graph.edges() {
            let (a, b) = (edge.source(), edge.target());
            for cell in [(a, b), (b, a)] {
                if let Some(entry) = adjacency.get_mut(cell) {
                    *entry = 1.0;
                }
            }
        }
        let degrees = DVector::from_iterator(n, adjacency.row_iter().map(|row| row.sum()));
        let degree = DMatrix::from_diagonal(&degrees);
        let laplacian = &degree - &adjacency;
        Self {
            adjacency,
            degrees,
            degree,
            laplacian,
        }
    }

    /// Returns the adjacency matrix `A`.
    #[must_use]
    pub fn adjacency(&self) -> &DMatrix<f64> {
        &self.adjacency
    }

    /// Returns the row sums of `A`.
    #[must_use]
    pub fn degrees(&self) -> &DVector<f64> {
        &self.degrees
    }

    /// Returns the diagonal degree matrix `D`.
    #[must_use]
    pub fn degree(&self) -> &DMatrix<f64> {
        &self.degree
    }

    /// Returns the combinatorial Laplacian `L = D - A`.
    #[must_use]
    pub fn laplacian(&self) -> &DMatrix<f64> {
        &self.laplacian
    }

    /// Returns the symmetric normalised Laplacian.
    ///
    /// Isolated nodes contribute an all-zero row and column.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::{Graph, GraphMatrices};
    ///
    /// let graph = Graph::from_edges("edge", [(0, 1)])?;
    /// let normalised = GraphMatrices::from_graph(&graph).normalised_laplacian();
    /// assert_eq!(normalised[(0, 0)], 1.0);
    /// assert_eq!(normalised[(0, 1)], -1.0);
    /// # Ok::<(), fiedler_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn normalised_laplacian(&self) -> DMatrix<f64> {
        let inv_sqrt = self
            .degrees
            .map(|d| if d > 0.0 { d.sqrt().recip() } else { 0.0 });
        let scale = DMatrix::from_diagonal(&inv_sqrt);
        &scale * &self.laplacian * &scale
    }

    /// Returns the Laplacian selected by `kind`.
    #[must_use]
    pub fn laplacian_of(&self, kind: LaplacianKind) -> DMatrix<f64> {
        match kind {
            LaplacianKind::Unnormalised => self.laplacian.clone(),
            LaplacianKind::SymmetricNormalised => self.normalised_laplacian(),
        }
    }
}
