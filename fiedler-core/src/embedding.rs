//! Low-dimensional node coordinates taken from Laplacian eigenvectors.

use nalgebra::{DMatrix, Dyn, MatrixView, U1};

/// Borrowed coordinates of a single embedded point.
pub type PointView<'a> = MatrixView<'a, f64, U1, Dyn, U1, Dyn>;

/// One row per node, one column per retained eigenvector.
///
/// # Examples
/// ```
/// use fiedler_core::Embedding;
/// use nalgebra::DMatrix;
///
/// let embedding = Embedding::new(DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 2.0, 3.0]));
/// assert_eq!(embedding.point_count(), 2);
/// assert_eq!(embedding.point(1).map(|p| p[0]), Some(2.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
    points: DMatrix<f64>,
}

impl Embedding {
    /// Wraps a `points × dimensions` matrix.
    #[must_use]
    pub fn new(points: DMatrix<f64>) -> Self {
        Self { points }
    }

    /// Returns the number of embedded points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.nrows()
    }

    /// Returns the embedding width.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.points.ncols()
    }

    /// Returns the coordinates of `index`, or `None` when out of range.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<PointView<'_>> {
        (index < self.point_count()).then(|| self.points.row(index))
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.points
    }

    /// Returns the index of the first point holding a NaN or infinity.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points
            .row_iter()
            .position(|row| row.iter().any(|value| !value.is_finite()))
    }
}
