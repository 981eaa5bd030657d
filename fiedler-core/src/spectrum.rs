//! Symmetric eigendecomposition with ascending eigenvalues.
//!
//! `nalgebra::SymmetricEigen` returns eigen-pairs in no particular order and
//! with arbitrary signs. [`Spectrum`] sorts the pairs by eigenvalue and flips
//! each eigenvector so its largest-magnitude component is positive, which
//! keeps embeddings identical across runs.

use std::cmp::Ordering;

use nalgebra::{DMatrix, DVector, DVectorView, SymmetricEigen};
use tracing::{debug, instrument};

use crate::{embedding::Embedding, error::SpectrumError};

/// Absolute tolerance used when checking that a matrix is symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Relative tolerance under which two eigenvector components count as
/// equally large when choosing the sign.
pub const SIGN_TIE_TOLERANCE: f64 = 1e-9;

/// Eigenvalues in ascending order with matching eigenvector columns.
///
/// # Examples
/// ```
/// use fiedler_core::{Graph, GraphMatrices, Spectrum};
///
/// let graph = Graph::from_edges("path", [(0, 1), (1, 2)])?;
/// let laplacian = GraphMatrices::from_graph(&graph).laplacian().clone();
/// let spectrum = Spectrum::decompose(&laplacian)?;
/// let values = spectrum.eigenvalues();
/// assert!(values[0].abs() < 1e-12);
/// assert!((values[1] - 1.0).abs() < 1e-12);
/// assert!((values[2] - 3.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    eigenvalues: DVector<f64>,
    eigenvectors: DMatrix<f64>,
}

impl Spectrum {
    /// Decomposes a real symmetric matrix.
    ///
    /// # Errors
    /// Returns [`SpectrumError::EmptyMatrix`], [`SpectrumError::NotSquare`],
    /// [`SpectrumError::NonFinite`] or [`SpectrumError::Asymmetric`] when
    /// `matrix` is not a finite symmetric matrix.
    #[instrument(name = "core.decompose", err, skip(matrix), fields(dimension = matrix.nrows()))]
    pub fn decompose(matrix: &DMatrix<f64>) -> Result<Self, SpectrumError> {
        validate_symmetric(matrix)?;

        let eigen = SymmetricEigen::new(matrix.clone());
        let n = eigen.eigenvalues.len();
        let mut pairs: Vec<(usize, f64)> = eigen.eigenvalues.iter().copied().enumerate().collect();
        pairs.sort_by(|(a, left), (b, right)| left.total_cmp(right).then(a.cmp(b)));

        let eigenvalues = DVector::from_iterator(n, pairs.iter().map(|&(_, value)| value));
        let order: Vec<usize> = pairs.iter().map(|&(column, _)| column).collect();
        let mut eigenvectors = eigen.eigenvectors.select_columns(order.iter());
        for mut column in eigenvectors.column_iter_mut() {
            if canonical_sign(column.iter()) == Ordering::Less {
                column.neg_mut();
            }
        }

        debug!(
            smallest = eigenvalues.get(0).copied(),
            largest = eigenvalues.get(n.saturating_sub(1)).copied(),
            "eigendecomposition completed"
        );
        Ok(Self {
            eigenvalues,
            eigenvectors,
        })
    }

    /// Returns the number of eigen-pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns whether the decomposition is empty. Never true for a
    /// successfully decomposed matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Returns all eigenvalues in ascending order.
    #[must_use]
    pub fn eigenvalues(&self) -> &[f64] {
        self.eigenvalues.as_slice()
    }

    /// Returns the eigenvectors, one per column, matching [`Self::eigenvalues`].
    #[must_use]
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    /// Returns eigenvector `index`, or `None` when out of range.
    #[must_use]
    pub fn eigenvector(&self, index: usize) -> Option<DVectorView<'_, f64>> {
        (index < self.len()).then(|| self.eigenvectors.column(index))
    }

    /// Returns at most `count` of the smallest eigenvalues.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::{Graph, GraphMatrices, Spectrum};
    ///
    /// let graph = Graph::reference();
    /// let spectrum = Spectrum::decompose(GraphMatrices::from_graph(&graph).laplacian())?;
    /// assert_eq!(spectrum.leading(5).len(), 5);
    /// assert_eq!(spectrum.leading(100).len(), 16);
    /// # Ok::<(), fiedler_core::SpectrumError>(())
    /// ```
    #[must_use]
    pub fn leading(&self, count: usize) -> &[f64] {
        let values = self.eigenvalues();
        values.get(..count.min(values.len())).unwrap_or(values)
    }

    /// Returns the second-smallest eigenvalue (the Fiedler value).
    #[must_use]
    pub fn algebraic_connectivity(&self) -> Option<f64> {
        self.eigenvalues.get(1).copied()
    }

    /// Counts eigenvalues whose magnitude is at most `tolerance`.
    ///
    /// For a combinatorial Laplacian this equals the number of connected
    /// components.
    #[must_use]
    pub fn zero_eigenvalue_count(&self, tolerance: f64) -> usize {
        self.eigenvalues
            .iter()
            .filter(|value| value.abs() <= tolerance)
            .count()
    }

    /// Returns whether every eigenvalue is at least `-tolerance`.
    #[must_use]
    pub fn is_positive_semidefinite(&self, tolerance: f64) -> bool {
        self.eigenvalues.iter().all(|&value| value >= -tolerance)
    }

    /// Builds an embedding from eigenvectors `1..=dimensions`.
    ///
    /// Eigenvector `0` is skipped because for a connected graph it is the
    /// constant vector and carries no structure.
    ///
    /// # Errors
    /// Returns [`SpectrumError::InsufficientEigenvectors`] when the
    /// decomposition has no more than `dimensions` eigenvectors.
    ///
    /// # Examples
    /// ```
    /// use fiedler_core::{Graph, GraphMatrices, Spectrum};
    ///
    /// let graph = Graph::reference();
    /// let spectrum = Spectrum::decompose(GraphMatrices::from_graph(&graph).laplacian())?;
    /// let embedding = spectrum.embedding(2)?;
    /// assert_eq!(embedding.point_count(), 16);
    /// assert_eq!(embedding.dimensions(), 2);
    /// # Ok::<(), fiedler_core::SpectrumError>(())
    /// ```
    pub fn embedding(&self, dimensions: usize) -> Result<Embedding, SpectrumError> {
        let available = self.len();
        if dimensions == 0 || dimensions >= available {
            return Err(SpectrumError::InsufficientEigenvectors {
                requested: dimensions,
                available,
            });
        }
        let points = self.eigenvectors.columns(1, dimensions).into_owned();
        Ok(Embedding::new(points))
    }
}

fn validate_symmetric(matrix: &DMatrix<f64>) -> Result<(), SpectrumError> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(SpectrumError::EmptyMatrix);
    }
    if rows != cols {
        return Err(SpectrumError::NotSquare { rows, cols });
    }
    for (row, values) in matrix.row_iter().enumerate() {
        if let Some(col) = values.iter().position(|value| !value.is_finite()) {
            return Err(SpectrumError::NonFinite { row, col });
        }
    }
    for row in 0..rows {
        for col in (row + 1)..cols {
            let (Some(upper), Some(lower)) = (matrix.get((row, col)), matrix.get((col, row)))
            else {
                continue;
            };
            let difference = (upper - lower).abs();
            if difference > SYMMETRY_TOLERANCE {
                return Err(SpectrumError::Asymmetric {
                    row,
                    col,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// Sign of the component with the largest magnitude. Components within
/// [`SIGN_TIE_TOLERANCE`] of the largest magnitude tie and the lowest row wins.
fn canonical_sign<'a>(components: impl IntoIterator<Item = &'a f64>) -> Ordering {
    let values: Vec<f64> = components.into_iter().copied().collect();
    let largest = values.iter().fold(0.0_f64, |acc, value| acc.max(value.abs()));
    let threshold = largest - SIGN_TIE_TOLERANCE * largest;
    values
        .iter()
        .find(|value| value.abs() >= threshold)
        .map_or(Ordering::Equal, |value| value.total_cmp(&0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{Graph, GraphMatrices};

    fn reference_spectrum() -> Spectrum {
        let matrices = GraphMatrices::from_graph(&Graph::reference());
        Spectrum::decompose(matrices.laplacian()).expect("laplacian is symmetric")
    }

    #[rstest]
    fn eigenvalues_are_ascending() {
        let spectrum = reference_spectrum();
        assert!(
            spectrum
                .eigenvalues()
                .windows(2)
                .all(|pair| pair[0] <= pair[1])
        );
    }

    #[rstest]
    fn eigenvectors_satisfy_eigen_equation() {
        let laplacian = GraphMatrices::from_graph(&Graph::reference())
            .laplacian()
            .clone();
        let spectrum = Spectrum::decompose(&laplacian).expect("laplacian is symmetric");
        for (index, &value) in spectrum.eigenvalues().iter().enumerate() {
            let vector = spectrum.eigenvector(index).expect("index is in range");
            let residual = &laplacian * &vector - &vector * value;
            assert!(residual.norm() < 1e-9, "residual for pair {index}");
        }
    }

    #[rstest]
    fn eigenvectors_have_positive_dominant_component() {
        let spectrum = reference_spectrum();
        for column in spectrum.eigenvectors().column_iter() {
            assert_eq!(canonical_sign(column.iter()), Ordering::Greater);
        }
    }

    #[rstest]
    #[case::last_wins_by_an_ulp(&[-0.557_677_535_825_205_2, 0.1, 0.557_677_535_825_205_3], Ordering::Less)]
    #[case::clear_maximum(&[0.1, -0.9, 0.5], Ordering::Less)]
    #[case::positive_first(&[0.7, -0.7], Ordering::Greater)]
    #[case::zero_vector(&[0.0, 0.0], Ordering::Equal)]
    fn canonical_sign_prefers_lowest_tied_row(
        #[case] components: &[f64],
        #[case] expected: Ordering,
    ) {
        assert_eq!(canonical_sign(components), expected);
    }

    #[rstest]
    fn eigenvector_out_of_range_is_none() {
        assert!(reference_spectrum().eigenvector(16).is_none());
    }

    #[rstest]
    #[case::empty(DMatrix::zeros(0, 0), SpectrumError::EmptyMatrix)]
    #[case::not_square(DMatrix::zeros(2, 3), SpectrumError::NotSquare { rows: 2, cols: 3 })]
    #[case::non_finite(
        DMatrix::from_row_slice(2, 2, &[0.0, f64::NAN, f64::NAN, 0.0]),
        SpectrumError::NonFinite { row: 0, col: 1 }
    )]
    #[case::asymmetric(
        DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.5, 0.0]),
        SpectrumError::Asymmetric { row: 0, col: 1, difference: 0.5 }
    )]
    fn decompose_rejects_invalid_matrices(
        #[case] matrix: DMatrix<f64>,
        #[case] expected: SpectrumError,
    ) {
        let err = Spectrum::decompose(&matrix).expect_err("matrix must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::all(16)]
    fn embedding_rejects_unavailable_widths(#[case] dimensions: usize) {
        let err = reference_spectrum()
            .embedding(dimensions)
            .expect_err("width must be rejected");
        assert_eq!(
            err,
            SpectrumError::InsufficientEigenvectors {
                requested: dimensions,
                available: 16,
            }
        );
    }

    #[rstest]
    fn embedding_skips_trivial_eigenvector() {
        let spectrum = reference_spectrum();
        let embedding = spectrum.embedding(2).expect("width is available");
        let fiedler = spectrum.eigenvector(1).expect("index is in range");
        for node in 0..16 {
            let point = embedding.point(node).expect("node is in range");
            assert_eq!(point[0], fiedler[node]);
        }
    }
}
