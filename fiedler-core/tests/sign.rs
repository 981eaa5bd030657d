//! Eigenvector sign convention on graphs with mirrored structure.

use fiedler_core::{Graph, GraphMatrices, SIGN_TIE_TOLERANCE, Spectrum};
use fiedler_test_support::graphs::{cycle, path};
use rstest::rstest;

fn lowest_dominant_component(column: &[f64]) -> Option<f64> {
    let largest = column.iter().fold(0.0_f64, |acc, value| acc.max(value.abs()));
    column
        .iter()
        .copied()
        .find(|value| value.abs() >= largest - SIGN_TIE_TOLERANCE * largest)
}

fn assert_lowest_dominant_components_positive(graph: &Graph) {
    let spectrum = Spectrum::decompose(GraphMatrices::from_graph(graph).laplacian())
        .expect("Laplacian is symmetric and finite");
    for (index, column) in spectrum.eigenvectors().column_iter().enumerate() {
        let values: Vec<f64> = column.iter().copied().collect();
        let dominant = lowest_dominant_component(&values).expect("columns are non-empty");
        assert!(
            dominant > 0.0,
            "{} n={} column {index}: {values:?}",
            graph.name(),
            graph.node_count(),
        );
    }
}

#[rstest]
fn path_eigenvectors_favour_lowest_tied_row(#[values(2, 3, 4, 5, 6, 7, 8)] nodes: usize) {
    assert_lowest_dominant_components_positive(&path(nodes));
}

#[rstest]
fn cycle_eigenvectors_favour_lowest_tied_row(#[values(3, 4, 5, 6, 8)] nodes: usize) {
    assert_lowest_dominant_components_positive(&cycle(nodes));
}

#[rstest]
fn path_fiedler_vector_starts_positive() {
    let spectrum = Spectrum::decompose(GraphMatrices::from_graph(&path(6)).laplacian())
        .expect("Laplacian is symmetric and finite");
    let fiedler = spectrum.eigenvector(1).expect("six eigenvectors exist");
    assert!(fiedler[0] > 0.0);
    assert!((fiedler[0] + fiedler[5]).abs() < 1e-9, "path is mirror symmetric");
}
