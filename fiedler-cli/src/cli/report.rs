//! Plain-text rendering of a clustering run.

use std::io::{self, Write};

use fiedler_core::Spectrum;
use nalgebra::DMatrix;

use super::commands::ExecutionSummary;

const EIGENVALUE_PRECISION: usize = 6;
const MATRIX_PRECISION: usize = 4;

/// Renders `summary` to `writer`.
///
/// Cluster numbers are one-based; node ids are zero-based.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use fiedler_cli::cli::{Cli, Command, RunCommand, render_summary, run_cli};
///
/// let summary = run_cli(Cli {
///     command: Command::Run(RunCommand {
///         clusters: vec![2],
///         no_plots: true,
///         ..RunCommand::default()
///     }),
/// })
/// .expect("run must succeed");
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer).expect("writing to a Vec cannot fail");
/// let text = String::from_utf8(buffer).expect("report is UTF-8");
/// assert!(text.contains("--- Spectral Clustering (k=2) ---"));
/// assert!(text.contains("Cluster 1: ["));
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    let matrices = report.matrices();
    writeln!(
        writer,
        "Graph `{}`: {} nodes",
        report.graph_name(),
        matrices.adjacency().nrows()
    )?;
    writeln!(writer)?;
    writeln!(writer, "Adjacency Matrix:")?;
    writeln!(writer, "{}", format_matrix(matrices.adjacency()))?;
    writeln!(writer)?;
    writeln!(writer, "Laplacian Matrix:")?;
    writeln!(writer, "{}", format_matrix(matrices.laplacian()))?;
    writeln!(writer)?;
    write_spectrum(&mut writer, report.spectrum(), summary.eigenvalues)?;

    for partition in report.partitions() {
        writeln!(writer)?;
        writeln!(
            writer,
            "--- Spectral Clustering (k={}) ---",
            partition.cluster_count()
        )?;
        for (cluster, members) in partition.members().iter().enumerate() {
            writeln!(writer, "Cluster {}: {members:?}", cluster + 1)?;
        }
    }

    if !summary.plots.is_empty() {
        writeln!(writer)?;
        for path in &summary.plots {
            writeln!(writer, "Figure written to {}", path.display())?;
        }
    }
    Ok(())
}

fn write_spectrum(writer: &mut impl Write, spectrum: &Spectrum, count: usize) -> io::Result<()> {
    let leading = spectrum.leading(count);
    let values: Vec<String> = leading
        .iter()
        .map(|&value| format_fixed(value, EIGENVALUE_PRECISION))
        .collect();
    writeln!(writer, "First {} eigenvalues:", leading.len())?;
    writeln!(writer, "[{}]", values.join(", "))?;
    match spectrum.algebraic_connectivity() {
        Some(value) => writeln!(
            writer,
            "Algebraic connectivity: {}",
            format_fixed(value, EIGENVALUE_PRECISION)
        ),
        None => writeln!(writer, "Algebraic connectivity: undefined"),
    }
}

/// Formats `matrix` as right-aligned rows in nested brackets.
///
/// Integral matrices print without decimals; others use four places.
///
/// # Examples
/// ```
/// use fiedler_cli::cli::format_matrix;
/// use nalgebra::DMatrix;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]);
/// assert_eq!(format_matrix(&matrix), "[[ 2 -1]\n [-1  2]]");
/// ```
#[must_use]
pub fn format_matrix(matrix: &DMatrix<f64>) -> String {
    let integral = matrix.iter().all(|value| value.fract() == 0.0);
    let precision = if integral { 0 } else { MATRIX_PRECISION };
    let cells: Vec<Vec<String>> = matrix
        .row_iter()
        .map(|row| {
            row.iter()
                .map(|&value| format_fixed(value, precision))
                .collect()
        })
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

    let rows: Vec<String> = cells
        .iter()
        .map(|row| {
            let padded: Vec<String> = row.iter().map(|cell| format!("{cell:>width$}")).collect();
            format!("[{}]", padded.join(" "))
        })
        .collect();
    format!("[{}]", rows.join("\n "))
}

/// Fixed-point formatting that never prints a negative zero.
fn format_fixed(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_owned()
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(-0.0, 0, "0")]
    #[case(-1e-12, 6, "0.000000")]
    #[case(-0.25, 2, "-0.25")]
    #[case(3.0, 0, "3")]
    fn fixed_formatting_drops_negative_zero(
        #[case] value: f64,
        #[case] precision: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(format_fixed(value, precision), expected);
    }

    #[rstest]
    fn fractional_matrices_keep_four_places() {
        let matrix = DMatrix::from_row_slice(1, 2, &[0.5, -1.0]);
        assert_eq!(format_matrix(&matrix), "[[ 0.5000 -1.0000]]");
    }
}
