//! SVG figures of clustered graphs.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use fiedler_core::{Graph, Layout, Partition};
use plotters::prelude::*;
use thiserror::Error;
use tracing::instrument;

/// Width and height of each figure in pixels.
pub const PLOT_SIZE: (u32, u32) = (800, 500);

const MARGIN: f64 = 40.0;
const TITLE_HEIGHT: f64 = 40.0;
const NODE_RADIUS: i32 = 12;
const LABEL_SIZE: i32 = 12;
/// Half the approximate glyph width at [`LABEL_SIZE`].
const LABEL_HALF_GLYPH: i32 = 3;
const LABEL_HALF_HEIGHT: i32 = 6;
const EDGE_COLOUR: RGBColor = RGBColor(160, 160, 160);

/// Ten-colour categorical palette; labels past ten wrap around.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Errors raised while rendering a figure.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The drawing backend failed.
    #[error("failed to draw `{path}`: {message}")]
    Draw {
        /// Figure being written.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}

/// Returns the figure path for `clusters` inside `dir`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use fiedler_cli::cli::plot_path;
///
/// assert_eq!(
///     plot_path(Path::new("plots"), 3),
///     Path::new("plots/spectral_k3.svg")
/// );
/// ```
#[must_use]
pub fn plot_path(dir: &Path, clusters: usize) -> PathBuf {
    dir.join(format!("spectral_k{clusters}.svg"))
}

/// Draws `graph` at `layout` with nodes coloured by `partition` and writes
/// the SVG to `path`.
///
/// # Errors
/// Returns [`PlotError::Draw`] when the backend cannot render or write the
/// figure.
#[instrument(
    name = "cli.plot",
    err,
    skip(graph, layout, partition),
    fields(
        path = %path.display(),
        clusters = partition.cluster_count(),
        nodes = layout.positions().len(),
    ),
)]
pub fn render_partition(
    path: &Path,
    graph: &Graph,
    layout: &Layout,
    partition: &Partition,
) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_failed(path))?;

    root.draw(&Text::new(
        format!(
            "Spectral Clustering Result (k = {})",
            partition.cluster_count()
        ),
        (20, 12),
        ("sans-serif", 22).into_font().color(&BLACK),
    ))
    .map_err(draw_failed(path))?;

    let pixels: Vec<(i32, i32)> = layout.positions().iter().map(|&p| to_pixel(p)).collect();

    for edge in graph.edges() {
        let (Some(&from), Some(&to)) = (pixels.get(edge.source()), pixels.get(edge.target()))
        else {
            continue;
        };
        root.draw(&PathElement::new(
            vec![from, to],
            ShapeStyle::from(&EDGE_COLOUR).stroke_width(1),
        ))
        .map_err(draw_failed(path))?;
    }

    for (node, &(x, y)) in pixels.iter().enumerate() {
        let colour = partition
            .label(node)
            .and_then(|id| cluster_colour(id.get()))
            .unwrap_or(BLACK);
        root.draw(&Circle::new((x, y), NODE_RADIUS, colour.filled()))
            .map_err(draw_failed(path))?;
        let label = node.to_string();
        root.draw(&Text::new(
            label.clone(),
            (x - label_offset(&label), y - LABEL_HALF_HEIGHT),
            ("sans-serif", LABEL_SIZE).into_font().color(&WHITE),
        ))
        .map_err(draw_failed(path))?;
    }

    root.present().map_err(draw_failed(path))?;
    Ok(())
}

fn cluster_colour(cluster: usize) -> Option<RGBColor> {
    PALETTE.iter().cycle().nth(cluster).copied()
}

fn draw_failed<E: fmt::Display>(path: &Path) -> impl FnOnce(E) -> PlotError + '_ {
    move |err| PlotError::Draw {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "positions lie in [-1, 1] so pixels fit in i32"
)]
fn to_pixel([x, y]: [f64; 2]) -> (i32, i32) {
    let (width, height) = (f64::from(PLOT_SIZE.0), f64::from(PLOT_SIZE.1));
    let usable_width = width - 2.0 * MARGIN;
    let usable_height = height - 2.0 * MARGIN - TITLE_HEIGHT;
    let px = MARGIN + (x + 1.0) / 2.0 * usable_width;
    // SVG rows grow downwards.
    let py = MARGIN + TITLE_HEIGHT + (1.0 - y) / 2.0 * usable_height;
    (px.round() as i32, py.round() as i32)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "node labels are a handful of digits"
)]
fn label_offset(label: &str) -> i32 {
    label.len() as i32 * LABEL_HALF_GLYPH
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case([-1.0, 1.0], (40, 80))]
    #[case([1.0, -1.0], (760, 460))]
    #[case([0.0, 0.0], (400, 270))]
    fn layout_corners_map_inside_the_margins(#[case] point: [f64; 2], #[case] expected: (i32, i32)) {
        assert_eq!(to_pixel(point), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(9, 9)]
    #[case(10, 0)]
    #[case(23, 3)]
    fn cluster_colours_wrap_around_the_palette(#[case] cluster: usize, #[case] slot: usize) {
        assert_eq!(cluster_colour(cluster), PALETTE.get(slot).copied());
    }

    #[rstest]
    fn plot_files_are_named_by_cluster_count() {
        assert_eq!(
            plot_path(Path::new("out"), 4),
            Path::new("out").join("spectral_k4.svg")
        );
    }
}
