//! Seeded Fruchterman–Reingold spring layout for drawing graphs.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::graph::Graph;

/// Seed used for initial positions unless overridden.
pub const DEFAULT_LAYOUT_SEED: u64 = 42;
/// Number of cooling steps unless overridden.
pub const DEFAULT_LAYOUT_ITERATIONS: usize = 50;

const CONVERGENCE_THRESHOLD: f64 = 1e-4;
const MIN_DISTANCE: f64 = 0.01;

/// Parameters for [`spring_layout`].
///
/// # Examples
/// ```
/// use fiedler_core::SpringLayoutParams;
///
/// let params = SpringLayoutParams::default().with_seed(7);
/// assert_eq!(params.seed(), 7);
/// assert_eq!(params.iterations(), 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpringLayoutParams {
    iterations: usize,
    seed: u64,
}

impl Default for SpringLayoutParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_LAYOUT_ITERATIONS,
            seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

impl SpringLayoutParams {
    /// Overrides the number of cooling steps.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Seeds the initial random placement.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of cooling steps.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the placement seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Node positions centred on the origin and scaled into `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    positions: Vec<[f64; 2]>,
}

impl Layout {
    /// Returns the position of `node`, or `None` when out of range.
    #[must_use]
    pub fn position(&self, node: usize) -> Option<[f64; 2]> {
        self.positions.get(node).copied()
    }

    /// Returns every position, indexed by node.
    #[must_use]
    pub fn positions(&self) -> &[[f64; 2]] {
        &self.positions
    }
}

/// Places the nodes of `graph` with a force-directed simulation.
///
/// Adjacent nodes attract, all pairs repel, and the step size cools
/// linearly to zero over the configured iterations.
///
/// # Examples
/// ```
/// use fiedler_core::{Graph, SpringLayoutParams, spring_layout};
///
/// let graph = Graph::reference();
/// let layout = spring_layout(&graph, &SpringLayoutParams::default());
/// assert_eq!(layout.positions().len(), 16);
/// assert!(layout.positions().iter().flatten().all(|c| c.abs() <= 1.0 + 1e-12));
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52"
)]
#[instrument(
    name = "core.layout",
    skip(graph, params),
    fields(graph = %graph.name(), nodes = graph.node_count(), seed = params.seed),
)]
pub fn spring_layout(graph: &Graph, params: &SpringLayoutParams) -> Layout {
    let n = graph.node_count();
    if n <= 1 {
        return Layout {
            positions: vec![[0.0, 0.0]; n],
        };
    }

    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut positions: Vec<[f64; 2]> = (0..n)
        .map(|_| [rng.r#gen::<f64>(), rng.r#gen::<f64>()])
        .collect();

    let optimal = (1.0 / n as f64).sqrt();
    let mut temperature = extent(&positions) * 0.1;
    let cooling = temperature / (params.iterations as f64 + 1.0);

    for _ in 0..params.iterations {
        let mut displacement = vec![[0.0_f64; 2]; n];
        for (i, ([disp_x, disp_y], &[xi, yi])) in
            displacement.iter_mut().zip(&positions).enumerate()
        {
            for (j, &[xj, yj]) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (dx, dy) = (xi - xj, yi - yj);
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let attraction = if graph.has_edge(i, j) {
                    distance / optimal
                } else {
                    0.0
                };
                let factor = optimal * optimal / (distance * distance) - attraction;
                *disp_x += dx * factor;
                *disp_y += dy * factor;
            }
        }

        let mut moved = 0.0;
        for ([x, y], [dx, dy]) in positions.iter_mut().zip(displacement) {
            let length = dx.hypot(dy).max(MIN_DISTANCE);
            let (step_x, step_y) = (dx * temperature / length, dy * temperature / length);
            *x += step_x;
            *y += step_y;
            moved += step_x.hypot(step_y);
        }
        temperature -= cooling;
        if moved / (n as f64) < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    rescale(&mut positions);
    Layout { positions }
}

fn extent(positions: &[[f64; 2]]) -> f64 {
    let span = |coordinate: fn(&[f64; 2]) -> f64| {
        let (lo, hi) = positions
            .iter()
            .map(coordinate)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            });
        hi - lo
    };
    span(|&[x, _]| x).max(span(|&[_, y]| y)).max(0.0)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52"
)]
fn rescale(positions: &mut [[f64; 2]]) {
    let count = positions.len() as f64;
    let mean_x = positions.iter().map(|&[x, _]| x).sum::<f64>() / count;
    let mean_y = positions.iter().map(|&[_, y]| y).sum::<f64>() / count;
    for [x, y] in positions.iter_mut() {
        *x -= mean_x;
        *y -= mean_y;
    }
    let limit = positions
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));
    if limit > 0.0 {
        for value in positions.iter_mut().flatten() {
            *value /= limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn layout_is_deterministic_for_a_seed() {
        let graph = Graph::reference();
        let params = SpringLayoutParams::default();
        assert_eq!(spring_layout(&graph, &params), spring_layout(&graph, &params));
    }

    #[rstest]
    fn different_seeds_move_nodes() {
        let graph = Graph::reference();
        let first = spring_layout(&graph, &SpringLayoutParams::default());
        let second = spring_layout(&graph, &SpringLayoutParams::default().with_seed(1));
        assert_ne!(first, second);
    }

    #[rstest]
    fn layout_is_centred_and_scaled() {
        let layout = spring_layout(&Graph::reference(), &SpringLayoutParams::default());
        for axis in 0..2 {
            let mean: f64 = layout.positions().iter().map(|p| p[axis]).sum::<f64>() / 16.0;
            assert!(mean.abs() < 1e-9);
        }
        let limit = layout
            .positions()
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        assert!((limit - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn edges_are_shorter_than_non_edges_on_average() {
        let graph = Graph::reference();
        let layout = spring_layout(&graph, &SpringLayoutParams::default());
        let (mut edge_total, mut edge_count) = (0.0, 0.0);
        let (mut other_total, mut other_count) = (0.0, 0.0);
        for a in 0..16 {
            for b in (a + 1)..16 {
                let [xa, ya] = layout.position(a).expect("node is in range");
                let [xb, yb] = layout.position(b).expect("node is in range");
                let distance = (xa - xb).hypot(ya - yb);
                if graph.has_edge(a, b) {
                    edge_total += distance;
                    edge_count += 1.0;
                } else {
                    other_total += distance;
                    other_count += 1.0;
                }
            }
        }
        assert!(edge_total / edge_count < other_total / other_count);
    }

    #[rstest]
    fn single_node_sits_at_origin() {
        let graph = Graph::with_node_count("single", 1, []).expect("graph is valid");
        let layout = spring_layout(&graph, &SpringLayoutParams::default());
        assert_eq!(layout.positions(), &[[0.0, 0.0]]);
    }
}
