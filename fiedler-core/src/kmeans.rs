//! Seeded k-means over an [`Embedding`].
//!
//! Each restart seeds centres with greedy k-means++ and then runs Lloyd
//! iterations until the labels stop changing, the total squared centre shift
//! drops below the scaled tolerance, or the iteration cap is reached. All
//! randomness is drawn from a single [`SmallRng`] seeded from
//! [`KMeansParams::seed`], so identical inputs always produce identical
//! labels.

use nalgebra::DMatrix;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{embedding::Embedding, error::KMeansError};

/// Iteration cap applied to each restart unless overridden.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
/// Relative convergence tolerance unless overridden.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
/// Number of independent restarts unless overridden.
pub const DEFAULT_RESTARTS: usize = 10;
/// RNG seed unless overridden.
pub const DEFAULT_SEED: u64 = 0;

/// Configuration for [`KMeans`].
///
/// # Examples
/// ```
/// use fiedler_core::KMeansParams;
///
/// let params = KMeansParams::new(3).with_seed(7).with_restarts(4);
/// assert_eq!(params.clusters(), 3);
/// assert_eq!(params.seed(), 7);
/// assert_eq!(params.restarts(), 4);
/// assert_eq!(params.max_iterations(), 300);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams {
    clusters: usize,
    max_iterations: usize,
    tolerance: f64,
    restarts: usize,
    seed: u64,
}

impl KMeansParams {
    /// Creates parameters for `clusters` clusters with default settings.
    #[must_use]
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            restarts: DEFAULT_RESTARTS,
            seed: DEFAULT_SEED,
        }
    }

    /// Overrides the per-restart iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Overrides the relative convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Overrides the number of restarts.
    #[must_use]
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Seeds the RNG used for centre initialisation.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Returns the per-restart iteration cap.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the relative convergence tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the number of restarts.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Returns the RNG seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn validate(&self) -> Result<(), KMeansError> {
        let reason = if self.clusters == 0 {
            "clusters must be greater than zero".to_owned()
        } else if self.max_iterations == 0 {
            "max_iterations must be greater than zero".to_owned()
        } else if self.restarts == 0 {
            "restarts must be greater than zero".to_owned()
        } else if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            format!(
                "tolerance must be finite and non-negative (got {})",
                self.tolerance
            )
        } else {
            return Ok(());
        };
        Err(KMeansError::InvalidParameters { reason })
    }
}

/// Outcome of the best restart.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansFit {
    labels: Vec<usize>,
    centroids: DMatrix<f64>,
    inertia: f64,
    iterations: usize,
    restart: usize,
}

impl KMeansFit {
    /// Returns the cluster label of every point.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Consumes the fit and returns the labels.
    #[must_use]
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Returns the centres as a `clusters × dimensions` matrix.
    #[must_use]
    pub fn centroids(&self) -> &DMatrix<f64> {
        &self.centroids
    }

    /// Returns the sum of squared distances from points to their centres.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns the number of Lloyd iterations the winning restart ran.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the zero-based index of the winning restart.
    #[must_use]
    pub fn restart(&self) -> usize {
        self.restart
    }
}

/// Validated k-means runner.
///
/// # Examples
/// ```
/// use fiedler_core::{Embedding, KMeans, KMeansParams};
/// use nalgebra::DMatrix;
///
/// let points = DMatrix::from_row_slice(4, 1, &[0.0, 0.1, 5.0, 5.1]);
/// let kmeans = KMeans::new(KMeansParams::new(2))?;
/// let fit = kmeans.fit(&Embedding::new(points))?;
/// let labels = fit.labels();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// # Ok::<(), fiedler_core::KMeansError>(())
/// ```
#[derive(Clone, Debug)]
pub struct KMeans {
    params: KMeansParams,
}

impl KMeans {
    /// Validates `params` and builds a runner.
    ///
    /// # Errors
    /// Returns [`KMeansError::InvalidParameters`] when the cluster count,
    /// iteration cap or restart count is zero, or the tolerance is negative
    /// or not finite.
    pub fn new(params: KMeansParams) -> Result<Self, KMeansError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the parameters this runner was built with.
    #[must_use]
    pub fn params(&self) -> &KMeansParams {
        &self.params
    }

    /// Clusters the points of `embedding`.
    ///
    /// # Errors
    /// Returns [`KMeansError::EmptyEmbedding`] when there are no points,
    /// [`KMeansError::NonFiniteCoordinate`] when a coordinate is NaN or
    /// infinite, and [`KMeansError::TooFewPoints`] when there are fewer
    /// points than clusters.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, embedding),
        fields(
            clusters = self.params.clusters,
            points = embedding.point_count(),
            seed = self.params.seed,
        ),
    )]
    pub fn fit(&self, embedding: &Embedding) -> Result<KMeansFit, KMeansError> {
        let clusters = self.params.clusters;
        let n = embedding.point_count();
        if n == 0 {
            return Err(KMeansError::EmptyEmbedding);
        }
        if let Some(point) = embedding.first_non_finite() {
            return Err(KMeansError::NonFiniteCoordinate { point });
        }
        if n < clusters {
            return Err(KMeansError::TooFewPoints {
                points: n,
                clusters,
            });
        }

        let points: Vec<Vec<f64>> = embedding
            .as_matrix()
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        let threshold = self.params.tolerance * mean_variance(&points);
        let mut rng = SmallRng::seed_from_u64(self.params.seed);

        let mut best: Option<KMeansRun> = None;
        for restart in 0..self.params.restarts {
            let seeds = seed_centres(&points, clusters, &mut rng);
            let run = lloyd(&points, seeds, self.params.max_iterations, threshold, restart);
            debug!(
                restart,
                inertia = run.inertia,
                iterations = run.iterations,
                "k-means restart finished"
            );
            if best.as_ref().is_none_or(|current| run.inertia < current.inertia) {
                best = Some(run);
            }
        }

        let run = best.ok_or_else(|| KMeansError::InvalidParameters {
            reason: "restarts must be greater than zero".to_owned(),
        })?;
        let fit = run.into_fit(embedding.dimensions());
        #[cfg(feature = "metrics")]
        record_metrics(&fit, self.params.restarts);
        Ok(fit)
    }
}

#[cfg(feature = "metrics")]
#[expect(
    clippy::cast_precision_loss,
    reason = "iteration counts are bounded by max_iterations"
)]
fn record_metrics(fit: &KMeansFit, restarts: usize) {
    metrics::counter!("fiedler_kmeans_restarts_total").increment(restarts as u64);
    metrics::histogram!("fiedler_kmeans_iterations").record(fit.iterations as f64);
    metrics::histogram!("fiedler_kmeans_inertia").record(fit.inertia);
}

struct KMeansRun {
    labels: Vec<usize>,
    centres: Vec<Vec<f64>>,
    inertia: f64,
    iterations: usize,
    restart: usize,
}

impl KMeansRun {
    fn into_fit(self, dimensions: usize) -> KMeansFit {
        let rows = self.centres.len();
        let centroids = DMatrix::from_fn(rows, dimensions, |row, col| {
            self.centres
                .get(row)
                .and_then(|centre| centre.get(col))
                .copied()
                .unwrap_or(0.0)
        });
        KMeansFit {
            labels: self.labels,
            centroids,
            inertia: self.inertia,
            iterations: self.iterations,
            restart: self.restart,
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "point counts are far below 2^52"
)]
fn mean_variance(points: &[Vec<f64>]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let dimensions = first.len();
    if dimensions == 0 {
        return 0.0;
    }
    let count = points.len() as f64;
    let total: f64 = (0..dimensions)
        .map(|dim| {
            let values = points.iter().filter_map(|p| p.get(dim).copied());
            let mean = values.clone().sum::<f64>() / count;
            values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / count
        })
        .sum();
    total / dimensions as f64
}

/// Greedy k-means++: each new centre is the best of several candidates
/// drawn proportionally to squared distance from the existing centres.
fn seed_centres(points: &[Vec<f64>], clusters: usize, rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let n = points.len();
    let local_trials = 2 + local_trial_bonus(clusters);

    let Some(first) = points.get(rng.gen_range(0..n)) else {
        return Vec::new();
    };
    let mut centres = Vec::with_capacity(clusters);
    centres.push(first.clone());
    let mut closest: Vec<f64> = points.iter().map(|p| squared_distance(p, first)).collect();
    let mut potential: f64 = closest.iter().sum();

    while centres.len() < clusters {
        let mut chosen: Option<(&Vec<f64>, Vec<f64>, f64)> = None;
        for _ in 0..local_trials {
            let Some(candidate) = points.get(sample_weighted(&closest, potential, rng)) else {
                continue;
            };
            let updated: Vec<f64> = points
                .iter()
                .zip(&closest)
                .map(|(p, &current)| current.min(squared_distance(p, candidate)))
                .collect();
            let candidate_potential: f64 = updated.iter().sum();
            if chosen
                .as_ref()
                .is_none_or(|(_, _, best)| candidate_potential < *best)
            {
                chosen = Some((candidate, updated, candidate_potential));
            }
        }
        let Some((candidate, updated, candidate_potential)) = chosen else {
            break;
        };
        centres.push(candidate.clone());
        closest = updated;
        potential = candidate_potential;
    }
    centres
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "ln(k) of a small positive k is a small non-negative integer"
)]
fn local_trial_bonus(clusters: usize) -> usize {
    (clusters as f64).ln().floor().max(0.0) as usize
}

fn sample_weighted(weights: &[f64], total: f64, rng: &mut SmallRng) -> usize {
    let n = weights.len();
    if total <= 0.0 {
        return rng.gen_range(0..n);
    }
    let target = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > target {
            return index;
        }
    }
    weights
        .iter()
        .rposition(|&weight| weight > 0.0)
        .unwrap_or(n - 1)
}

fn assign(points: &[Vec<f64>], centres: &[Vec<f64>]) -> (Vec<usize>, Vec<f64>) {
    points
        .iter()
        .map(|point| {
            let mut best = (0, f64::INFINITY);
            for (index, centre) in centres.iter().enumerate() {
                let distance = squared_distance(point, centre);
                if distance < best.1 {
                    best = (index, distance);
                }
            }
            best
        })
        .unzip()
}

/// Recomputes centres as label means. Empty clusters take the points
/// farthest from their current centre, farthest first.
#[expect(
    clippy::cast_precision_loss,
    reason = "cluster sizes are far below 2^52"
)]
fn update(
    points: &[Vec<f64>],
    labels: &[usize],
    distances: &[f64],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let clusters = previous.len();
    let dimensions = points.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dimensions]; clusters];
    let mut counts = vec![0_usize; clusters];
    for (point, &label) in points.iter().zip(labels) {
        if let (Some(sum), Some(count)) = (sums.get_mut(label), counts.get_mut(label)) {
            for (acc, value) in sum.iter_mut().zip(point) {
                *acc += value;
            }
            *count += 1;
        }
    }

    let empty: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter_map(|(cluster, &count)| (count == 0).then_some(cluster))
        .collect();
    if !empty.is_empty() {
        let mut farthest: Vec<(usize, f64)> = distances.iter().copied().enumerate().collect();
        farthest.sort_by(|(a, near), (b, far)| far.total_cmp(near).then(a.cmp(b)));
        for (&cluster, &(point, _)) in empty.iter().zip(&farthest) {
            let (Some(&donor), Some(values)) = (labels.get(point), points.get(point)) else {
                continue;
            };
            if let (Some(sum), Some(count)) = (sums.get_mut(donor), counts.get_mut(donor)) {
                for (acc, value) in sum.iter_mut().zip(values) {
                    *acc -= value;
                }
                *count = count.saturating_sub(1);
            }
            if let (Some(sum), Some(count)) = (sums.get_mut(cluster), counts.get_mut(cluster)) {
                sum.clone_from(values);
                *count = 1;
            }
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|value| value / count as f64).collect()
            }
        })
        .collect()
}

fn lloyd(
    points: &[Vec<f64>],
    mut centres: Vec<Vec<f64>>,
    max_iterations: usize,
    threshold: f64,
    restart: usize,
) -> KMeansRun {
    let mut labels: Vec<usize> = Vec::new();
    let mut iterations = 0;
    for _ in 0..max_iterations {
        iterations += 1;
        let (next_labels, distances) = assign(points, &centres);
        let next_centres = update(points, &next_labels, &distances, &centres);
        let shift: f64 = centres
            .iter()
            .zip(&next_centres)
            .map(|(old, new)| squared_distance(old, new))
            .sum();
        centres = next_centres;
        let stable = next_labels == labels;
        labels = next_labels;
        if stable || shift <= threshold {
            break;
        }
    }

    let (labels, distances) = assign(points, &centres);
    KMeansRun {
        labels,
        centres,
        inertia: distances.iter().sum(),
        iterations,
        restart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    fn embedding(rows: usize, cols: usize, values: &[f64]) -> Embedding {
        Embedding::new(DMatrix::from_row_slice(rows, cols, values))
    }

    fn blobs() -> Embedding {
        embedding(
            9,
            2,
            &[
                0.0, 0.0, 0.1, 0.0, 0.0, 0.1, //
                5.0, 5.0, 5.1, 5.0, 5.0, 5.1, //
                -5.0, 5.0, -5.1, 5.0, -5.0, 5.1,
            ],
        )
    }

    #[rstest]
    fn separates_well_spaced_blobs() {
        let fit = KMeans::new(KMeansParams::new(3))
            .expect("params are valid")
            .fit(&blobs())
            .expect("fit must succeed");
        let labels = fit.labels();
        for group in labels.chunks(3) {
            assert!(group.iter().all(|&label| label == group[0]));
        }
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[3], labels[6]);
        assert_ne!(labels[0], labels[6]);
        assert!(fit.inertia() < 0.1);
        assert_eq!(fit.centroids().shape(), (3, 2));
    }

    #[rstest]
    #[case::seed_zero(0)]
    #[case::seed_forty_two(42)]
    fn identical_seeds_reproduce_fits(#[case] seed: u64) {
        let kmeans = KMeans::new(KMeansParams::new(3).with_seed(seed)).expect("params are valid");
        let first = kmeans.fit(&blobs()).expect("fit must succeed");
        let second = kmeans.fit(&blobs()).expect("fit must succeed");
        assert_eq!(first, second);
    }

    #[rstest]
    fn one_cluster_per_point_has_zero_inertia() {
        let fit = KMeans::new(KMeansParams::new(3))
            .expect("params are valid")
            .fit(&embedding(3, 1, &[0.0, 1.0, 4.0]))
            .expect("fit must succeed");
        let mut labels = fit.labels().to_vec();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);
        assert_eq!(fit.inertia(), 0.0);
    }

    #[rstest]
    fn coincident_points_leave_clusters_empty_without_failing() {
        let fit = KMeans::new(KMeansParams::new(2))
            .expect("params are valid")
            .fit(&embedding(3, 1, &[1.0, 1.0, 1.0]))
            .expect("fit must succeed");
        assert!(fit.labels().iter().all(|&label| label < 2));
        assert_eq!(fit.inertia(), 0.0);
    }

    #[rstest]
    #[case::zero_clusters(KMeansParams::new(0))]
    #[case::zero_iterations(KMeansParams::new(2).with_max_iterations(0))]
    #[case::zero_restarts(KMeansParams::new(2).with_restarts(0))]
    #[case::negative_tolerance(KMeansParams::new(2).with_tolerance(-1.0))]
    #[case::nan_tolerance(KMeansParams::new(2).with_tolerance(f64::NAN))]
    fn new_rejects_invalid_params(#[case] params: KMeansParams) {
        let err = KMeans::new(params).expect_err("params must be rejected");
        assert!(matches!(err, KMeansError::InvalidParameters { .. }));
    }

    #[rstest]
    fn fit_rejects_empty_embedding() {
        let err = KMeans::new(KMeansParams::new(1))
            .expect("params are valid")
            .fit(&Embedding::new(DMatrix::zeros(0, 2)))
            .expect_err("empty embedding must fail");
        assert_eq!(err, KMeansError::EmptyEmbedding);
    }

    #[rstest]
    fn fit_rejects_more_clusters_than_points() {
        let err = KMeans::new(KMeansParams::new(4))
            .expect("params are valid")
            .fit(&embedding(2, 1, &[0.0, 1.0]))
            .expect_err("too few points must fail");
        assert_eq!(
            err,
            KMeansError::TooFewPoints {
                points: 2,
                clusters: 4,
            }
        );
    }

    #[rstest]
    fn fit_rejects_non_finite_coordinates() {
        let err = KMeans::new(KMeansParams::new(1))
            .expect("params are valid")
            .fit(&embedding(3, 1, &[0.0, f64::INFINITY, 1.0]))
            .expect_err("non-finite input must fail");
        assert_eq!(err, KMeansError::NonFiniteCoordinate { point: 1 });
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(8, 2)]
    fn local_trial_bonus_tracks_log_of_clusters(#[case] clusters: usize, #[case] bonus: usize) {
        assert_eq!(local_trial_bonus(clusters), bonus);
    }

    fn scattered(seed: u64, rows: usize) -> Embedding {
        let mut rng = SmallRng::seed_from_u64(seed);
        let values: Vec<f64> = (0..rows * 2).map(|_| rng.gen_range(-1.0..1.0)).collect();
        embedding(rows, 2, &values)
    }

    fn independent_runs(embedding: &Embedding, params: &KMeansParams) -> Vec<KMeansRun> {
        let points: Vec<Vec<f64>> = embedding
            .as_matrix()
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        let threshold = params.tolerance() * mean_variance(&points);
        let mut rng = SmallRng::seed_from_u64(params.seed());
        (0..params.restarts())
            .map(|restart| {
                let seeds = seed_centres(&points, params.clusters(), &mut rng);
                lloyd(&points, seeds, params.max_iterations(), threshold, restart)
            })
            .collect()
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(42)]
    fn lowest_inertia_restart_wins(#[case] seed: u64) {
        let points = scattered(seed, 20);
        let params = KMeansParams::new(4).with_seed(seed).with_restarts(6);
        let fit = KMeans::new(params.clone())
            .expect("params are valid")
            .fit(&points)
            .expect("fit must succeed");

        let runs = independent_runs(&points, &params);
        let lowest = runs
            .iter()
            .map(|run| run.inertia)
            .fold(f64::INFINITY, f64::min);
        let winner = runs
            .iter()
            .find(|run| run.inertia == lowest)
            .expect("at least one restart ran");
        assert_eq!(fit.restart(), winner.restart);
        assert_eq!(fit.iterations(), winner.iterations);
        assert_eq!(fit.inertia(), lowest);

        let single = KMeans::new(params.with_restarts(1))
            .expect("params are valid")
            .fit(&points)
            .expect("fit must succeed");
        assert_eq!(single.restart(), 0);
        assert!(fit.inertia() <= single.inertia());
    }

    #[rstest]
    fn earliest_restart_wins_ties() {
        let fit = KMeans::new(KMeansParams::new(4).with_restarts(5))
            .expect("params are valid")
            .fit(&embedding(4, 1, &[0.0, 1.0, 2.0, 3.0]))
            .expect("fit must succeed");
        assert_eq!(fit.inertia(), 0.0);
        assert_eq!(fit.restart(), 0);
        assert!(fit.iterations() >= 1);
    }

    #[rstest]
    fn relocation_moves_farthest_point_into_empty_cluster() {
        let points = vec![vec![0.0], vec![1.0], vec![10.0]];
        let labels = vec![0, 0, 0];
        let distances = vec![0.0, 1.0, 100.0];
        let previous = vec![vec![0.0], vec![0.0]];
        let centres = update(&points, &labels, &distances, &previous);
        assert_eq!(centres, vec![vec![0.5], vec![10.0]]);
    }

    proptest! {
        #[test]
        fn labels_cover_every_point(
            values in proptest::collection::vec(-10.0_f64..10.0, 2..40),
            clusters in 1_usize..5,
            seed in any::<u64>(),
        ) {
            let rows = values.len() / 2;
            prop_assume!(rows >= clusters);
            let fit = KMeans::new(KMeansParams::new(clusters).with_seed(seed))
                .expect("params are valid")
                .fit(&embedding(rows, 2, &values[..rows * 2]))
                .expect("fit must succeed");
            prop_assert_eq!(fit.labels().len(), rows);
            prop_assert!(fit.labels().iter().all(|&label| label < clusters));
            prop_assert!(fit.inertia() >= 0.0);
        }

        #[test]
        fn labels_name_the_nearest_centroid(
            seed in any::<u64>(),
            rows in 4_usize..24,
            clusters in 1_usize..5,
        ) {
            let points = scattered(seed, rows);
            let fit = KMeans::new(KMeansParams::new(clusters).with_seed(seed))
                .expect("params are valid")
                .fit(&points)
                .expect("fit must succeed");
            let mut recomputed = 0.0;
            for (point, &label) in points.as_matrix().row_iter().zip(fit.labels()) {
                let distances: Vec<f64> = fit
                    .centroids()
                    .row_iter()
                    .map(|centre| (&point - &centre).norm_squared())
                    .collect();
                let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
                let own = distances.get(label).copied().expect("label names a centroid");
                prop_assert!(own <= nearest + 1e-12, "point assigned to {label}: {distances:?}");
                recomputed += own;
            }
            prop_assert!((fit.inertia() - recomputed).abs() <= 1e-9 * (1.0 + recomputed));
        }
    }
}
