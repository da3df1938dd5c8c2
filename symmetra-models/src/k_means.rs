#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use symmetra_core::{
    Float, Matrix, Point, Predictions, Result, SymmetraError, CENTROID_DECIMALS,
};

use log::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Exclusive upper bound on `max_iter`.
pub const MAX_ITER_LIMIT: usize = 1000;

/// What to do with a centroid whose cluster receives no points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the previous iteration's centroid and log a warning.
    #[default]
    KeepPrevious,
    /// Abort the fit with [`SymmetraError::EmptyCluster`].
    Fail,
}

/// Hyperparameters for [`KMeans`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters, `1 < k < n_samples`.
    pub k: usize,
    /// Maximum number of Lloyd iterations, `1 < max_iter < 1000`.
    pub max_iter: usize,
    /// Handling of clusters that lose all members.
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: 300,
            empty_cluster: EmptyClusterPolicy::KeepPrevious,
        }
    }
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }
}

/// **K-Means clustering** with Lloyd's algorithm and deterministic seeding.
///
/// # Algorithm
///
/// 1. Seed the `k` centroids with the first `k` rows of the dataset
/// 2. Repeat up to `max_iter` times:
///    - **Assignment step**: assign each point to the centroid at the smallest
///      Euclidean distance. A centroid only wins on strict improvement, so
///      ties go to the lowest centroid index
///    - **Update step**: recompute every centroid as the mean of its members,
///      rounded to [`CENTROID_DECIMALS`] digits
///    - **Convergence**: stop when every updated centroid equals the centroid
///      it replaces
/// 3. Keep the labels of the last assignment step
///
/// Seeding from the first rows (rather than K-Means++) makes every run on the
/// same data produce the same labels.
///
/// # Empty clusters
///
/// If a cluster receives no points its mean is undefined. The behavior is
/// chosen by [`EmptyClusterPolicy`]; the default keeps the previous centroid.
///
/// # Errors
///
/// - [`SymmetraError::EmptyData`] if input has zero rows
/// - [`SymmetraError::InvalidParameter`] unless `1 < k < n`, `1 < max_iter < 1000`
///   and the data has at least one column
/// - [`SymmetraError::InvalidValue`] if `NaN` encountered in distance computation
/// - [`SymmetraError::EmptyCluster`] under [`EmptyClusterPolicy::Fail`]
///
/// # Notes
///
/// - K-Means assumes **spherical clusters** of similar size
/// - Row order matters: the first `k` rows should come from distinct groups
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Cluster centroids of shape `(k, n_features)`.
    centroids: Option<Matrix>,
    /// Labels from the last assignment step of `fit`.
    labels: Option<Predictions>,
    /// Number of clusters.
    k: usize,
    /// Maximum number of iterations.
    max_iter: usize,
    empty_cluster: EmptyClusterPolicy,
    n_iter: usize,
    converged: bool,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::from_config(KMeansConfig::default())
    }
}

impl KMeans {
    /// Creates a new, unfitted K-Means model.
    ///
    /// Parameters are validated by [`fit`](KMeans::fit), not here.
    ///
    /// # Example
    ///
    /// ```
    /// use symmetra_models::k_means::KMeans;
    ///
    /// let kmeans = KMeans::new(3, 100);
    /// assert_eq!(kmeans.k(), 3);
    /// ```
    pub fn new(k: usize, max_iter: usize) -> Self {
        Self::from_config(KMeansConfig::new(k).with_max_iter(max_iter))
    }

    pub fn from_config(config: KMeansConfig) -> Self {
        Self {
            centroids: None,
            labels: None,
            k: config.k,
            max_iter: config.max_iter,
            empty_cluster: config.empty_cluster,
            n_iter: 0,
            converged: false,
        }
    }

    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    fn validate(&self, x: &Matrix) -> Result<()> {
        let n = x.nrows();

        if n == 0 {
            return Err(SymmetraError::EmptyData);
        }

        if x.ncols() == 0 {
            return Err(SymmetraError::invalid_parameter("d", "0"));
        }

        if self.k <= 1 || self.k >= n {
            return Err(SymmetraError::invalid_parameter(
                "k",
                format!("{} (must satisfy 1 < k < {})", self.k, n),
            ));
        }

        if self.max_iter <= 1 || self.max_iter >= MAX_ITER_LIMIT {
            return Err(SymmetraError::invalid_parameter(
                "max_iter",
                format!("{} (must satisfy 1 < max_iter < {})", self.max_iter, MAX_ITER_LIMIT),
            ));
        }

        Ok(())
    }

    /// Index of the centroid nearest to `point`; the lowest index wins ties.
    fn nearest_centroid(point: &Point, centroids: &[Point]) -> Result<usize> {
        let mut min_dist = Float::INFINITY;
        let mut best_cluster = 0;

        for (c, centroid) in centroids.iter().enumerate() {
            let dist = point.euclidean_distance(centroid)?;

            if dist.is_nan() {
                return Err(SymmetraError::InvalidValue {
                    message: "NaN encountered in distance computation".into(),
                });
            }

            if dist < min_dist {
                min_dist = dist;
                best_cluster = c;
            }
        }

        Ok(best_cluster)
    }

    /// Assigns each point to its nearest centroid.
    ///
    /// Each point is independent of the others, so with the `parallel`
    /// feature the points are split across the rayon pool.
    fn assign_clusters(points: &[Point], centroids: &[Point]) -> Result<Predictions> {
        #[cfg(feature = "parallel")]
        let labels = points
            .par_iter()
            .map(|p| Self::nearest_centroid(p, centroids))
            .collect::<Result<Predictions>>()?;

        #[cfg(not(feature = "parallel"))]
        let labels = points
            .iter()
            .map(|p| Self::nearest_centroid(p, centroids))
            .collect::<Result<Predictions>>()?;

        Ok(labels)
    }

    /// Recomputes centroids as the rounded mean of their assigned points.
    ///
    /// `previous` supplies the fallback for empty clusters under
    /// [`EmptyClusterPolicy::KeepPrevious`].
    fn update_centroids(
        &self,
        points: &[Point],
        labels: &[usize],
        previous: &[Point],
    ) -> Result<Vec<Point>> {
        let d = previous.first().map_or(0, Point::dim);
        let mut sums = vec![Point::zeros(d); self.k];
        let mut counts = vec![0usize; self.k];

        for (point, &cluster) in points.iter().zip(labels) {
            sums[cluster] = sums[cluster].checked_add(point)?;
            counts[cluster] += 1;
        }

        let mut updated = Vec::with_capacity(self.k);
        for (c, sum) in sums.into_iter().enumerate() {
            if counts[c] == 0 {
                match self.empty_cluster {
                    EmptyClusterPolicy::KeepPrevious => {
                        warn!("KMeans: cluster {} is empty, keeping previous centroid", c);
                        updated.push(previous[c].clone());
                    }
                    EmptyClusterPolicy::Fail => {
                        return Err(SymmetraError::EmptyCluster { cluster: c });
                    }
                }
                continue;
            }

            let mean = sum.scale(1.0 / counts[c] as Float);
            updated.push(mean.round(CENTROID_DECIMALS));
        }

        Ok(updated)
    }

    /// Fits the model on `x`, seeding centroids with its first `k` rows.
    ///
    /// # Complexity
    ///
    /// Let `n = n_samples`, `d = n_features`, `t = iterations until convergence`.
    /// - Time: `O(t * k * n * d)`
    /// - Space: `O(k * d + n * d)` for centroids and the point copies
    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        self.validate(x)?;

        let seeds: Vec<Point> = (0..self.k).map(|i| Point::from_row(x, i)).collect();
        self.run(x, seeds)
    }

    /// Fits the model on `x` starting from explicit seed centroids.
    ///
    /// Re-fitting from the centroids of a converged run reproduces its labels.
    ///
    /// # Errors
    ///
    /// Same as [`fit`](KMeans::fit), plus [`SymmetraError::ShapeMismatch`] if
    /// `seeds` is not `(k, n_features)`.
    pub fn fit_from(&mut self, x: &Matrix, seeds: &Matrix) -> Result<()> {
        self.validate(x)?;

        if seeds.nrows() != self.k || seeds.ncols() != x.ncols() {
            return Err(SymmetraError::ShapeMismatch {
                expected: format!("{} x {} seeds", self.k, x.ncols()),
                got: format!("{} x {}", seeds.nrows(), seeds.ncols()),
            });
        }

        let seeds: Vec<Point> = (0..self.k).map(|i| Point::from_row(seeds, i)).collect();
        self.run(x, seeds)
    }

    fn run(&mut self, x: &Matrix, seeds: Vec<Point>) -> Result<()> {
        let n = x.nrows();
        info!(
            "KMeans::fit: n={} d={} k={} max_iter={}",
            n,
            x.ncols(),
            self.k,
            self.max_iter
        );

        let points: Vec<Point> = (0..n).map(|i| Point::from_row(x, i)).collect();
        let mut centroids = seeds;
        let mut labels = vec![0usize; n];

        self.converged = false;
        self.n_iter = 0;

        for iter in 0..self.max_iter {
            labels = Self::assign_clusters(&points, &centroids)?;
            let updated = self.update_centroids(&points, &labels, &centroids)?;
            self.n_iter = iter + 1;

            if updated == centroids {
                self.converged = true;
                break;
            }

            debug!("KMeans: iteration {} moved at least one centroid", self.n_iter);
            centroids = updated;
        }

        if self.converged {
            info!("KMeans converged after {} iterations", self.n_iter);
        } else {
            info!(
                "KMeans stopped at max_iter={} without convergence",
                self.max_iter
            );
        }

        self.centroids = Some(Point::stack(&centroids)?);
        self.labels = Some(labels);
        Ok(())
    }

    /// Predicts cluster assignments for `x` against the fitted centroids.
    ///
    /// # Errors
    ///
    /// - [`SymmetraError::InvalidValue`] if the model is not fitted or `NaN`
    ///   is encountered
    /// - [`SymmetraError::ShapeMismatch`] if `x.ncols()` doesn't match training data
    pub fn predict(&self, x: &Matrix) -> Result<Predictions> {
        let centroids = self
            .centroids
            .as_ref()
            .ok_or_else(|| SymmetraError::InvalidValue {
                message: "KMeans used before fit".into(),
            })?;

        if x.ncols() != centroids.ncols() {
            return Err(SymmetraError::ShapeMismatch {
                expected: format!("Expected {} features", centroids.ncols()),
                got: format!("Got {} features", x.ncols()),
            });
        }

        let points: Vec<Point> = (0..x.nrows()).map(|i| Point::from_row(x, i)).collect();
        let centroids: Vec<Point> = (0..centroids.nrows())
            .map(|i| Point::from_row(centroids, i))
            .collect();
        Self::assign_clusters(&points, &centroids)
    }

    /// Learned centroids of shape `(k, n_features)`, or `None` if not fitted.
    pub fn centroids(&self) -> Option<&Matrix> {
        self.centroids.as_ref()
    }

    /// Labels of the training rows, or `None` if not fitted.
    pub fn labels(&self) -> Option<&Predictions> {
        self.labels.as_ref()
    }

    /// Returns the number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Iterations performed by the last fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Whether the last fit stopped on stable centroids rather than the cap.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Clusters `dataset` into `k` groups and returns one label per row.
///
/// Shorthand for [`KMeans::new`] followed by [`KMeans::fit`].
pub fn cluster(dataset: &Matrix, k: usize, max_iter: usize) -> Result<Predictions> {
    let mut model = KMeans::new(k, max_iter);
    model.fit(dataset)?;
    Ok(model.labels.unwrap_or_default())
}
