use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use symmetra_core::{Float, Matrix, Predictions, Result, SymmetraError};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::normalization::normalize;
use crate::similarity::{degree, similarity};

#[cfg(not(feature = "rng"))]
compile_error!("SymNMF requires the 'rng' feature for factor initialization");

/// Damping coefficient β of the multiplicative update.
pub const DEFAULT_BETA: Float = 0.5;
/// Frobenius-norm threshold on `H_new - H_prev`.
pub const DEFAULT_EPSILON: Float = 1e-4;
pub const DEFAULT_MAX_ITER: usize = 300;
/// Denominators at or below this value are treated as degenerate.
pub const DENOMINATOR_FLOOR: Float = 1e-12;

/// What to do when `(H·Hᵀ·H)[i,j]` is too small to divide by.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Leave `H[i,j]` unchanged for this iteration and log a warning.
    #[default]
    Skip,
    /// Abort with [`SymmetraError::DegenerateFactor`].
    Fail,
}

/// Hyperparameters for [`SymNmf`] and [`factorize_with`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct SymNmfConfig {
    /// Number of clusters (columns of `H`), `1 < k < n_samples`.
    pub k: usize,
    pub max_iter: usize,
    pub epsilon: Float,
    /// Damping β in `(0, 1]`; `1.0` is the undamped update.
    pub beta: Float,
    /// Seed for the initial factor matrix.
    pub seed: u64,
    pub degenerate: DegeneratePolicy,
}

impl Default for SymNmfConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: DEFAULT_MAX_ITER,
            epsilon: DEFAULT_EPSILON,
            beta: DEFAULT_BETA,
            seed: 0,
            degenerate: DegeneratePolicy::Skip,
        }
    }
}

impl SymNmfConfig {
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

    pub fn with_epsilon(mut self, epsilon: Float) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_beta(mut self, beta: Float) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(SymmetraError::invalid_parameter("max_iter", 0));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SymmetraError::invalid_parameter("epsilon", self.epsilon));
        }
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(SymmetraError::invalid_parameter("beta", self.beta));
        }
        Ok(())
    }
}

/// Outcome of a factorization run.
///
/// Hitting `max_iter` is reported through `converged == false`, not as an error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Factorization {
    /// Final factor matrix, `(n × k)`, element-wise non-negative.
    pub h: Matrix,
    /// Updates applied.
    pub iterations: usize,
    pub converged: bool,
    /// `‖H_new - H_prev‖_F` of the last update.
    pub delta: Float,
    /// Entries left unchanged because their denominator was degenerate,
    /// summed over all iterations.
    pub degenerate_entries: usize,
}

/// Draws the initial factor matrix `H₀` of shape `(n × k)`.
///
/// Entries are uniform on `[0, 2·sqrt(mean_w / k)]`, where `mean_w` is the
/// average entry of the normalized similarity matrix. The generator is
/// supplied by the caller; the same seeded generator yields the same `H₀`.
///
/// # Errors
///
/// - [`SymmetraError::InvalidParameter`] if `k == 0`, `n == 0` or `mean_w` is
///   negative or not finite
pub fn init_h<R: Rng>(k: usize, n: usize, mean_w: Float, rng: &mut R) -> Result<Matrix> {
    if k == 0 {
        return Err(SymmetraError::invalid_parameter("k", 0));
    }
    if n == 0 {
        return Err(SymmetraError::invalid_parameter("n", 0));
    }
    if !mean_w.is_finite() || mean_w < 0.0 {
        return Err(SymmetraError::invalid_parameter("mean_w", mean_w));
    }

    let upper = 2.0 * (mean_w / k as Float).sqrt();
    Ok(Matrix::from_fn(n, k, |_, _| rng.random_range(0.0..=upper)))
}

fn check_non_negative(m: &Matrix, name: &str) -> Result<()> {
    if m.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(SymmetraError::InvalidValue {
            message: format!("{} must be finite and non-negative", name),
        });
    }
    Ok(())
}

/// Refines `h0` against `w` with the damped multiplicative update, using the
/// default β and degenerate policy.
///
/// See [`factorize_with`].
pub fn factorize(h0: Matrix, w: &Matrix, epsilon: Float, max_iter: usize) -> Result<Factorization> {
    let config = SymNmfConfig::new(h0.ncols())
        .with_epsilon(epsilon)
        .with_max_iter(max_iter);
    factorize_with(h0, w, &config)
}

/// Refines `h0` against `w` with the **damped multiplicative update**.
///
/// # Update rule
///
/// ```text
/// H_new = H ⊙ (1 − β + β · (W·H) ⊘ (H·Hᵀ·H))
/// ```
///
/// `⊙`/`⊘` are element-wise. `H·Hᵀ·H` is evaluated as `H·(HᵀH)` so the
/// intermediate is `(k × k)` instead of `(n × n)`. Since every factor is
/// non-negative, `H` stays non-negative.
///
/// # Stopping
///
/// Stops as soon as `‖H_new − H_prev‖_F < epsilon`, or after `max_iter`
/// updates; the latter returns the last `H` with `converged == false`.
///
/// # Degenerate denominators
///
/// A denominator `≤ DENOMINATOR_FLOOR` (or non-finite) leaves that entry
/// unchanged under [`DegeneratePolicy::Skip`], or fails under
/// [`DegeneratePolicy::Fail`].
///
/// # Errors
///
/// - [`SymmetraError::InvalidParameter`] for bad `max_iter`, `epsilon` or `beta`,
///   or if `h0` has no columns
/// - [`SymmetraError::ShapeMismatch`] if `w` is not `(n × n)` for `n = h0.nrows()`
/// - [`SymmetraError::InvalidValue`] if `h0` or `w` has negative or non-finite entries
/// - [`SymmetraError::DegenerateFactor`] under [`DegeneratePolicy::Fail`]
///
/// # Complexity
///
/// Per iteration `O(n² k)` for `W·H` plus `O(n k²)` for `H·(HᵀH)`.
pub fn factorize_with(h0: Matrix, w: &Matrix, config: &SymNmfConfig) -> Result<Factorization> {
    config.validate()?;

    let (n, k) = h0.shape();
    if n == 0 {
        return Err(SymmetraError::EmptyData);
    }
    if k == 0 {
        return Err(SymmetraError::invalid_parameter("k", 0));
    }
    if w.shape() != (n, n) {
        return Err(SymmetraError::ShapeMismatch {
            expected: format!("{} x {} normalized similarity", n, n),
            got: format!("{} x {}", w.nrows(), w.ncols()),
        });
    }
    check_non_negative(&h0, "H")?;
    check_non_negative(w, "W")?;

    let beta = config.beta;
    let mut h = h0;
    let mut delta = Float::INFINITY;
    let mut iterations = 0;
    let mut converged = false;
    let mut degenerate_entries = 0;

    for iter in 0..config.max_iter {
        let wh = w * &h;
        let hth = h.transpose() * &h;
        let hhth = &h * hth;

        let mut next = h.clone();
        let mut skipped = 0;

        for j in 0..k {
            for i in 0..n {
                let den = hhth[(i, j)];
                if !den.is_finite() || den <= DENOMINATOR_FLOOR {
                    match config.degenerate {
                        DegeneratePolicy::Skip => {
                            skipped += 1;
                            continue;
                        }
                        DegeneratePolicy::Fail => {
                            return Err(SymmetraError::DegenerateFactor { row: i, col: j });
                        }
                    }
                }
                next[(i, j)] = h[(i, j)] * (1.0 - beta + beta * wh[(i, j)] / den);
            }
        }

        if skipped > 0 {
            warn!(
                "SymNMF iteration {}: {} entries with degenerate denominator left unchanged",
                iter + 1,
                skipped
            );
            degenerate_entries += skipped;
        }

        delta = (&next - &h).norm();
        h = next;
        iterations = iter + 1;
        trace!("SymNMF iteration {}: delta={:.3e}", iterations, delta);

        if delta < config.epsilon {
            converged = true;
            break;
        }
    }

    if converged {
        info!("SymNMF converged after {} iterations", iterations);
    } else {
        info!(
            "SymNMF stopped at max_iter={} without convergence (delta={:.3e})",
            config.max_iter, delta
        );
    }

    Ok(Factorization {
        h,
        iterations,
        converged,
        delta,
        degenerate_entries,
    })
}

/// Assigns each row of `h` to the column holding its largest entry.
///
/// Ties go to the lowest column index.
///
/// # Errors
///
/// - [`SymmetraError::InvalidParameter`] if `h` has no columns
/// - [`SymmetraError::InvalidValue`] if `h` contains `NaN`
pub fn labels_from_h(h: &Matrix) -> Result<Predictions> {
    if h.ncols() == 0 {
        return Err(SymmetraError::invalid_parameter("k", 0));
    }

    h.row_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_value = Float::NEG_INFINITY;
            for (j, &v) in row.iter().enumerate() {
                if v.is_nan() {
                    return Err(SymmetraError::InvalidValue {
                        message: "NaN in factor matrix".into(),
                    });
                }
                if v > best_value {
                    best_value = v;
                    best = j;
                }
            }
            Ok(best)
        })
        .collect()
}

/// The intermediate result requested from the pipeline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Similarity matrix `A`.
    Sym,
    /// Diagonal degree matrix `D`.
    Ddg,
    /// Normalized similarity matrix `W`.
    Norm,
    /// Final factor matrix `H`.
    SymNmf,
}

impl FromStr for Goal {
    type Err = SymmetraError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sym" => Ok(Goal::Sym),
            "ddg" => Ok(Goal::Ddg),
            "norm" => Ok(Goal::Norm),
            "symnmf" => Ok(Goal::SymNmf),
            other => Err(SymmetraError::invalid_parameter("goal", other)),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
            Goal::SymNmf => "symnmf",
        };
        f.write_str(s)
    }
}

/// Runs the pipeline on `x` up to `goal` and returns that stage's matrix.
///
/// `config` is only consulted for [`Goal::SymNmf`].
pub fn run_goal(goal: Goal, x: &Matrix, config: &SymNmfConfig) -> Result<Matrix> {
    let a = similarity(x)?;
    if goal == Goal::Sym {
        return Ok(a);
    }

    let d = degree(&a)?;
    if goal == Goal::Ddg {
        return Ok(d);
    }

    let w = normalize(&a, &d)?;
    if goal == Goal::Norm {
        return Ok(w);
    }

    let mut model = SymNmf::from_config(config.clone());
    model.fit_normalized(&w)?;
    model.h.ok_or_else(|| SymmetraError::InvalidValue {
        message: "factorization produced no factor matrix".into(),
    })
}

/// **Symmetric NMF clustering** of a dataset.
///
/// # Pipeline
///
/// 1. [`similarity`] builds the Gaussian affinity `A`
/// 2. [`degree`] and [`normalize`] give `W = D^(-1/2) A D^(-1/2)`
/// 3. [`init_h`] draws `H₀` from a generator seeded with `seed`
/// 4. [`factorize_with`] refines `H` until `‖ΔH‖_F < epsilon` or `max_iter`
/// 5. [`labels_from_h`] labels each point by its row arg-max
///
/// # Errors
///
/// - [`SymmetraError::InvalidParameter`] unless `1 < k < n`
/// - everything the pipeline stages return, e.g. [`SymmetraError::SingularDegree`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct SymNmf {
    config: SymNmfConfig,
    h: Option<Matrix>,
    labels: Option<Predictions>,
    iterations: usize,
    converged: bool,
    degenerate_entries: usize,
}

impl Default for SymNmf {
    fn default() -> Self {
        Self::from_config(SymNmfConfig::default())
    }
}

impl SymNmf {
    pub fn new(k: usize) -> Self {
        Self::from_config(SymNmfConfig::new(k))
    }

    pub fn from_config(config: SymNmfConfig) -> Self {
        Self {
            config,
            h: None,
            labels: None,
            iterations: 0,
            converged: false,
            degenerate_entries: 0,
        }
    }

    /// Clusters the `(n × d)` dataset `x`.
    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        info!(
            "SymNmf::fit: n={} d={} k={} seed={}",
            x.nrows(),
            x.ncols(),
            self.config.k,
            self.config.seed
        );
        self.check_k(x.nrows())?;

        let a = similarity(x)?;
        let d = degree(&a)?;
        let w = normalize(&a, &d)?;
        self.fit_normalized(&w)
    }

    /// Factorizes an already normalized similarity matrix `w`.
    pub fn fit_normalized(&mut self, w: &Matrix) -> Result<()> {
        let n = w.nrows();
        self.check_k(n)?;

        let mean_w = w.mean();
        debug!("SymNmf: mean(W)={:.6}", mean_w);

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let h0 = init_h(self.config.k, n, mean_w, &mut rng)?;
        let result = factorize_with(h0, w, &self.config)?;

        self.labels = Some(labels_from_h(&result.h)?);
        self.iterations = result.iterations;
        self.converged = result.converged;
        self.degenerate_entries = result.degenerate_entries;
        self.h = Some(result.h);
        Ok(())
    }

    fn check_k(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(SymmetraError::EmptyData);
        }
        if self.config.k <= 1 || self.config.k >= n {
            return Err(SymmetraError::invalid_parameter(
                "k",
                format!("{} (must satisfy 1 < k < {})", self.config.k, n),
            ));
        }
        Ok(())
    }

    /// Final factor matrix, or `None` if not fitted.
    pub fn h(&self) -> Option<&Matrix> {
        self.h.as_ref()
    }

    pub fn labels(&self) -> Option<&Predictions> {
        self.labels.as_ref()
    }

    pub fn config(&self) -> &SymNmfConfig {
        &self.config
    }

    pub fn k(&self) -> usize {
        self.config.k
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn degenerate_entries(&self) -> usize {
        self.degenerate_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Two tight groups of six points around (0,0) and (10,10), interleaved.
    fn two_groups() -> Matrix {
        Matrix::from_fn(12, 2, |i, j| {
            let center = if i % 2 == 0 { 0.0 } else { 10.0 };
            let within = (i / 2) as Float;
            center + 0.1 * within * if j == 0 { 1.0 } else { 0.5 }
        })
    }

    fn normalized(x: &Matrix) -> Matrix {
        let a = similarity(x).unwrap();
        let d = degree(&a).unwrap();
        normalize(&a, &d).unwrap()
    }

    #[test]
    fn test_init_h_bounds_and_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let h = init_h(3, 20, 0.5, &mut rng).unwrap();
        let upper = 2.0 * (0.5 / 3.0 as Float).sqrt();

        assert_eq!(h.shape(), (20, 3));
        assert!(h.iter().all(|&v| (0.0..=upper).contains(&v)));
    }

    #[test]
    fn test_init_h_same_seed_same_matrix() {
        let h1 = init_h(2, 10, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        let h2 = init_h(2, 10, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        let h3 = init_h(2, 10, 0.3, &mut StdRng::seed_from_u64(43)).unwrap();

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_init_h_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            init_h(0, 10, 0.3, &mut rng),
            Err(SymmetraError::InvalidParameter { .. })
        ));
        assert!(matches!(
            init_h(2, 10, -1.0, &mut rng),
            Err(SymmetraError::InvalidParameter { .. })
        ));
        assert!(matches!(
            init_h(2, 10, Float::NAN, &mut rng),
            Err(SymmetraError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_factorize_stays_non_negative() {
        let w = normalized(&two_groups());
        let mut rng = StdRng::seed_from_u64(7);
        let mut h = init_h(2, 12, w.mean(), &mut rng).unwrap();

        for _ in 0..50 {
            let step = factorize(h, &w, 1e-300, 1).unwrap();
            assert_eq!(step.iterations, 1);
            assert!(step.h.iter().all(|&v| v >= 0.0 && v.is_finite()));
            h = step.h;
        }
    }

    #[test]
    fn test_factorize_converges_on_separated_groups() {
        crate::init();
        let x = two_groups();
        let w = normalized(&x);
        let mut rng = StdRng::seed_from_u64(0);
        let h0 = init_h(2, 12, w.mean(), &mut rng).unwrap();

        let result = factorize(h0, &w, 1e-4, 1000).unwrap();
        assert!(result.converged);
        assert!(result.iterations <= 1000);
        assert!(result.delta < 1e-4);
        assert_eq!(result.degenerate_entries, 0);

        let labels = labels_from_h(&result.h).unwrap();
        for i in 0..12 {
            assert_eq!(labels[i], labels[i % 2]);
        }
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_factorize_reports_max_iter_without_error() {
        let w = normalized(&two_groups());
        let mut rng = StdRng::seed_from_u64(0);
        let h0 = init_h(2, 12, w.mean(), &mut rng).unwrap();

        let result = factorize(h0, &w, 1e-300, 3).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_factorize_zero_row_is_skipped() {
        crate::init();
        let w = normalized(&two_groups());
        let mut h0 = Matrix::from_element(12, 2, 0.4);
        h0.row_mut(1).fill(0.0);

        let result = factorize(h0, &w, 1e-4, 5).unwrap();
        assert!(result.degenerate_entries >= 2);
        assert_eq!(result.h[(1, 0)], 0.0);
        assert_eq!(result.h[(1, 1)], 0.0);
        assert!(result.h.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_factorize_zero_row_fail_policy() {
        let w = normalized(&two_groups());
        let mut h0 = Matrix::from_element(12, 2, 0.4);
        h0.row_mut(1).fill(0.0);

        let config = SymNmfConfig::new(2).with_degenerate(DegeneratePolicy::Fail);
        assert!(matches!(
            factorize_with(h0, &w, &config),
            Err(SymmetraError::DegenerateFactor { row: 1, col: 0 })
        ));
    }

    #[test]
    fn test_factorize_input_guards() {
        let w = normalized(&two_groups());

        let mut negative = Matrix::from_element(12, 2, 0.4);
        negative[(3, 1)] = -0.1;
        assert!(matches!(
            factorize(negative, &w, 1e-4, 10),
            Err(SymmetraError::InvalidValue { .. })
        ));

        let wrong_rows = Matrix::from_element(5, 2, 0.4);
        assert!(matches!(
            factorize(wrong_rows, &w, 1e-4, 10),
            Err(SymmetraError::ShapeMismatch { .. })
        ));

        let h0 = Matrix::from_element(12, 2, 0.4);
        assert!(matches!(
            factorize(h0.clone(), &w, 0.0, 10),
            Err(SymmetraError::InvalidParameter { .. })
        ));
        assert!(matches!(
            factorize(h0.clone(), &w, 1e-4, 0),
            Err(SymmetraError::InvalidParameter { .. })
        ));

        let config = SymNmfConfig::new(2).with_beta(1.5);
        assert!(matches!(
            factorize_with(h0, &w, &config),
            Err(SymmetraError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_labels_from_h_argmax_and_ties() {
        let h = Matrix::from_row_slice(4, 3, &[
            0.1, 0.7, 0.2,
            0.5, 0.5, 0.1,
            0.0, 0.0, 0.0,
            0.2, 0.3, 0.9,
        ]);
        assert_eq!(labels_from_h(&h).unwrap(), vec![1, 0, 0, 2]);
    }

    #[test]
    fn test_labels_from_h_rejects_nan_and_empty() {
        let h = Matrix::from_row_slice(2, 2, &[0.1, Float::NAN, 0.3, 0.2]);
        assert!(matches!(
            labels_from_h(&h),
            Err(SymmetraError::InvalidValue { .. })
        ));
        assert!(matches!(
            labels_from_h(&Matrix::zeros(3, 0)),
            Err(SymmetraError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_symnmf_fit_separates_groups() {
        crate::init();
        let x = two_groups();
        let mut model = SymNmf::from_config(SymNmfConfig::new(2).with_max_iter(1000));
        model.fit(&x).unwrap();

        let labels = model.labels().unwrap();
        assert_eq!(labels.len(), 12);
        assert!(labels.iter().all(|&l| l < 2));
        assert_ne!(labels[0], labels[1]);
        assert!(model.h().unwrap().iter().all(|&v| v >= 0.0));
        assert!(model.iterations() >= 1);
    }

    #[test]
    fn test_symnmf_fit_is_reproducible() {
        let x = two_groups();
        let mut m1 = SymNmf::from_config(SymNmfConfig::new(2).with_seed(5));
        let mut m2 = SymNmf::from_config(SymNmfConfig::new(2).with_seed(5));
        m1.fit(&x).unwrap();
        m2.fit(&x).unwrap();

        assert_eq!(m1.h(), m2.h());
        assert_eq!(m1.labels(), m2.labels());
    }

    #[test]
    fn test_symnmf_k_bounds() {
        let x = two_groups();
        for k in [0, 1, 12, 20] {
            let mut model = SymNmf::new(k);
            assert!(matches!(
                model.fit(&x),
                Err(SymmetraError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_symnmf_three_points() {
        let x = Matrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let mut model = SymNmf::new(2);
        model.fit(&x).unwrap();
        assert_eq!(model.h().unwrap().shape(), (3, 2));
    }

    #[test]
    fn test_run_goal_stages() {
        let x = two_groups();
        let config = SymNmfConfig::new(2);

        let a = run_goal(Goal::Sym, &x, &config).unwrap();
        let d = run_goal(Goal::Ddg, &x, &config).unwrap();
        let w = run_goal(Goal::Norm, &x, &config).unwrap();
        let h = run_goal(Goal::SymNmf, &x, &config).unwrap();

        assert_eq!(a, similarity(&x).unwrap());
        assert_abs_diff_eq!(d[(0, 0)], a.row(0).sum(), epsilon = 1e-12);
        assert_eq!(w, normalize(&a, &d).unwrap());
        assert_eq!(h.shape(), (12, 2));
    }

    #[test]
    fn test_goal_parse_and_display() {
        for goal in [Goal::Sym, Goal::Ddg, Goal::Norm, Goal::SymNmf] {
            assert_eq!(goal.to_string().parse::<Goal>().unwrap(), goal);
        }
        assert!(matches!(
            "kmeans".parse::<Goal>(),
            Err(SymmetraError::InvalidParameter { .. })
        ));
    }
}
