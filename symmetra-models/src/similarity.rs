use symmetra_core::{Float, Matrix, Result, SymmetraError, Vector};

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Squared Euclidean distance between rows `i` and `j` of `x`.
///
/// Summed in column order, so `(i, j)` and `(j, i)` give bit-identical results.
fn row_squared_distance(x: &Matrix, i: usize, j: usize) -> Float {
    let mut d2 = 0.0;
    for c in 0..x.ncols() {
        let diff = x[(i, c)] - x[(j, c)];
        d2 += diff * diff;
    }
    d2
}

fn similarity_row(x: &Matrix, i: usize) -> Vec<Float> {
    (0..x.nrows())
        .map(|j| {
            if i == j {
                0.0
            } else {
                (-row_squared_distance(x, i, j) / 2.0).exp()
            }
        })
        .collect()
}

/// Builds the Gaussian-kernel **similarity matrix** `A` of a dataset.
///
/// # Definition
///
/// For rows `xᵢ`, `xⱼ` of the `(n × d)` dataset:
///
/// ```text
/// A[i,j] = exp(-‖xᵢ - xⱼ‖² / 2)   for i ≠ j
/// A[i,i] = 0
/// ```
///
/// The result is symmetric with a zero diagonal and off-diagonal entries in
/// `(0, 1]`. Points far apart underflow to exactly `0.0`.
///
/// # Errors
///
/// - [`SymmetraError::EmptyData`] if `x` has zero rows
/// - [`SymmetraError::InvalidValue`] if `x` contains `NaN` or infinite entries
///
/// # Complexity
///
/// - Time: `O(n² d)`
/// - Space: `O(n²)`
///
/// With the `parallel` feature, rows are computed concurrently.
pub fn similarity(x: &Matrix) -> Result<Matrix> {
    let n = x.nrows();

    if n == 0 {
        return Err(SymmetraError::EmptyData);
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(SymmetraError::InvalidValue {
            message: "dataset contains non-finite entries".into(),
        });
    }

    debug!("similarity: n={} d={}", n, x.ncols());

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<Float>> = (0..n)
        .into_par_iter()
        .map(|i| similarity_row(x, i))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<Float>> = (0..n).map(|i| similarity_row(x, i)).collect();

    Ok(Matrix::from_fn(n, n, |i, j| rows[i][j]))
}

/// Builds the **diagonal degree matrix** `D` of a similarity matrix.
///
/// `D[i,i] = Σⱼ A[i,j]`; every off-diagonal entry is zero.
///
/// # Errors
///
/// - [`SymmetraError::ShapeMismatch`] if `a` is not square
pub fn degree(a: &Matrix) -> Result<Matrix> {
    if !a.is_square() {
        return Err(SymmetraError::ShapeMismatch {
            expected: "square similarity matrix".into(),
            got: format!("{} x {}", a.nrows(), a.ncols()),
        });
    }

    let sums = Vector::from_iterator(a.nrows(), a.row_iter().map(|row| row.sum()));
    Ok(Matrix::from_diagonal(&sums))
}
