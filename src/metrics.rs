use std::collections::HashMap;

use symmetra_core::{Float, Matrix, Point, Result, SymmetraError};

/// Mean **silhouette coefficient** of a labelling.
///
/// For point `i` with label `c`:
///
/// ```text
/// a(i) = mean distance from i to the other points labelled c
/// b(i) = min over labels c' ≠ c of the mean distance from i to points labelled c'
/// s(i) = (b(i) - a(i)) / max(a(i), b(i))
/// ```
///
/// A point alone in its cluster scores `0`. The result lies in `[-1, 1]`;
/// higher means better separated clusters. Distances are Euclidean.
///
/// The clustering engines never call this; [`crate::analysis`] scores their
/// labels with it.
///
/// # Errors
///
/// - [`SymmetraError::ShapeMismatch`] if `labels.len() != x.nrows()`
/// - [`SymmetraError::InvalidParameter`] unless `2 ≤ distinct labels ≤ n - 1`
///
/// # Complexity
///
/// - Time: `O(n² d)`
/// - Space: `O(n + k)`
pub fn silhouette_score(x: &Matrix, labels: &[usize]) -> Result<Float> {
    let n = x.nrows();

    if labels.len() != n {
        return Err(SymmetraError::ShapeMismatch {
            expected: format!("{} labels", n),
            got: format!("{}", labels.len()),
        });
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for &l in labels {
        *sizes.entry(l).or_insert(0) += 1;
    }

    if sizes.len() < 2 || sizes.len() >= n {
        return Err(SymmetraError::invalid_parameter(
            "labels",
            format!("{} distinct labels for {} points", sizes.len(), n),
        ));
    }

    let points: Vec<Point> = (0..n).map(|i| Point::from_row(x, i)).collect();
    let mut total = 0.0;
    let mut sums: HashMap<usize, Float> = HashMap::with_capacity(sizes.len());

    for (i, p) in points.iter().enumerate() {
        let own = labels[i];
        if sizes[&own] == 1 {
            continue;
        }

        sums.clear();
        for (j, q) in points.iter().enumerate() {
            if i != j {
                *sums.entry(labels[j]).or_insert(0.0) += p.euclidean_distance(q)?;
            }
        }

        let a = sums.get(&own).copied().unwrap_or(0.0) / (sizes[&own] - 1) as Float;
        let b = sums
            .iter()
            .filter(|&(&l, _)| l != own)
            .map(|(l, &s)| s / sizes[l] as Float)
            .fold(Float::INFINITY, Float::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as Float)
}
