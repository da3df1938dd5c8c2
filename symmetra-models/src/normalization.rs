use symmetra_core::{Float, Matrix, Result, SymmetraError};

/// Computes the **normalized similarity matrix** `W = D^(-1/2) · A · D^(-1/2)`.
///
/// Rather than forming `D^(-1/2)` and two dense products, each entry is
/// scaled directly:
///
/// ```text
/// sᵢ     = 1 / sqrt(D[i,i])
/// W[i,j] = A[i,j] · (sᵢ · sⱼ)
/// ```
///
/// The product `sᵢ · sⱼ` is formed first so that `W[i,j]` and `W[j,i]` are
/// bit-identical whenever `A` is symmetric. Zeros of `A` stay zero in `W`.
///
/// # Errors
///
/// - [`SymmetraError::ShapeMismatch`] if `a` is not square or `d` has a different shape
/// - [`SymmetraError::SingularDegree`] if some `D[i,i]` is zero, negative or
///   not finite (an isolated point with no similarity to any other)
///
/// # Complexity
///
/// - Time: `O(n²)`
/// - Space: `O(n²)` for the result
pub fn normalize(a: &Matrix, d: &Matrix) -> Result<Matrix> {
    let n = a.nrows();

    if !a.is_square() || d.shape() != a.shape() {
        return Err(SymmetraError::ShapeMismatch {
            expected: format!("{} x {} similarity and degree matrices", n, n),
            got: format!(
                "A is {} x {}, D is {} x {}",
                a.nrows(),
                a.ncols(),
                d.nrows(),
                d.ncols()
            ),
        });
    }

    let inv_sqrt = inverse_sqrt_degrees(d)?;

    Ok(Matrix::from_fn(n, n, |i, j| {
        a[(i, j)] * (inv_sqrt[i] * inv_sqrt[j])
    }))
}

fn inverse_sqrt_degrees(d: &Matrix) -> Result<Vec<Float>> {
    (0..d.nrows())
        .map(|i| {
            let deg = d[(i, i)];
            if !deg.is_finite() || deg <= 0.0 {
                return Err(SymmetraError::SingularDegree { row: i });
            }
            Ok(1.0 / deg.sqrt())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{degree, similarity};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_matches_definition() {
        let x = Matrix::from_row_slice(4, 2, &[0.0, 0.0, 0.5, 0.0, 0.0, 1.0, 1.5, 1.5]);
        let a = similarity(&x).unwrap();
        let d = degree(&a).unwrap();
        let w = normalize(&a, &d).unwrap();

        let mut d_inv_sqrt = Matrix::zeros(4, 4);
        for i in 0..4 {
            d_inv_sqrt[(i, i)] = 1.0 / d[(i, i)].sqrt();
        }
        let expected = &d_inv_sqrt * &a * &d_inv_sqrt;

        for i in 0..4 {
            for j in 0..4 {
                assert_abs_diff_eq!(w[(i, j)], expected[(i, j)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_normalize_is_symmetric_and_keeps_zero_diagonal() {
        let x = Matrix::from_row_slice(
            5,
            3,
            &[
                0.3, 1.2, 0.0, 1.0, 0.9, 0.4, 0.2, 0.2, 0.2, 2.0, 1.0, 0.0, 0.7, 0.1, 0.5,
            ],
        );
        let a = similarity(&x).unwrap();
        let w = normalize(&a, &degree(&a).unwrap()).unwrap();

        for i in 0..5 {
            assert_eq!(w[(i, i)], 0.0);
            for j in 0..5 {
                assert_eq!(w[(i, j)], w[(j, i)]);
            }
        }
    }

    #[test]
    fn test_normalize_two_points() {
        // With two points both degrees equal A[0,1], so W[0,1] = 1.
        let x = Matrix::from_row_slice(2, 1, &[0.0, 1.0]);
        let a = similarity(&x).unwrap();
        let w = normalize(&a, &degree(&a).unwrap()).unwrap();

        assert_abs_diff_eq!(w[(0, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_degree_row() {
        let a = Matrix::from_row_slice(3, 3, &[0.0, 0.5, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let d = degree(&a).unwrap();

        assert!(matches!(
            normalize(&a, &d),
            Err(SymmetraError::SingularDegree { row: 2 })
        ));
    }

    #[test]
    fn test_normalize_isolated_point_underflows_to_singular() {
        let x = Matrix::from_row_slice(3, 2, &[0.0, 0.0, 0.1, 0.0, 1000.0, 1000.0]);
        let a = similarity(&x).unwrap();
        let d = degree(&a).unwrap();

        assert!(matches!(
            normalize(&a, &d),
            Err(SymmetraError::SingularDegree { row: 2 })
        ));
    }

    #[test]
    fn test_normalize_shape_mismatch() {
        let a = Matrix::zeros(3, 3);
        let d = Matrix::identity(2, 2);
        assert!(matches!(
            normalize(&a, &d),
            Err(SymmetraError::ShapeMismatch { .. })
        ));
    }
}
