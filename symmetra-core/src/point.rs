use std::fmt;
use std::ops::Mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Float, Matrix, Result, SymmetraError, Vector};

/// Decimal digits centroids are rounded to after every K-Means update.
///
/// Convergence is decided by exact equality of rounded centroids, so this
/// value must not drift between the rounding and the comparison.
pub const CENTROID_DECIMALS: u32 = 4;

/// A fixed-dimension point in `D`-dimensional real space.
///
/// `Point` is a plain value type: it carries no cluster assignment. Engines
/// that assign points to clusters keep their own label vector indexed
/// parallel to the dataset.
///
/// # Dimension checks
///
/// Every binary operation between two points requires equal dimension and
/// returns [`SymmetraError::DimensionMismatch`] otherwise. Unary operations
/// (scaling, powers, rounding) cannot fail.
///
/// # Equality
///
/// Two points are equal when they have the same dimension and bitwise-equal
/// components under `f64` equality. Round both sides first (see
/// [`Point::round`]) when comparing computed means.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    components: Vector,
}

impl Point {
    pub fn new(components: Vec<Float>) -> Self {
        Self {
            components: Vector::from_vec(components),
        }
    }

    pub fn from_slice(components: &[Float]) -> Self {
        Self {
            components: Vector::from_column_slice(components),
        }
    }

    /// Copies row `i` of `x` into a new point.
    ///
    /// # Panics
    ///
    /// Panics if `i >= x.nrows()`, like any out-of-bounds matrix access.
    pub fn from_row(x: &Matrix, i: usize) -> Self {
        Self {
            components: Vector::from_iterator(x.ncols(), x.row(i).iter().copied()),
        }
    }

    /// The origin of `dim`-dimensional space.
    pub fn zeros(dim: usize) -> Self {
        Self {
            components: Vector::zeros(dim),
        }
    }

    pub fn dim(&self) -> usize {
        self.components.len()
    }

    pub fn as_slice(&self) -> &[Float] {
        self.components.as_slice()
    }

    /// Sum of all components.
    pub fn sum(&self) -> Float {
        self.components.sum()
    }

    fn check_dim(&self, other: &Point) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(SymmetraError::DimensionMismatch {
                expected: self.dim(),
                got: other.dim(),
            });
        }
        Ok(())
    }

    /// Element-wise `self + other`.
    pub fn checked_add(&self, other: &Point) -> Result<Point> {
        self.check_dim(other)?;
        Ok(Point {
            components: &self.components + &other.components,
        })
    }

    /// Element-wise `self - other`.
    pub fn checked_sub(&self, other: &Point) -> Result<Point> {
        self.check_dim(other)?;
        Ok(Point {
            components: &self.components - &other.components,
        })
    }

    /// Multiplies every component by `factor`.
    pub fn scale(&self, factor: Float) -> Point {
        Point {
            components: &self.components * factor,
        }
    }

    /// Raises every component to `exponent`.
    pub fn powf(&self, exponent: Float) -> Point {
        Point {
            components: self.components.map(|c| c.powf(exponent)),
        }
    }

    /// Rounds every component to `decimals` digits after the decimal point,
    /// halves away from zero.
    pub fn round(&self, decimals: u32) -> Point {
        let factor = (10.0 as Float).powi(decimals as i32);
        Point {
            components: self.components.map(|c| (c * factor).round() / factor),
        }
    }

    /// Squared Euclidean distance, `Σ (aᵢ - bᵢ)²`.
    pub fn squared_distance(&self, other: &Point) -> Result<Float> {
        self.check_dim(other)?;
        Ok(self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| {
                let diff = a - b;
                diff * diff
            })
            .sum())
    }

    /// Euclidean distance, `sqrt(Σ (aᵢ - bᵢ)²)`.
    pub fn euclidean_distance(&self, other: &Point) -> Result<Float> {
        Ok(self.squared_distance(other)?.sqrt())
    }

    /// Stacks `points` as the rows of a matrix.
    ///
    /// # Errors
    ///
    /// - [`SymmetraError::DimensionMismatch`] if the points differ in dimension.
    pub fn stack(points: &[Point]) -> Result<Matrix> {
        let Some(first) = points.first() else {
            return Ok(Matrix::zeros(0, 0));
        };
        for p in points {
            first.check_dim(p)?;
        }
        Ok(Matrix::from_fn(points.len(), first.dim(), |i, j| {
            points[i].components[j]
        }))
    }
}

impl From<Vec<Float>> for Point {
    fn from(components: Vec<Float>) -> Self {
        Point::new(components)
    }
}

impl Mul<Float> for &Point {
    type Output = Point;

    fn mul(self, factor: Float) -> Point {
        self.scale(factor)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:.4}", c)?;
        }
        Ok(())
    }
}
