/// Scalar type used by every engine.
pub type Float = f64;
/// Dense row-major view of a dataset or derived matrix.
pub type Matrix = nalgebra::DMatrix<Float>;
pub type Vector = nalgebra::DVector<Float>;
/// Cluster index of a single point.
pub type Label = usize;
/// One label per dataset row, in row order.
pub type Predictions = Vec<Label>;
