pub mod error;
pub mod point;
pub mod types;

pub use types::{Float, Label, Matrix, Predictions, Vector};

pub use error::{Result, SymmetraError};

pub use point::{Point, CENTROID_DECIMALS};
