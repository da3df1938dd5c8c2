use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymmetraError {
    /// IO-related failures (file not found, unreadable, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset text that could not be parsed into numbers
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Out-of-range K, max_iter, epsilon or similar
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: String, value: String },

    /// Arithmetic between points of different dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Matrix shapes that do not agree
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Dataset has zero rows
    #[error("dataset contains no points")]
    EmptyData,

    /// A K-Means cluster received no members
    #[error("cluster {cluster} has no members")]
    EmptyCluster { cluster: usize },

    /// Zero degree on the diagonal; D^(-1/2) is undefined
    #[error("degree of row {row} is zero")]
    SingularDegree { row: usize },

    /// Near-zero denominator in the multiplicative update
    #[error("degenerate factor entry ({row}, {col})")]
    DegenerateFactor { row: usize, col: usize },

    /// NaN or otherwise forbidden values
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
}

pub type Result<T> = std::result::Result<T, SymmetraError>;

impl SymmetraError {
    pub fn invalid_parameter(name: &str, value: impl ToString) -> Self {
        SymmetraError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
        }
    }
}
