use thiserror::Error;

/// Error types for the simplex and its minimizer
#[derive(Debug, Error)]
pub enum MinimizerError {
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("No points given")]
    EmptyInput,
    #[error("Simplex already holds {capacity} points")]
    FillOverflow { capacity: usize },
    #[error("Function evaluation returned invalid value")]
    FunctionEvaluationError,
    #[error("Invalid dimension or empty vector")]
    InvalidDimension,
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Trace output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Value {value} does not improve on the worst evaluation {worst}")]
    NonImprovingValue { value: f64, worst: f64 },
    #[error("Simplex holds {filled} of {capacity} points")]
    NotInitialized { filled: usize, capacity: usize },
}
