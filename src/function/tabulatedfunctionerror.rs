use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabulatedFunctionError {
    #[error("The lengths of the arrays are not the same: {x_len} x values, {y_len} y values")]
    DifferentLengthOfArrays { x_len: usize, y_len: usize },

    #[error("The array is not sorted in ascending order at index {index}")]
    ArrayIsNotSorted { index: usize },

    #[error("At least {required} points required, got {actual}")]
    NotEnoughPoints { required: usize, actual: usize },

    #[error("Non-finite x coordinate: {0}")]
    NonFiniteCoordinate(f64),

    #[error("Index: {index}, Size: {count}")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("X = {x} is outside the interpolation interval [{left_x}, {right_x}]")]
    Interpolation { x: f64, left_x: f64, right_x: f64 },

    #[error("X = {x} is less than the left bound {left_bound}")]
    BelowLeftBound { x: f64, left_bound: f64 },

    #[error("Division by zero in derivative calculation: interval {index} has length {distance}")]
    SingularInterval { index: usize, distance: f64 },

    #[error("Inconsistent functions: {0}")]
    InconsistentFunctions(GridMismatch),

    #[error("Invalid differentiation step: {0}")]
    InvalidStep(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Why two sample sets could not be combined elementwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridMismatch {
    Count { lhs: usize, rhs: usize },
    X { index: usize, lhs: f64, rhs: f64 },
}

impl std::fmt::Display for GridMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridMismatch::Count { lhs, rhs } => {
                write!(f, "point counts differ ({} != {})", lhs, rhs)
            }
            GridMismatch::X { index, lhs, rhs } => {
                write!(f, "x values differ at index {} ({} != {})", index, lhs, rhs)
            }
        }
    }
}

pub type TabulatedResult<T> = Result<T, TabulatedFunctionError>;
