//! Error types

use thiserror::Error;

/// Number theory errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NtheoryError {
    /// Value outside an inclusive range
    #[error("expected {lower} <= {n} <= {upper}")]
    OutOfBounds { n: i128, lower: i128, upper: i128 },

    /// Value must be strictly positive
    #[error("expected {n} > 0")]
    NotPositive { n: i128 },

    /// Value must be zero or more
    #[error("expected {n} >= 0")]
    Negative { n: i128 },

    /// Canonical division with a remainder
    #[error("{dividend} is not divisible by {divisor}")]
    NotDivisible { dividend: String, divisor: String },

    /// Result does not fit in the integer type
    #[error("integer overflow computing {what}")]
    Overflow { what: String },

    /// Dirichlet inverse requested for a function with f(1) = 0
    #[error("{function} has no Dirichlet inverse: f(1) = 0")]
    NotInvertible { function: String },
}

/// Result alias
pub type Result<T> = std::result::Result<T, NtheoryError>;
