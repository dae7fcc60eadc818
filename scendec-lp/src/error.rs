//! Error types for the LP/MILP backend.

use thiserror::Error;

/// Errors that can occur while building or solving a model.
#[derive(Error, Debug)]
pub enum LpError {
    /// Model validation failed
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Simplex pivot limit exceeded
    #[error("Simplex iteration limit exceeded")]
    IterationLimit,

    /// Branch-and-bound node limit exceeded
    #[error("Node limit exceeded")]
    NodeLimit,

    /// Per-solve time budget exceeded
    #[error("Time limit exceeded")]
    TimeLimit,

    /// Numerical difficulties during pivoting
    #[error("Numerical error: {0}")]
    Numerical(String),
}

/// Result type for LP operations.
pub type LpResult<T> = Result<T, LpError>;
