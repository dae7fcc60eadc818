//! Error types for the decomposition core.

use scendec_lp::{LpError, SolveStatus};
use thiserror::Error;

/// Errors that abort a decomposition run.
///
/// Scenario infeasibility in the lower-bounding step is NOT an error; it is
/// the algorithm's region-exhausted signal and surfaces as a terminal status.
#[derive(Error, Debug)]
pub enum DecompError {
    /// Missing or malformed instance base name
    #[error("Invalid instance name: {0}")]
    Config(String),

    /// Malformed structural or stochastic input file
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// Instance data inconsistent with itself or with the template
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// Solver failure (pivot/node/time limits, bad model); fatal, no retries
    #[error("Solver failure: {0}")]
    Solver(#[from] LpError),

    /// A solve returned a status the algorithm cannot use
    #[error("Scenario {scenario} solve returned unusable status {status:?}")]
    UnexpectedStatus {
        /// Scenario index.
        scenario: usize,
        /// Status reported by the backend.
        status: SolveStatus,
    },
}

/// Result type for decomposition operations.
pub type DecompResult<T> = Result<T, DecompError>;
