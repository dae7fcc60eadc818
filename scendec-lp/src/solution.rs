//! Solve status and solution types.

/// Status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found within tolerance.
    Optimal,

    /// Problem is infeasible.
    Infeasible,

    /// Problem is unbounded below.
    Unbounded,
}

impl SolveStatus {
    /// Returns true if a usable point was produced.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

/// Result of a solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solve status.
    pub status: SolveStatus,

    /// Objective value (meaningful only when status is Optimal).
    pub objective: f64,

    /// Primal point in variable-id order (empty unless Optimal).
    pub x: Vec<f64>,
}

impl Solution {
    /// An infeasible outcome.
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            objective: f64::INFINITY,
            x: Vec::new(),
        }
    }

    /// An unbounded outcome.
    pub fn unbounded() -> Self {
        Self {
            status: SolveStatus::Unbounded,
            objective: f64::NEG_INFINITY,
            x: Vec::new(),
        }
    }

    /// An optimal outcome.
    pub fn optimal(x: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective,
            x,
        }
    }
}
