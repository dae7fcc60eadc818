//! Compact LP/MILP backend for the scenario decomposition layer.
//!
//! The decomposition core consumes this crate through a narrow contract:
//! build a [`Model`], deep-copy it with `Clone`, mutate right-hand sides,
//! bounds and domains by id, append cut rows, and call [`solve`]. Models with
//! integer or binary domains go through depth-first branch-and-bound on top
//! of a bounded-variable two-phase simplex; pure LPs hit the simplex
//! directly. Every solve is deterministic.

#![warn(missing_docs)]

mod branch;
mod error;
mod model;
mod settings;
mod simplex;
mod solution;

pub use error::{LpError, LpResult};
pub use model::{Constraint, ConstraintId, Domain, Model, Sense, VarId, Variable};
pub use settings::LpSettings;
pub use solution::{Solution, SolveStatus};

/// Solve a model to optimality.
///
/// Returns `Ok` with status `Optimal`, `Infeasible` or `Unbounded`;
/// resource exhaustion (pivot, node or time limits) is an `Err` because the
/// caller's bound bookkeeping is only sound for exact solves.
pub fn solve(model: &Model, settings: &LpSettings) -> LpResult<Solution> {
    model.validate()?;
    if model.has_integer_vars() {
        branch::branch_and_bound(model, settings)
    } else {
        let (lb, ub) = model.effective_bounds();
        simplex::solve_relaxation(model, &lb, &ub, settings)
    }
}
