//! Lower-bound oracle: cut-strengthened relaxed solves per scenario.

use std::collections::HashSet;

use scendec_lp::{solve, LpSettings, SolveStatus};

use crate::error::{DecompError, DecompResult};
use crate::scenario::{ScenarioContext, TemplateLayout};
use crate::solution::FirstStageSolution;

/// Outcome of one lower-bounding pass.
#[derive(Debug, Clone)]
pub struct LowerBoundOutcome {
    /// Probability-weighted lower bound; `+inf` when any scenario's
    /// cut-strengthened relaxation is infeasible (region exhausted).
    pub lower_bound: f64,

    /// Deduplicated first-stage candidates harvested from the scenario
    /// solves, in first-seen scenario order.
    pub candidates: Vec<FirstStageSolution>,
}

impl LowerBoundOutcome {
    /// True if the cut-strengthened feasible region is exhausted.
    pub fn exhausted(&self) -> bool {
        self.lower_bound.is_infinite()
    }
}

/// Solve every scenario's relaxed cut-accumulating variant and aggregate.
///
/// The relaxation with accumulated no-good cuts outer-approximates the true
/// feasible region, so the probability-weighted sum of scenario objectives is
/// a valid lower bound. The per-scenario results are computed independently
/// and folded afterwards; scenarios share no state here.
pub fn solve_lower_bound(
    contexts: &[ScenarioContext],
    layout: &TemplateLayout,
    probability: f64,
    settings: &LpSettings,
) -> DecompResult<LowerBoundOutcome> {
    let mut per_scenario = Vec::with_capacity(contexts.len());
    for ctx in contexts {
        let sol = solve(&ctx.lower, settings)?;
        match sol.status {
            SolveStatus::Infeasible => {
                // One exhausted scenario exhausts the aggregate; remaining
                // scenarios need not be solved.
                return Ok(LowerBoundOutcome {
                    lower_bound: f64::INFINITY,
                    candidates: Vec::new(),
                });
            }
            SolveStatus::Optimal => {
                let first_stage: Vec<f64> = layout
                    .first_stage
                    .iter()
                    .map(|&var| sol.x[var])
                    .collect();
                per_scenario.push((sol.objective, FirstStageSolution::from_point(&first_stage)));
            }
            status => {
                return Err(DecompError::UnexpectedStatus {
                    scenario: ctx.index,
                    status,
                });
            }
        }
    }

    let lower_bound = per_scenario
        .iter()
        .map(|(obj, _)| probability * obj)
        .sum();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for (_, x) in per_scenario {
        if seen.insert(x.clone()) {
            candidates.push(x);
        }
    }

    Ok(LowerBoundOutcome {
        lower_bound,
        candidates,
    })
}
