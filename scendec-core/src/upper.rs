//! Upper-bound evaluator: two-phase screening of candidate first stages.

use scendec_lp::{solve, LpSettings, Model, SolveStatus};

use crate::error::{DecompError, DecompResult};
use crate::scenario::{fix_first_stage, ScenarioContext, TemplateLayout};
use crate::solution::{FirstStageSolution, Incumbent};

/// Evaluate every candidate against the incumbent.
///
/// Per candidate: fix the first stage across all screening variants and sum
/// the relaxed values. Only when that screen beats the incumbent are the
/// integer confirming variants solved; a confirmed improvement updates the
/// incumbent. The screen is sound because the relaxed value of a fixed first
/// stage never exceeds its integer value.
///
/// A scenario reporting infeasible under a fixed candidate makes that
/// candidate's value `+inf` (it cannot improve the incumbent); the run
/// continues with the next candidate.
pub fn evaluate_candidates(
    contexts: &mut [ScenarioContext],
    layout: &TemplateLayout,
    candidates: &[FirstStageSolution],
    probability: f64,
    incumbent: &mut Incumbent,
    relaxed: &LpSettings,
    integer: &LpSettings,
) -> DecompResult<()> {
    for x in candidates {
        let screen = {
            for ctx in contexts.iter_mut() {
                fix_first_stage(&mut ctx.screening, &layout.first_stage, x);
            }
            sum_fixed_solves(contexts, |ctx| &ctx.screening, probability, relaxed)?
        };

        if screen >= incumbent.value {
            continue;
        }

        for ctx in contexts.iter_mut() {
            fix_first_stage(&mut ctx.confirming, &layout.first_stage, x);
        }
        let confirmed =
            sum_fixed_solves(contexts, |ctx| &ctx.confirming, probability, integer)?;

        if incumbent.update(x, confirmed) {
            log::debug!(
                "new incumbent {:?} value {:.6e} (screen {:.6e})",
                x.values(),
                confirmed,
                screen
            );
        }
    }
    Ok(())
}

/// Solve one variant across all scenarios with the first stage fixed and
/// fold the probability-weighted sum; `+inf` if any scenario is infeasible.
fn sum_fixed_solves<'a, F>(
    contexts: &'a [ScenarioContext],
    variant: F,
    probability: f64,
    settings: &LpSettings,
) -> DecompResult<f64>
where
    F: Fn(&'a ScenarioContext) -> &'a Model,
{
    let mut total = 0.0;
    for ctx in contexts {
        let sol = solve(variant(ctx), settings)?;
        match sol.status {
            SolveStatus::Optimal => total += probability * sol.objective,
            SolveStatus::Infeasible => return Ok(f64::INFINITY),
            status => {
                return Err(DecompError::UnexpectedStatus {
                    scenario: ctx.index,
                    status,
                })
            }
        }
    }
    Ok(total)
}
