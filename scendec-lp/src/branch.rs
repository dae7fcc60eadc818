//! Depth-first branch-and-bound over integer and binary domains.

use std::time::Instant;

use crate::error::{LpError, LpResult};
use crate::model::Model;
use crate::settings::LpSettings;
use crate::simplex::solve_relaxation;
use crate::solution::{Solution, SolveStatus};

/// One open node: the bound tightenings accumulated on the path from the root.
struct Node {
    lb: Vec<f64>,
    ub: Vec<f64>,
    depth: usize,
}

/// Solve a model with integer variables to optimality by branch-and-bound.
///
/// Branching is most-fractional, search order is depth-first with the
/// down-branch explored first, so repeated solves of the same model are
/// deterministic.
pub(crate) fn branch_and_bound(model: &Model, settings: &LpSettings) -> LpResult<Solution> {
    let integers = model.integer_vars();
    let (root_lb, root_ub) = model.effective_bounds();

    if integers.is_empty() {
        return solve_relaxation(model, &root_lb, &root_ub, settings);
    }

    let start = Instant::now();
    let mut incumbent: Option<(f64, Vec<f64>)> = None;
    let mut nodes: u64 = 0;

    let mut stack = vec![Node {
        lb: root_lb,
        ub: root_ub,
        depth: 0,
    }];

    while let Some(node) = stack.pop() {
        nodes += 1;
        if nodes > settings.max_nodes {
            return Err(LpError::NodeLimit);
        }
        if let Some(limit) = settings.time_limit_ms {
            if start.elapsed().as_millis() as u64 >= limit {
                return Err(LpError::TimeLimit);
            }
        }

        let relax = solve_relaxation(model, &node.lb, &node.ub, settings)?;
        match relax.status {
            SolveStatus::Infeasible => continue,
            SolveStatus::Unbounded => {
                // An unbounded relaxation at any node means the integer
                // problem is unbounded or ill-posed; report it as such.
                return Ok(Solution::unbounded());
            }
            SolveStatus::Optimal => {}
        }

        // Prune against the incumbent.
        if let Some((best, _)) = &incumbent {
            if relax.objective >= best - 1e-9 {
                continue;
            }
        }

        // Most-fractional branching variable.
        let mut branch_var: Option<(usize, f64)> = None;
        let mut best_frac = settings.int_feas_tol;
        for &j in &integers {
            let val = relax.x[j];
            let frac = (val - val.round()).abs();
            if frac > best_frac {
                best_frac = frac;
                branch_var = Some((j, val));
            }
        }

        let Some((j, val)) = branch_var else {
            // Integral point; round off residual fractionality and accept.
            let mut x = relax.x.clone();
            for &k in &integers {
                x[k] = x[k].round();
            }
            let obj = model.objective_value(&x);
            let improved = match &incumbent {
                None => true,
                Some((best, _)) => obj < best - 1e-9,
            };
            if improved {
                if settings.verbose {
                    log::debug!("b&b: node {} new incumbent obj {:.6e}", nodes, obj);
                }
                incumbent = Some((obj, x));
            }
            continue;
        };

        // Push up-branch first so the down-branch is explored first.
        let mut up = Node {
            lb: node.lb.clone(),
            ub: node.ub.clone(),
            depth: node.depth + 1,
        };
        up.lb[j] = val.ceil();
        stack.push(up);

        let mut down = Node {
            lb: node.lb,
            ub: node.ub,
            depth: node.depth + 1,
        };
        down.ub[j] = val.floor();
        stack.push(down);
    }

    if settings.verbose {
        log::debug!("b&b: explored {} nodes", nodes);
    }

    match incumbent {
        Some((obj, x)) => Ok(Solution::optimal(x, obj)),
        None => Ok(Solution::infeasible()),
    }
}
