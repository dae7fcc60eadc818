//! Dense two-phase primal simplex with bounded variables.
//!
//! Variables are shifted to `y = x - lb >= 0` and finite upper bounds become
//! explicit rows, so the tableau works on the classic `Ay {<=,=,>=} b, y >= 0`
//! form. Pivoting uses Bland's rule throughout, which makes every solve
//! deterministic and cycle-free. Models here are small (a few hundred rows),
//! so a dense tableau is the simplest thing that is obviously correct.

use crate::error::{LpError, LpResult};
use crate::model::{Model, Sense};
use crate::settings::LpSettings;
use crate::solution::Solution;

const PIVOT_TOL: f64 = 1e-9;
const FEAS_TOL: f64 = 1e-7;

/// Solve the continuous relaxation of `model`, with `lb`/`ub` overriding the
/// variables' own bounds (the branch-and-bound layer tightens them per node).
pub(crate) fn solve_relaxation(
    model: &Model,
    lb: &[f64],
    ub: &[f64],
    settings: &LpSettings,
) -> LpResult<Solution> {
    let n = model.num_vars();
    debug_assert_eq!(lb.len(), n);
    debug_assert_eq!(ub.len(), n);

    for j in 0..n {
        if lb[j] > ub[j] + FEAS_TOL {
            return Ok(Solution::infeasible());
        }
        if !lb[j].is_finite() {
            return Err(LpError::InvalidModel(format!(
                "variable {} ({}) has no finite lower bound",
                j,
                model.var(j).name
            )));
        }
    }

    // Shifted rows: constraint rhs' = rhs - a'lb, plus one `y_j <= ub - lb`
    // row per finite upper bound.
    let mut rows: Vec<(Vec<f64>, Sense, f64)> = Vec::new();
    for c in model.constraints() {
        let mut coefs = vec![0.0; n];
        let mut shift = 0.0;
        for &(var, val) in &c.coefs {
            coefs[var] += val;
            shift += val * lb[var];
        }
        rows.push((coefs, c.sense, c.rhs - shift));
    }
    for j in 0..n {
        if ub[j].is_finite() {
            let mut coefs = vec![0.0; n];
            coefs[j] = 1.0;
            rows.push((coefs, Sense::Le, ub[j] - lb[j]));
        }
    }

    // Normalize so every rhs is nonnegative.
    for (coefs, sense, rhs) in &mut rows {
        if *rhs < 0.0 {
            for v in coefs.iter_mut() {
                *v = -*v;
            }
            *rhs = -*rhs;
            *sense = match *sense {
                Sense::Le => Sense::Ge,
                Sense::Ge => Sense::Le,
                Sense::Eq => Sense::Eq,
            };
        }
    }

    let m = rows.len();

    // Column layout: structural | slack/surplus | artificial | rhs.
    let num_slack = rows
        .iter()
        .filter(|(_, s, _)| matches!(s, Sense::Le | Sense::Ge))
        .count();
    let num_art = rows
        .iter()
        .filter(|(_, s, _)| matches!(s, Sense::Ge | Sense::Eq))
        .count();
    let art_start = n + num_slack;
    let total = n + num_slack + num_art;

    let mut a = vec![vec![0.0; total + 1]; m];
    let mut basis = vec![0usize; m];

    let mut slack_col = n;
    let mut art_col = art_start;
    for (r, (coefs, sense, rhs)) in rows.iter().enumerate() {
        a[r][..n].copy_from_slice(coefs);
        a[r][total] = *rhs;
        match sense {
            Sense::Le => {
                a[r][slack_col] = 1.0;
                basis[r] = slack_col;
                slack_col += 1;
            }
            Sense::Ge => {
                a[r][slack_col] = -1.0;
                slack_col += 1;
                a[r][art_col] = 1.0;
                basis[r] = art_col;
                art_col += 1;
            }
            Sense::Eq => {
                a[r][art_col] = 1.0;
                basis[r] = art_col;
                art_col += 1;
            }
        }
    }

    // Phase-1 cost row (minimize sum of artificials), reduced against the
    // initial artificial basis. Phase-2 cost row is carried through phase-1
    // pivots so phase 2 can start immediately.
    let mut cost1 = vec![0.0; total + 1];
    for col in art_start..total {
        cost1[col] = 1.0;
    }
    for r in 0..m {
        if basis[r] >= art_start {
            for col in 0..=total {
                cost1[col] -= a[r][col];
            }
        }
    }

    let mut cost2 = vec![0.0; total + 1];
    for j in 0..n {
        cost2[j] = model.var(j).obj;
    }

    let mut pivots = 0usize;

    // Phase 1
    match run_phase(
        &mut a,
        &mut basis,
        &mut cost1,
        &mut cost2,
        total,
        total + 1,
        &mut pivots,
        settings.max_pivots,
    )? {
        PhaseEnd::Optimal => {}
        PhaseEnd::Unbounded => {
            // Phase-1 objective is bounded below by zero; this cannot happen
            // with consistent data.
            return Err(LpError::Numerical(
                "phase-1 relaxation reported unbounded".into(),
            ));
        }
    }

    if -cost1[total] > FEAS_TOL {
        return Ok(Solution::infeasible());
    }

    // Drive artificials out of the basis where possible; rows where no
    // structural pivot exists are redundant and the artificial stays at zero.
    for r in 0..m {
        if basis[r] >= art_start {
            if let Some(c) = (0..art_start).find(|&c| a[r][c].abs() > PIVOT_TOL) {
                pivot(&mut a, &mut basis, &mut cost1, &mut cost2, r, c, total);
                pivots += 1;
            }
        }
    }

    // Phase 2: artificial columns are no longer eligible to enter.
    match run_phase(
        &mut a,
        &mut basis,
        &mut cost2,
        &mut cost1,
        art_start,
        total + 1,
        &mut pivots,
        settings.max_pivots,
    )? {
        PhaseEnd::Optimal => {}
        PhaseEnd::Unbounded => return Ok(Solution::unbounded()),
    }

    let mut x = lb.to_vec();
    for r in 0..m {
        if basis[r] < n {
            x[basis[r]] = lb[basis[r]] + a[r][total];
        }
    }
    let objective = model.objective_value(&x);

    if settings.verbose {
        log::debug!(
            "simplex: {} rows, {} cols, {} pivots, obj {:.6e}",
            m,
            total,
            pivots,
            objective
        );
    }

    Ok(Solution::optimal(x, objective))
}

enum PhaseEnd {
    Optimal,
    Unbounded,
}

/// Run simplex pivots on `cost` until optimal or unbounded.
///
/// Only columns below `eligible` may enter the basis. `other` is the
/// secondary cost row kept consistent through the same pivots.
#[allow(clippy::too_many_arguments)]
fn run_phase(
    a: &mut [Vec<f64>],
    basis: &mut [usize],
    cost: &mut [f64],
    other: &mut [f64],
    eligible: usize,
    width: usize,
    pivots: &mut usize,
    max_pivots: usize,
) -> LpResult<PhaseEnd> {
    let m = a.len();
    let rhs_col = width - 1;

    loop {
        // Bland: smallest eligible column with a negative reduced cost.
        let entering = (0..eligible).find(|&c| cost[c] < -PIVOT_TOL);
        let Some(c) = entering else {
            return Ok(PhaseEnd::Optimal);
        };

        // Ratio test; ties broken by smallest basis variable (Bland).
        let mut leave: Option<(usize, f64)> = None;
        for r in 0..m {
            if a[r][c] > PIVOT_TOL {
                let ratio = a[r][rhs_col] / a[r][c];
                let better = match leave {
                    None => true,
                    Some((lr, lratio)) => {
                        ratio < lratio - PIVOT_TOL
                            || (ratio <= lratio + PIVOT_TOL && basis[r] < basis[lr])
                    }
                };
                if better {
                    leave = Some((r, ratio));
                }
            }
        }
        let Some((r, _)) = leave else {
            return Ok(PhaseEnd::Unbounded);
        };

        pivot_raw(a, basis, cost, other, r, c, rhs_col);
        *pivots += 1;
        if *pivots > max_pivots {
            return Err(LpError::IterationLimit);
        }
    }
}

fn pivot(
    a: &mut [Vec<f64>],
    basis: &mut [usize],
    cost1: &mut [f64],
    cost2: &mut [f64],
    r: usize,
    c: usize,
    total: usize,
) {
    pivot_raw(a, basis, cost1, cost2, r, c, total);
}

/// Gauss-Jordan pivot on (r, c), updating both cost rows.
fn pivot_raw(
    a: &mut [Vec<f64>],
    basis: &mut [usize],
    cost1: &mut [f64],
    cost2: &mut [f64],
    r: usize,
    c: usize,
    rhs_col: usize,
) {
    let m = a.len();
    let piv = a[r][c];
    for col in 0..=rhs_col {
        a[r][col] /= piv;
    }
    for row in 0..m {
        if row != r {
            let factor = a[row][c];
            if factor.abs() > 0.0 {
                for col in 0..=rhs_col {
                    a[row][col] -= factor * a[r][col];
                }
            }
        }
    }
    let f1 = cost1[c];
    if f1.abs() > 0.0 {
        for col in 0..=rhs_col {
            cost1[col] -= f1 * a[r][col];
        }
    }
    let f2 = cost2[c];
    if f2.abs() > 0.0 {
        for col in 0..=rhs_col {
            cost2[col] -= f2 * a[r][col];
        }
    }
    basis[r] = c;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Domain;

    fn settings() -> LpSettings {
        LpSettings::default()
    }

    fn bounds(m: &Model) -> (Vec<f64>, Vec<f64>) {
        m.effective_bounds()
    }

    #[test]
    fn test_simple_lp() {
        // min -x - y s.t. x + y <= 1, 0 <= x,y <= 1 -> obj -1
        let mut m = Model::new("t");
        let x = m.add_var("x", 0.0, 1.0, -1.0, Domain::Continuous);
        let y = m.add_var("y", 0.0, 1.0, -1.0, Domain::Continuous);
        m.add_constraint(vec![(x, 1.0), (y, 1.0)], Sense::Le, 1.0, "cap");

        let (lb, ub) = bounds(&m);
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Optimal);
        assert!((sol.objective + 1.0).abs() < 1e-7);
        assert!((sol.x[0] + sol.x[1] - 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_equality_and_ge() {
        // min 2x + 3y s.t. x + y = 4, x >= 1, y >= 1 -> x=3, y=1, obj 9
        let mut m = Model::new("t");
        let x = m.add_var("x", 1.0, f64::INFINITY, 2.0, Domain::Continuous);
        let y = m.add_var("y", 1.0, f64::INFINITY, 3.0, Domain::Continuous);
        m.add_constraint(vec![(x, 1.0), (y, 1.0)], Sense::Eq, 4.0, "sum");

        let (lb, ub) = bounds(&m);
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Optimal);
        assert!((sol.objective - 9.0).abs() < 1e-7);
        assert!((sol.x[0] - 3.0).abs() < 1e-7);
        assert!((sol.x[1] - 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_infeasible() {
        // x <= 1 and x >= 2
        let mut m = Model::new("t");
        let x = m.add_var("x", 0.0, 1.0, 1.0, Domain::Continuous);
        m.add_constraint(vec![(x, 1.0)], Sense::Ge, 2.0, "low");

        let (lb, ub) = bounds(&m);
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Infeasible);
    }

    #[test]
    fn test_unbounded() {
        // min -x, x >= 0, no upper bound
        let mut m = Model::new("t");
        m.add_var("x", 0.0, f64::INFINITY, -1.0, Domain::Continuous);

        let (lb, ub) = bounds(&m);
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Unbounded);
    }

    #[test]
    fn test_shifted_lower_bounds() {
        // min x + y s.t. x + y >= 5, x >= 2, y >= 1 -> obj 5
        let mut m = Model::new("t");
        let x = m.add_var("x", 2.0, 10.0, 1.0, Domain::Continuous);
        let y = m.add_var("y", 1.0, 10.0, 1.0, Domain::Continuous);
        m.add_constraint(vec![(x, 1.0), (y, 1.0)], Sense::Ge, 5.0, "cover");

        let (lb, ub) = bounds(&m);
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Optimal);
        assert!((sol.objective - 5.0).abs() < 1e-7);
    }

    #[test]
    fn test_fixed_variable_via_bounds() {
        // Fixing lb = ub pins the variable, the mechanism bound-fixing uses.
        let mut m = Model::new("t");
        let x = m.add_var("x", 0.0, 1.0, -3.0, Domain::Continuous);
        let y = m.add_var("y", 0.0, 1.0, -1.0, Domain::Continuous);
        m.add_constraint(vec![(x, 1.0), (y, 1.0)], Sense::Le, 2.0, "cap");

        let lb = vec![0.0, 0.0];
        let ub = vec![0.0, 1.0]; // x fixed at 0
        let sol = solve_relaxation(&m, &lb, &ub, &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Optimal);
        assert!(sol.x[0].abs() < 1e-9);
        assert!((sol.objective + 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_contradictory_bounds_infeasible() {
        let mut m = Model::new("t");
        m.add_var("x", 0.0, 1.0, 1.0, Domain::Continuous);
        let sol = solve_relaxation(&m, &[2.0], &[1.0], &settings()).unwrap();
        assert_eq!(sol.status, crate::SolveStatus::Infeasible);
    }
}
