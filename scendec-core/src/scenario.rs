//! Per-scenario model variants and the bound-fixing utility.
//!
//! Each scenario owns three copies of the structural template, differing only
//! in recourse right-hand sides, second-stage domain and accumulated cuts:
//!
//! - `lower`: continuous second stage, grows no-good cuts, lower bounding;
//! - `screening`: continuous second stage, no cuts, cheap upper-bound screen;
//! - `confirming`: integer second stage, no cuts, certifies feasible values.

use scendec_lp::{ConstraintId, Domain, Model, VarId};

use crate::error::{DecompError, DecompResult};
use crate::instance::Instance;
use crate::solution::FirstStageSolution;

/// Structured addressing into the template, resolved once at construction.
///
/// All per-iteration work addresses variables and rows through these integer
/// ids; names are never parsed after this point.
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    /// First-stage (server) variable ids, in server order.
    pub first_stage: Vec<VarId>,

    /// Second-stage (recourse) variable ids.
    pub second_stage: Vec<VarId>,

    /// Ids of the client demand rows whose right-hand sides carry the
    /// scenario realization, in client order.
    pub client_rows: Vec<ConstraintId>,
}

impl TemplateLayout {
    /// Resolve the layout from the SSLP naming convention: first-stage
    /// variables `x_1..x_n`, client rows `c<2 + nServer + j>` for client `j`.
    ///
    /// Name lookups happen exactly once, here.
    pub fn resolve(model: &Model, instance: &Instance) -> DecompResult<Self> {
        let mut first_stage = Vec::with_capacity(instance.n_server());
        for k in 1..=instance.n_server() {
            let name = format!("x_{}", k);
            let id = model.var_by_name(&name).ok_or_else(|| {
                DecompError::InvalidInstance(format!(
                    "template has no first-stage variable '{}'",
                    name
                ))
            })?;
            first_stage.push(id);
        }

        let mut client_rows = Vec::with_capacity(instance.n_client());
        for j in 0..instance.n_client() {
            let name = format!("c{}", 2 + instance.n_server() + j);
            let id = model.constraint_by_name(&name).ok_or_else(|| {
                DecompError::InvalidInstance(format!("template has no client row '{}'", name))
            })?;
            client_rows.push(id);
        }

        let second_stage = (0..model.num_vars())
            .filter(|id| !first_stage.contains(id))
            .collect();

        Ok(Self {
            first_stage,
            second_stage,
            client_rows,
        })
    }
}

/// One scenario's bundle of model variants plus its cut counter.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// Scenario index.
    pub index: usize,

    /// Relaxed cut-accumulating variant (lower bounding).
    pub lower: Model,

    /// Relaxed screening variant (no cuts).
    pub screening: Model,

    /// Integer confirming variant (no cuts).
    pub confirming: Model,

    /// Number of no-good cuts added to `lower` so far. Only grows.
    pub cut_count: usize,
}

/// Derive all scenario contexts from the structural template.
///
/// Every variant of every scenario is an independent deep copy sharing the
/// template's variable and constraint indexing; only the client-row
/// right-hand sides, the second-stage domain and (later) cuts differ.
pub fn build_contexts(
    template: &Model,
    layout: &TemplateLayout,
    instance: &Instance,
) -> DecompResult<Vec<ScenarioContext>> {
    if layout.first_stage.len() != instance.n_server() {
        return Err(DecompError::InvalidInstance(format!(
            "layout has {} first-stage variables, instance has {} servers",
            layout.first_stage.len(),
            instance.n_server()
        )));
    }
    if layout.client_rows.len() != instance.n_client() {
        return Err(DecompError::InvalidInstance(format!(
            "layout has {} client rows, instance has {} clients",
            layout.client_rows.len(),
            instance.n_client()
        )));
    }

    let mut contexts = Vec::with_capacity(instance.n_scen());
    for s in 0..instance.n_scen() {
        let mut relaxed = template.clone();
        for (j, &row) in layout.client_rows.iter().enumerate() {
            relaxed.set_rhs(row, instance.recourse(s, j) as f64);
        }
        for &var in &layout.second_stage {
            relaxed.set_domain(var, Domain::Continuous);
        }

        let screening = relaxed.clone();

        let mut confirming = relaxed.clone();
        for &var in &layout.second_stage {
            confirming.set_domain(var, Domain::Integer);
        }

        contexts.push(ScenarioContext {
            index: s,
            lower: relaxed,
            screening,
            confirming,
            cut_count: 0,
        });
    }
    Ok(contexts)
}

/// Pin every first-stage variable of `model` to the candidate's value.
///
/// Setting lower bound equal to upper bound makes the solver evaluate
/// exactly that first-stage decision; this is what forces the otherwise
/// independent scenario subproblems to agree on one global decision.
pub fn fix_first_stage(model: &mut Model, first_stage: &[VarId], x: &FirstStageSolution) {
    debug_assert_eq!(first_stage.len(), x.len());
    for (j, &var) in first_stage.iter().enumerate() {
        let v = x.bound(j);
        model.set_bounds(var, v, v);
    }
}
