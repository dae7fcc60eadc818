//! Linear model representation and mutation.
//!
//! The model is the unit the decomposition layer copies and mutates:
//! deep copy via `Clone`, right-hand-side overwrite by constraint id,
//! bound and domain changes by variable id, and cut rows appended through
//! [`Model::add_constraint`]. Name lookups exist for resolving a layout
//! once after parsing; all hot paths address rows and columns by index.

use crate::error::{LpError, LpResult};

/// Handle for a variable (column index).
pub type VarId = usize;

/// Handle for a constraint (row index).
pub type ConstraintId = usize;

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Continuous variable
    Continuous,
    /// Integer variable
    Integer,
    /// Binary variable (0 or 1)
    Binary,
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// a'x <= rhs
    Le,
    /// a'x = rhs
    Eq,
    /// a'x >= rhs
    Ge,
}

/// A decision variable.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Name (kept for diagnostics and one-time layout resolution).
    pub name: String,
    /// Lower bound.
    pub lb: f64,
    /// Upper bound.
    pub ub: f64,
    /// Objective coefficient (minimization).
    pub obj: f64,
    /// Domain.
    pub domain: Domain,
}

/// A linear constraint: sparse row over variable ids.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name (diagnostics / layout resolution only).
    pub name: String,
    /// Nonzero coefficients as (variable, value) pairs.
    pub coefs: Vec<(VarId, f64)>,
    /// Sense.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

/// A linear optimization model (minimization).
///
/// Deep copies are plain `Clone`; a copy shares nothing with its source.
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    vars: Vec<Variable>,
    constrs: Vec<Constraint>,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constrs: Vec::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a variable, returning its id. Ids are assigned in insertion order.
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        lb: f64,
        ub: f64,
        obj: f64,
        domain: Domain,
    ) -> VarId {
        let id = self.vars.len();
        self.vars.push(Variable {
            name: name.into(),
            lb,
            ub,
            obj,
            domain,
        });
        id
    }

    /// Add a linear constraint, returning its id.
    pub fn add_constraint(
        &mut self,
        coefs: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
        name: impl Into<String>,
    ) -> ConstraintId {
        let id = self.constrs.len();
        self.constrs.push(Constraint {
            name: name.into(),
            coefs,
            sense,
            rhs,
        });
        id
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constrs.len()
    }

    /// Variables in id order.
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    /// Constraints in id order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constrs
    }

    /// Variable by id.
    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id]
    }

    /// Constraint by id.
    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constrs[id]
    }

    /// Overwrite a constraint's right-hand side.
    pub fn set_rhs(&mut self, id: ConstraintId, rhs: f64) {
        self.constrs[id].rhs = rhs;
    }

    /// Overwrite a variable's bounds.
    pub fn set_bounds(&mut self, id: VarId, lb: f64, ub: f64) {
        let v = &mut self.vars[id];
        v.lb = lb;
        v.ub = ub;
    }

    /// Overwrite a variable's domain.
    pub fn set_domain(&mut self, id: VarId, domain: Domain) {
        self.vars[id].domain = domain;
    }

    /// Linear-scan name lookup for a variable.
    ///
    /// Intended for one-time layout resolution after parsing, not per-solve use.
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.vars.iter().position(|v| v.name == name)
    }

    /// Linear-scan name lookup for a constraint.
    pub fn constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constrs.iter().position(|c| c.name == name)
    }

    /// True if any variable has an integer or binary domain.
    pub fn has_integer_vars(&self) -> bool {
        self.vars
            .iter()
            .any(|v| matches!(v.domain, Domain::Integer | Domain::Binary))
    }

    /// Ids of integer and binary variables.
    pub fn integer_vars(&self) -> Vec<VarId> {
        self.vars
            .iter()
            .enumerate()
            .filter(|(_, v)| matches!(v.domain, Domain::Integer | Domain::Binary))
            .map(|(i, _)| i)
            .collect()
    }

    /// Effective bound vectors with binary domains clamped to [0, 1].
    pub fn effective_bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let mut lb = Vec::with_capacity(self.vars.len());
        let mut ub = Vec::with_capacity(self.vars.len());
        for v in &self.vars {
            if v.domain == Domain::Binary {
                lb.push(v.lb.max(0.0));
                ub.push(v.ub.min(1.0));
            } else {
                lb.push(v.lb);
                ub.push(v.ub);
            }
        }
        (lb, ub)
    }

    /// Objective value of a point.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.vars.iter().zip(x).map(|(v, xi)| v.obj * xi).sum()
    }

    /// Check structural consistency: coefficient ids in range, finite data.
    pub fn validate(&self) -> LpResult<()> {
        let n = self.vars.len();
        for (i, c) in self.constrs.iter().enumerate() {
            if !c.rhs.is_finite() {
                return Err(LpError::InvalidModel(format!(
                    "constraint {} has non-finite rhs",
                    i
                )));
            }
            for &(var, val) in &c.coefs {
                if var >= n {
                    return Err(LpError::InvalidModel(format!(
                        "constraint {} references variable {} but model has {}",
                        i, var, n
                    )));
                }
                if !val.is_finite() {
                    return Err(LpError::InvalidModel(format!(
                        "constraint {} has non-finite coefficient on variable {}",
                        i, var
                    )));
                }
            }
        }
        for (j, v) in self.vars.iter().enumerate() {
            if !v.obj.is_finite() {
                return Err(LpError::InvalidModel(format!(
                    "variable {} has non-finite objective coefficient",
                    j
                )));
            }
        }
        Ok(())
    }
}
