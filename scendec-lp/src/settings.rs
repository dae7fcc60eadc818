//! Configuration settings for the LP/MILP backend.

/// Solver settings.
///
/// One instance is shared by the simplex and the branch-and-bound layer;
/// the branch-and-bound limits are ignored for pure LPs.
#[derive(Debug, Clone)]
pub struct LpSettings {
    /// Maximum simplex pivots per relaxation solve.
    pub max_pivots: usize,

    /// Maximum branch-and-bound nodes per solve.
    pub max_nodes: u64,

    /// Per-solve time budget in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    /// Integer feasibility tolerance.
    /// A variable is considered integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    /// Print progress information.
    pub verbose: bool,
}

impl Default for LpSettings {
    fn default() -> Self {
        Self {
            max_pivots: 50_000,
            max_nodes: 1_000_000,
            time_limit_ms: None,
            int_feas_tol: 1e-6,
            verbose: false,
        }
    }
}

impl LpSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        let mut s = Self::default();
        s.verbose = true;
        s
    }

    /// Set time budget in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set maximum branch-and-bound nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }
}
