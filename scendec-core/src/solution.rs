//! First-stage solution value type, incumbent tracking and run results.

/// A first-stage binary decision vector over servers.
///
/// Value type with `Eq`/`Hash` so candidate sets deduplicate exact matches.
/// Construction from a solver point rounds each coordinate to {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FirstStageSolution(Vec<u8>);

impl FirstStageSolution {
    /// Build from raw binary values.
    pub fn new(values: Vec<u8>) -> Self {
        debug_assert!(values.iter().all(|&v| v <= 1));
        Self(values)
    }

    /// Build from a solver point, rounding to binary.
    pub fn from_point(values: &[f64]) -> Self {
        Self(values.iter().map(|&v| if v >= 0.5 { 1 } else { 0 }).collect())
    }

    /// Number of servers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Binary values.
    pub fn values(&self) -> &[u8] {
        &self.0
    }

    /// Value of coordinate `j` as a bound (0.0 or 1.0).
    pub fn bound(&self, j: usize) -> f64 {
        f64::from(self.0[j])
    }
}

/// Tracks the best certified feasible solution found so far.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Best solution, if any.
    pub solution: Option<FirstStageSolution>,

    /// Probability-weighted objective of the incumbent; +inf until one exists.
    pub value: f64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Create an empty incumbent.
    pub fn new() -> Self {
        Self {
            solution: None,
            value: f64::INFINITY,
        }
    }

    /// True if a feasible solution has been certified.
    pub fn exists(&self) -> bool {
        self.solution.is_some()
    }

    /// Accept a solution if it strictly improves the incumbent.
    ///
    /// Returns true on improvement.
    pub fn update(&mut self, x: &FirstStageSolution, value: f64) -> bool {
        if value < self.value {
            self.solution = Some(x.clone());
            self.value = value;
            true
        } else {
            false
        }
    }
}

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompStatus {
    /// Bounds met within tolerance; the incumbent is certified optimal
    /// for the heuristic's search space.
    Converged,

    /// Iteration cap reached with an open gap; the incumbent is a
    /// heuristic (non-certified) value.
    IterationLimit,

    /// Accumulated cuts made every scenario relaxation infeasible; the
    /// candidate region is exhausted and the incumbent is the final answer.
    Exhausted,

    /// The run ended without ever certifying a feasible solution.
    NoSolution,
}

impl DecompStatus {
    /// True if the reported value is certified rather than heuristic.
    pub fn is_certified(&self) -> bool {
        matches!(self, DecompStatus::Converged | DecompStatus::Exhausted)
    }

    /// True if a feasible solution is attached to the report.
    pub fn has_solution(&self) -> bool {
        !matches!(self, DecompStatus::NoSolution)
    }
}

/// Final report of a decomposition run.
#[derive(Debug, Clone)]
pub struct DecompReport {
    /// Terminal status.
    pub status: DecompStatus,

    /// Probability-weighted objective estimate (equals `upper_bound`;
    /// +inf when no feasible solution was found).
    pub objective: f64,

    /// Final lower bound (+inf when the region was exhausted).
    pub lower_bound: f64,

    /// Final upper bound.
    pub upper_bound: f64,

    /// Best first-stage decision, if any.
    pub best: Option<FirstStageSolution>,

    /// Outer iterations performed.
    pub iterations: usize,

    /// Total no-good cuts added across all scenarios.
    pub cuts_added: usize,

    /// Wall-clock time of the loop in milliseconds (monotonic).
    pub solve_time_ms: u64,

    /// Per-iteration `(lower_bound, upper_bound)` pairs, in order.
    pub history: Vec<(f64, f64)>,
}
