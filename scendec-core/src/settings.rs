//! Configuration settings for the decomposition driver.

use scendec_lp::LpSettings;

/// Decomposition settings.
#[derive(Debug, Clone)]
pub struct DecompSettings {
    /// Maximum outer iterations before giving up with a heuristic result.
    pub max_iterations: usize,

    /// Gap tolerance: the run converges when
    /// `upper_bound - lower_bound <= gap_tol`.
    pub gap_tol: f64,

    /// Settings for the relaxed solves (lower bounding and screening).
    pub relaxed: LpSettings,

    /// Settings for the confirming integer solves.
    pub integer: LpSettings,

    /// Print per-iteration progress.
    pub verbose: bool,
}

impl Default for DecompSettings {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            gap_tol: 1e-6,
            relaxed: LpSettings::default(),
            integer: LpSettings::default(),
            verbose: false,
        }
    }
}

impl DecompSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        let mut s = Self::default();
        s.verbose = true;
        s
    }

    /// Set the outer iteration cap.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set a per-solve time budget (seconds) on every scenario solve.
    ///
    /// A solve exceeding the budget aborts the run; there is no partial
    /// result from a truncated solve the bound bookkeeping could trust.
    pub fn with_solve_time_limit(mut self, seconds: f64) -> Self {
        self.relaxed = self.relaxed.with_time_limit(seconds);
        self.integer = self.integer.with_time_limit(seconds);
        self
    }
}
