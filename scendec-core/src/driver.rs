//! Decomposition driver: the iterate-until-convergence loop.
//!
//! `INIT -> LOWER_BOUND -> (exhausted exit) -> UPPER_BOUND -> CUT_GENERATION
//! -> LOWER_BOUND -> ... -> CONVERGED | ITERATION_LIMIT`.

use std::time::Instant;

use scendec_lp::Model;

use crate::cuts::add_no_good_cuts;
use crate::error::DecompResult;
use crate::instance::Instance;
use crate::lower::solve_lower_bound;
use crate::scenario::{build_contexts, ScenarioContext, TemplateLayout};
use crate::settings::DecompSettings;
use crate::solution::{DecompReport, DecompStatus, Incumbent};
use crate::upper::evaluate_candidates;

/// Owns the scenario contexts and the global bound bookkeeping.
pub struct Decomposition {
    contexts: Vec<ScenarioContext>,
    layout: TemplateLayout,
    probability: f64,
    settings: DecompSettings,

    incumbent: Incumbent,
    lower_bound: f64,
    iterations: usize,
    cuts_added: usize,
}

impl Decomposition {
    /// Build the driver: derives all scenario model variants from the
    /// structural template.
    pub fn new(
        template: &Model,
        layout: TemplateLayout,
        instance: &Instance,
        settings: DecompSettings,
    ) -> DecompResult<Self> {
        let contexts = build_contexts(template, &layout, instance)?;
        Ok(Self {
            contexts,
            layout,
            probability: instance.probability(),
            settings,
            incumbent: Incumbent::new(),
            lower_bound: f64::NEG_INFINITY,
            iterations: 0,
            cuts_added: 0,
        })
    }

    /// Current probability-weighted upper bound.
    pub fn upper_bound(&self) -> f64 {
        self.incumbent.value
    }

    /// Current probability-weighted lower bound.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Run the loop to a terminal state.
    pub fn run(&mut self) -> DecompResult<DecompReport> {
        let start = Instant::now();
        let mut history = Vec::new();

        let status = loop {
            // Converged: the incumbent meets the lower bound.
            if self.incumbent.value <= self.lower_bound + self.settings.gap_tol {
                break DecompStatus::Converged;
            }
            if self.iterations >= self.settings.max_iterations {
                break if self.incumbent.exists() {
                    DecompStatus::IterationLimit
                } else {
                    DecompStatus::NoSolution
                };
            }
            self.iterations += 1;

            // LOWER_BOUND
            let lower = solve_lower_bound(
                &self.contexts,
                &self.layout,
                self.probability,
                &self.settings.relaxed,
            )?;
            if lower.exhausted() {
                // The cut-strengthened region is empty: every first-stage
                // point still feasible has been evaluated or excluded, so
                // the incumbent (if any) is final.
                self.lower_bound = f64::INFINITY;
                history.push((self.lower_bound, self.incumbent.value));
                break if self.incumbent.exists() {
                    DecompStatus::Exhausted
                } else {
                    DecompStatus::NoSolution
                };
            }
            self.lower_bound = lower.lower_bound;

            // UPPER_BOUND
            evaluate_candidates(
                &mut self.contexts,
                &self.layout,
                &lower.candidates,
                self.probability,
                &mut self.incumbent,
                &self.settings.relaxed,
                &self.settings.integer,
            )?;

            // CUT_GENERATION
            self.cuts_added +=
                add_no_good_cuts(&mut self.contexts, &self.layout, &lower.candidates);

            history.push((self.lower_bound, self.incumbent.value));
            self.log_progress();
        };

        let solve_time_ms = start.elapsed().as_millis() as u64;
        if self.settings.verbose {
            log::info!(
                "finished: {:?} after {} iterations, {} cuts, {} ms",
                status,
                self.iterations,
                self.cuts_added,
                solve_time_ms
            );
        }

        Ok(DecompReport {
            status,
            objective: self.incumbent.value,
            lower_bound: self.lower_bound,
            upper_bound: self.incumbent.value,
            best: self.incumbent.solution.clone(),
            iterations: self.iterations,
            cuts_added: self.cuts_added,
            solve_time_ms,
            history,
        })
    }

    fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }
        log::info!(
            "iter {:>3} | lb {:>12.6e} | ub {:>12.6e} | cuts {}",
            self.iterations,
            self.lower_bound,
            self.incumbent.value,
            self.cuts_added
        );
    }
}

/// Convenience entry point: resolve the layout, build the driver, run it.
pub fn solve_instance(
    template: &Model,
    instance: &Instance,
    settings: DecompSettings,
) -> DecompResult<DecompReport> {
    let layout = TemplateLayout::resolve(template, instance)?;
    Decomposition::new(template, layout, instance, settings)?.run()
}
