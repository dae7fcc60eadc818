//! Scenario decomposition for two-stage stochastic 0-1 programs.
//!
//! An instance is a structural template (an SSLP-shaped MILP in MPS form)
//! plus a scenario file of client-row right-hand sides. The driver maintains
//! a probability-weighted lower bound from relaxed per-scenario solves whose
//! feasible regions shrink under accumulated no-good cuts, and an upper bound
//! from integer re-evaluation of the harvested first-stage candidates. The
//! loop terminates when the bounds meet, the candidate region is exhausted,
//! or the iteration cap fires.
//!
//! Typical use:
//!
//! ```no_run
//! use scendec_core::{
//!     read_mps_template, read_sto_recourse, solve_instance, DecompSettings, InstanceDims,
//! };
//!
//! # fn main() -> Result<(), scendec_core::DecompError> {
//! let dims = InstanceDims::from_base_name("sslp_5_25_50")?;
//! let template = read_mps_template("sslp_5_25_50.mps")?;
//! let instance = read_sto_recourse("sslp_5_25_50.sto", dims)?;
//! let report = solve_instance(&template, &instance, DecompSettings::default())?;
//! println!("objective {:.6}", report.objective);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cuts;
mod driver;
mod error;
mod instance;
mod lower;
mod scenario;
mod settings;
mod smps;
mod solution;
mod upper;

#[cfg(test)]
mod testutil;

pub use cuts::{add_no_good_cuts, NoGoodCut};
pub use driver::{solve_instance, Decomposition};
pub use error::{DecompError, DecompResult};
pub use instance::{Instance, InstanceDims};
pub use lower::{solve_lower_bound, LowerBoundOutcome};
pub use scenario::{build_contexts, fix_first_stage, ScenarioContext, TemplateLayout};
pub use settings::DecompSettings;
pub use smps::{read_mps_template, read_sto_recourse};
pub use solution::{DecompReport, DecompStatus, FirstStageSolution, Incumbent};
pub use upper::evaluate_candidates;
