//! SMPS-style input: structural template (.mps) and scenario file (.sto).

mod mps;
mod sto;

pub use mps::read_mps_template;
pub use sto::read_sto_recourse;
