//! Stochastic instance data: dimensions and the per-scenario recourse matrix.

use crate::error::{DecompError, DecompResult};

/// Instance dimensions decoded from a base name like `sslp_5_25_50`
/// (5 servers, 25 clients, 50 scenarios).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceDims {
    /// Number of first-stage servers.
    pub n_server: usize,
    /// Number of clients.
    pub n_client: usize,
    /// Number of scenarios.
    pub n_scen: usize,
}

impl InstanceDims {
    /// Decode dimensions from an instance base name.
    ///
    /// The convention is `<name>_<nServer>_<nClient>_<nScen>`; the three
    /// trailing underscore-separated fields must be positive integers.
    pub fn from_base_name(base: &str) -> DecompResult<Self> {
        let parts: Vec<&str> = base.split('_').collect();
        if parts.len() < 4 {
            return Err(DecompError::Config(format!(
                "expected <name>_<nServer>_<nClient>_<nScen>, got '{}'",
                base
            )));
        }
        let tail = &parts[parts.len() - 3..];
        let mut dims = [0usize; 3];
        for (slot, field) in dims.iter_mut().zip(tail) {
            *slot = field.parse::<usize>().map_err(|_| {
                DecompError::Config(format!("'{}' in '{}' is not a positive integer", field, base))
            })?;
            if *slot == 0 {
                return Err(DecompError::Config(format!(
                    "dimension fields in '{}' must be positive",
                    base
                )));
            }
        }
        Ok(Self {
            n_server: dims[0],
            n_client: dims[1],
            n_scen: dims[2],
        })
    }
}

/// A two-stage stochastic 0-1 instance.
///
/// Immutable after construction; `recourse[scen][client]` holds the integer
/// demand indicator realized for each client under each scenario.
#[derive(Debug, Clone)]
pub struct Instance {
    dims: InstanceDims,
    recourse: Vec<Vec<i64>>,
}

impl Instance {
    /// Build an instance, validating the recourse matrix shape.
    pub fn new(dims: InstanceDims, recourse: Vec<Vec<i64>>) -> DecompResult<Self> {
        if recourse.len() != dims.n_scen {
            return Err(DecompError::InvalidInstance(format!(
                "recourse matrix has {} scenario rows, expected {}",
                recourse.len(),
                dims.n_scen
            )));
        }
        for (s, row) in recourse.iter().enumerate() {
            if row.len() != dims.n_client {
                return Err(DecompError::InvalidInstance(format!(
                    "scenario {} has {} client entries, expected {}",
                    s,
                    row.len(),
                    dims.n_client
                )));
            }
        }
        Ok(Self { dims, recourse })
    }

    /// Instance dimensions.
    pub fn dims(&self) -> InstanceDims {
        self.dims
    }

    /// Number of first-stage servers.
    pub fn n_server(&self) -> usize {
        self.dims.n_server
    }

    /// Number of clients.
    pub fn n_client(&self) -> usize {
        self.dims.n_client
    }

    /// Number of scenarios.
    pub fn n_scen(&self) -> usize {
        self.dims.n_scen
    }

    /// Uniform scenario probability.
    pub fn probability(&self) -> f64 {
        1.0 / self.dims.n_scen as f64
    }

    /// Demand indicator for `client` under `scen`.
    pub fn recourse(&self, scen: usize, client: usize) -> i64 {
        self.recourse[scen][client]
    }

    /// The full recourse row for a scenario.
    pub fn recourse_row(&self, scen: usize) -> &[i64] {
        &self.recourse[scen]
    }
}
