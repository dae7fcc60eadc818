//! Scenario (.sto) reader.
//!
//! SCENARIOS-discrete layout: each `SC SCEN<k>` block lists `RHS <row>
//! <value>` overrides for that scenario's client rows. Row names follow the
//! template convention `c<row>` where client j (zero-based) sits at row
//! number `2 + n_server + j`, so the client index recovers as
//! `row_number - n_server - 2`.

use std::fs;
use std::path::Path;

use crate::error::{DecompError, DecompResult};
use crate::instance::{Instance, InstanceDims};

/// Read a .sto file into the recourse matrix of an instance.
pub fn read_sto_recourse<P: AsRef<Path>>(path: P, dims: InstanceDims) -> DecompResult<Instance> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| {
        DecompError::InputFormat(format!(
            "cannot read scenario file {:?}: {}",
            path.as_ref(),
            e
        ))
    })?;
    parse_sto(&text, dims)
}

/// Parse .sto text into an instance.
pub(crate) fn parse_sto(text: &str, dims: InstanceDims) -> DecompResult<Instance> {
    let mut recourse: Vec<Vec<i64>> = Vec::with_capacity(dims.n_scen);

    for (lineno, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields[0].to_ascii_uppercase().as_str() {
            // File and block headers carry nothing we need.
            "STOCH" | "SCENARIOS" | "PERIODS" | "INDEP" | "BLOCKS" => {}
            "ENDATA" => break,
            "SC" => {
                if recourse.len() == dims.n_scen {
                    return Err(line_err(
                        lineno,
                        format!("more than {} scenario blocks", dims.n_scen),
                    ));
                }
                recourse.push(vec![0; dims.n_client]);
            }
            "RHS" => {
                let &[_, row, value] = fields.as_slice() else {
                    return Err(line_err(lineno, "RHS line needs <row> <value>".into()));
                };
                let scen = recourse.last_mut().ok_or_else(|| {
                    line_err(lineno, "RHS line before any SC scenario block".into())
                })?;
                let client = client_index(row, &dims)
                    .ok_or_else(|| line_err(lineno, format!("row '{}' is not a client row", row)))?;
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| line_err(lineno, format!("'{}' is not a number", value)))?;
                scen[client] = parsed.round() as i64;
            }
            other => {
                return Err(line_err(lineno, format!("unexpected token '{}'", other)));
            }
        }
    }

    if recourse.len() != dims.n_scen {
        return Err(DecompError::InputFormat(format!(
            "scenario file defines {} scenarios, instance name promises {}",
            recourse.len(),
            dims.n_scen
        )));
    }
    Instance::new(dims, recourse)
}

/// Map a client row name `c<row>` to its zero-based client index.
fn client_index(row_name: &str, dims: &InstanceDims) -> Option<usize> {
    let digits = row_name.trim_start_matches(|c: char| !c.is_ascii_digit());
    let row: usize = digits.parse().ok()?;
    let client = row.checked_sub(dims.n_server + 2)?;
    (client < dims.n_client).then_some(client)
}

fn line_err(lineno: usize, msg: String) -> DecompError {
    DecompError::InputFormat(format!("line {}: {}", lineno + 1, msg))
}
