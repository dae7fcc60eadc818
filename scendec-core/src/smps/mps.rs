//! MPS structural template reader.
//!
//! Free-form tokenized MPS covering the subset SSLP instances use:
//! NAME, ROWS (N/E/L/G), COLUMNS with INTORG/INTEND markers, RHS, BOUNDS
//! (UP/LO/FX/FR/MI/PL/BV), OBJSENSE and ENDATA. The objective is the first
//! N row; everything is expressed as a minimization on the returned model.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use scendec_lp::{Domain, Model, Sense, VarId};

use crate::error::{DecompError, DecompResult};

/// Read an MPS file into a model.
pub fn read_mps_template<P: AsRef<Path>>(path: P) -> DecompResult<Model> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| {
        DecompError::InputFormat(format!(
            "cannot read structural file {:?}: {}",
            path.as_ref(),
            e
        ))
    })?;
    parse_mps(&text)
}

#[derive(PartialEq)]
enum Section {
    None,
    ObjSense,
    Rows,
    Columns,
    Rhs,
    Bounds,
}

struct VarData {
    name: String,
    lb: f64,
    ub: f64,
    obj: f64,
    domain: Domain,
}

/// Parse MPS text into a model.
pub(crate) fn parse_mps(text: &str) -> DecompResult<Model> {
    let mut model_name = String::from("template");
    let mut section = Section::None;
    let mut maximize = false;
    let mut in_integer_block = false;

    let mut obj_row: Option<String> = None;
    let mut rows: Vec<(String, Sense)> = Vec::new();
    let mut row_ids: HashMap<String, usize> = HashMap::new();
    let mut vars: Vec<VarData> = Vec::new();
    let mut var_ids: HashMap<String, VarId> = HashMap::new();
    let mut entries: Vec<Vec<(VarId, f64)>> = Vec::new();
    let mut rhs: HashMap<usize, f64> = HashMap::new();

    for (lineno, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        // Section headers start in column 1.
        if !raw.starts_with(' ') && !raw.starts_with('\t') {
            let mut header = trimmed.split_whitespace();
            match header.next().unwrap_or("") {
                "NAME" => {
                    if let Some(name) = header.next() {
                        model_name = name.to_string();
                    }
                    section = Section::None;
                }
                "OBJSENSE" => section = Section::ObjSense,
                "ROWS" => section = Section::Rows,
                "COLUMNS" => section = Section::Columns,
                "RHS" => section = Section::Rhs,
                "BOUNDS" => section = Section::Bounds,
                "ENDATA" => break,
                other => {
                    return Err(line_err(lineno, format!("unknown MPS section '{}'", other)));
                }
            }
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match section {
            Section::ObjSense => {
                let f = fields[0].to_ascii_uppercase();
                maximize = f == "MAX" || f == "MAXIMIZE";
            }
            Section::Rows => {
                let &[kind, name] = fields.as_slice() else {
                    return Err(line_err(lineno, "ROWS entry needs <type> <name>".into()));
                };
                match kind.to_ascii_uppercase().as_str() {
                    "N" => {
                        if obj_row.is_none() {
                            obj_row = Some(name.to_string());
                        }
                    }
                    k => {
                        let sense = match k {
                            "E" => Sense::Eq,
                            "L" => Sense::Le,
                            "G" => Sense::Ge,
                            _ => {
                                return Err(line_err(
                                    lineno,
                                    format!("unknown row type '{}'", kind),
                                ));
                            }
                        };
                        row_ids.insert(name.to_string(), rows.len());
                        rows.push((name.to_string(), sense));
                        entries.push(Vec::new());
                    }
                }
            }
            Section::Columns => {
                // Integer markers toggle the domain of subsequent columns.
                if fields.len() >= 3 && fields[1].trim_matches('\'') == "MARKER" {
                    match fields[2].trim_matches('\'') {
                        "INTORG" => in_integer_block = true,
                        "INTEND" => in_integer_block = false,
                        _ => {}
                    }
                    continue;
                }
                if fields.len() < 3 || fields.len() % 2 == 0 {
                    return Err(line_err(
                        lineno,
                        "COLUMNS entry needs <var> (<row> <value>)+".into(),
                    ));
                }
                let var = *var_ids.entry(fields[0].to_string()).or_insert_with(|| {
                    vars.push(VarData {
                        name: fields[0].to_string(),
                        lb: 0.0,
                        ub: f64::INFINITY,
                        obj: 0.0,
                        domain: if in_integer_block {
                            Domain::Integer
                        } else {
                            Domain::Continuous
                        },
                    });
                    vars.len() - 1
                });
                for pair in fields[1..].chunks(2) {
                    let value = parse_num(pair[1], lineno)?;
                    if Some(pair[0]) == obj_row.as_deref() {
                        vars[var].obj += value;
                    } else if let Some(&row) = row_ids.get(pair[0]) {
                        entries[row].push((var, value));
                    } else {
                        return Err(line_err(
                            lineno,
                            format!("COLUMNS references unknown row '{}'", pair[0]),
                        ));
                    }
                }
            }
            Section::Rhs => {
                if fields.len() < 3 || fields.len() % 2 == 0 {
                    return Err(line_err(
                        lineno,
                        "RHS entry needs <set> (<row> <value>)+".into(),
                    ));
                }
                for pair in fields[1..].chunks(2) {
                    // A right-hand side on the objective row (an additive
                    // constant) is ignored.
                    if let Some(&row) = row_ids.get(pair[0]) {
                        rhs.insert(row, parse_num(pair[1], lineno)?);
                    }
                }
            }
            Section::Bounds => {
                if fields.len() < 3 {
                    return Err(line_err(
                        lineno,
                        "BOUNDS entry needs <type> <set> <var> [value]".into(),
                    ));
                }
                let var = *var_ids.get(fields[2]).ok_or_else(|| {
                    line_err(
                        lineno,
                        format!("BOUNDS references unknown variable '{}'", fields[2]),
                    )
                })?;
                let value = if fields.len() >= 4 {
                    parse_num(fields[3], lineno)?
                } else {
                    0.0
                };
                let v = &mut vars[var];
                match fields[0].to_ascii_uppercase().as_str() {
                    "LO" => v.lb = value,
                    "UP" => v.ub = value,
                    "FX" => {
                        v.lb = value;
                        v.ub = value;
                    }
                    "FR" => {
                        v.lb = f64::NEG_INFINITY;
                        v.ub = f64::INFINITY;
                    }
                    "MI" => v.lb = f64::NEG_INFINITY,
                    "PL" => v.ub = f64::INFINITY,
                    "BV" => {
                        v.domain = Domain::Binary;
                        v.lb = 0.0;
                        v.ub = 1.0;
                    }
                    other => {
                        return Err(line_err(lineno, format!("unknown bound type '{}'", other)));
                    }
                }
            }
            Section::None => {
                return Err(line_err(lineno, "data before any section header".into()));
            }
        }
    }

    if vars.is_empty() {
        return Err(DecompError::InputFormat(
            "no variables found in structural file".into(),
        ));
    }
    if obj_row.is_none() {
        return Err(DecompError::InputFormat(
            "no objective (N) row found in structural file".into(),
        ));
    }

    let sense_factor = if maximize { -1.0 } else { 1.0 };
    let mut model = Model::new(model_name);
    for v in vars {
        model.add_var(v.name, v.lb, v.ub, sense_factor * v.obj, v.domain);
    }
    for (row, (name, sense)) in rows.into_iter().enumerate() {
        model.add_constraint(
            std::mem::take(&mut entries[row]),
            sense,
            rhs.get(&row).copied().unwrap_or(0.0),
            name,
        );
    }
    model.validate()?;
    Ok(model)
}

fn parse_num(token: &str, lineno: usize) -> DecompResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| line_err(lineno, format!("'{}' is not a number", token)))
}

fn line_err(lineno: usize, msg: String) -> DecompError {
    DecompError::InputFormat(format!("line {}: {}", lineno + 1, msg))
}
