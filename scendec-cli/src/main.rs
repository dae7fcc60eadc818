//! Command-line runner: solve one instance given its base name.
//!
//! The base name encodes the dimensions (`<name>_<nServer>_<nClient>_<nScen>`)
//! and locates the structural file `<base>.mps` and the scenario file
//! `<base>.sto` next to it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scendec_core::{
    read_mps_template, read_sto_recourse, solve_instance, DecompSettings, InstanceDims,
};

#[derive(Parser)]
#[command(
    name = "scendec",
    about = "Scenario decomposition heuristic for two-stage stochastic 0-1 programs",
    version
)]
struct Cli {
    /// Instance base path, e.g. `data/sslp_5_25_50` for `data/sslp_5_25_50.mps`
    /// and `data/sslp_5_25_50.sto`.
    base: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base_name = cli
        .base
        .file_name()
        .and_then(|n| n.to_str())
        .context("instance base path has no file name")?;
    let dims = InstanceDims::from_base_name(base_name)?;
    log::info!(
        "instance {}: {} servers, {} clients, {} scenarios",
        base_name,
        dims.n_server,
        dims.n_client,
        dims.n_scen
    );

    let template = read_mps_template(cli.base.with_extension("mps"))
        .context("reading structural template")?;
    let instance =
        read_sto_recourse(cli.base.with_extension("sto"), dims).context("reading scenario file")?;

    let report = solve_instance(&template, &instance, DecompSettings::verbose())?;

    println!("status:      {:?}", report.status);
    if let Some(best) = &report.best {
        println!("objective:   {:.6}", report.objective);
        if !report.status.is_certified() {
            println!("             (heuristic value, gap not closed)");
        }
        println!(
            "servers:     {}",
            best.values()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    } else {
        println!("objective:   none (no feasible solution found)");
    }
    println!("iterations:  {}", report.iterations);
    println!("cuts:        {}", report.cuts_added);
    println!("time:        {} ms", report.solve_time_ms);
    Ok(())
}
