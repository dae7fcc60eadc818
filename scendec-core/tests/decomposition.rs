//! End-to-end runs of the decomposition on small hand-checked instances.

use scendec_core::{
    read_mps_template, read_sto_recourse, solve_instance, DecompSettings, DecompStatus,
    FirstStageSolution, Instance, InstanceDims,
};
use scendec_lp::{Domain, Model, Sense};

/// Two servers, two clients, one client materialized per scenario.
///
/// Opening a server costs 1; serving a client from its home server costs 1,
/// from the other server 4. Global optimum opens both servers at total 3.0.
fn two_server_template() -> Model {
    let mut m = Model::new("two_server");
    let x1 = m.add_var("x_1", 0.0, 1.0, 1.0, Domain::Binary);
    let x2 = m.add_var("x_2", 0.0, 1.0, 1.0, Domain::Binary);
    let y11 = m.add_var("y_1_1", 0.0, 1.0, 1.0, Domain::Binary);
    let y12 = m.add_var("y_1_2", 0.0, 1.0, 4.0, Domain::Binary);
    let y21 = m.add_var("y_2_1", 0.0, 1.0, 4.0, Domain::Binary);
    let y22 = m.add_var("y_2_2", 0.0, 1.0, 1.0, Domain::Binary);
    m.add_constraint(
        vec![(y11, 1.0), (y21, 1.0), (x1, -2.0)],
        Sense::Le,
        0.0,
        "c2",
    );
    m.add_constraint(
        vec![(y12, 1.0), (y22, 1.0), (x2, -2.0)],
        Sense::Le,
        0.0,
        "c3",
    );
    m.add_constraint(vec![(y11, 1.0), (y12, 1.0)], Sense::Eq, 0.0, "c4");
    m.add_constraint(vec![(y21, 1.0), (y22, 1.0)], Sense::Eq, 0.0, "c5");
    m
}

fn two_server_instance() -> Instance {
    Instance::new(
        InstanceDims {
            n_server: 2,
            n_client: 2,
            n_scen: 2,
        },
        vec![vec![1, 0], vec![0, 1]],
    )
    .unwrap()
}

#[test]
fn test_converges_to_known_optimum() {
    let report = solve_instance(
        &two_server_template(),
        &two_server_instance(),
        DecompSettings::default(),
    )
    .unwrap();

    assert_eq!(report.status, DecompStatus::Converged);
    assert!(report.status.is_certified());
    assert!((report.objective - 3.0).abs() < 1e-6);
    assert_eq!(report.best, Some(FirstStageSolution::new(vec![1, 1])));
    assert_eq!(report.upper_bound, report.objective);
    assert!(report.cuts_added > 0);
    assert_eq!(report.history.len(), report.iterations);
}

#[test]
fn test_iteration_cap_yields_heuristic_result() {
    let settings = DecompSettings::default().with_max_iterations(1);
    let report = solve_instance(&two_server_template(), &two_server_instance(), settings).unwrap();

    assert_eq!(report.status, DecompStatus::IterationLimit);
    assert!(!report.status.is_certified());
    assert!(report.best.is_some());
    assert!(report.lower_bound < report.upper_bound);
}

/// One server whose relaxed service plan is cheaper than any integer one:
/// the relaxed bound never reaches the confirmed value, so the run ends by
/// exhausting the candidate region rather than by closing the gap.
#[test]
fn test_exhaustion_certifies_incumbent() {
    let mut m = Model::new("gapped");
    let x1 = m.add_var("x_1", 0.0, 1.0, 1.0, Domain::Binary);
    let ya = m.add_var("y_a", 0.0, 1.0, 1.0, Domain::Binary);
    let yb = m.add_var("y_b", 0.0, 1.0, 10.0, Domain::Binary);
    // Cheap service is capped at half a unit per open server, so the
    // integer plan must fall back to the expensive variable.
    m.add_constraint(vec![(ya, 1.0), (x1, -0.5)], Sense::Le, 0.0, "c2");
    m.add_constraint(vec![(yb, 1.0), (x1, -1.0)], Sense::Le, 0.0, "cap_b");
    m.add_constraint(vec![(ya, 1.0), (yb, 1.0)], Sense::Eq, 0.0, "c3");

    let instance = Instance::new(
        InstanceDims {
            n_server: 1,
            n_client: 1,
            n_scen: 1,
        },
        vec![vec![1]],
    )
    .unwrap();

    let report = solve_instance(&m, &instance, DecompSettings::default()).unwrap();

    assert_eq!(report.status, DecompStatus::Exhausted);
    assert!(report.status.is_certified());
    assert!((report.objective - 11.0).abs() < 1e-6);
    assert_eq!(report.best, Some(FirstStageSolution::new(vec![1])));
    assert!(report.lower_bound.is_infinite());
    assert_eq!(report.iterations, 2);
}

#[test]
fn test_infeasible_instance_reports_no_solution() {
    let mut m = Model::new("impossible");
    let x1 = m.add_var("x_1", 0.0, 1.0, 1.0, Domain::Binary);
    let y = m.add_var("y_1_1", 0.0, 1.0, 2.0, Domain::Binary);
    m.add_constraint(vec![(y, 1.0), (x1, -1.0)], Sense::Le, 0.0, "c2");
    m.add_constraint(vec![(y, 1.0)], Sense::Eq, 0.0, "c3");

    // Demand of 2 exceeds what one unit of service can cover.
    let instance = Instance::new(
        InstanceDims {
            n_server: 1,
            n_client: 1,
            n_scen: 1,
        },
        vec![vec![2]],
    )
    .unwrap();

    let report = solve_instance(&m, &instance, DecompSettings::default()).unwrap();

    assert_eq!(report.status, DecompStatus::NoSolution);
    assert!(!report.status.has_solution());
    assert!(report.best.is_none());
    assert!(report.objective.is_infinite());
}

#[test]
fn test_end_to_end_from_files() {
    let mps = "\
NAME          mini_2_2_2
ROWS
 N  obj
 L  c2
 L  c3
 E  c4
 E  c5
COLUMNS
    x_1       obj       1.0        c2       -2.0
    x_2       obj       1.0        c3       -2.0
    y_1_1     obj       1.0        c2        1.0
    y_1_1     c4        1.0
    y_1_2     obj       4.0        c3        1.0
    y_1_2     c4        1.0
    y_2_1     obj       4.0        c2        1.0
    y_2_1     c5        1.0
    y_2_2     obj       1.0        c3        1.0
    y_2_2     c5        1.0
BOUNDS
 BV BND       x_1
 BV BND       x_2
 BV BND       y_1_1
 BV BND       y_1_2
 BV BND       y_2_1
 BV BND       y_2_2
ENDATA
";
    let sto = "\
STOCH         mini_2_2_2
SCENARIOS     DISCRETE
 SC SCEN1     ROOT      0.5       PERIOD2
    RHS       c4        1.0
 SC SCEN2     ROOT      0.5       PERIOD2
    RHS       c5        1.0
ENDATA
";

    let dir = std::env::temp_dir().join(format!("scendec-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mps_path = dir.join("mini_2_2_2.mps");
    let sto_path = dir.join("mini_2_2_2.sto");
    std::fs::write(&mps_path, mps).unwrap();
    std::fs::write(&sto_path, sto).unwrap();

    let dims = InstanceDims::from_base_name("mini_2_2_2").unwrap();
    let template = read_mps_template(&mps_path).unwrap();
    let instance = read_sto_recourse(&sto_path, dims).unwrap();
    let report = solve_instance(&template, &instance, DecompSettings::default()).unwrap();

    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(report.status, DecompStatus::Converged);
    assert!((report.objective - 3.0).abs() < 1e-6);
    assert_eq!(report.best, Some(FirstStageSolution::new(vec![1, 1])));
}
