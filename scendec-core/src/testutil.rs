//! Shared fixtures for unit tests: tiny SSLP-shaped templates.

use scendec_lp::{Domain, Model, Sense};

use crate::instance::{Instance, InstanceDims};
use crate::scenario::TemplateLayout;

/// Two servers, two clients, SSLP naming convention.
///
/// Opening a server costs 1; serving a client from its "home" server costs 1
/// and from the other server costs 4. Client rows c4/c5 carry the scenario
/// demand; server rows c2/c3 link service to open servers.
pub(crate) fn mini_template() -> Model {
    let mut m = Model::new("mini_sslp");
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

/// The matching 2x2x2 instance: each scenario materializes one client.
pub(crate) fn mini_instance() -> Instance {
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

/// One server, one client; the only feasible first stage is x = (1).
pub(crate) fn single_server_template() -> Model {
    let mut m = Model::new("single");
    let x1 = m.add_var("x_1", 0.0, 1.0, 1.0, Domain::Binary);
    let y = m.add_var("y_1_1", 0.0, 1.0, 2.0, Domain::Binary);
    m.add_constraint(vec![(y, 1.0), (x1, -1.0)], Sense::Le, 0.0, "c2");
    m.add_constraint(vec![(y, 1.0)], Sense::Eq, 0.0, "c3");
    m
}

pub(crate) fn resolve_layout(template: &Model, instance: &Instance) -> TemplateLayout {
    TemplateLayout::resolve(template, instance).unwrap()
}
