//! No-good cuts over the first-stage variables.
//!
//! For a binary point `x`, the cut
//!
//! ```text
//! sum_j [ x_j + (1 - 2 x_j) * v_j ] >= 1
//! ```
//!
//! is satisfied by every binary point except `x` itself: each term is 1 when
//! `v_j` differs from `x_j` and 0 when it agrees, so the left side counts the
//! Hamming distance to `x`. Cuts are added to every scenario's lower-bounding
//! variant and are never removed.

use scendec_lp::Sense;

use crate::scenario::{ScenarioContext, TemplateLayout};
use crate::solution::FirstStageSolution;

/// A no-good cut in solver form: `coefs' v >= rhs` over first-stage ids.
#[derive(Debug, Clone)]
pub struct NoGoodCut {
    /// Coefficient per first-stage position: `1 - 2 x_j`.
    pub coefs: Vec<f64>,

    /// Right-hand side: `1 - sum_j x_j`.
    pub rhs: f64,
}

impl NoGoodCut {
    /// Build the cut excluding exactly `x`.
    pub fn excluding(x: &FirstStageSolution) -> Self {
        let coefs = x.values().iter().map(|&v| 1.0 - 2.0 * f64::from(v)).collect();
        let ones: f64 = x.values().iter().map(|&v| f64::from(v)).sum();
        Self {
            coefs,
            rhs: 1.0 - ones,
        }
    }

    /// Evaluate the cut at a binary point.
    pub fn satisfied_by(&self, point: &[u8]) -> bool {
        let lhs: f64 = self
            .coefs
            .iter()
            .zip(point)
            .map(|(c, &v)| c * f64::from(v))
            .sum();
        lhs >= self.rhs - 1e-9
    }
}

/// Add no-good cuts for every candidate to every scenario's lower-bounding
/// variant (global cut sharing), returning the number of cuts added.
///
/// Cut rows are named from the per-scenario counter, which only grows.
pub fn add_no_good_cuts(
    contexts: &mut [ScenarioContext],
    layout: &TemplateLayout,
    candidates: &[FirstStageSolution],
) -> usize {
    let mut added = 0;
    for ctx in contexts.iter_mut() {
        for x in candidates {
            let cut = NoGoodCut::excluding(x);
            let coefs: Vec<_> = layout
                .first_stage
                .iter()
                .copied()
                .zip(cut.coefs.iter().copied())
                .collect();
            let name = format!("nogood_{}", ctx.cut_count);
            ctx.lower.add_constraint(coefs, Sense::Ge, cut.rhs, name);
            ctx.cut_count += 1;
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Instance, InstanceDims};
    use crate::scenario::build_contexts;
    use scendec_lp::{Domain, Model};

    /// Enumerate all binary points of a given length.
    fn binary_points(len: usize) -> Vec<Vec<u8>> {
        (0..1u32 << len)
            .map(|mask| (0..len).map(|j| ((mask >> j) & 1) as u8).collect())
            .collect()
    }

    #[test]
    fn test_cut_excludes_exactly_one_point() {
        for len in 1..=3 {
            for point in binary_points(len) {
                let x = FirstStageSolution::new(point.clone());
                let cut = NoGoodCut::excluding(&x);
                for other in binary_points(len) {
                    if other == point {
                        assert!(!cut.satisfied_by(&other), "cut failed to exclude {:?}", other);
                    } else {
                        assert!(
                            cut.satisfied_by(&other),
                            "cut for {:?} wrongly excludes {:?}",
                            point,
                            other
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_cuts_go_to_every_scenario() {
        let mut template = Model::new("t");
        template.add_var("x_1", 0.0, 1.0, 1.0, Domain::Binary);
        template.add_var("x_2", 0.0, 1.0, 1.0, Domain::Binary);
        let layout = crate::scenario::TemplateLayout {
            first_stage: vec![0, 1],
            second_stage: vec![],
            client_rows: vec![],
        };
        let instance = Instance::new(
            InstanceDims {
                n_server: 2,
                n_client: 0,
                n_scen: 3,
            },
            vec![vec![], vec![], vec![]],
        )
        .unwrap();

        let mut contexts = build_contexts(&template, &layout, &instance).unwrap();
        let candidates = vec![
            FirstStageSolution::new(vec![1, 0]),
            FirstStageSolution::new(vec![0, 1]),
        ];

        let before: Vec<_> = contexts.iter().map(|c| c.lower.num_constraints()).collect();
        let added = add_no_good_cuts(&mut contexts, &layout, &candidates);

        assert_eq!(added, 6); // 2 candidates x 3 scenarios
        for (ctx, b) in contexts.iter().zip(before) {
            assert_eq!(ctx.lower.num_constraints(), b + 2);
            assert_eq!(ctx.cut_count, 2);
            // Screening and confirming variants never receive cuts.
            assert_eq!(ctx.screening.num_constraints(), b);
            assert_eq!(ctx.confirming.num_constraints(), b);
        }

        // Counter keeps growing across rounds.
        add_no_good_cuts(&mut contexts, &layout, &candidates[..1]);
        assert_eq!(contexts[0].cut_count, 3);
    }
}
