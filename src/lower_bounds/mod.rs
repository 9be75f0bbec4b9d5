//! Lower bounds on treewidth: cheap necessary-condition bounds the
//! orchestrator uses to prune the exact search's starting `k` and to
//! decide when a heuristic upper bound is already provably optimal.

pub mod clique_sat;
pub mod degeneracy;
pub mod minor_min_width;

pub use clique_sat::clique_via_sat;
pub use degeneracy::{degeneracy, peeling_order};
pub use minor_min_width::minor_min_width;

use crate::graph::Graph;
use crate::rng::RngHandle;

/// The best (largest) of the cheap bounds, computed with a shared budget
/// - degeneracy and minor-min-width are both near-linear, clique-via-SAT
/// is the only one that can itself run long, so it alone takes a step
/// budget.
pub fn best_lower_bound(graph: &Graph, rng: &mut RngHandle, clique_step_budget: usize) -> usize {
    let via_degeneracy = degeneracy::degeneracy(graph);
    let via_contraction = minor_min_width::minor_min_width(graph, rng);
    let via_clique = clique_sat::clique_via_sat(graph, clique_step_budget).unwrap_or(0);
    via_degeneracy.max(via_contraction).max(via_clique)
}
