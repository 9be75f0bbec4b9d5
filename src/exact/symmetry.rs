//! Symmetry breaking: before solving, fix (i) all
//! non-clique vertices before all clique vertices, clique vertices
//! themselves ordered lexicographically, and (ii) each twin class
//! ordered lexicographically.

use super::encoding::OrdArcVars;
use crate::graph::Graph;
use crate::vertex::VertexId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Unit clauses (as `ord` literals) pinning down the chosen orderings;
/// appended to the base formula once, before the first `solve()`.
pub fn symmetry_breaking_clauses(
    graph: &Graph,
    vars: &OrdArcVars,
    index_of: &FxHashMap<VertexId, usize>,
    clique_step_budget: usize,
) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();

    let clique = graph
        .get_maximum_clique(clique_step_budget)
        .unwrap_or_default();
    let clique_set: FxHashSet<VertexId> = clique.iter().copied().collect();

    if !clique.is_empty() {
        let mut sorted_clique = clique.clone();
        sorted_clique.sort_unstable();

        for &non_clique in &graph.vertices() {
            if clique_set.contains(&non_clique) {
                continue;
            }
            for &clique_vertex in &sorted_clique {
                clauses.push(vec![vars.ord_lit(
                    index_of[&non_clique],
                    index_of[&clique_vertex],
                )]);
            }
        }

        for pair in sorted_clique.windows(2) {
            clauses.push(vec![vars.ord_lit(index_of[&pair[0]], index_of[&pair[1]])]);
        }
    }

    for class in graph.twin_decomposition() {
        if class.len() < 2 {
            continue;
        }
        let mut sorted_class = class;
        sorted_class.sort_unstable();
        for pair in sorted_class.windows(2) {
            clauses.push(vec![vars.ord_lit(index_of[&pair[0]], index_of[&pair[1]])]);
        }
    }

    clauses
}
