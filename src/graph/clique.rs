//! Bounded clique extraction: a clique, not required to be maximum,
//! found within a caller-supplied size/step limit, returning `None` on
//! budget exhaustion rather than an empty or partial clique.
//!
//! Uses a greedy expansion in the style of `find_maximum_cliques`'s candidate
//! selection (`max_by_key` over neighbor-count-within-candidate-set),
//! but without its Bron-Kerbosch backtracking, since that
//! algorithm enumerates *all* maximum cliques rather than returning a
//! single bounded one quickly.

use super::Graph;
use crate::vertex::VertexId;
use rustc_hash::FxHashSet;

/// Greedily grows a clique: repeatedly add the candidate with the most
/// neighbors still inside the candidate set, then shrink the candidate
/// set to that vertex's neighborhood. `limit` bounds the number of
/// expansion steps; if the clique cannot be completed within budget,
/// returns `None`.
pub fn get_maximum_clique(graph: &Graph, limit: usize) -> Option<Vec<VertexId>> {
    let vertices = graph.vertices();
    if vertices.is_empty() {
        return Some(Vec::new());
    }

    let mut candidates: FxHashSet<VertexId> = vertices.into_iter().collect();
    let mut clique = Vec::new();
    let mut budget = limit;

    while !candidates.is_empty() {
        if budget == 0 {
            return None;
        }
        budget -= 1;

        let best = *candidates
            .iter()
            .max_by_key(|&&v| {
                graph
                    .neighbor_set(v)
                    .iter()
                    .filter(|n| candidates.contains(n))
                    .count()
            })
            .expect("candidates is non-empty");

        clique.push(best);
        let best_neighbors = graph.neighbor_set(best);
        candidates.retain(|c| *c != best && best_neighbors.contains(c));
    }

    clique.sort_unstable();
    Some(clique)
}
