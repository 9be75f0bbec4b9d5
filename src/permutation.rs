//! Permutation validation: an ordered list of vertices with no repeats
//! and no omissions. The elimination-order decomposer consumes a
//! permutation without re-checking it, so property tests and the
//! heuristics portfolio both lean on this helper to assert the
//! invariant holds before handing a permutation onward.

use crate::graph::Graph;
use crate::vertex::VertexId;
use rustc_hash::FxHashSet;

/// `true` iff `permutation` has no repeated vertex and its vertex set is
/// exactly `graph`'s vertex set.
pub fn validate(graph: &Graph, permutation: &[VertexId]) -> bool {
    let mut seen: FxHashSet<VertexId> = FxHashSet::default();
    for &v in permutation {
        if !graph.contains_vertex(v) {
            return false;
        }
        if !seen.insert(v) {
            return false;
        }
    }
    seen.len() == graph.vertex_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_full_permutation() {
        let g = Graph::with_vertices(3);
        let perm = vec![VertexId(2), VertexId(1), VertexId(3)];
        assert!(validate(&g, &perm));
    }

    #[test]
    fn rejects_a_repeat() {
        let g = Graph::with_vertices(3);
        let perm = vec![VertexId(1), VertexId(1), VertexId(3)];
        assert!(!validate(&g, &perm));
    }

    #[test]
    fn rejects_a_missing_vertex() {
        let g = Graph::with_vertices(3);
        let perm = vec![VertexId(1), VertexId(2)];
        assert!(!validate(&g, &perm));
    }

    #[test]
    fn rejects_an_unknown_vertex() {
        let g = Graph::with_vertices(2);
        let perm = vec![VertexId(1), VertexId(2), VertexId(99)];
        assert!(!validate(&g, &perm));
    }
}
