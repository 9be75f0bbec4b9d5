//! Elimination-order decomposer: the canonical bridge between a vertex
//! permutation and a tree decomposition.
//!
//! The textbook recursive definition - build the bag for the head of the
//! permutation, eliminate it, recurse on the tail, then attach the head's
//! bag to the bag of the earliest surviving vertex once recursion returns
//! - recurses to depth `n`, which risks a stack overflow on large inputs.
//! We convert that to iteration instead, splitting the
//! single recursive pass into two linear ones: pass one eliminates
//! left-to-right and records, for each bag, *which later bag* it attaches
//! to (by permutation index, not by a not-yet-existing `BagId`); pass two
//! wires up the tree edges once every bag exists. This is exactly what
//! the recursive version does, just without a call stack: the attach
//! only ever needed the destination bag's *final* identity, not anything
//! produced during the recursive call itself.

use crate::decomposition::{BagId, DecompositionQuality, TreeDecomposition};
use crate::graph::Graph;
use crate::vertex::VertexId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Walks `permutation` left to right on a working copy of `graph`,
/// producing a [`TreeDecomposition`]. Given identical `graph` and
/// `permutation`, the output is bit-stable.
pub fn eliminate(
    graph: &Graph,
    permutation: &[VertexId],
    quality: DecompositionQuality,
) -> TreeDecomposition {
    let mut decomposition = TreeDecomposition::new(graph.copy(), quality);
    decomposition.mark_from_permutation(true);

    if permutation.is_empty() {
        decomposition.create_bag(FxHashSet::default());
        return decomposition;
    }

    let position: FxHashMap<VertexId, usize> = permutation
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i))
        .collect();

    let mut working = graph.copy();
    let mut bag_ids: Vec<BagId> = Vec::with_capacity(permutation.len());
    let mut attach_to: Vec<Option<usize>> = Vec::with_capacity(permutation.len());

    for (i, &v) in permutation.iter().enumerate() {
        let mut bag_vertices: FxHashSet<VertexId> =
            working.neighbor_set(v).iter().copied().collect();
        bag_vertices.insert(v);

        // Earliest surviving vertex (smallest permutation index > i)
        // among this bag's vertices - the vertex whose eventual bag this
        // one attaches to.
        let target = bag_vertices
            .iter()
            .filter(|&&w| w != v)
            .filter_map(|w| position.get(w).copied())
            .filter(|&pos| pos > i)
            .min();

        working.eliminate_vertex(v);

        let bag_id = decomposition.create_bag(bag_vertices);
        bag_ids.push(bag_id);
        attach_to.push(target);
    }

    for (i, target) in attach_to.into_iter().enumerate() {
        if let Some(pos) = target {
            decomposition.add_tree_edge(bag_ids[i], bag_ids[pos]);
        }
    }

    decomposition.connect_components();
    decomposition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::DecompositionQuality;

    fn path_graph(n: u32) -> Graph {
        let mut g = Graph::with_vertices(n as usize);
        for i in 1..n {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        g
    }

    fn cycle_graph(n: u32) -> Graph {
        let mut g = path_graph(n);
        g.add_edge(VertexId(n), VertexId(1));
        g
    }

    #[test]
    fn k4_has_width_three_in_one_bag() {
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        let permutation: Vec<_> = (1..=4u32).map(VertexId).collect();
        let decomposition = eliminate(&g, &permutation, DecompositionQuality::Exact);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 3);
        assert_eq!(
            decomposition.bags().filter(|(_, b)| b.len() == 4).count(),
            1
        );
    }

    #[test]
    fn path_five_has_width_one() {
        let g = path_graph(5);
        let permutation: Vec<_> = (1..=5u32).map(VertexId).collect();
        let decomposition = eliminate(&g, &permutation, DecompositionQuality::Exact);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 1);
        assert_eq!(
            decomposition.bags().filter(|(_, b)| b.len() == 2).count(),
            4
        );
    }

    #[test]
    fn cycle_five_has_width_two() {
        let g = cycle_graph(5);
        // Eliminating in order 1..5 on C5 should realize the optimal width of 2.
        let permutation: Vec<_> = (1..=5u32).map(VertexId).collect();
        let decomposition = eliminate(&g, &permutation, DecompositionQuality::Exact);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 2);
    }

    #[test]
    fn empty_graph_yields_single_empty_bag() {
        let g = Graph::new();
        let decomposition = eliminate(&g, &[], DecompositionQuality::Exact);
        assert_eq!(decomposition.bag_count(), 1);
        assert_eq!(decomposition.width(), 0);
    }

    #[test]
    fn deterministic_given_same_graph_and_permutation() {
        let g = cycle_graph(6);
        let permutation: Vec<_> = (1..=6u32).map(VertexId).collect();
        let first = eliminate(&g, &permutation, DecompositionQuality::Heuristic);
        let second = eliminate(&g, &permutation, DecompositionQuality::Heuristic);
        assert_eq!(first.width(), second.width());
        assert_eq!(first.to_pace_string(), second.to_pace_string());
    }
}
