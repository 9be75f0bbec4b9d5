//! Degeneracy lower bound: Matula-Beck, repeatedly remove
//! a minimum-degree vertex and report the maximum removal degree.
//! Implemented with bucket-indexed degrees for linear time, the same
//! "peel the sparsest vertex first" idea `maximum_minimum_degree_heuristic.rs`
//! uses for its MMD+ contraction degeneracy bound, but without the
//! contraction step - plain deletion.

use crate::graph::Graph;
use crate::vertex::VertexId;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Returns the degeneracy of `graph`: the maximum, over the peeling
/// order, of the degree a vertex had when it was removed. `-1` (`None`)
/// is never produced here - degeneracy is total on any graph, including
/// the empty one (degeneracy 0).
pub fn degeneracy(graph: &Graph) -> usize {
    peel(graph).0
}

/// The Matula-Beck peeling order itself, reused by H as a free heuristic
/// seed permutation (the degeneracy computation already paid for it).
pub fn peeling_order(graph: &Graph) -> Vec<VertexId> {
    peel(graph).1
}

fn peel(graph: &Graph) -> (usize, Vec<VertexId>) {
    let n = graph.vertex_count();
    if n == 0 {
        return (0, Vec::new());
    }

    let mut degree: FxHashMap<VertexId, usize> = graph
        .vertices()
        .into_iter()
        .map(|v| (v, graph.degree(v)))
        .collect();

    let max_degree = degree.values().copied().max().unwrap_or(0);
    // buckets[d] holds the vertices currently believed to have degree d;
    // a vertex may appear stale in a bucket after a neighbor is peeled,
    // we just re-check `degree` on pop and skip stale entries.
    let mut buckets: Vec<VecDeque<VertexId>> = vec![VecDeque::new(); max_degree + 1];
    for (&v, &d) in degree.iter() {
        buckets[d].push_back(v);
    }

    let mut removed: rustc_hash::FxHashSet<VertexId> = rustc_hash::FxHashSet::default();
    let mut order: Vec<VertexId> = Vec::with_capacity(n);
    let mut lb = 0usize;
    let mut current_bucket = 0usize;

    while removed.len() < n {
        if current_bucket > max_degree {
            // Every remaining vertex's true degree exceeds max_degree,
            // which cannot happen since degrees only decrease - this is
            // unreachable, but guards against an infinite loop if it were.
            break;
        }
        let Some(v) = buckets[current_bucket].pop_front() else {
            current_bucket += 1;
            continue;
        };
        if removed.contains(&v) {
            continue;
        }
        let true_degree = degree[&v];
        if true_degree != current_bucket {
            // Stale bucket membership; re-file and keep scanning forward.
            buckets[true_degree].push_back(v);
            continue;
        }

        lb = lb.max(true_degree);
        removed.insert(v);
        order.push(v);

        for n_of_v in graph.neighbor_set(v) {
            if removed.contains(n_of_v) {
                continue;
            }
            let d = degree.get_mut(n_of_v).unwrap();
            *d -= 1;
            buckets[*d].push_back(*n_of_v);
        }

        if current_bucket > 0 {
            current_bucket -= 1;
        }
    }

    (lb, order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_zero_degeneracy() {
        assert_eq!(degeneracy(&Graph::new()), 0);
    }

    #[test]
    fn peeling_order_is_a_full_permutation() {
        let mut g = Graph::with_vertices(5);
        for i in 1..5u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        let order = peeling_order(&g);
        assert!(crate::permutation::validate(&g, &order));
    }

    #[test]
    fn path_has_degeneracy_one() {
        let mut g = Graph::with_vertices(5);
        for i in 1..5u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        assert_eq!(degeneracy(&g), 1);
    }

    #[test]
    fn k4_has_degeneracy_three() {
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        assert_eq!(degeneracy(&g), 3);
    }

    #[test]
    fn cycle_has_degeneracy_two() {
        let mut g = Graph::with_vertices(5);
        for i in 1..5u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        g.add_edge(VertexId(5), VertexId(1));
        assert_eq!(degeneracy(&g), 2);
    }
}
