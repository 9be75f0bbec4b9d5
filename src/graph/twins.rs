//! Twin detection.
//!
//! `u ~ v` iff `N(u) \ {v} = N(v) \ {u}`. Splitting on adjacency, this
//! collapses to two easy-to-bucket cases: adjacent twins need
//! `N[u] = N[v]` (closed neighborhoods equal); non-adjacent twins need
//! `N(u) = N(v)` (open neighborhoods equal). Both are grouped with a
//! radix-style signature - the sorted neighbor-identity list - fed
//! through hashmap bucketing, then merged with
//! `petgraph::unionfind::UnionFind`, the same union-find petgraph itself
//! uses internally for its minimum-spanning-tree algorithms.

use super::Graph;
use crate::vertex::VertexId;
use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;

pub fn twin_decomposition(graph: &Graph) -> Vec<Vec<VertexId>> {
    let vertices = graph.vertices();
    if vertices.is_empty() {
        return Vec::new();
    }

    let max_id = vertices.iter().map(|v| v.0).max().unwrap() as usize;
    let mut uf = UnionFind::<usize>::new(max_id + 1);

    let mut open_signatures: FxHashMap<Vec<VertexId>, VertexId> = FxHashMap::default();
    let mut closed_signatures: FxHashMap<Vec<VertexId>, VertexId> = FxHashMap::default();

    for &v in &vertices {
        let open_sig = graph.neighbors(v);
        let mut closed_sig = open_sig.clone();
        closed_sig.push(v);
        closed_sig.sort_unstable();

        if let Some(&representative) = open_signatures.get(&open_sig) {
            uf.union(representative.index(), v.index());
        } else {
            open_signatures.insert(open_sig, v);
        }

        if let Some(&representative) = closed_signatures.get(&closed_sig) {
            uf.union(representative.index(), v.index());
        } else {
            closed_signatures.insert(closed_sig, v);
        }
    }

    let mut classes: FxHashMap<usize, Vec<VertexId>> = FxHashMap::default();
    for &v in &vertices {
        classes.entry(uf.find(v.index())).or_default().push(v);
    }

    let mut result: Vec<Vec<VertexId>> = classes.into_values().collect();
    for class in result.iter_mut() {
        class.sort_unstable();
    }
    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_twins_in_k4() {
        // In K4 every pair is a closed twin: N[u] = N[v] = whole vertex set.
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        let classes = g.twin_decomposition();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 4);
    }

    #[test]
    fn false_twins_on_two_disjoint_leaves() {
        // Center vertex 1 with two pendant leaves 2, 3: N(2) = N(3) = {1}.
        let mut g = Graph::with_vertices(3);
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(1), VertexId(3));

        let classes = g.twin_decomposition();
        assert!(classes.contains(&vec![VertexId(2), VertexId(3)]));
    }

    #[test]
    fn no_twins_on_a_path_of_four() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g.add_edge(VertexId(3), VertexId(4));

        let classes = g.twin_decomposition();
        assert_eq!(classes.len(), 4);
    }
}
