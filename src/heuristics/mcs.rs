//! Maximum Cardinality Search: assigns the permutation right-to-left -
//! a uniformly random vertex takes position `n`, then
//! each remaining position (counting down) goes to whichever unlabeled
//! vertex currently has the most already-labeled neighbors, ties broken
//! by the seeded RNG.

use crate::graph::Graph;
use crate::rng::RngHandle;
use crate::vertex::VertexId;
use rand::seq::IteratorRandom;
use rustc_hash::{FxHashMap, FxHashSet};

pub fn maximum_cardinality_search(graph: &Graph, rng: &mut RngHandle) -> Vec<VertexId> {
    let vertices = graph.vertices();
    let n = vertices.len();
    if n == 0 {
        return Vec::new();
    }

    let mut labeled_neighbor_count: FxHashMap<VertexId, usize> =
        vertices.iter().map(|&v| (v, 0)).collect();
    let mut unlabeled: FxHashSet<VertexId> = vertices.iter().copied().collect();
    let mut position: FxHashMap<VertexId, usize> = FxHashMap::default();

    let label = |v: VertexId,
                 pos: usize,
                 graph: &Graph,
                 unlabeled: &mut FxHashSet<VertexId>,
                 position: &mut FxHashMap<VertexId, usize>,
                 labeled_neighbor_count: &mut FxHashMap<VertexId, usize>| {
        position.insert(v, pos);
        unlabeled.remove(&v);
        for &neighbor in graph.neighbor_set(v) {
            if let Some(count) = labeled_neighbor_count.get_mut(&neighbor) {
                *count += 1;
            }
        }
    };

    let first = vertices
        .iter()
        .copied()
        .choose(rng.inner_mut())
        .expect("at least one vertex exists");
    label(
        first,
        n,
        graph,
        &mut unlabeled,
        &mut position,
        &mut labeled_neighbor_count,
    );

    for pos in (1..n).rev() {
        let max_count = unlabeled
            .iter()
            .map(|v| labeled_neighbor_count[v])
            .max()
            .expect("unlabeled is non-empty");
        let v = unlabeled
            .iter()
            .copied()
            .filter(|v| labeled_neighbor_count[v] == max_count)
            .choose(rng.inner_mut())
            .expect("at least one max-count vertex exists");
        label(
            v,
            pos,
            graph,
            &mut unlabeled,
            &mut position,
            &mut labeled_neighbor_count,
        );
    }

    let mut order = vec![VertexId::default(); n];
    for (&v, &pos) in &position {
        order[pos - 1] = v;
    }
    order
}
