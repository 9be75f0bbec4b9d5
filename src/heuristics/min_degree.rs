//! Greedy-degree heuristic: repeatedly eliminate a minimum-degree
//! vertex of the working graph, ties broken by a seeded RNG - the
//! simplest member of the portfolio, the same "peel the cheapest
//! vertex" shape as `maximum_minimum_degree_heuristic.rs`, but scoring
//! by current degree alone rather than contraction.

use crate::graph::Graph;
use crate::rng::RngHandle;
use crate::vertex::VertexId;
use rand::seq::IteratorRandom;

pub fn min_degree_order(graph: &Graph, rng: &mut RngHandle) -> Vec<VertexId> {
    let mut working = graph.copy();
    let mut order = Vec::with_capacity(working.vertex_count());

    while working.vertex_count() > 0 {
        let min_degree = working
            .vertices()
            .into_iter()
            .map(|v| working.degree(v))
            .min()
            .expect("at least one vertex remains");

        let v = working
            .vertices()
            .into_iter()
            .filter(|&v| working.degree(v) == min_degree)
            .choose(rng.inner_mut())
            .expect("at least one min-degree vertex exists");

        working.eliminate_vertex(v);
        order.push(v);
    }

    order
}
