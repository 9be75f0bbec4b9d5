//! Minor-min-width lower bound (Gogate-Dechter): repeat
//! until empty - pick a min-degree vertex `v` (ties random), pick a
//! min-degree neighbor `u` of `v` (ties random), `lb <- max(lb, deg(v))`,
//! contract `{v, u}`. Same contraction-degeneracy idea as
//! `maximum_minimum_degree_heuristic.rs::maximum_minimum_degree_plus`,
//! with a different tie-break rule (least common neighbours instead of
//! uniform random).

use crate::graph::Graph;
use crate::rng::RngHandle;
use crate::vertex::VertexId;
use rand::seq::IteratorRandom;

pub fn minor_min_width(graph: &Graph, rng: &mut RngHandle) -> usize {
    let mut working = graph.copy();
    let mut lb = 0usize;

    while working.vertex_count() >= 2 {
        let min_degree = working
            .vertices()
            .into_iter()
            .map(|v| working.degree(v))
            .min()
            .expect("at least 2 vertices remain");

        let v = working
            .vertices()
            .into_iter()
            .filter(|&v| working.degree(v) == min_degree)
            .choose(rng.inner_mut())
            .expect("at least one min-degree vertex exists");

        lb = lb.max(working.degree(v));

        let neighbors = working.neighbors(v);
        let min_neighbor_degree = neighbors
            .iter()
            .map(|&u| working.degree(u))
            .min()
            .expect("v has at least one neighbor since vertex_count >= 2 and graph is simple");

        let u = neighbors
            .into_iter()
            .filter(|&u| working.degree(u) == min_neighbor_degree)
            .choose(rng.inner_mut())
            .expect("at least one min-degree neighbor exists");

        working.contract(v, u);
    }

    lb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k4_minor_min_width_is_three() {
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        let mut rng = RngHandle::from_seed(1);
        assert_eq!(minor_min_width(&g, &mut rng), 3);
    }

    #[test]
    fn single_vertex_graph_is_zero() {
        let g = Graph::with_vertices(1);
        let mut rng = RngHandle::from_seed(1);
        assert_eq!(minor_min_width(&g, &mut rng), 0);
    }

    #[test]
    fn path_minor_min_width_is_one() {
        let mut g = Graph::with_vertices(4);
        for i in 1..4u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        let mut rng = RngHandle::from_seed(7);
        assert_eq!(minor_min_width(&g, &mut rng), 1);
    }
}
