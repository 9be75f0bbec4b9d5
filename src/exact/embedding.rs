//! Embedding encoder, an alternative to the `ord`/`arc` pipeline: variables
//! place each vertex into exactly one node of a complete binary tree of depth
//! `ceil(log2 n)`; an edge's endpoints must land on a common root path
//! (one an ancestor of the other). Unlike the primary `ord`/`arc`
//! pipeline in [`super::search`], this produces a decomposition
//! directly - the bag at a node is the union of everything embedded
//! along its root path, and the tree edges are exactly the binary
//! tree's parent links.
//!
//! Violation clauses could in principle be added lazily as conflicts
//! arise; they are generated eagerly here instead, since the ancestor
//! relation is cheap to decide (bit-shift on the heap index) and
//! doesn't benefit from staying lazy at the scale this alternative
//! path is meant for.

use super::encoding::index_vertices;
use crate::cardinality::{make_encoder, AtMostKEncoder};
use crate::config::CardinalityStrategy;
use crate::decomposition::{BagId, DecompositionQuality, TreeDecomposition};
use crate::formula::Formula;
use crate::graph::Graph;
use crate::sat::cdcl::CdclSolver;
use crate::sat::{SatSolver, SolveResult};
use rustc_hash::{FxHashMap, FxHashSet};

fn is_ancestor(mut descendant: usize, ancestor: usize) -> bool {
    while descendant > 0 {
        if descendant == ancestor {
            return true;
        }
        descendant /= 2;
    }
    false
}

/// Returns the best decomposition found before the bag-size bound first
/// goes infeasible, or `None` if even the initial (vacuous) bound is
/// unsatisfiable - which should not happen for a simple graph, but the
/// search loop checks rather than assumes it.
pub fn solve_embedding(graph: &Graph, cardinality_strategy: CardinalityStrategy) -> Option<TreeDecomposition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Some(TreeDecomposition::trivial(graph.copy(), DecompositionQuality::Exact));
    }

    let depth = ((n as f64).log2().ceil() as u32).max(0);
    let tree_size = (1usize << (depth + 1)) - 1;
    let (vertices, _) = index_vertices(graph);

    let mut formula = Formula::new();
    let mut embed = vec![vec![0i32; tree_size + 1]; n];
    for row in embed.iter_mut() {
        for node in 1..=tree_size {
            row[node] = formula.fresh_var();
        }
    }

    for row in &embed {
        let lits: Vec<i32> = row[1..=tree_size].to_vec();
        formula.add_clause(lits.clone());
        for i in 0..lits.len() {
            for j in (i + 1)..lits.len() {
                formula.add_clause(vec![-lits[i], -lits[j]]);
            }
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if !graph.is_adjacent(vertices[i], vertices[j]) {
                continue;
            }
            for a in 1..=tree_size {
                for b in 1..=tree_size {
                    if a == b || is_ancestor(a, b) || is_ancestor(b, a) {
                        continue;
                    }
                    formula.add_clause(vec![-embed[i][a], -embed[j][b]]);
                }
            }
        }
    }

    let mut node_encoders: Vec<Box<dyn AtMostKEncoder>> =
        (0..tree_size).map(|_| make_encoder(cardinality_strategy)).collect();
    let mut k = n;
    for (idx, encoder) in node_encoders.iter_mut().enumerate() {
        let node = idx + 1;
        let lits: Vec<i32> = (0..n).map(|v| embed[v][node]).collect();
        encoder.init(&mut formula, &lits, k);
    }

    let mut solver = CdclSolver::new();
    for clause in formula.clauses() {
        solver.add_clause(clause);
    }

    let mut best: Option<TreeDecomposition> = None;

    loop {
        match solver.solve() {
            SolveResult::Sat => {
                let mut decomposition = TreeDecomposition::new(graph.copy(), DecompositionQuality::Exact);
                let mut bag_id_of_node: FxHashMap<usize, BagId> = FxHashMap::default();

                for node in 1..=tree_size {
                    let mut bag_vertices: FxHashSet<_> = FxHashSet::default();
                    for (v, row) in embed.iter().enumerate() {
                        let mut cur = node;
                        loop {
                            if solver.val(row[cur]) {
                                bag_vertices.insert(vertices[v]);
                            }
                            if cur == 1 {
                                break;
                            }
                            cur /= 2;
                        }
                    }
                    let id = decomposition.create_bag(bag_vertices);
                    bag_id_of_node.insert(node, id);
                }
                for node in 2..=tree_size {
                    decomposition.add_tree_edge(bag_id_of_node[&node], bag_id_of_node[&(node / 2)]);
                }

                if k == 0 {
                    best = Some(decomposition);
                    break;
                }
                best = Some(decomposition);
                k -= 1;
                let before = formula.clause_count();
                for encoder in node_encoders.iter_mut() {
                    encoder.tighten(&mut formula, k);
                }
                formula.flush_into(&mut solver, before);
            }
            SolveResult::Unsat | SolveResult::Unknown => break,
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::VertexId;

    #[test]
    fn triangle_embedding_is_valid() {
        let mut g = Graph::with_vertices(3);
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g.add_edge(VertexId(1), VertexId(3));

        let decomposition = solve_embedding(&g, CardinalityStrategy::Sequential)
            .expect("a triangle always has a feasible embedding");
        assert!(decomposition.is_valid());
    }

    #[test]
    fn single_vertex_embedding_is_trivial() {
        let g = Graph::with_vertices(1);
        let decomposition =
            solve_embedding(&g, CardinalityStrategy::Sequential).expect("feasible");
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 0);
    }
}
