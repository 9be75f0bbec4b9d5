//! Clique-via-SAT lower bound: one variable per vertex,
//! a clause `not(u) or not(v)` for every non-edge, and an incremental
//! at-least-k cardinality constraint starting at `k = 1`. Every SAT
//! result raises `k`; the first UNSAT ends the search. A clique of size
//! `k` forces any valid decomposition to have a bag containing all of
//! it, so the returned bound is `k - 1`, not `k` itself.

use crate::cardinality::{AtMostKEncoder, SequentialEncoder};
use crate::formula::Formula;
use crate::graph::Graph;
use crate::sat::cdcl::CdclSolver;
use crate::sat::{SatSolver, SolveResult};

/// Returns `None` only if the step budget is exhausted before even
/// `k = 1` can be confirmed satisfiable (which requires at least one
/// solver call to succeed); `Some(w)` otherwise, where `w` is the
/// largest clique found minus one.
pub fn clique_via_sat(graph: &Graph, step_budget: usize) -> Option<usize> {
    let vertices = graph.vertices();
    let n = vertices.len();
    if n == 0 {
        return Some(0);
    }

    let vars: Vec<i32> = (1..=n as i32).collect();
    let mut formula = Formula::new();
    formula.reserve_vars(n as i32);

    for i in 0..n {
        for j in (i + 1)..n {
            if !graph.is_adjacent(vertices[i], vertices[j]) {
                formula.add_clause(vec![-vars[i], -vars[j]]);
            }
        }
    }

    // at-least-k of the x_i true <=> at-most-(n-k) of their negations
    // true; encoding "at most n-1" up front (the bound for k=1) lets
    // every later increase in k reuse the registers via `tighten`.
    let neg_vars: Vec<i32> = vars.iter().map(|&v| -v).collect();
    let mut encoder = SequentialEncoder::new();
    if n > 1 {
        encoder.init(&mut formula, &neg_vars, n - 1);
    }

    let mut solver = CdclSolver::new();
    for clause in formula.clauses() {
        solver.add_clause(clause);
    }

    let mut last_sat: Option<usize> = None;
    let mut k = 1usize;
    let mut steps = 0usize;

    while steps < step_budget && k <= n {
        steps += 1;
        match solver.solve() {
            SolveResult::Sat => {
                last_sat = Some(k);
                k += 1;
                if k > n || n <= 1 {
                    break;
                }
                let before = formula.clause_count();
                encoder.tighten(&mut formula, n - k);
                formula.flush_into(&mut solver, before);
            }
            SolveResult::Unsat | SolveResult::Unknown => break,
        }
    }

    last_sat.map(|k| k.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::VertexId;

    #[test]
    fn empty_graph_has_zero_bound() {
        assert_eq!(clique_via_sat(&Graph::new(), 100), Some(0));
    }

    #[test]
    fn single_vertex_has_zero_bound() {
        let g = Graph::with_vertices(1);
        assert_eq!(clique_via_sat(&g, 100), Some(0));
    }

    #[test]
    fn k4_has_bound_three() {
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        assert_eq!(clique_via_sat(&g, 1000), Some(3));
    }

    #[test]
    fn triangle_plus_pendant_has_bound_two() {
        // {1,2,3} form a triangle, 4 only adjacent to 1.
        let mut g = Graph::with_vertices(4);
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g.add_edge(VertexId(1), VertexId(3));
        g.add_edge(VertexId(1), VertexId(4));
        assert_eq!(clique_via_sat(&g, 1000), Some(2));
    }

    #[test]
    fn path_has_bound_one() {
        let mut g = Graph::with_vertices(4);
        for i in 1..4u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        assert_eq!(clique_via_sat(&g, 1000), Some(1));
    }

    #[test]
    fn zero_step_budget_yields_none() {
        let mut g = Graph::with_vertices(2);
        g.add_edge(VertexId(1), VertexId(2));
        assert_eq!(clique_via_sat(&g, 0), None);
    }
}
