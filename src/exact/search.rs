//! Exact search loop: initialize the solver with the base formula plus
//! a per-vertex at-most-k cardinality constraint at
//! `k = ub`; repeat - solve, and on SAT extract+record the permutation
//! and tighten `k <- k-1`; on UNSAT, the last recorded permutation is
//! optimal.

use super::encoding::{index_vertices, BaseEncoder, ExactEncoder, ImprovedEncoder, LadderEncoder, OrdArcVars};
use super::symmetry::symmetry_breaking_clauses;
use crate::cardinality::{make_encoder, AtMostKEncoder};
use crate::config::{CardinalityStrategy, Config, SatEncoding};
use crate::decomposition::{DecompositionQuality, TreeDecomposition};
use crate::elimination::eliminate;
use crate::formula::Formula;
use crate::graph::Graph;
use crate::sat::cdcl::CdclSolver;
use crate::sat::{SatSolver, SolveResult, TerminationFlag};
use crate::vertex::VertexId;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

fn extract_permutation(
    solver: &dyn SatSolver,
    vars: &OrdArcVars,
    vertices: &[VertexId],
    index_of: &FxHashMap<VertexId, usize>,
) -> Vec<VertexId> {
    let mut order = vertices.to_vec();
    order.sort_by(|&a, &b| {
        let (ia, ib) = (index_of[&a], index_of[&b]);
        if ia == ib {
            Ordering::Equal
        } else if solver.val(vars.ord_lit(ia, ib)) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    });
    order
}

/// Drives the incremental SAT search between `0` and `upper_bound`,
/// falling back to the trivial one-bag decomposition if no SAT model
/// is ever found - which only happens if `upper_bound` itself is
/// infeasible, since the elimination-order decomposer always produces
/// a valid decomposition at `n - 1`.
pub fn solve_exact(
    graph: &Graph,
    upper_bound: usize,
    config: &Config,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let n = graph.vertex_count();
    if n == 0 {
        return TreeDecomposition::trivial(graph.copy(), DecompositionQuality::Exact);
    }

    let (vertices, index_of) = index_vertices(graph);
    let mut formula = Formula::new();

    let vars: OrdArcVars = match config.sat_encoding {
        SatEncoding::Base => BaseEncoder.encode(&mut formula, graph, &vertices, &index_of),
        SatEncoding::Improved => ImprovedEncoder.encode(&mut formula, graph, &vertices, &index_of),
        SatEncoding::Ladder => {
            LadderEncoder::new().encode(&mut formula, graph, &vertices, &index_of)
        }
    };

    for clause in symmetry_breaking_clauses(graph, &vars, &index_of, n.max(1)) {
        formula.add_clause(clause);
    }

    // The ladder encoding is named for a unary register chain; give it
    // the sequential-counter cardinality strategy regardless of the
    // orchestrator's configured default.
    let cardinality_strategy = match config.sat_encoding {
        SatEncoding::Ladder => CardinalityStrategy::Sequential,
        _ => config.cardinality_strategy,
    };

    let mut row_encoders: Vec<Box<dyn AtMostKEncoder>> =
        (0..n).map(|_| make_encoder(cardinality_strategy)).collect();

    let mut k = upper_bound.min(n.saturating_sub(1));
    for (u, encoder) in row_encoders.iter_mut().enumerate() {
        encoder.init(&mut formula, &vars.arc_row(u), k);
    }

    let mut solver = CdclSolver::new();
    for clause in formula.clauses() {
        solver.add_clause(clause);
    }

    let mut best_permutation: Option<Vec<VertexId>> = None;

    loop {
        if terminate.is_set() {
            solver.terminate();
            break;
        }
        match solver.solve() {
            SolveResult::Sat => {
                best_permutation = Some(extract_permutation(&solver, &vars, &vertices, &index_of));
                if k == 0 {
                    break;
                }
                k -= 1;
                let before = formula.clause_count();
                for encoder in row_encoders.iter_mut() {
                    encoder.tighten(&mut formula, k);
                }
                formula.flush_into(&mut solver, before);
            }
            SolveResult::Unsat | SolveResult::Unknown => break,
        }
    }

    match best_permutation {
        Some(permutation) => eliminate(graph, &permutation, DecompositionQuality::Exact),
        None => TreeDecomposition::trivial(graph.copy(), DecompositionQuality::Exact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> Graph {
        let mut g = Graph::with_vertices(4);
        for u in 1..=4u32 {
            for v in (u + 1)..=4u32 {
                g.add_edge(VertexId(u), VertexId(v));
            }
        }
        g
    }

    fn cycle(n: u32) -> Graph {
        let mut g = Graph::with_vertices(n as usize);
        for i in 1..n {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        g.add_edge(VertexId(n), VertexId(1));
        g
    }

    #[test]
    fn k4_exact_width_is_three() {
        let g = k4();
        let config = Config::default();
        let terminate = TerminationFlag::new();
        let decomposition = solve_exact(&g, 3, &config, &terminate);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 3);
    }

    #[test]
    fn c5_exact_width_is_two() {
        let g = cycle(5);
        let config = Config::default();
        let terminate = TerminationFlag::new();
        let decomposition = solve_exact(&g, 4, &config, &terminate);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 2);
    }

    #[test]
    fn p5_exact_width_is_one() {
        let mut g = Graph::with_vertices(5);
        for i in 1..5u32 {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        let config = Config::default();
        let terminate = TerminationFlag::new();
        let decomposition = solve_exact(&g, 4, &config, &terminate);
        assert!(decomposition.is_valid());
        assert_eq!(decomposition.width(), 1);
    }

    #[test]
    fn empty_graph_has_width_zero() {
        let g = Graph::new();
        let config = Config::default();
        let terminate = TerminationFlag::new();
        let decomposition = solve_exact(&g, 0, &config, &terminate);
        assert_eq!(decomposition.width(), 0);
    }

    #[test]
    fn base_and_ladder_encodings_agree_on_k4() {
        let g = k4();
        let mut base_config = Config::default();
        base_config.sat_encoding = SatEncoding::Base;
        let mut ladder_config = Config::default();
        ladder_config.sat_encoding = SatEncoding::Ladder;

        let terminate = TerminationFlag::new();
        let base_width = solve_exact(&g, 3, &base_config, &terminate).width();
        let ladder_width = solve_exact(&g, 3, &ladder_config, &terminate).width();
        assert_eq!(base_width, ladder_width);
    }
}
