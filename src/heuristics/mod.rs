//! Heuristic upper bounds: a portfolio of permutation-producing
//! strategies, each piped through
//! [`crate::elimination::eliminate`] to yield a decomposition.

pub mod mcs;
pub mod min_degree;
pub mod min_fill;
pub mod tabu;

use crate::decomposition::TreeDecomposition;
use crate::graph::Graph;
use crate::rng::RngHandle;
use crate::vertex::VertexId;

/// Enumerable portfolio members, so the orchestrator can run all of
/// them, name which one produced the incumbent, and test each in
/// isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    MinDegree,
    MinFill,
    Mcs,
    /// Degeneracy-ordering seed (the Matula-Beck peeling order already
    /// computed for L's lower bound, reused here since it's paid for).
    MmwSeeded,
}

/// Produces a permutation for `graph` under `kind`. `MmwSeeded` ignores
/// `rng` - the degeneracy peeling order has no ties broken by chance.
pub fn run_heuristic(kind: HeuristicKind, graph: &Graph, rng: &mut RngHandle) -> Vec<VertexId> {
    match kind {
        HeuristicKind::MinDegree => min_degree::min_degree_order(graph, rng),
        HeuristicKind::MinFill => min_fill::min_fill_order(graph, rng),
        HeuristicKind::Mcs => mcs::maximum_cardinality_search(graph, rng),
        HeuristicKind::MmwSeeded => crate::lower_bounds::degeneracy::peeling_order(graph),
    }
}

/// Anytime reporting hook: one implementation writes `c status
/// <width+1> <epoch-ms>` lines to stdout, another collects into a
/// `Vec` for tests, so the tabu loop itself never has a print call
/// baked in.
pub trait AnytimeReporter {
    fn report(&mut self, decomposition: &TreeDecomposition);
}

/// Discards every report - used where the caller only wants the final
/// result and has no interest in the anytime stream.
pub struct NullReporter;

impl AnytimeReporter for NullReporter {
    fn report(&mut self, _decomposition: &TreeDecomposition) {}
}

/// Collects every reported decomposition's width, in order - a test
/// double for asserting on the anytime stream without capturing stdout.
#[derive(Default)]
pub struct VecReporter {
    pub widths: Vec<usize>,
}

impl AnytimeReporter for VecReporter {
    fn report(&mut self, decomposition: &TreeDecomposition) {
        self.widths.push(decomposition.width());
    }
}
