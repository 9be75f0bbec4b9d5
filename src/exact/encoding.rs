//! Order/arc variable family and the three SAT encodings sharing it:
//! Base (Samer-Veith), Improved, and Ladder. All three
//! emit everything except the width cardinality constraint, which
//! [`super::search`] layers on top with an [`crate::cardinality::AtMostKEncoder`]
//! per vertex.

use crate::formula::Formula;
use crate::graph::Graph;
use crate::vertex::VertexId;
use rustc_hash::FxHashMap;

/// `ord[i][j]` (`i < j`) means "vertex `i` eliminated before vertex `j`";
/// `arc[i][j]` means "there is a directed arc `i -> j` in the
/// triangulated graph, oriented by elimination order". Indices are
/// positions into a fixed, sorted vertex list - not `VertexId`s.
pub struct OrdArcVars {
    pub n: usize,
    ord: Vec<Vec<i32>>,
    arc: Vec<Vec<i32>>,
}

impl OrdArcVars {
    fn allocate(formula: &mut Formula, n: usize) -> Self {
        let mut ord = vec![vec![0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                ord[i][j] = formula.fresh_var();
            }
        }
        let mut arc = vec![vec![0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    arc[i][j] = formula.fresh_var();
                }
            }
        }
        OrdArcVars { n, ord, arc }
    }

    /// Literal meaning "`i` before `j`", for any `i != j` (not just `i < j`).
    pub fn ord_lit(&self, i: usize, j: usize) -> i32 {
        if i < j {
            self.ord[i][j]
        } else {
            -self.ord[j][i]
        }
    }

    pub fn arc_lit(&self, i: usize, j: usize) -> i32 {
        self.arc[i][j]
    }

    /// The row of arc variables `arc[u][*]` (`u` excluded) - what the
    /// per-vertex width cardinality constraint is built over.
    pub fn arc_row(&self, u: usize) -> Vec<i32> {
        (0..self.n).filter(|&j| j != u).map(|j| self.arc[u][j]).collect()
    }
}

/// Builds `index_of`/`vertices`: a fixed, sorted correspondence between
/// `VertexId`s and the `0..n` positions the variable family is indexed by.
pub fn index_vertices(graph: &Graph) -> (Vec<VertexId>, FxHashMap<VertexId, usize>) {
    let vertices = graph.vertices();
    let index_of = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    (vertices, index_of)
}

pub trait ExactEncoder {
    /// Emits every axiom but the width cardinality constraint.
    fn encode(
        &self,
        formula: &mut Formula,
        graph: &Graph,
        vertices: &[VertexId],
        index_of: &FxHashMap<VertexId, usize>,
    ) -> OrdArcVars;
}

fn transitivity_clauses(formula: &mut Formula, vars: &OrdArcVars) {
    for i in 0..vars.n {
        for j in 0..vars.n {
            if i == j {
                continue;
            }
            for l in 0..vars.n {
                if l == i || l == j {
                    continue;
                }
                // ord(i,j) and ord(j,l) => ord(i,l)
                formula.add_clause(vec![
                    -vars.ord_lit(i, j),
                    -vars.ord_lit(j, l),
                    vars.ord_lit(i, l),
                ]);
            }
        }
    }
}

fn edge_induces_arc_clauses(formula: &mut Formula, graph: &Graph, vars: &OrdArcVars, vertices: &[VertexId]) {
    for i in 0..vars.n {
        for j in (i + 1)..vars.n {
            if !graph.is_adjacent(vertices[i], vertices[j]) {
                continue;
            }
            // ord(i,j) => arc(i,j); ord(j,i) => arc(j,i).
            formula.add_clause(vec![-vars.ord_lit(i, j), vars.arc_lit(i, j)]);
            formula.add_clause(vec![-vars.ord_lit(j, i), vars.arc_lit(j, i)]);
        }
    }
}

pub struct BaseEncoder;

impl ExactEncoder for BaseEncoder {
    fn encode(
        &self,
        formula: &mut Formula,
        graph: &Graph,
        vertices: &[VertexId],
        index_of: &FxHashMap<VertexId, usize>,
    ) -> OrdArcVars {
        let _ = index_of;
        let vars = OrdArcVars::allocate(formula, vertices.len());

        transitivity_clauses(formula, &vars);
        edge_induces_arc_clauses(formula, graph, &vars, vertices);

        // Elimination closure: arc(i,j) and arc(i,l) and ord(j,l) => arc(j,l),
        // for every ordered (j,l) sharing predecessor i - covers both
        // orientations since the loop ranges over all j != l, not just j < l.
        for i in 0..vars.n {
            for j in 0..vars.n {
                if j == i {
                    continue;
                }
                for l in 0..vars.n {
                    if l == i || l == j {
                        continue;
                    }
                    formula.add_clause(vec![
                        -vars.arc_lit(i, j),
                        -vars.arc_lit(i, l),
                        -vars.ord_lit(j, l),
                        vars.arc_lit(j, l),
                    ]);
                }
            }
        }

        vars
    }
}

pub struct ImprovedEncoder;

impl ExactEncoder for ImprovedEncoder {
    fn encode(
        &self,
        formula: &mut Formula,
        graph: &Graph,
        vertices: &[VertexId],
        index_of: &FxHashMap<VertexId, usize>,
    ) -> OrdArcVars {
        let _ = index_of;
        let vars = OrdArcVars::allocate(formula, vertices.len());

        transitivity_clauses(formula, &vars);
        edge_induces_arc_clauses(formula, graph, &vars, vertices);

        // Common-predecessor implies edge: a weaker (cheaper-propagating)
        // closure than Base's - requires *some* arc between j and l
        // rather than deriving its exact orientation from ord.
        for i in 0..vars.n {
            for j in 0..vars.n {
                if j == i {
                    continue;
                }
                for l in (j + 1)..vars.n {
                    if l == i {
                        continue;
                    }
                    formula.add_clause(vec![
                        -vars.arc_lit(i, j),
                        -vars.arc_lit(i, l),
                        vars.arc_lit(j, l),
                        vars.arc_lit(l, j),
                    ]);
                }
            }
        }

        // Arc orientation is consistent with ord, both directions (a
        // tighter biconditional than Base, which only asserts one way).
        for i in 0..vars.n {
            for j in 0..vars.n {
                if i == j {
                    continue;
                }
                formula.add_clause(vec![-vars.arc_lit(i, j), vars.ord_lit(i, j)]);
            }
        }

        // Antisymmetry: arc(i,j) => not arc(j,i).
        for i in 0..vars.n {
            for j in (i + 1)..vars.n {
                formula.add_clause(vec![-vars.arc_lit(i, j), -vars.arc_lit(j, i)]);
            }
        }

        vars
    }
}

/// Same axioms as [`ImprovedEncoder`]; kept as a distinct type so the
/// orchestrator can select it and so [`super::search`] can special-case
/// its width constraint onto the sequential-counter ("ladder") encoder
/// specifically, matching the name's origin as a unary register chain.
pub struct LadderEncoder {
    inner: ImprovedEncoder,
}

impl LadderEncoder {
    pub fn new() -> Self {
        LadderEncoder { inner: ImprovedEncoder }
    }
}

impl Default for LadderEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExactEncoder for LadderEncoder {
    fn encode(
        &self,
        formula: &mut Formula,
        graph: &Graph,
        vertices: &[VertexId],
        index_of: &FxHashMap<VertexId, usize>,
    ) -> OrdArcVars {
        self.inner.encode(formula, graph, vertices, index_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cdcl::CdclSolver;
    use crate::sat::{SatSolver, SolveResult};

    fn triangle() -> Graph {
        let mut g = Graph::with_vertices(3);
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g.add_edge(VertexId(1), VertexId(3));
        g
    }

    #[test]
    fn base_encoding_of_a_triangle_is_satisfiable() {
        let g = triangle();
        let (vertices, index_of) = index_vertices(&g);
        let mut formula = Formula::new();
        BaseEncoder.encode(&mut formula, &g, &vertices, &index_of);

        let mut solver = CdclSolver::new();
        for clause in formula.clauses() {
            solver.add_clause(clause);
        }
        assert_eq!(solver.solve(), SolveResult::Sat);
    }

    #[test]
    fn improved_encoding_of_a_triangle_is_satisfiable() {
        let g = triangle();
        let (vertices, index_of) = index_vertices(&g);
        let mut formula = Formula::new();
        ImprovedEncoder.encode(&mut formula, &g, &vertices, &index_of);

        let mut solver = CdclSolver::new();
        for clause in formula.clauses() {
            solver.add_clause(clause);
        }
        assert_eq!(solver.solve(), SolveResult::Sat);
    }
}
