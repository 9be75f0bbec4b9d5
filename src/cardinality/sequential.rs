//! Sequential-counter cardinality encoding (Sinz-style): `Theta(n*k)`
//! clauses and auxiliary registers, incremental via monotone
//! tightening.
//!
//! Registers `s[i][j]` (1-indexed, `i` in `1..n`, `j` in `1..=k_max`)
//! mean "at least `j` of `x_1..x_i` are true". They are built once for
//! the *initial* bound `k_max` (the exact search starts at `k = ub`
//! and only ever tightens downward), so every later
//! `tighten(k')` with `k' <= k_max` can reuse the existing registers and
//! add only the clauses capping the count at `k'`: `not s[i][k'+1]` for
//! each `i`, forbidding the `(k'+1)`-th true from ever being reached.
//! That is exactly the delta an incremental tightening contract asks for.

use super::AtMostKEncoder;
use crate::formula::Formula;

#[derive(Default)]
pub struct SequentialEncoder {
    variables: Vec<i32>,
    /// registers[i][j] = s_{i+1, j+1} (0-indexed storage for a 1-indexed
    /// definition), sized for the initial k_max.
    registers: Vec<Vec<i32>>,
    k_max: usize,
}

impl SequentialEncoder {
    pub fn new() -> Self {
        SequentialEncoder::default()
    }
}

impl AtMostKEncoder for SequentialEncoder {
    fn init(&mut self, formula: &mut Formula, variables: &[i32], k: usize) {
        self.variables = variables.to_vec();
        self.k_max = k;
        let n = variables.len();

        if n == 0 || k == 0 {
            if k == 0 {
                for &x in variables {
                    formula.add_clause(vec![-x]);
                }
            }
            return;
        }
        if k >= n {
            return; // Constraint is vacuous.
        }

        // registers[i][j] for i in 0..n-1, j in 0..k (register s_{i+1,j+1})
        self.registers = (0..n - 1)
            .map(|_| (0..k).map(|_| formula.fresh_var()).collect())
            .collect();

        let x = &self.variables;
        let s = &self.registers;

        // s_{1,1}: x1 -> s[0][0]
        formula.add_clause(vec![-x[0], s[0][0]]);
        // s_{1,j} false for j=2..k
        for j in 1..k {
            formula.add_clause(vec![-s[0][j]]);
        }

        for i in 1..n - 1 {
            // x_i -> s_{i,1}
            formula.add_clause(vec![-x[i], s[i][0]]);
            // s_{i-1,1} -> s_{i,1}
            formula.add_clause(vec![-s[i - 1][0], s[i][0]]);
            for j in 1..k {
                // x_i AND s_{i-1,j-1} -> s_{i,j}
                formula.add_clause(vec![-x[i], -s[i - 1][j - 1], s[i][j]]);
                // s_{i-1,j} -> s_{i,j}
                formula.add_clause(vec![-s[i - 1][j], s[i][j]]);
            }
            // x_i AND s_{i-1,k} -> false (would be the (k+1)-th true)
            formula.add_clause(vec![-x[i], -s[i - 1][k - 1]]);
        }

        // x_n AND s_{n-1,k} -> false
        formula.add_clause(vec![-x[n - 1], -s[n - 2][k - 1]]);
    }

    fn tighten(&mut self, formula: &mut Formula, new_k: usize) {
        assert!(
            new_k <= self.k_max,
            "sequential counter registers only go up to the initial bound"
        );
        let n = self.variables.len();
        if n == 0 || new_k >= n {
            return;
        }
        if self.registers.is_empty() {
            // init() treated the original k as vacuous (k >= n); nothing
            // to cap incrementally, fall back to a full rebuild.
            self.init(formula, &self.variables.clone(), new_k);
            return;
        }

        // Forbid the (new_k+1)-th true at every prefix length, reusing
        // the existing registers: s_{i, new_k+1} must be false.
        if new_k == 0 {
            for &x in &self.variables {
                formula.add_clause(vec![-x]);
            }
            return;
        }
        for i in 0..n - 1 {
            if new_k < self.registers[i].len() {
                formula.add_clause(vec![-self.registers[i][new_k]]);
            }
        }
        self.k_max = new_k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cdcl::CdclSolver;
    use crate::sat::{SatSolver, SolveResult};

    #[test]
    fn at_most_two_of_four_allows_two_true() {
        let mut formula = Formula::new();
        let mut encoder = SequentialEncoder::new();
        encoder.init(&mut formula, &[1, 2, 3, 4], 2);

        let mut solver = CdclSolver::new();
        for clause in formula.clauses() {
            solver.add_clause(clause);
        }
        solver.add_clause(&[1]);
        solver.add_clause(&[2]);
        assert_eq!(solver.solve(), SolveResult::Sat);
    }

    #[test]
    fn at_most_two_of_four_forbids_three_true() {
        let mut formula = Formula::new();
        let mut encoder = SequentialEncoder::new();
        encoder.init(&mut formula, &[1, 2, 3, 4], 2);

        let mut solver = CdclSolver::new();
        for clause in formula.clauses() {
            solver.add_clause(clause);
        }
        solver.add_clause(&[1]);
        solver.add_clause(&[2]);
        solver.add_clause(&[3]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn tightening_to_one_forbids_two_true() {
        let mut formula = Formula::new();
        let mut encoder = SequentialEncoder::new();
        encoder.init(&mut formula, &[1, 2, 3, 4], 2);
        encoder.tighten(&mut formula, 1);

        let mut solver = CdclSolver::new();
        for clause in formula.clauses() {
            solver.add_clause(clause);
        }
        solver.add_clause(&[1]);
        solver.add_clause(&[2]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }
}
