//! Binomial cardinality encoding: `Theta(n^{k+1})` clauses, no
//! auxiliary variables, not incremental - every `tighten` call
//! re-derives the encoding for the new `k` from scratch.

use super::AtMostKEncoder;
use crate::formula::Formula;
use itertools::Itertools;

/// At-most-k: for every subset of size `k+1`, at least one literal must
/// be false.
pub fn add_at_most_k_binomial(formula: &mut Formula, variables: &[i32], k: usize) {
    if k >= variables.len() {
        return;
    }
    for subset in variables.iter().combinations(k + 1) {
        formula.add_clause(subset.into_iter().map(|&lit| -lit).collect());
    }
}

/// At-least-k: for every subset of size `n - k + 1`, at least one
/// literal must be true (the De Morgan dual of at-most-`(k-1)` over the
/// negated literals).
pub fn add_at_least_k_binomial(formula: &mut Formula, variables: &[i32], k: usize) {
    if k == 0 {
        return;
    }
    if k > variables.len() {
        // Unsatisfiable in principle; emit a trivially false clause so
        // the contradiction shows up at solve time rather than silently
        // vanishing.
        formula.add_clause(vec![]);
        return;
    }
    let subset_size = variables.len() - k + 1;
    for subset in variables.iter().combinations(subset_size) {
        formula.add_clause(subset.into_iter().copied().collect());
    }
}

#[derive(Default)]
pub struct BinomialEncoder {
    variables: Vec<i32>,
}

impl BinomialEncoder {
    pub fn new() -> Self {
        BinomialEncoder::default()
    }
}

impl AtMostKEncoder for BinomialEncoder {
    fn init(&mut self, formula: &mut Formula, variables: &[i32], k: usize) {
        self.variables = variables.to_vec();
        add_at_most_k_binomial(formula, &self.variables, k);
    }

    fn tighten(&mut self, formula: &mut Formula, new_k: usize) {
        add_at_most_k_binomial(formula, &self.variables, new_k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_of_two_forbids_both() {
        let mut formula = Formula::new();
        add_at_most_k_binomial(&mut formula, &[1, 2], 1);
        assert_eq!(formula.clauses(), &[vec![-1, -2]]);
    }

    #[test]
    fn at_least_two_of_three() {
        let mut formula = Formula::new();
        add_at_least_k_binomial(&mut formula, &[1, 2, 3], 2);
        // subset_size = 3 - 2 + 1 = 2, so every pair must contain a true.
        assert_eq!(formula.clause_count(), 3);
    }

    #[test]
    fn at_most_k_no_op_when_k_covers_all_variables() {
        let mut formula = Formula::new();
        add_at_most_k_binomial(&mut formula, &[1, 2], 5);
        assert_eq!(formula.clause_count(), 0);
    }
}
