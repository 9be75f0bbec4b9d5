//! Totalizer cardinality encoding (Bailleux-Boufkhad): a balanced
//! binary merge tree of partial-sum
//! wires, `Theta(n log n)` auxiliary variables and `Theta(n log^2 n)`
//! clauses. The root's output wires `o_1..o_n` mean "at least `i` of the
//! `n` inputs are true"; at-most-k is then just "`o_{k+1}` is false",
//! and `tighten` only ever adds more such unit clauses against the
//! existing wires - the encoding itself never needs to be rebuilt.

use super::AtMostKEncoder;
use crate::formula::Formula;

pub(crate) struct TotalizerNode {
    /// Output wires `o_1..o_m`; `outputs[i]` means "at least `i+1` of the
    /// leaves under this node are true".
    pub(crate) outputs: Vec<i32>,
}

pub(crate) fn build_totalizer(formula: &mut Formula, leaves: &[i32]) -> TotalizerNode {
    if leaves.len() == 1 {
        return TotalizerNode {
            outputs: vec![leaves[0]],
        };
    }

    let mid = leaves.len() / 2;
    let left = build_totalizer(formula, &leaves[..mid]);
    let right = build_totalizer(formula, &leaves[mid..]);
    merge_totalizer_nodes(formula, left, right)
}

/// Merges two partial-count nodes into one node whose output wires count
/// true literals across both - the same clause pattern regardless of
/// whether the children are single leaves or sub-totalizers built over
/// whole groups, which is what lets [`super::commander`] reuse this to
/// combine per-group counts instead of re-deriving a bespoke merge.
pub(crate) fn merge_totalizer_nodes(
    formula: &mut Formula,
    left: TotalizerNode,
    right: TotalizerNode,
) -> TotalizerNode {
    let total = left.outputs.len() + right.outputs.len();
    let outputs: Vec<i32> = (0..total).map(|_| formula.fresh_var()).collect();

    // "at least i" wire for a sub-node, with the convention that "at
    // least 0" is trivially true (so we just omit that literal).
    let wire = |node: &TotalizerNode, at_least: usize| -> Option<i32> {
        if at_least == 0 {
            None
        } else {
            node.outputs.get(at_least - 1).copied()
        }
    };

    for sum in 1..=total {
        // o_sum is implied whenever some split i (left count) + j (right
        // count) = sum is achieved, and o_sum implies some disjunction of
        // such splits holds - standard Bailleux-Boufkhad "both
        // directions" totalizer clauses.
        for i in 0..=left.outputs.len().min(sum) {
            let j = sum - i;
            if j > right.outputs.len() {
                continue;
            }
            // i true on the left and j true on the right -> sum true overall.
            let mut implies_clause = Vec::new();
            if let Some(l) = wire(&left, i) {
                implies_clause.push(-l);
            }
            if let Some(r) = wire(&right, j) {
                implies_clause.push(-r);
            }
            implies_clause.push(outputs[sum - 1]);
            formula.add_clause(implies_clause);

            // the converse: sum true, together with "fewer than i on the
            // left", forces "more than j on the right" (and symmetrically)
            // - encoded as: o_sum AND NOT(left >= i+1) -> right >= j... the
            // practical two clauses used by the totalizer are the
            // "at most" direction mirrored the same way with negated wires.
            let mut converse_clause = Vec::new();
            if let Some(l) = wire(&left, i + 1) {
                converse_clause.push(l);
            }
            if let Some(r) = wire(&right, j + 1) {
                converse_clause.push(r);
            }
            converse_clause.push(-outputs[sum - 1]);
            if i + 1 <= left.outputs.len() || j + 1 <= right.outputs.len() {
                formula.add_clause(converse_clause);
            }
        }
    }

    TotalizerNode { outputs }
}

#[derive(Default)]
pub struct BinaryTotalizerEncoder {
    outputs: Vec<i32>,
}

impl BinaryTotalizerEncoder {
    pub fn new() -> Self {
        BinaryTotalizerEncoder::default()
    }

    fn cap_at(&self, formula: &mut Formula, k: usize) {
        if k < self.outputs.len() {
            formula.add_clause(vec![-self.outputs[k]]);
        }
    }

    pub(crate) fn outputs(&self) -> &[i32] {
        &self.outputs
    }
}

impl AtMostKEncoder for BinaryTotalizerEncoder {
    fn init(&mut self, formula: &mut Formula, variables: &[i32], k: usize) {
        if variables.is_empty() {
            self.outputs = Vec::new();
            return;
        }
        let root = build_totalizer(formula, variables);
        self.outputs = root.outputs;
        self.cap_at(formula, k);
    }

    fn tighten(&mut self, formula: &mut Formula, new_k: usize) {
        self.cap_at(formula, new_k);
    }
}
