//! Commander-style cardinality encoding: groups the
//! variables into fixed-size blocks, counts each block with its own
//! totalizer, then merges the per-block counters pairwise into one
//! combined count to cap at `k` - `Theta(n)` auxiliary structure per
//! block plus a small combining stage, not incremental.

use super::binary::{build_totalizer, merge_totalizer_nodes, TotalizerNode};
use super::AtMostKEncoder;
use crate::formula::Formula;

const GROUP_SIZE: usize = 4;

#[derive(Default)]
pub struct CommanderEncoder {
    variables: Vec<i32>,
    outputs: Vec<i32>,
}

impl CommanderEncoder {
    pub fn new() -> Self {
        CommanderEncoder::default()
    }

    /// Builds one local totalizer per group of [`GROUP_SIZE`] variables,
    /// then folds the group nodes together with
    /// [`merge_totalizer_nodes`] until a single combined node remains.
    fn build_combined(formula: &mut Formula, variables: &[i32]) -> TotalizerNode {
        let mut groups = variables
            .chunks(GROUP_SIZE)
            .map(|group| build_totalizer(formula, group));

        let mut combined = groups.next().expect("variables is non-empty");
        for group in groups {
            combined = merge_totalizer_nodes(formula, combined, group);
        }
        combined
    }

    fn cap_at(&self, formula: &mut Formula, k: usize) {
        if k < self.outputs.len() {
            formula.add_clause(vec![-self.outputs[k]]);
        }
    }
}

impl AtMostKEncoder for CommanderEncoder {
    fn init(&mut self, formula: &mut Formula, variables: &[i32], k: usize) {
        self.variables = variables.to_vec();
        if variables.is_empty() {
            self.outputs = Vec::new();
            return;
        }
        let combined = Self::build_combined(formula, &self.variables);
        self.outputs = combined.outputs;
        self.cap_at(formula, k);
    }

    fn tighten(&mut self, formula: &mut Formula, new_k: usize) {
        // Not incremental: re-derive the whole grouped totalizer for
        // the new bound.
        self.init(formula, &self.variables.clone(), new_k);
    }
}
