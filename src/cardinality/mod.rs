//! Cardinality encoders: a unified `addAtMostK`/`addAtLeastK` surface
//! over several strategies, selected by the orchestrator via
//! [`crate::config::CardinalityStrategy`].

pub mod binary;
pub mod binomial;
pub mod commander;
pub mod sequential;

use crate::formula::Formula;

/// Incremental tightening contract: `init` emits the base encoding for
/// `k`; `step`/`tighten` emits only the delta clauses needed to enforce
/// a strictly smaller bound, reusing whatever auxiliary structure
/// `init` built. The non-incremental strategies (Binomial, Commander)
/// satisfy the same trait by re-emitting a full encoding on every
/// tighten call - correct, just without the "delta only" characteristic.
pub trait AtMostKEncoder {
    fn init(&mut self, formula: &mut Formula, variables: &[i32], k: usize);
    fn tighten(&mut self, formula: &mut Formula, new_k: usize);
}

pub use binary::BinaryTotalizerEncoder;
pub use binomial::BinomialEncoder;
pub use commander::CommanderEncoder;
pub use sequential::SequentialEncoder;

/// One-shot (non-incremental) at-most-k, used by call sites that only
/// ever emit a cardinality constraint once (e.g. L's clique-SAT lower
/// bound does its own incremental at-*least*-k below instead).
pub fn add_at_most_k(formula: &mut Formula, variables: &[i32], k: usize) {
    binomial::add_at_most_k_binomial(formula, variables, k);
}

/// One-shot at-least-k.
pub fn add_at_least_k(formula: &mut Formula, variables: &[i32], k: usize) {
    binomial::add_at_least_k_binomial(formula, variables, k);
}

pub fn make_encoder(strategy: crate::config::CardinalityStrategy) -> Box<dyn AtMostKEncoder> {
    use crate::config::CardinalityStrategy::*;
    match strategy {
        Binomial => Box::new(BinomialEncoder::new()),
        Sequential => Box::new(SequentialEncoder::new()),
        Binary => Box::new(BinaryTotalizerEncoder::new()),
        Commander => Box::new(CommanderEncoder::new()),
    }
}
