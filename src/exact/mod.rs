//! Exact SAT decomposer.

pub mod embedding;
pub mod encoding;
pub mod search;
pub mod symmetry;

pub use encoding::{BaseEncoder, ExactEncoder, ImprovedEncoder, LadderEncoder};
pub use search::solve_exact;
