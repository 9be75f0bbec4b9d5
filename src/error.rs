//! Error taxonomy.
//!
//! Decomposers never throw to their caller under normal operation: they
//! encapsulate failure into either a (possibly poor) decomposition or a
//! lower-bound sentinel (`-1`, modeled here as `None`). `TreewidthError`
//! exists for the boundary code that *is* allowed to fail outright: input
//! parsing and anything that would otherwise have to fabricate a bogus
//! result. Invariant violations remain `panic!`/`assert!` - programmer
//! errors are never recovered.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreewidthError {
    #[error("malformed input at line {line}: {message}")]
    InputFormat { line: usize, message: String },

    #[error("solver failure: {0}")]
    SolverFailure(String),

    #[error("budget exhausted before a result could be produced")]
    BudgetExhausted,
}

pub type Result<T> = std::result::Result<T, TreewidthError>;
