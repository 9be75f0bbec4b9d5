//! SAT solver abstraction.
//!
//! Three-state IPASIR-like machine (`INPUT`/`SAT`/`UNSAT`). The core
//! consumes solvers only through the [`SatSolver`] trait object, so an
//! external incremental solver can be dropped in later without touching
//! the cardinality encoders or the exact decomposer.
//! [`cdcl::CdclSolver`] is the one built-in back-end.

pub mod cdcl;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Input,
    Sat,
    Unsat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// Interrupted via `terminate` before a verdict was reached.
    Unknown,
}

/// IPASIR-style incremental SAT solver contract.
pub trait SatSolver {
    /// Adds one literal of the clause currently being built; `0` closes
    /// the clause. Always transitions the solver to `INPUT`.
    fn add(&mut self, lit: i32);

    /// Registers a single-shot unit assumption for the next `solve()`
    /// call. Always transitions the solver to `INPUT`.
    fn assume(&mut self, lit: i32);

    /// Solves under the accumulated clauses and assumptions. Consumes
    /// the assumptions (they do not persist to the next call).
    fn solve(&mut self) -> SolveResult;

    /// Valid only in `SAT`: the truth value assigned to `lit`'s variable.
    fn val(&self, lit: i32) -> bool;

    /// Valid only in `UNSAT`: whether `lit` participated in the
    /// unsatisfiable core of assumptions.
    fn failed(&self, lit: i32) -> bool;

    /// Async-safe cancellation; the next `solve()` (or one already in
    /// progress on another thread, for the parallel backend) returns
    /// `Unknown` / leaves the state at `INPUT`.
    fn terminate(&mut self);

    fn state(&self) -> SolverState;

    /// Convenience wrapper around repeated `add` calls plus the closing
    /// `0`, used throughout C and X instead of spelling out the
    /// zero-terminated literal stream by hand.
    fn add_clause(&mut self, literals: &[i32]) {
        for &lit in literals {
            debug_assert_ne!(lit, 0, "clause literals must be non-zero");
            self.add(lit);
        }
        self.add(0);
    }
}

/// Shared, cloneable termination flag. Threading one of these through a
/// worker pool ensures any blocked worker honors cancellation within
/// bounded delay: the orchestrator flips the flag, every
/// solver/heuristic polling loop observes it at its next poll point.
#[derive(Clone, Default)]
pub struct TerminationFlag(Arc<AtomicBool>);

impl TerminationFlag {
    pub fn new() -> Self {
        TerminationFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn signal(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
