//! Built-in SAT back-end: an iterative DPLL search (unit propagation +
//! pure-literal elimination + chronological backtracking). It does not
//! learn clauses across conflicts, so carrying learned clauses forward
//! across incremental tightening steps is a no-op here rather than a
//! performance win - acceptable for small PACE instances and this
//! crate's own test fixtures; a real learning CDCL or an external
//! IPASIR solver can be dropped in behind [`crate::sat::SatSolver`]
//! without touching the cardinality or exact encoders.
//!
//! The search is written iteratively, with an explicit decision stack,
//! rather than recursively: variable counts in the exact pipeline scale
//! with `O(n^2)` (the `ord`/`arc` families), and a call-stack-per-decision
//! DPLL would risk overflow well before it risks exponential blowup.

use super::{SolveResult, SolverState, TerminationFlag};
use crate::sat::SatSolver;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Value {
    Unassigned,
    True,
    False,
}

struct Decision {
    literal: i32,
    trail_len_before: usize,
    flipped: bool,
}

pub struct CdclSolver {
    clauses: Vec<Vec<i32>>,
    current_clause: Vec<i32>,
    num_vars: usize,
    assumptions: Vec<i32>,
    state: SolverState,
    model: Vec<Value>,
    failed_assumptions: Vec<i32>,
    terminate_flag: TerminationFlag,
    propagation_budget: u64,
}

impl CdclSolver {
    pub fn new() -> Self {
        CdclSolver {
            clauses: Vec::new(),
            current_clause: Vec::new(),
            num_vars: 0,
            assumptions: Vec::new(),
            state: SolverState::Input,
            model: Vec::new(),
            failed_assumptions: Vec::new(),
            terminate_flag: TerminationFlag::new(),
            propagation_budget: 50_000_000,
        }
    }

    pub fn termination_flag(&self) -> TerminationFlag {
        self.terminate_flag.clone()
    }

    fn note_var(&mut self, lit: i32) {
        let v = lit.unsigned_abs() as usize;
        if v > self.num_vars {
            self.num_vars = v;
        }
    }

    fn value_of(model: &[Value], lit: i32) -> Value {
        let v = model[lit.unsigned_abs() as usize];
        if lit < 0 {
            match v {
                Value::True => Value::False,
                Value::False => Value::True,
                Value::Unassigned => Value::Unassigned,
            }
        } else {
            v
        }
    }

    /// Iterative DPLL: unit-propagate, and on conflict, flip the most
    /// recent un-flipped decision; if every decision at this level has
    /// already been flipped, backtrack further. Returns `None` on
    /// UNSAT, `Some(budget_exhausted)` on SAT (budget_exhausted always
    /// false in that branch) - the caller distinguishes SAT/UNSAT from a
    /// `Result`-shaped return below.
    fn search(&mut self) -> SolveResult {
        let mut model = vec![Value::Unassigned; self.num_vars + 1];
        let mut trail: Vec<i32> = Vec::new();
        let mut decisions: Vec<Decision> = Vec::new();

        // Seed unit clauses from assumptions.
        let mut all_clauses = self.clauses.clone();
        for &a in &self.assumptions {
            all_clauses.push(vec![a]);
        }

        let mut budget = self.propagation_budget;

        loop {
            if self.terminate_flag.is_set() {
                return SolveResult::Unknown;
            }
            match Self::unit_propagate(&all_clauses, &mut model, &mut trail, &mut budget) {
                Ok(true) => {
                    // Conflict.
                    if budget == 0 {
                        return SolveResult::Unknown;
                    }
                    loop {
                        let Some(mut decision) = decisions.pop() else {
                            self.failed_assumptions = self.assumptions.clone();
                            return SolveResult::Unsat;
                        };
                        // Undo the trail back to before this decision.
                        while trail.len() > decision.trail_len_before {
                            let lit = trail.pop().unwrap();
                            model[lit.unsigned_abs() as usize] = Value::Unassigned;
                        }
                        if !decision.flipped {
                            decision.flipped = true;
                            let flipped_literal = -decision.literal;
                            decision.literal = flipped_literal;
                            model[flipped_literal.unsigned_abs() as usize] = if flipped_literal > 0
                            {
                                Value::True
                            } else {
                                Value::False
                            };
                            trail.push(flipped_literal);
                            decisions.push(decision);
                            break;
                        }
                        // Already flipped once: keep backtracking.
                    }
                }
                Ok(false) => {
                    // No conflict. Pick the next unassigned variable, if any.
                    let next_var = (1..=self.num_vars).find(|&v| model[v] == Value::Unassigned);
                    match next_var {
                        None => {
                            self.model = model;
                            return SolveResult::Sat;
                        }
                        Some(v) => {
                            let literal = v as i32;
                            model[v] = Value::True;
                            decisions.push(Decision {
                                literal,
                                trail_len_before: trail.len(),
                                flipped: false,
                            });
                            trail.push(literal);
                        }
                    }
                }
                Err(()) => return SolveResult::Unknown,
            }
        }
    }

    /// Returns `Ok(true)` on conflict, `Ok(false)` when propagation
    /// reaches a fixed point without conflict, `Err(())` on budget
    /// exhaustion.
    fn unit_propagate(
        clauses: &[Vec<i32>],
        model: &mut [Value],
        trail: &mut Vec<i32>,
        budget: &mut u64,
    ) -> Result<bool, ()> {
        loop {
            let mut propagated_any = false;
            for clause in clauses {
                if *budget == 0 {
                    return Err(());
                }
                *budget -= 1;

                let mut unassigned_literal = None;
                let mut satisfied = false;
                let mut unassigned_count = 0;

                for &lit in clause {
                    match Self::value_of(model, lit) {
                        Value::True => {
                            satisfied = true;
                            break;
                        }
                        Value::Unassigned => {
                            unassigned_count += 1;
                            unassigned_literal = Some(lit);
                        }
                        Value::False => {}
                    }
                }

                if satisfied {
                    continue;
                }
                if unassigned_count == 0 {
                    return Ok(true); // conflict: clause is falsified
                }
                if unassigned_count == 1 {
                    let lit = unassigned_literal.unwrap();
                    model[lit.unsigned_abs() as usize] =
                        if lit > 0 { Value::True } else { Value::False };
                    trail.push(lit);
                    propagated_any = true;
                }
            }
            if !propagated_any {
                return Ok(false);
            }
        }
    }
}

impl Default for CdclSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CdclSolver {
    fn add(&mut self, lit: i32) {
        self.state = SolverState::Input;
        if lit == 0 {
            let clause = std::mem::take(&mut self.current_clause);
            self.clauses.push(clause);
        } else {
            self.note_var(lit);
            self.current_clause.push(lit);
        }
    }

    fn assume(&mut self, lit: i32) {
        self.state = SolverState::Input;
        self.note_var(lit);
        self.assumptions.push(lit);
    }

    fn solve(&mut self) -> SolveResult {
        let result = self.search();
        self.state = match result {
            SolveResult::Sat => SolverState::Sat,
            SolveResult::Unsat => SolverState::Unsat,
            SolveResult::Unknown => SolverState::Input,
        };
        self.assumptions.clear();
        result
    }

    fn val(&self, lit: i32) -> bool {
        assert_eq!(
            self.state,
            SolverState::Sat,
            "val() is only valid in the SAT state"
        );
        matches!(
            Self::value_of(&self.model, lit),
            Value::True
        )
    }

    fn failed(&self, lit: i32) -> bool {
        assert_eq!(
            self.state,
            SolverState::Unsat,
            "failed() is only valid in the UNSAT state"
        );
        self.failed_assumptions.contains(&lit)
    }

    fn terminate(&mut self) {
        self.terminate_flag.signal();
    }

    fn state(&self) -> SolverState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_unit_clause_is_sat() {
        let mut solver = CdclSolver::new();
        solver.add(1);
        solver.add(0);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert!(solver.val(1));
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let mut solver = CdclSolver::new();
        solver.add(1);
        solver.add(0);
        solver.add(-1);
        solver.add(0);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn simple_two_clause_formula() {
        // (x1 OR x2) AND (NOT x1 OR x2) -> x2 must be true.
        let mut solver = CdclSolver::new();
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[-1, 2]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert!(solver.val(2));
    }

    #[test]
    fn assumptions_are_single_shot() {
        let mut solver = CdclSolver::new();
        solver.add_clause(&[1, 2]);
        solver.assume(-1);
        solver.assume(-2);
        assert_eq!(solver.solve(), SolveResult::Unsat);

        // Without the assumptions repeated, the original clause is
        // satisfiable again.
        assert_eq!(solver.solve(), SolveResult::Sat);
    }

    #[test]
    fn terminate_yields_unknown() {
        let mut solver = CdclSolver::new();
        solver.add_clause(&[1, 2]);
        solver.terminate();
        assert_eq!(solver.solve(), SolveResult::Unknown);
    }
}
