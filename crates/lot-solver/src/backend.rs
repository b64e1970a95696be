//! The solving backend boundary. Everything above this trait (the
//! rule engine, the objective, the widening loop) talks only to
//! [`Solver`], so it runs unchanged against [`crate::stub::StubSolver`]
//! in tests and [`crate::cpsat::CpSatSolver`] in production.

use std::fmt::Debug;
use std::hash::Hash;

/// What [`Solver::solve`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A feasible assignment was found and proven optimal.
    Optimal,
    /// A feasible assignment was found but optimality was not proven.
    Feasible,
    /// No assignment satisfies every constraint.
    Infeasible,
    /// The model itself is malformed (backend-reported, not expected
    /// to happen from well-formed rule-engine output).
    ModelInvalid,
}

impl Outcome {
    pub fn is_feasible(self) -> bool {
        matches!(self, Outcome::Optimal | Outcome::Feasible)
    }
}

/// A linear boolean constraint/optimisation backend: one fresh model
/// per call to [`crate::widen::solve`]'s inner loop, built up with
/// boolean variables and `sum(coeff * var) REL rhs` constraints, then
/// solved once.
///
/// `reify_or`/`implies_zero` are provided in terms of the three
/// primitive constraint kinds, so a backend only has to implement the
/// seven methods above to be usable end to end.
pub trait Solver {
    type Var: Copy + Eq + Hash + Debug;

    fn new_bool_var(&mut self, name: &str) -> Self::Var;
    fn add_eq(&mut self, terms: &[(Self::Var, f64)], rhs: f64);
    fn add_le(&mut self, terms: &[(Self::Var, f64)], rhs: f64);
    fn add_ge(&mut self, terms: &[(Self::Var, f64)], rhs: f64);
    fn maximize(&mut self, terms: &[(Self::Var, f64)]);
    fn solve(&mut self) -> Outcome;
    fn value(&self, var: Self::Var) -> bool;

    /// Introduces a fresh boolean var constrained to equal `OR(vars)`:
    /// used by R4 to build each actor/root "was scheduled at all"
    /// indicator ahead of the rest-gap implication.
    fn reify_or(&mut self, vars: &[Self::Var], name: &str) -> Self::Var {
        let ind = self.new_bool_var(name);
        for &v in vars {
            self.add_ge(&[(ind, 1.0), (v, -1.0)], 0.0);
        }
        let mut terms: Vec<(Self::Var, f64)> = vars.iter().map(|&v| (v, 1.0)).collect();
        terms.push((ind, -1.0));
        self.add_ge(&terms, 0.0);
        ind
    }

    /// Hard clause `indicator => var == 0`.
    fn implies_zero(&mut self, indicator: Self::Var, var: Self::Var) {
        self.add_le(&[(var, 1.0), (indicator, 1.0)], 1.0);
    }
}
