//! An in-memory backend good enough to actually solve the small
//! instances this crate's tests build, without pulling in CP-SAT.
//!
//! It is a small bounds-consistency + branch-and-bound search: at
//! every step it tightens every constraint's achievable range given
//! the vars still unassigned, forces any variable whose remaining
//! assignment is uniquely determined, and backtracks on contradiction.
//! That alone resolves almost all of the structure our rules produce
//! (every "exactly one of" / "at most one of" cardinality constraint
//! collapses immediately once one member is set), so the residual
//! search tree stays tiny for realistic grids.

use std::collections::HashMap;

use crate::backend::{Outcome, Solver};

const EPS: f64 = 1e-6;

#[derive(Clone, Copy)]
enum Rel {
    Eq,
    Le,
    Ge,
}

struct Constraint {
    terms: Vec<(usize, f64)>,
    rhs: f64,
    rel: Rel,
}

impl Constraint {
    /// `(fixed, min_of_unassigned, max_of_unassigned)`.
    fn bounds(&self, assignment: &[Option<bool>]) -> (f64, f64, f64) {
        let mut fixed = 0.0;
        let mut min_u = 0.0;
        let mut max_u = 0.0;
        for &(v, c) in &self.terms {
            match assignment[v] {
                Some(true) => fixed += c,
                Some(false) => {}
                None => {
                    if c > 0.0 {
                        max_u += c;
                    } else {
                        min_u += c;
                    }
                }
            }
        }
        (fixed, min_u, max_u)
    }

    fn feasible(&self, lo: f64, hi: f64) -> bool {
        match self.rel {
            Rel::Eq => lo <= self.rhs + EPS && self.rhs <= hi + EPS,
            Rel::Le => lo <= self.rhs + EPS,
            Rel::Ge => hi >= self.rhs - EPS,
        }
    }
}

/// A brute-force-but-pruned boolean ILP solver, scoped to the
/// problem sizes this workspace's own tests build.
#[derive(Default)]
pub struct StubSolver {
    names: Vec<String>,
    constraints: Vec<Constraint>,
    objective: Vec<(usize, f64)>,
    assignment: Vec<bool>,
}

impl StubSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn propagate(&self, assignment: &mut [Option<bool>], forced: &mut Vec<usize>) -> bool {
        let mut changed = true;
        while changed {
            changed = false;
            for c in &self.constraints {
                let (fixed, min_u, max_u) = c.bounds(assignment);
                if !c.feasible(fixed + min_u, fixed + max_u) {
                    return false;
                }
                for &(v, coef) in &c.terms {
                    if assignment[v].is_some() {
                        continue;
                    }
                    let min_excl = min_u - coef.min(0.0);
                    let max_excl = max_u - coef.max(0.0);
                    let feasible_false = c.feasible(fixed + min_excl, fixed + max_excl);
                    let feasible_true = c.feasible(fixed + coef + min_excl, fixed + coef + max_excl);
                    if !feasible_false && !feasible_true {
                        return false;
                    } else if !feasible_false {
                        assignment[v] = Some(true);
                        forced.push(v);
                        changed = true;
                    } else if !feasible_true {
                        assignment[v] = Some(false);
                        forced.push(v);
                        changed = true;
                    }
                }
            }
        }
        true
    }

    /// `(value if complete/partial-true-so-far, upper bound achievable from here)`.
    fn objective_bound(&self, assignment: &[Option<bool>]) -> (f64, f64) {
        let mut partial = 0.0;
        let mut bound = 0.0;
        for &(v, c) in &self.objective {
            match assignment[v] {
                Some(true) => {
                    partial += c;
                    bound += c;
                }
                Some(false) => {}
                None => {
                    if c > 0.0 {
                        bound += c;
                    }
                }
            }
        }
        (partial, bound)
    }

    fn search(&self, assignment: &mut Vec<Option<bool>>, best: &mut Option<(Vec<bool>, f64)>) {
        let mut forced = Vec::new();
        if !self.propagate(assignment, &mut forced) {
            for v in forced {
                assignment[v] = None;
            }
            return;
        }
        let (_, ub) = self.objective_bound(assignment);
        if let Some((_, best_val)) = best {
            if ub <= *best_val + EPS {
                for v in forced {
                    assignment[v] = None;
                }
                return;
            }
        }
        match assignment.iter().position(|a| a.is_none()) {
            Some(next) => {
                for val in [true, false] {
                    assignment[next] = Some(val);
                    self.search(assignment, best);
                }
                assignment[next] = None;
            }
            None => {
                let (obj, _) = self.objective_bound(assignment);
                let better = match best {
                    Some((_, v)) => obj > *v + EPS,
                    None => true,
                };
                if better {
                    *best = Some((assignment.iter().map(|a| a.unwrap()).collect(), obj));
                }
            }
        }
        for v in forced {
            assignment[v] = None;
        }
    }
}

impl Solver for StubSolver {
    type Var = usize;

    fn new_bool_var(&mut self, name: &str) -> usize {
        self.names.push(name.to_string());
        self.names.len() - 1
    }

    fn add_eq(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.constraints.push(Constraint { terms: terms.to_vec(), rhs, rel: Rel::Eq });
    }

    fn add_le(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.constraints.push(Constraint { terms: terms.to_vec(), rhs, rel: Rel::Le });
    }

    fn add_ge(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.constraints.push(Constraint { terms: terms.to_vec(), rhs, rel: Rel::Ge });
    }

    fn maximize(&mut self, terms: &[(usize, f64)]) {
        let mut merged: HashMap<usize, f64> = HashMap::new();
        for &(v, c) in terms {
            *merged.entry(v).or_insert(0.0) += c;
        }
        self.objective = merged.into_iter().collect();
    }

    fn solve(&mut self) -> Outcome {
        let mut assignment = vec![None; self.names.len()];
        let mut best = None;
        self.search(&mut assignment, &mut best);
        match best {
            Some((vals, _)) => {
                self.assignment = vals;
                Outcome::Optimal
            }
            None => Outcome::Infeasible,
        }
    }

    fn value(&self, var: usize) -> bool {
        self.assignment.get(var).copied().unwrap_or(false)
    }
}
