//! Production backend over Google's CP-SAT, via the `cp_sat` crate.
//!
//! CP-SAT's linear constraints take integer coefficients; every
//! constraint the rule engine builds already has coefficients in
//! `{-1, 0, 1}`, so those round-trip exactly. The objective is the one
//! place fractional weights appear (the `!`-priority terms), so it is
//! scaled to a fixed-point integer before being handed to the model
//! and the reported objective value is scaled back down.

use cp_sat::builder::CpModelBuilder;
use cp_sat::proto::CpSolverStatus;

use crate::backend::{Outcome, Solver};

/// Fixed-point scale for objective coefficients. Large enough that the
/// priority-weight formula's precision survives rounding.
const OBJ_SCALE: f64 = 1_000_000.0;

pub struct CpSatSolver {
    model: CpModelBuilder,
    vars: Vec<cp_sat::builder::BoolVar>,
    response: Option<cp_sat::proto::CpSolverResponse>,
}

impl Default for CpSatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CpSatSolver {
    pub fn new() -> Self {
        Self { model: CpModelBuilder::default(), vars: Vec::new(), response: None }
    }

    fn linear(&self, terms: &[(usize, f64)]) -> cp_sat::builder::LinearExpr {
        let mut expr = cp_sat::builder::LinearExpr::default();
        for &(v, c) in terms {
            expr = expr.add_term(self.vars[v], c.round() as i64);
        }
        expr
    }
}

impl Solver for CpSatSolver {
    type Var = usize;

    fn new_bool_var(&mut self, name: &str) -> usize {
        let var = self.model.new_bool_var_with_name(name);
        self.vars.push(var);
        self.vars.len() - 1
    }

    fn add_eq(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.model.add_eq(self.linear(terms), rhs.round() as i64);
    }

    fn add_le(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.model.add_le(self.linear(terms), rhs.round() as i64);
    }

    fn add_ge(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.model.add_ge(self.linear(terms), rhs.round() as i64);
    }

    fn maximize(&mut self, terms: &[(usize, f64)]) {
        let mut expr = cp_sat::builder::LinearExpr::default();
        for &(v, c) in terms {
            expr = expr.add_term(self.vars[v], (c * OBJ_SCALE).round() as i64);
        }
        self.model.maximize(expr);
    }

    fn solve(&mut self) -> Outcome {
        let response = self.model.solve();
        let outcome = match response.status() {
            CpSolverStatus::Optimal => Outcome::Optimal,
            CpSolverStatus::Feasible => Outcome::Feasible,
            CpSolverStatus::Infeasible => Outcome::Infeasible,
            _ => Outcome::ModelInvalid,
        };
        self.response = Some(response);
        outcome
    }

    fn value(&self, var: usize) -> bool {
        match &self.response {
            Some(r) => self.vars[var].solution_value(r),
            None => false,
        }
    }
}
