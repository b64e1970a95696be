//! Objective composition: `coeff + noise - lambda_e * E - lambda_s * S`,
//! ported from `set_objective` and extended with the low-entropy and
//! load-variance penalties the original never had.
//!
//! `S = sum_a (sum_n x[a,n])^2` expands, for boolean `x`, to a linear
//! term (`sum_a sum_n x[a,n]`, which R1 pins to the constant
//! `|nodes|` and so can be dropped) plus `2 * sum_a sum_{n<n'}
//! x[a,n]*x[a,n']`, so it reduces to a weighted sum of pairwise AND
//! indicators.
//!
//! `E` is a different shape: it is `max(count - 1, 0)` per
//! (actor, shared-component-value) group, *linear* in the clump
//! size, not quadratic - the `(sum x)^2` identity above does not
//! apply to it. It is linearised with one cardinality slack per
//! group instead: `count - 1` boolean slack vars whose sum is
//! constrained to be at least `count - 1`, so at the optimum (the
//! objective only ever pushes the sum down) the sum equals
//! `max(count - 1, 0)` exactly. No continuous solver variable is
//! needed for either penalty.

use std::collections::HashMap;

use indexmap::IndexMap;
use lot_model::{Model, VarId};
use rand::Rng;

use crate::backend::Solver;

pub const TEMPERATURE: f64 = 0.1;
pub const LAMBDA_E: f64 = 0.2;
pub const LAMBDA_S: f64 = 0.2;

fn and_var<S: Solver>(solver: &mut S, a: S::Var, b: S::Var, name: &str) -> S::Var {
    let z = solver.new_bool_var(name);
    solver.add_le(&[(z, 1.0), (a, -1.0)], 0.0);
    solver.add_le(&[(z, 1.0), (b, -1.0)], 0.0);
    solver.add_ge(&[(z, 1.0), (a, -1.0), (b, -1.0)], -1.0);
    z
}

fn pairwise_and_terms<S: Solver>(
    solver: &mut S,
    group: &[S::Var],
    weight: f64,
    label: &str,
) -> Vec<(S::Var, f64)> {
    let mut out = Vec::new();
    for i in 0..group.len() {
        for j in (i + 1)..group.len() {
            let z = and_var(solver, group[i], group[j], &format!("{label}_{i}_{j}"));
            out.push((z, weight));
        }
    }
    out
}

/// `max(sum(group) - 1, 0)`, weighted, as `|group| - 1` boolean slack
/// variables whose sum is pinned from below by `add_ge` and pushed
/// down to that bound by the (negative) objective weight.
fn cardinality_penalty_terms<S: Solver>(
    solver: &mut S,
    group: &[S::Var],
    weight: f64,
    label: &str,
) -> Vec<(S::Var, f64)> {
    if group.len() < 2 {
        return Vec::new();
    }
    let slack: Vec<S::Var> =
        (0..group.len() - 1).map(|i| solver.new_bool_var(&format!("{label}_slack_{i}"))).collect();
    let mut terms: Vec<(S::Var, f64)> = slack.iter().map(|&v| (v, 1.0)).collect();
    terms.extend(group.iter().map(|&v| (v, -1.0)));
    solver.add_ge(&terms, -1.0);
    slack.into_iter().map(|v| (v, weight)).collect()
}

/// Builds the full objective term list and registers whatever
/// auxiliary variables the penalty terms need, but does not call
/// [`Solver::maximize`] itself - callers combine this with anything
/// else they want weighed in first.
pub fn build_objective<S: Solver, R: Rng>(
    solver: &mut S,
    model: &Model,
    vars: &IndexMap<VarId, S::Var>,
    rng: &mut R,
) -> Vec<(S::Var, f64)> {
    let mut terms = Vec::with_capacity(vars.len());
    for a in 0..model.actors.len() {
        for n in 0..model.nodes.len() {
            let vid = model.var_of(a, n);
            let coeff = model.coeffs[&vid];
            let noise = if coeff >= 1.0 { rng.gen_range(0.0..TEMPERATURE) } else { 0.0 };
            terms.push((vars[&vid], coeff + noise));
        }
    }

    // E: discourage one actor taking more than one node sharing a component value.
    let mut by_value: HashMap<&str, Vec<usize>> = HashMap::new();
    for (n, node) in model.nodes.iter().enumerate() {
        for c in node.components() {
            by_value.entry(c.as_str()).or_default().push(n);
        }
    }
    for (value, indices) in &by_value {
        if indices.len() < 2 {
            continue;
        }
        for a in 0..model.actors.len() {
            let group: Vec<S::Var> = indices.iter().map(|&n| vars[&model.var_of(a, n)]).collect();
            terms.extend(cardinality_penalty_terms(solver, &group, -LAMBDA_E, &format!("e_{value}_{a}")));
        }
    }

    // S: discourage unequal per-actor load (the linear |nodes| term R1 pins is a constant, dropped).
    for a in 0..model.actors.len() {
        let group: Vec<S::Var> = (0..model.nodes.len()).map(|n| vars[&model.var_of(a, n)]).collect();
        terms.extend(pairwise_and_terms(solver, &group, -2.0 * LAMBDA_S, &format!("s_{a}")));
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Outcome;
    use crate::rules::{apply_r1, apply_r2, apply_r3, register_vars};
    use crate::stub::StubSolver;
    use lot_dsl::parse_lot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn unconstrained_actor_prefers_its_allow_listed_node() {
        let (grid, policy) = parse_lot("[a,b] + [c]\n---\n<A> -o[a]\n<B>\n").unwrap();
        let model = Model::build(&grid, &policy);
        let mut solver = StubSolver::new();
        let vars = register_vars(&mut solver, &model);
        apply_r1(&mut solver, &model, &vars);
        apply_r2(&mut solver, &model, &vars);
        apply_r3(&mut solver, &model, &vars, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let terms = build_objective(&mut solver, &model, &vars, &mut rng);
        solver.maximize(&terms);
        assert_eq!(solver.solve(), Outcome::Optimal);
        let a_idx = model.actor_index("A").unwrap();
        let node_a = model.nodes.iter().position(|n| n.root() == Some("a")).unwrap();
        assert!(solver.value(vars[&model.var_of(a_idx, node_a)]));
    }

    #[test]
    fn cardinality_penalty_is_linear_not_quadratic_in_clump_size() {
        let mut solver = StubSolver::new();
        let group: Vec<_> = (0..3).map(|i| solver.new_bool_var(&format!("x{i}"))).collect();
        for &v in &group {
            solver.add_eq(&[(v, 1.0)], 1.0);
        }
        let terms = cardinality_penalty_terms(&mut solver, &group, -LAMBDA_E, "e");
        solver.maximize(&terms);
        assert_eq!(solver.solve(), Outcome::Optimal);
        // Three vars all forced on: the true penalty is max(3-1,0)=2, not C(3,2)=3.
        let slack_sum = terms.iter().filter(|&&(v, _)| solver.value(v)).count();
        assert_eq!(slack_sum, 2);
    }
}
