//! The hard-constraint rule engine, R1-R4, ported from
//! `rule_single_actor_per_node`, `rule_at_most_one_act_per_root`,
//! `rule_clip_act_per_actor` and `process_policy`'s `@`/`x`/`q`
//! handling, plus R4 (rest-gap) which the original never had.

use indexmap::IndexMap;
use lot_common::Key;
use lot_dsl::CmpOp;
use lot_model::{Model, VarId};

use crate::backend::Solver;

/// One solver variable per model variable, in the backend's own
/// handle type.
pub fn register_vars<S: Solver>(solver: &mut S, model: &Model) -> IndexMap<VarId, S::Var> {
    let mut out = IndexMap::with_capacity(model.vars.len());
    for (&(a, n), &vid) in &model.vars {
        let name = lot_model::vars::var_name(&model.actors[a], &model.nodes[n]);
        out.insert(vid, solver.new_bool_var(&name));
    }
    out
}

fn row<S: Solver>(model: &Model, vars: &IndexMap<VarId, S::Var>, a: usize) -> Vec<(S::Var, f64)> {
    (0..model.nodes.len()).map(|n| (vars[&model.var_of(a, n)], 1.0)).collect()
}

/// R1: every node is assigned to exactly one actor.
pub fn apply_r1<S: Solver>(solver: &mut S, model: &Model, vars: &IndexMap<VarId, S::Var>) {
    for n in 0..model.nodes.len() {
        let terms: Vec<_> = (0..model.actors.len()).map(|a| (vars[&model.var_of(a, n)], 1.0)).collect();
        solver.add_eq(&terms, 1.0);
    }
}

/// R2: an actor takes at most one node per root.
pub fn apply_r2<S: Solver>(solver: &mut S, model: &Model, vars: &IndexMap<VarId, S::Var>) {
    for a in 0..model.actors.len() {
        for indices in model.root_map.values() {
            let terms: Vec<_> = indices.iter().map(|&n| (vars[&model.var_of(a, n)], 1.0)).collect();
            solver.add_le(&terms, 1.0);
        }
    }
}

/// R3: clip every actor's total act count to `[1, max_acts]`, plus
/// the per-actor `@`-exact-count and `q`-bound constraints from the
/// model builder.
pub fn apply_r3<S: Solver>(solver: &mut S, model: &Model, vars: &IndexMap<VarId, S::Var>, max_acts: i64) {
    for (a, actor) in model.actors.iter().enumerate() {
        let terms = row::<S>(model, vars, a);
        solver.add_ge(&terms, 1.0);
        solver.add_le(&terms, max_acts as f64);

        let prefs = &model.actor_prefs[actor];
        if let Some(n) = prefs.acts {
            solver.add_eq(&terms, n as f64);
        }
        for (key, op, val) in &prefs.q {
            apply_qbound(solver, model, vars, a, key, *op, *val);
        }
    }
}

fn apply_qbound<S: Solver>(
    solver: &mut S,
    model: &Model,
    vars: &IndexMap<VarId, S::Var>,
    a: usize,
    key: &Key,
    op: CmpOp,
    val: i64,
) {
    let terms: Vec<_> = (0..model.nodes.len())
        .filter(|&n| key.matches(&model.nodes[n]))
        .map(|n| (vars[&model.var_of(a, n)], 1.0))
        .collect();
    match op {
        CmpOp::Lt => solver.add_le(&terms, (val - 1) as f64),
        CmpOp::Le => solver.add_le(&terms, val as f64),
        CmpOp::Eq => solver.add_eq(&terms, val as f64),
        CmpOp::Gt => solver.add_ge(&terms, (val + 1) as f64),
        CmpOp::Ge => solver.add_ge(&terms, val as f64),
    }
}

/// Hard `x`-forbid clauses: any node matching one of an actor's
/// forbid-list tuples is pinned to `0` for that actor.
pub fn apply_x_forbid<S: Solver>(solver: &mut S, model: &Model, vars: &IndexMap<VarId, S::Var>) {
    for (a, actor) in model.actors.iter().enumerate() {
        let prefs = &model.actor_prefs[actor];
        if prefs.x.is_empty() {
            continue;
        }
        for n in 0..model.nodes.len() {
            if lot_common::any_matches(&prefs.x, &model.nodes[n]) {
                solver.add_eq(&[(vars[&model.var_of(a, n)], 1.0)], 0.0);
            }
        }
    }
}

/// R4: for every actor whose rest-gap (own `/`, falling back to
/// `default_min_rest` when unset) is `k > 0`, forbid assignment to any
/// of the `k` roots following a root the actor was scheduled on, via
/// a `sched_{actor,root}` indicator per root reified from that root's
/// vars.
pub fn apply_r4<S: Solver>(solver: &mut S, model: &Model, vars: &IndexMap<VarId, S::Var>, default_min_rest: i64) {
    let roots: Vec<&String> = model.root_map.keys().collect();
    for (a, actor) in model.actors.iter().enumerate() {
        let prefs = &model.actor_prefs[actor];
        let k = prefs.rest.unwrap_or(default_min_rest);
        if k <= 0 {
            continue;
        }
        let k = k as usize;
        let sched: Vec<S::Var> = roots
            .iter()
            .map(|root| {
                let terms: Vec<S::Var> =
                    model.root_map[root.as_str()].iter().map(|&n| vars[&model.var_of(a, n)]).collect();
                solver.reify_or(&terms, &format!("sched_{actor}_{root}"))
            })
            .collect();
        for i in 0..roots.len() {
            for offset in 1..=k {
                let j = i + offset;
                if j >= roots.len() {
                    break;
                }
                for &n in &model.root_map[roots[j].as_str()] {
                    solver.implies_zero(sched[i], vars[&model.var_of(a, n)]);
                }
            }
        }
    }
}
