//! Coefficient construction: allow-list membership plus `!`-priority
//! weighting, ported from `process_policy`'s `o`/`!` handling (the
//! `!` weight formula itself is new, per §4.3's last bullet).

use indexmap::IndexMap;
use lot_common::{any_matches, Key};

use crate::prefs::ActorPrefs;
use crate::vars::VarId;

/// `coeff[actor, node] = 1` if the actor has no allow-list or `node`
/// matches one of its allow-list entries, else `0`; `!`-priority
/// entries then add a positive weight on top, but only where the
/// base coefficient is already non-zero (priorities reinforce
/// allowed nodes, never override `o`/`x`).
pub fn build_coeffs(
    actor_prefs: &IndexMap<String, ActorPrefs>,
    nodes: &[Key],
    vars: &IndexMap<(usize, usize), VarId>,
    actor_order: &[String],
) -> IndexMap<VarId, f64> {
    let mut coeffs = IndexMap::with_capacity(vars.len());
    for (a, actor) in actor_order.iter().enumerate() {
        let prefs = &actor_prefs[actor];
        for (n, node) in nodes.iter().enumerate() {
            let base = if prefs.o.is_empty() || any_matches(&prefs.o, node) { 1.0 } else { 0.0 };
            coeffs.insert(vars[&(a, n)], base);
        }
        apply_priority_weights(&mut coeffs, prefs, nodes, vars, a);
    }
    coeffs
}

fn apply_priority_weights(
    coeffs: &mut IndexMap<VarId, f64>,
    prefs: &ActorPrefs,
    nodes: &[Key],
    vars: &IndexMap<(usize, usize), VarId>,
    a: usize,
) {
    let n = prefs.excl.len();
    if n == 0 {
        return;
    }
    for (i, key) in prefs.excl.iter().enumerate() {
        let i = (i + 1) as f64;
        let weight = -(i / n as f64).log10() / (n as f64).sqrt();
        for (ni, node) in nodes.iter().enumerate() {
            let var = vars[&(a, ni)];
            if key.matches(node) {
                if let Some(c) = coeffs.get_mut(&var) {
                    if *c > 0.0 {
                        *c += weight;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::gen_vars;

    #[test]
    fn no_allow_list_means_every_node_coeff_one() {
        let nodes = vec![Key::new(["a"]), Key::new(["b"])];
        let vars = gen_vars(1, 2);
        let mut actor_prefs = IndexMap::new();
        actor_prefs.insert("A".to_string(), ActorPrefs::default());
        let coeffs = build_coeffs(&actor_prefs, &nodes, &vars, &["A".to_string()]);
        assert_eq!(coeffs[&vars[&(0, 0)]], 1.0);
        assert_eq!(coeffs[&vars[&(0, 1)]], 1.0);
    }

    #[test]
    fn allow_list_zeroes_unmatched_nodes() {
        let nodes = vec![Key::new(["a"]), Key::new(["b"])];
        let vars = gen_vars(1, 2);
        let mut prefs = ActorPrefs::default();
        prefs.o = vec![Key::new(["a"])];
        let mut actor_prefs = IndexMap::new();
        actor_prefs.insert("A".to_string(), prefs);
        let coeffs = build_coeffs(&actor_prefs, &nodes, &vars, &["A".to_string()]);
        assert_eq!(coeffs[&vars[&(0, 0)]], 1.0);
        assert_eq!(coeffs[&vars[&(0, 1)]], 0.0);
    }

    #[test]
    fn priority_weight_only_applies_where_coeff_already_nonzero() {
        let nodes = vec![Key::new(["a"]), Key::new(["b"])];
        let vars = gen_vars(1, 2);
        let mut prefs = ActorPrefs::default();
        prefs.o = vec![Key::new(["a"])]; // b stays at coeff 0
        prefs.excl = vec![Key::new(["a"]), Key::new(["b"])];
        let mut actor_prefs = IndexMap::new();
        actor_prefs.insert("A".to_string(), prefs);
        let coeffs = build_coeffs(&actor_prefs, &nodes, &vars, &["A".to_string()]);
        // a: base 1.0 + weight(i=1,n=2) = 1 - log10(0.5)/sqrt(2)
        let expected_a = 1.0 + (-(0.5f64.log10()) / 2f64.sqrt());
        assert!((coeffs[&vars[&(0, 0)]] - expected_a).abs() < 1e-9);
        // b: base 0.0, priority never applied since coeff was zero.
        assert_eq!(coeffs[&vars[&(0, 1)]], 0.0);
    }
}
