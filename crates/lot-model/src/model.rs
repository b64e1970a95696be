use indexmap::IndexMap;
use lot_common::Key;
use lot_dsl::{Grid, Policy};

use crate::coefficients::build_coeffs;
use crate::nodes::{gen_nodes, root_map};
use crate::prefs::{read_prefs, ActorPrefs};
use crate::vars::{gen_vars, VarId};

/// Everything the rule engine and objective need: the node set, the
/// root grouping, one boolean variable per `(actor, node)`, each
/// variable's coefficient, and each actor's interpreted preferences.
/// Construction assumes the policy has already passed
/// [`lot_dsl::validate::validate_policy`] (I6).
pub struct Model {
    pub nodes: Vec<Key>,
    pub root_map: IndexMap<String, Vec<usize>>,
    pub actors: Vec<String>,
    pub vars: IndexMap<(usize, usize), VarId>,
    pub coeffs: IndexMap<VarId, f64>,
    pub actor_prefs: IndexMap<String, ActorPrefs>,
}

impl Model {
    pub fn build(grid: &Grid, policy: &Policy) -> Self {
        let nodes = gen_nodes(grid);
        let root_map = root_map(&nodes);
        let actors: Vec<String> = policy.0.keys().cloned().collect();
        let vars = gen_vars(actors.len(), nodes.len());
        let actor_prefs: IndexMap<String, ActorPrefs> =
            actors.iter().map(|a| (a.clone(), read_prefs(&policy.0[a]))).collect();
        let coeffs = build_coeffs(&actor_prefs, &nodes, &vars, &actors);
        Self { nodes, root_map, actors, vars, coeffs, actor_prefs }
    }

    pub fn actor_index(&self, actor: &str) -> Option<usize> {
        self.actors.iter().position(|a| a == actor)
    }

    pub fn var_of(&self, actor_idx: usize, node_idx: usize) -> VarId {
        self.vars[&(actor_idx, node_idx)]
    }
}
