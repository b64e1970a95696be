//! Result projection, ported from `collect_results`: a by-node view
//! (actor, or the literal `"*"` for a zero-coefficient "extra"
//! assignment) and a by-actor view (sorted node lists).

use indexmap::IndexMap;
use lot_common::Key;
use lot_model::Model;

use crate::backend::Solver;

/// The literal marker used for an "extra"/unavoidable assignment - a
/// node a winning actor has zero coefficient for.
pub const EXTRA: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResult {
    pub by_node: IndexMap<Key, String>,
    pub by_actor: IndexMap<String, Vec<Key>>,
}

impl ScheduleResult {
    pub fn collect<S: Solver>(model: &Model, solver: &S, vars: &IndexMap<lot_model::VarId, S::Var>) -> Self {
        let mut by_node = IndexMap::new();
        let mut by_actor: IndexMap<String, Vec<Key>> = model.actors.iter().map(|a| (a.clone(), Vec::new())).collect();
        for n in 0..model.nodes.len() {
            for (a, actor) in model.actors.iter().enumerate() {
                let vid = model.var_of(a, n);
                if !solver.value(vars[&vid]) {
                    continue;
                }
                let node = model.nodes[n].clone();
                if model.coeffs[&vid] != 0.0 {
                    by_node.insert(node.clone(), actor.clone());
                    by_actor.get_mut(actor).unwrap().push(node);
                } else {
                    by_node.insert(node, EXTRA.to_string());
                }
                break;
            }
        }
        for nodes in by_actor.values_mut() {
            nodes.sort_by(|a, b| {
                lot_common::root_sort_key(a.root().unwrap_or("")).cmp(&lot_common::root_sort_key(b.root().unwrap_or("")))
            });
        }
        Self { by_node, by_actor }
    }

    /// Actor names in the order a reporter should walk `by_actor`.
    pub fn sorted_actors(&self) -> impl Iterator<Item = &str> {
        self.by_actor.keys().map(String::as_str)
    }

    /// Colon-joined display form of a node key, as `lot-cli`'s own
    /// views and a future reporter both want.
    pub fn display_key(&self, key: &Key) -> String {
        key.display_joined()
    }
}
