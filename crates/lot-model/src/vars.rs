//! Opaque solver variable allocation, ported from `gen_vars`.

use indexmap::IndexMap;

/// An opaque handle to a `(actor, node)` boolean solver variable.
/// Solver-agnostic — `lot-solver`'s backend trait maps these to its
/// own native variable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u32);

/// One boolean variable per `(actor index, node index)` pair, keyed
/// exactly as spec §3 describes (flattened `(actor, *node)` tuple) —
/// here as index pairs rather than strings, with the display name
/// computed on demand by [`var_name`] for backends that want one.
pub fn gen_vars(num_actors: usize, num_nodes: usize) -> IndexMap<(usize, usize), VarId> {
    let mut vars = IndexMap::with_capacity(num_actors * num_nodes);
    let mut next = 0u32;
    for a in 0..num_actors {
        for n in 0..num_nodes {
            vars.insert((a, n), VarId(next));
            next += 1;
        }
    }
    vars
}

/// `"_".join((actor, *node))` — the original's debuggable variable
/// name, useful for a backend's `new_bool_var(name)` call.
pub fn var_name(actor: &str, node: &lot_common::Key) -> String {
    std::iter::once(actor).chain(node.components().iter().map(String::as_str)).collect::<Vec<_>>().join("_")
}
