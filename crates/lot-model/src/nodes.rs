//! Node-set and root-map construction, ported from `gen_nodes`/
//! `dsort` and the root-grouping done inline in
//! `rule_at_most_one_act_per_root`.

use std::collections::HashSet;

use indexmap::IndexMap;
use lot_common::{root_sort_key, Key};
use lot_dsl::Grid;

/// `nodes = concat(cart(axis-set) for axis-set in grid)`, deduplicated
/// in construction order, then sorted by root (numeric-aware).
pub fn gen_nodes(grid: &Grid) -> Vec<Key> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for axis in grid.axis_sets() {
        for combo in cartesian(axis) {
            let key = Key::new(combo);
            if seen.insert(key.clone()) {
                out.push(key);
            }
        }
    }
    out.sort_by(|a, b| root_sort_key(a.root().unwrap_or("")).cmp(&root_sort_key(b.root().unwrap_or(""))));
    out
}

fn cartesian(lists: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(out.len() * list.len().max(1));
        for prefix in &out {
            for item in list {
                let mut v = prefix.clone();
                v.push(item.clone());
                next.push(v);
            }
        }
        out = next;
    }
    out
}

/// `root -> indices into `nodes`` sharing that root, in the order
/// roots first appear in (already-sorted) `nodes`.
pub fn root_map(nodes: &[Key]) -> IndexMap<String, Vec<usize>> {
    let mut map: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, node) in nodes.iter().enumerate() {
        let root = node.root().unwrap_or("").to_string();
        map.entry(root).or_default().push(i);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(axes: &[&[&[&str]]]) -> Grid {
        Grid(
            axes.iter()
                .map(|axis| axis.iter().map(|list| list.iter().map(|s| s.to_string()).collect()).collect())
                .collect(),
        )
    }

    #[test]
    fn cartprods_one_axis_set() {
        let g = grid(&[&[&["a", "b"], &["c"]]]);
        let nodes = gen_nodes(&g);
        assert_eq!(nodes, vec![Key::new(["a", "c"]), Key::new(["b", "c"])]);
    }

    #[test]
    fn concatenates_axis_sets_and_sorts_numeric_roots() {
        let g = grid(&[&[&["3", "1"]], &[&["2"]]]);
        let nodes = gen_nodes(&g);
        assert_eq!(nodes, vec![Key::new(["1"]), Key::new(["2"]), Key::new(["3"])]);
    }

    #[test]
    fn dedups_identical_nodes() {
        let g = grid(&[&[&["a"]], &[&["a"]]]);
        assert_eq!(gen_nodes(&g), vec![Key::new(["a"])]);
    }

    #[test]
    fn root_map_groups_by_first_component() {
        let nodes = vec![Key::new(["mon", "am"]), Key::new(["mon", "pm"]), Key::new(["tue", "am"])];
        let rmap = root_map(&nodes);
        assert_eq!(rmap["mon"], vec![0, 1]);
        assert_eq!(rmap["tue"], vec![2]);
    }
}
