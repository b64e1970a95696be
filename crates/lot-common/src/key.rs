use serde::{Deserialize, Serialize};

/// A flattened tuple of keyword components — a grid node, or the
/// match key of an `o`/`x`/`!`/`q` preference entry.
///
/// Equivalent to the Python original's plain tuples of strings; kept
/// as a thin newtype so "is `key` a subset of `node`'s components"
/// (the `match_node` rule from the original, and I2/I5's matching
/// semantics in the spec) has one obvious home.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(pub Vec<String>);

impl Key {
    pub fn new(parts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// The first component — a node's "root" (spec §3's Root), or a
    /// match key's leading component.
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// True iff every component of `self` appears somewhere in
    /// `node`'s components (order-insensitive, per spec's `o`/`x`/`q`
    /// "superset of some listed key-tuple" semantics).
    pub fn matches(&self, node: &Key) -> bool {
        self.0.iter().all(|c| node.0.contains(c))
    }

    /// Colon-joined display form, as the original's `jx(node)` renders it.
    pub fn display_joined(&self) -> String {
        self.0.join(":")
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_joined())
    }
}

/// True if every component of every key in `keys` matches `node` for
/// at least one `key` — i.e. `node` satisfies *some* entry in an
/// allow/forbid list (the original's `match_node(prefs, node)`).
pub fn any_matches(keys: &[Key], node: &Key) -> bool {
    keys.iter().any(|k| k.matches(node))
}

/// Numeric-aware comparison key for sorting by root: parses as an
/// integer when every character is a digit, falls back to lexical
/// order otherwise — the original's `dsort`.
pub fn root_sort_key(root: &str) -> (bool, i64, &str) {
    if !root.is_empty() && root.chars().all(|c| c.is_ascii_digit()) {
        (false, root.parse::<i64>().unwrap_or(i64::MAX), "")
    } else {
        (true, 0, root)
    }
}
