use indexmap::IndexMap;
use lot_common::Key;
use serde::{Deserialize, Serialize};

/// A grid is an ordered sequence of axis-sets joined by `+`; each
/// axis-set is an ordered sequence of keyword lists whose Cartesian
/// product yields that axis-set's nodes (spec §3's Grid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid(pub Vec<AxisSet>);

/// One `[a,b][c,d]...`-shaped run of bracketed keyword lists; already
/// range-expanded, not yet deduplicated or producted.
pub type AxisSet = Vec<KwdList>;

/// A single `[...]`, already range-expanded and deduplicated.
pub type KwdList = Vec<String>;

impl Grid {
    pub fn axis_sets(&self) -> &[AxisSet] {
        &self.0
    }

    /// Every keyword literally appearing anywhere in the grid — the
    /// universe I6's validation checks policy keywords against.
    pub fn all_keywords(&self) -> std::collections::HashSet<&str> {
        self.0
            .iter()
            .flat_map(|axis| axis.iter())
            .flat_map(|list| list.iter())
            .map(String::as_str)
            .collect()
    }
}

pub type Actor = String;

/// Ordered actor -> preference-list mapping (spec §3's Policy).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Policy(pub IndexMap<Actor, Vec<RawPref>>);

impl Policy {
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.0.keys()
    }
}

/// Comparison operator of a quantified (`q`) bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Le,
    Eq,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<=" => Some(Self::Le),
            ">=" => Some(Self::Ge),
            "=" => Some(Self::Eq),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            _ => None,
        }
    }

    pub fn eval(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

/// One entry of an `-o[...]` clause: either a plain allow-key or a
/// quantified bound (`key OP int`), per spec's `q` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OEntry {
    Plain(Key),
    Bound(Key, CmpOp, i64),
}

impl OEntry {
    pub fn key(&self) -> &Key {
        match self {
            Self::Plain(k) => k,
            Self::Bound(k, _, _) => k,
        }
    }
}

/// A single raw preference clause as it comes out of the grammar, in
/// source order, preserved exactly (the model layer interprets these
/// the way the original's `read_prefs` does).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawPref {
    /// `@ INT` — exact assignment count.
    Acts(i64),
    /// `/ INT` — minimum root-distance between assignments.
    Rest(i64),
    /// `-o[...]` — allow-list, possibly with quantified bounds.
    O(Vec<OEntry>),
    /// `-x[...]` — forbid-list.
    X(Vec<Key>),
    /// `-![...]` — descending priority order.
    Excl(Vec<Key>),
}
