//! Per-actor preference interpretation, ported from `read_prefs` and
//! extended with the `/` (rest-gap) and `!` (priority) tags the
//! original never had.

use lot_common::Key;
use lot_dsl::{CmpOp, OEntry, RawPref};

/// One actor's preferences, folded out of the raw clause list in the
/// shape the model/solver stages actually consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorPrefs {
    /// `@ N` — exact assignment count; `None` if unset.
    pub acts: Option<i64>,
    /// `/ N` — minimum root-distance between assignments; `None`/`0`
    /// both mean "no rest rule".
    pub rest: Option<i64>,
    /// Allow-list key-tuples (`o`, including the key half of any
    /// quantified `o` entries).
    pub o: Vec<Key>,
    /// Forbid-list key-tuples (`x`).
    pub x: Vec<Key>,
    /// Quantified bounds contributed by `o`-clause `rexpr` entries.
    pub q: Vec<(Key, CmpOp, i64)>,
    /// `!` priority order, highest priority first.
    pub excl: Vec<Key>,
}

impl ActorPrefs {
    pub fn min_rest(&self) -> i64 {
        self.rest.unwrap_or(0)
    }
}

/// Fold a raw preference clause list into one [`ActorPrefs`] — the
/// original's `read_prefs`, with `@`/`/` overwriting on repeat (last
/// occurrence wins, matching the original's plain dict assignment)
/// and `o`/`x`/`!` accumulating across every clause in source order.
pub fn read_prefs(raw: &[RawPref]) -> ActorPrefs {
    let mut out = ActorPrefs::default();
    for pref in raw {
        match pref {
            RawPref::Acts(n) => out.acts = Some(*n),
            RawPref::Rest(n) => out.rest = Some(*n),
            RawPref::O(entries) => {
                for entry in entries {
                    match entry {
                        OEntry::Plain(k) => out.o.push(k.clone()),
                        OEntry::Bound(k, op, v) => {
                            out.o.push(k.clone());
                            out.q.push((k.clone(), *op, *v));
                        }
                    }
                }
            }
            RawPref::X(keys) => out.x.extend(keys.iter().cloned()),
            RawPref::Excl(keys) => out.excl.extend(keys.iter().cloned()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acts_and_rest_overwrite_on_repeat() {
        let raw = vec![RawPref::Acts(1), RawPref::Rest(2), RawPref::Acts(3)];
        let p = read_prefs(&raw);
        assert_eq!(p.acts, Some(3));
        assert_eq!(p.rest, Some(2));
    }

    #[test]
    fn bound_o_entry_feeds_both_allow_list_and_quantifier() {
        let raw = vec![RawPref::O(vec![OEntry::Bound(Key::new(["mon"]), CmpOp::Ge, 2)])];
        let p = read_prefs(&raw);
        assert_eq!(p.o, vec![Key::new(["mon"])]);
        assert_eq!(p.q, vec![(Key::new(["mon"]), CmpOp::Ge, 2)]);
    }

    #[test]
    fn empty_prefs_have_no_rest_rule() {
        assert_eq!(ActorPrefs::default().min_rest(), 0);
    }
}
