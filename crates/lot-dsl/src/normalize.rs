//! Range expansion (`expand`) and Cartesian-product normalisation
//! (`unfold`), ported from `expand`/`unfold` in the original.

use lot_common::Key;

use crate::ast::CmpOp;

/// Expand a single keyword token: `"N-M"` -> every integer `N..=M` as
/// strings, `"N-M;K"` -> stepped `N, N+K, ..` bounded by `M`
/// (inclusive), anything else -> itself unchanged. Internal whitespace
/// around `-`/`;` is tolerated, matching the original's regexes.
pub fn expand(token: &str) -> Vec<String> {
    if let Some((n, m)) = match_span(token) {
        return if n > m { Vec::new() } else { (n..=m).map(|x| x.to_string()).collect() };
    }
    if let Some((n, m, k)) = match_step(token) {
        if k == 0 {
            return vec![token.to_string()];
        }
        let mut out = Vec::new();
        let mut i = n;
        while i <= m {
            out.push(i.to_string());
            i += k;
        }
        return out;
    }
    vec![token.to_string()]
}

/// `(\d+)\s*-\s*(\d+)` — full match required.
fn match_span(token: &str) -> Option<(i64, i64)> {
    let (n, rest) = take_digits(token)?;
    let rest = skip_ws(rest);
    let rest = rest.strip_prefix('-')?;
    let rest = skip_ws(rest);
    let (m, rest) = take_digits(rest)?;
    if !rest.is_empty() {
        return None;
    }
    Some((n, m))
}

/// `(\d+)\s*-\s*(\d+)\s*;\s*(\d+)` — full match required.
fn match_step(token: &str) -> Option<(i64, i64, i64)> {
    let (n, rest) = take_digits(token)?;
    let rest = skip_ws(rest);
    let rest = rest.strip_prefix('-')?;
    let rest = skip_ws(rest);
    let (m, rest) = take_digits(rest)?;
    let rest = skip_ws(rest);
    let rest = rest.strip_prefix(';')?;
    let rest = skip_ws(rest);
    let (k, rest) = take_digits(rest)?;
    if !rest.is_empty() {
        return None;
    }
    Some((n, m, k))
}

fn take_digits(s: &str) -> Option<(i64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let (digits, rest) = s.split_at(end);
    digits.parse::<i64>().ok().map(|n| (n, rest))
}

fn skip_ws(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// One component of a parsed `xkwd`: a bare keyword (not itself
/// range-expanded — only `kwd_list`/`kwd_tuple` elements are) or an
/// already-expanded parenthesised tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XkwdAtom {
    Plain(String),
    Tuple(Vec<String>),
}

/// Cartesian-product the components of a parsed `xkwd` into the set
/// of concrete `Key`s it denotes — the original's `unfold`/`norm` for
/// the non-quantified case.
pub fn unfold_plain(atoms: &[XkwdAtom]) -> Vec<Key> {
    let lists: Vec<&[String]> = atoms
        .iter()
        .map(|a| match a {
            XkwdAtom::Plain(s) => std::slice::from_ref(s),
            XkwdAtom::Tuple(v) => v.as_slice(),
        })
        .collect();
    cartesian_product(&lists).into_iter().map(Key::new).collect()
}

/// Same Cartesian expansion but for a quantified entry (`xkwd OP
/// int`): each resulting key is paired with the same operator/value —
/// the original's `unfold` branch for `fst(q) == "#"`.
pub fn unfold_bound(atoms: &[XkwdAtom], op: CmpOp, val: i64) -> Vec<(Key, CmpOp, i64)> {
    unfold_plain(atoms).into_iter().map(|k| (k, op, val)).collect()
}

fn cartesian_product(lists: &[&[String]]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(out.len() * list.len().max(1));
        for prefix in &out {
            for item in *list {
                let mut v = prefix.clone();
                v.push(item.clone());
                next.push(v);
            }
        }
        out = next;
    }
    out
}
