//! Grammar functions, ported one-for-one from the original's
//! `parse_grid`/`parse_bar`/`parse_policy`/`parse_x`/`parse_o`/
//! `kwd_list`/`kwd_tuple`/`kwd`/`xkwd`/`qbound`, built on `lot-parser`
//! combinators instead of hand-rolled ones.

use indexmap::IndexMap;
use lot_common::Key;
use lot_parser::{
    angles, char, choice, digits, many, none_of, parens, sep_by, some, some_chars, squares, string,
    symbol, token, PResult,
};
use lot_parser::Stream;

use crate::ast::{Actor, AxisSet, CmpOp, Grid, KwdList, OEntry, Policy, RawPref};
use crate::normalize::{expand, unfold_bound, unfold_plain, XkwdAtom};

/// `kwd := some(none-of "#[]<=>(),:+ \n\t")`, tokenized. Note the
/// grid/tuple-list machinery is what range-expands a `kwd`, not `kwd`
/// itself — a bare atom inside an `xkwd` stays unexpanded.
pub fn kwd<'a>(s: Stream<'a>) -> PResult<'a, String> {
    token(some_chars(none_of("#[]<=>(),:+ \n\t")))(s)
}

/// `[kwd (, kwd)*]`, each element range-expanded and concatenated.
pub fn kwd_list<'a>(s: Stream<'a>) -> PResult<'a, KwdList> {
    let (items, s) = token(squares(sep_by(symbol(","), kwd)))(s)?;
    Ok((items.into_iter().flat_map(|k| expand(&k)).collect(), s))
}

/// `(kwd (, kwd)*)`, each element range-expanded and concatenated —
/// the only place (besides `kwd_list`) where range expansion applies.
pub fn kwd_tuple<'a>(s: Stream<'a>) -> PResult<'a, Vec<String>> {
    let (items, s) = token(parens(sep_by(symbol(","), kwd)))(s)?;
    Ok((items.into_iter().flat_map(|k| expand(&k)).collect(), s))
}

/// One `:`-separated component of an `xkwd`: a bare keyword or a
/// parenthesised, already-expanded tuple.
fn xkwd_atom<'a>(s: Stream<'a>) -> PResult<'a, XkwdAtom> {
    choice(vec![
        Box::new(|s| kwd_tuple(s).map(|(v, s)| (XkwdAtom::Tuple(v), s))),
        Box::new(|s| kwd(s).map(|(v, s)| (XkwdAtom::Plain(v), s))),
    ])(s)
}

/// `xkwd := atom (":" atom)*`.
pub fn xkwd<'a>(s: Stream<'a>) -> PResult<'a, Vec<XkwdAtom>> {
    token(sep_by(char(':'), xkwd_atom))(s)
}

fn cmp_op<'a>(s: Stream<'a>) -> PResult<'a, CmpOp> {
    let (text, s) = token(choice(vec![
        Box::new(string("<=")),
        Box::new(string(">=")),
        Box::new(string("=")),
        Box::new(string("<")),
        Box::new(string(">")),
    ]))(s)?;
    Ok((CmpOp::parse(text).expect("cmp_op parser only matches known operators"), s))
}

/// `rexpr := xkwd OP digits`, flattened into one `(Key, op, val)` per
/// concrete key the `xkwd` normalises to.
fn qbound<'a>(s: Stream<'a>) -> PResult<'a, Vec<(Key, CmpOp, i64)>> {
    let (atoms, s) = xkwd(s)?;
    let (op, s) = cmp_op(s)?;
    let (val, s) = token(digits)(s)?;
    let val: i64 = val.parse().expect("digits parser only yields digit characters");
    Ok((unfold_bound(&atoms, op, val), s))
}

/// One element of an `-o[...]` list body: either a quantified bound
/// or a plain `xkwd`, each normalised to one or more `OEntry`s.
fn o_item<'a>(s: Stream<'a>) -> PResult<'a, Vec<OEntry>> {
    choice(vec![
        Box::new(|s| qbound(s).map(|(bs, s)| (bs.into_iter().map(|(k, op, v)| OEntry::Bound(k, op, v)).collect(), s))),
        Box::new(|s| xkwd(s).map(|(atoms, s)| (unfold_plain(&atoms).into_iter().map(OEntry::Plain).collect(), s))),
    ])(s)
}

/// One element of an `-x[...]`/`-![...]` list body.
fn key_item<'a>(s: Stream<'a>) -> PResult<'a, Vec<Key>> {
    let (atoms, s) = xkwd(s)?;
    Ok((unfold_plain(&atoms), s))
}

fn acts<'a>(s: Stream<'a>) -> PResult<'a, RawPref> {
    let (_, s) = token(char('@'))(s)?;
    let (d, s) = token(digits)(s)?;
    Ok((RawPref::Acts(d.parse().expect("digits parser only yields digit characters")), s))
}

fn rest<'a>(s: Stream<'a>) -> PResult<'a, RawPref> {
    let (_, s) = token(char('/'))(s)?;
    let (d, s) = token(digits)(s)?;
    Ok((RawPref::Rest(d.parse().expect("digits parser only yields digit characters")), s))
}

fn o_clause<'a>(s: Stream<'a>) -> PResult<'a, RawPref> {
    let (_, s) = token(char('-'))(s)?;
    let (_, s) = token(choice(vec![Box::new(char('o')), Box::new(char('O'))]))(s)?;
    let (items, s) = token(squares(sep_by(symbol(","), o_item)))(s)?;
    Ok((RawPref::O(items.into_iter().flatten().collect()), s))
}

fn x_clause<'a>(s: Stream<'a>) -> PResult<'a, RawPref> {
    let (_, s) = token(char('-'))(s)?;
    let (_, s) = token(choice(vec![Box::new(char('x')), Box::new(char('X'))]))(s)?;
    let (items, s) = token(squares(sep_by(symbol(","), key_item)))(s)?;
    Ok((RawPref::X(items.into_iter().flatten().collect()), s))
}

fn excl_clause<'a>(s: Stream<'a>) -> PResult<'a, RawPref> {
    let (_, s) = token(char('-'))(s)?;
    let (_, s) = token(char('!'))(s)?;
    let (items, s) = token(squares(sep_by(symbol(","), key_item)))(s)?;
    Ok((RawPref::Excl(items.into_iter().flatten().collect()), s))
}

/// One `<actor> (acts|rest)* (o|x|excl)*` unit.
fn unit<'a>(s: Stream<'a>) -> PResult<'a, (Actor, Vec<RawPref>)> {
    let (name, s) = angles(token(some_chars(none_of("<>"))))(s)?;
    let (mut prefs, s) = many(choice(vec![Box::new(acts), Box::new(rest)]))(s)?;
    let (tail, s) = many(choice(vec![
        Box::new(o_clause),
        Box::new(x_clause),
        Box::new(excl_clause),
    ]))(s)?;
    prefs.extend(tail);
    Ok(((name, prefs), s))
}

/// `policy := unit+`, folded into an ordered actor map. A repeated
/// actor name keeps its first position but the later preference list
/// wins, matching `dict(pairs)` collapsing in the original.
pub fn policy<'a>(s: Stream<'a>) -> PResult<'a, Policy> {
    let (units, s) = some(unit)(s)?;
    let mut map = IndexMap::new();
    for (name, prefs) in units {
        map.insert(name, prefs);
    }
    Ok((Policy(map), s))
}

/// `grid := kwd_list+ ("+" kwd_list+)*` — an axis-set is a run of
/// adjacent bracketed lists; axis-sets are `+`-separated.
pub fn grid<'a>(s: Stream<'a>) -> PResult<'a, Grid> {
    let (axis_sets, s): (Vec<AxisSet>, _) = sep_by(symbol("+"), some(kwd_list))(s)?;
    Ok((Grid(axis_sets), s))
}

/// The `---`-or-more separator line between grid and policy.
pub fn bar<'a>(s: Stream<'a>) -> PResult<'a, ()> {
    let (_, s) = char('-')(s)?;
    let (_, s) = char('-')(s)?;
    let (_, s) = some(char('-'))(s)?;
    let (_, s) = lot_parser::jump(s)?;
    Ok(((), s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kwd_stops_at_reserved_punctuation() {
        let (v, s) = kwd(Stream::new("mon,tue")).unwrap();
        assert_eq!(v, "mon");
        assert_eq!(s.rest(), "tue");
    }

    #[test]
    fn kwd_list_expands_ranges() {
        let (v, s) = kwd_list(Stream::new("[1-3,x]rest")).unwrap();
        assert_eq!(v, vec!["1", "2", "3", "x"]);
        assert_eq!(s.rest(), "rest");
    }

    #[test]
    fn grid_parses_axis_sets() {
        let (g, _) = grid(Stream::new("[a,b] + [c]\n")).unwrap();
        assert_eq!(g.0.len(), 2);
        assert_eq!(g.0[0], vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(g.0[1], vec![vec!["c".to_string()]]);
    }

    #[test]
    fn grid_axis_set_with_adjacent_lists_is_one_axis_set() {
        let (g, _) = grid(Stream::new("[a,b][c,d]\n")).unwrap();
        assert_eq!(g.0.len(), 1);
        assert_eq!(g.0[0].len(), 2);
    }

    #[test]
    fn xkwd_parses_compound_tuple_key() {
        let (atoms, _) = xkwd(Stream::new("(1-31;14):May:2025\n")).unwrap();
        let keys = unfold_plain(&atoms);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0], Key::new(["1", "May", "2025"]));
        assert_eq!(keys[1], Key::new(["15", "May", "2025"]));
        assert_eq!(keys[2], Key::new(["29", "May", "2025"]));
    }

    #[test]
    fn unit_parses_allow_and_acts() {
        let (( name, prefs), _) = unit(Stream::new("<A> @1 -o[a]\n")).unwrap();
        assert_eq!(name, "A");
        assert_eq!(prefs, vec![
            RawPref::Acts(1),
            RawPref::O(vec![OEntry::Plain(Key::new(["a"]))]),
        ]);
    }

    #[test]
    fn unit_parses_quantified_allow() {
        let ((_, prefs), _) = unit(Stream::new("<A> -o[mon >= 2]\n")).unwrap();
        assert_eq!(prefs, vec![RawPref::O(vec![OEntry::Bound(Key::new(["mon"]), CmpOp::Ge, 2)])]);
    }

    #[test]
    fn unit_parses_rest_and_excl() {
        let ((_, prefs), _) = unit(Stream::new("<A> /2 @2 -![a,b]\n")).unwrap();
        assert_eq!(prefs, vec![
            RawPref::Rest(2),
            RawPref::Acts(2),
            RawPref::Excl(vec![Key::new(["a"]), Key::new(["b"])]),
        ]);
    }

    #[test]
    fn policy_keeps_first_position_last_value_on_repeat() {
        let (p, _) = policy(Stream::new("<A> @1\n<B> @2\n<A> @3\n")).unwrap();
        let names: Vec<&str> = p.0.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(p.0["A"], vec![RawPref::Acts(3)]);
    }

    #[test]
    fn bar_requires_at_least_three_dashes() {
        assert!(bar(Stream::new("--\n")).is_err());
        assert!(bar(Stream::new("---\n")).is_ok());
    }
}
