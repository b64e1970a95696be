//! Parser-combinator primitives.
//!
//! A parser here is realized as `impl Fn(Stream<'a>) -> PResult<'a, T>`
//! — a plain function from a stream to either an advanced stream
//! plus a value, or a [`ParseError`] carrying the stream position it
//! failed at. Nothing here mutates a `Stream`; every combinator below
//! either returns a new, more-advanced stream or raises.

use crate::error::ParseError;
use crate::stream::Stream;

pub type PResult<'a, T> = Result<(T, Stream<'a>), ParseError<'a>>;

// ── Character primitives ────────────────────────────────────────────

/// Build a char-matching parser from a predicate, with a fixed
/// expected-tag for error messages.
pub fn satisfy<'a>(
    expected: impl Into<String>,
    pred: impl Fn(char) -> bool + 'a,
) -> impl Fn(Stream<'a>) -> PResult<'a, char> {
    let expected = expected.into();
    move |s: Stream<'a>| match s.peek() {
        None => Err(ParseError::with_expected_got(
            "reached end-of-stream",
            s,
            expected.clone(),
            "end-of-stream",
        )),
        Some(c) if pred(c) => Ok((c, s.advance())),
        Some(c) => Err(ParseError::with_expected_got("unexpected character", s, expected.clone(), c.to_string())),
    }
}

pub fn char<'a>(c: char) -> impl Fn(Stream<'a>) -> PResult<'a, char> {
    satisfy(c.to_string(), move |x| x == c)
}

pub fn any_char<'a>(s: Stream<'a>) -> PResult<'a, char> {
    satisfy("any character", |_| true)(s)
}

pub fn any_char_but<'a>(c: char) -> impl Fn(Stream<'a>) -> PResult<'a, char> {
    satisfy(format!("any character but {c}"), move |x| x != c)
}

pub fn one_of<'a>(cs: &'a str) -> impl Fn(Stream<'a>) -> PResult<'a, char> {
    satisfy(format!("one of {cs}"), move |x| cs.contains(x))
}

pub fn none_of<'a>(cs: &'a str) -> impl Fn(Stream<'a>) -> PResult<'a, char> {
    satisfy(format!("none of {cs}"), move |x| !cs.contains(x))
}

/// Matches the literal sequence `cs`; on mismatch reports the whole
/// expected string plus the bit of input that did match, as a hint.
pub fn string<'a>(cs: &'a str) -> impl Fn(Stream<'a>) -> PResult<'a, &'a str> {
    move |mut s: Stream<'a>| {
        let start = s;
        for (i, c) in cs.chars().enumerate() {
            match s.peek() {
                Some(x) if x == c => s = s.advance(),
                _ => {
                    let got = format!("{}...", start.excerpt(i + 1));
                    return Err(ParseError::with_expected_got("unexpected string", start, cs, got));
                }
            }
        }
        Ok((cs, s))
    }
}

// ── Repetition ───────────────────────────────────────────────────────

/// Zero-or-more. Never fails outright; if `p` consumed input before
/// failing on its *final* attempt, that inner error is re-raised
/// instead of silently truncating the match — this is the contract
/// that keeps partial-token failures visible.
pub fn many<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |mut s: Stream<'a>| {
        let mut out = Vec::new();
        loop {
            let before = s;
            match p(s) {
                Ok((v, rest)) => {
                    out.push(v);
                    s = rest;
                }
                Err(e) => {
                    if e.pos() > before.pos() {
                        return Err(e);
                    }
                    return Ok((out, before));
                }
            }
        }
    }
}

/// One-or-more.
pub fn some<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |s: Stream<'a>| {
        let (first, rest) = p(s)?;
        let (mut tail, rest) = many(&p)(rest)?;
        tail.insert(0, first);
        Ok((tail, rest))
    }
}

/// `many` folded into a `String` — convenience for char-level parsers
/// like `digits`.
pub fn many_chars<'a>(p: impl Fn(Stream<'a>) -> PResult<'a, char>) -> impl Fn(Stream<'a>) -> PResult<'a, String> {
    move |s| many(&p)(s).map(|(v, s)| (v.into_iter().collect(), s))
}

pub fn some_chars<'a>(p: impl Fn(Stream<'a>) -> PResult<'a, char>) -> impl Fn(Stream<'a>) -> PResult<'a, String> {
    move |s| some(&p)(s).map(|(v, s)| (v.into_iter().collect(), s))
}

/// Return `default` on failure, with the stream reset to the failure
/// site (not rewound further — the same forgiving-but-not-amnesiac
/// behaviour as the rest of this kernel).
pub fn option<'a, T: Clone + 'a>(
    default: T,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| match p(s) {
        Ok(v) => Ok(v),
        Err(_) => Ok((default.clone(), s)),
    }
}

pub fn count<'a, T>(n: usize, p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |mut s: Stream<'a>| {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            match p(s) {
                Ok((v, rest)) => {
                    out.push(v);
                    s = rest;
                }
                Err(e) => {
                    return Err(ParseError::with_expected_got(
                        format!("expected exactly {n} occurrences"),
                        s,
                        e.expected().unwrap_or("occurrence").to_string(),
                        e.observed().unwrap_or("nothing").to_string(),
                    ));
                }
            }
        }
        Ok((out, s))
    }
}

pub fn at_least<'a, T>(n: usize, p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |s: Stream<'a>| {
        let (mut head, rest) = count(n, &p)(s)?;
        let (tail, rest) = many(&p)(rest)?;
        head.extend(tail);
        Ok((head, rest))
    }
}

pub fn at_most<'a, T>(n: usize, p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |mut s: Stream<'a>| {
        let mut out = Vec::new();
        for _ in 0..n {
            match p(s) {
                Ok((v, rest)) => {
                    out.push(v);
                    s = rest;
                }
                Err(_) => break,
            }
        }
        Ok((out, s))
    }
}

pub fn between<'a, O, C, T>(
    open: impl Fn(Stream<'a>) -> PResult<'a, O>,
    close: impl Fn(Stream<'a>) -> PResult<'a, C>,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| {
        let (_, s) = open(s)?;
        let (v, s) = p(s)?;
        let (_, s) = close(s)?;
        Ok((v, s))
    }
}

pub fn sep_by<'a, S, T>(
    sep: impl Fn(Stream<'a>) -> PResult<'a, S>,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |s: Stream<'a>| {
        let (first, mut s) = p(s)?;
        let mut out = vec![first];
        loop {
            let before = s;
            match sep(s) {
                Err(_) => {
                    s = before;
                    break;
                }
                Ok((_, after_sep)) => match p(after_sep) {
                    Ok((v, rest)) => {
                        out.push(v);
                        s = rest;
                    }
                    Err(e) => return Err(e),
                },
            }
        }
        Ok((out, s))
    }
}

pub fn end_by<'a, S, T>(
    end: impl Fn(Stream<'a>) -> PResult<'a, S>,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |s: Stream<'a>| {
        let mut s = s;
        let mut out = Vec::new();
        loop {
            match p(s) {
                Ok((v, rest)) => {
                    let (_, rest) = end(rest)?;
                    out.push(v);
                    s = rest;
                }
                Err(e) => {
                    if e.pos() > s.pos() {
                        return Err(e);
                    }
                    return Ok((out, s));
                }
            }
        }
    }
}

pub fn many_till<'a, E, T>(
    end: impl Fn(Stream<'a>) -> PResult<'a, E>,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |mut s: Stream<'a>| {
        let mut out = Vec::new();
        loop {
            if end(s).is_ok() {
                return Ok((out, s));
            }
            let (v, rest) = p(s)?;
            out.push(v);
            s = rest;
        }
    }
}

pub fn some_till<'a, E, T>(
    end: impl Fn(Stream<'a>) -> PResult<'a, E>,
    p: impl Fn(Stream<'a>) -> PResult<'a, T>,
) -> impl Fn(Stream<'a>) -> PResult<'a, Vec<T>> {
    move |s: Stream<'a>| {
        let (first, rest) = p(s)?;
        let (mut tail, rest) = many_till(&end, &p)(rest)?;
        tail.insert(0, first);
        Ok((tail, rest))
    }
}

// ── Alternation & lookahead ──────────────────────────────────────────

/// Try each parser in turn; if all fail, raise the error associated
/// with whichever alternative advanced furthest into the stream
/// (ties keep the first). This is what makes multi-branch grammar
/// errors point at the branch the user most likely meant.
pub fn choice<'a, T>(parsers: Vec<Box<dyn Fn(Stream<'a>) -> PResult<'a, T> + 'a>>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| {
        let mut furthest: Option<ParseError<'a>> = None;
        for p in &parsers {
            match p(s) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    furthest = Some(match furthest {
                        None => e,
                        Some(prev) => prev.furthest(e),
                    });
                }
            }
        }
        Err(furthest.expect("choice called with no alternatives"))
    }
}

/// Lookahead: succeeds like `p` but never consumes input.
pub fn peek<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| p(s).map(|(v, _)| (v, s))
}

/// Relabel `p`'s expected tag on failure.
pub fn label<'a, T>(tag: impl Into<String> + Clone + 'a, p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| p(s).map_err(|e| e.relabel(tag.clone()))
}

// ── Skipping ─────────────────────────────────────────────────────────

pub fn skip<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, ()> {
    move |s: Stream<'a>| p(s).map(|(_, s)| ((), s))
}

pub fn skip_many<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, ()> {
    move |s: Stream<'a>| many(&p)(s).map(|(_, s)| ((), s))
}

pub fn skip_some<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, ()> {
    move |s: Stream<'a>| some(&p)(s).map(|(_, s)| ((), s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_matches_and_advances() {
        let (c, s) = char('s')(Stream::new("sofia")).unwrap();
        assert_eq!(c, 's');
        assert_eq!(s.rest(), "ofia");
    }

    #[test]
    fn char_mismatch_fails() {
        assert!(char('s')(Stream::new("maria")).is_err());
    }

    #[test]
    fn string_matches_prefix() {
        let (v, s) = string("ave-")(Stream::new("ave-maria")).unwrap();
        assert_eq!(v, "ave-");
        assert_eq!(s.rest(), "maria");
    }

    #[test]
    fn many_never_fails_on_zero_matches() {
        let (v, s) = many(char('x'))(Stream::new("abc")).unwrap();
        assert!(v.is_empty());
        assert_eq!(s.rest(), "abc");
    }

    #[test]
    fn many_preserves_partial_failure() {
        // string("ab") consumes 'a' then fails on the second char of
        // each attempt; many must not silently swallow that.
        let err = many(string("ab"))(Stream::new("aXc"));
        assert!(err.is_err());
    }

    #[test]
    fn some_requires_at_least_one() {
        assert!(some(char('x'))(Stream::new("abc")).is_err());
        let (v, _) = some(char('a'))(Stream::new("aaab")).unwrap();
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn option_returns_default_on_failure() {
        let (v, s) = option('7', char('x'))(Stream::new("seven")).unwrap();
        assert_eq!(v, '7');
        assert_eq!(s.rest(), "seven");
    }

    #[test]
    fn between_consumes_delimiters() {
        let (v, s) = between(char('('), char(')'), some_chars(one_of("0123456789")))(Stream::new("(777)")).unwrap();
        assert_eq!(v, "777");
        assert_eq!(s.rest(), "");
    }

    #[test]
    fn sep_by_collects_elements() {
        let (v, s) = sep_by(char(','), some_chars(one_of("0123456789")))(Stream::new("1,2,3")).unwrap();
        assert_eq!(v, vec!["1", "2", "3"]);
        assert_eq!(s.rest(), "");
    }

    #[test]
    fn count_exact_occurrences() {
        let (v, s) = count(3, char('f'))(Stream::new("ffffff")).unwrap();
        assert_eq!(v, vec!['f', 'f', 'f']);
        assert_eq!(s.rest(), "fff");
    }

    #[test]
    fn at_least_requires_the_floor_then_takes_more() {
        let (v, s) = at_least(3, char('f'))(Stream::new("ffffff")).unwrap();
        assert_eq!(v.len(), 6);
        assert_eq!(s.rest(), "");
        assert!(at_least(3, char('f'))(Stream::new("ff")).is_err());
    }

    #[test]
    fn at_most_never_fails() {
        let (v, s) = at_most(3, char('f'))(Stream::new("ff")).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(s.rest(), "");
    }

    #[test]
    fn choice_picks_furthest_error_on_total_failure() {
        let p = choice(vec![
            Box::new(string("abx")),
            Box::new(string("aby")),
        ]);
        let err = p(Stream::new("abz")).unwrap_err();
        // Both alternatives consume "ab" before diverging, so either
        // error is at column 3 — the important property is that it
        // picked one consistently rather than the first blind match.
        assert_eq!(err.pos().column, 3);
    }

    #[test]
    fn choice_furthest_error_beats_shallow_one() {
        let shallow: Box<dyn Fn(Stream<'_>) -> PResult<'_, &str>> = Box::new(string("zz"));
        let deeper: Box<dyn Fn(Stream<'_>) -> PResult<'_, &str>> = Box::new(string("aaaY"));
        let p = choice(vec![shallow, deeper]);
        // "zz" fails immediately (column 1); "aaaY" consumes "aaa" before
        // failing on the 4th char (column 4) — the deeper error wins.
        let err = p(Stream::new("aaaXc")).unwrap_err();
        assert_eq!(err.pos().column, 4);
    }

    #[test]
    fn peek_does_not_consume() {
        let (c, s) = peek(char('a'))(Stream::new("abc")).unwrap();
        assert_eq!(c, 'a');
        assert_eq!(s.rest(), "abc");
    }

    #[test]
    fn label_overrides_expected_tag() {
        let err = label("digit", char('9'))(Stream::new("x")).unwrap_err();
        assert_eq!(err.expected(), Some("digit"));
    }
}
