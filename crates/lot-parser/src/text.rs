use crate::combinators::{any_char_but, between, char, choice, many_chars, none_of, skip_many, PResult};
use crate::error::ParseError;
use crate::stream::Stream;

pub fn tab<'a>(s: Stream<'a>) -> PResult<'a, char> {
    char('\t')(s)
}

pub fn cr<'a>(s: Stream<'a>) -> PResult<'a, char> {
    char('\r')(s)
}

pub fn lf<'a>(s: Stream<'a>) -> PResult<'a, char> {
    char('\n')(s)
}

/// A single space or tab (non-newline horizontal whitespace).
pub fn blank<'a>(s: Stream<'a>) -> PResult<'a, char> {
    choice(vec![Box::new(char(' ')), Box::new(tab)])(s)
}

/// Any single whitespace character (space, tab, CR, or LF).
pub fn whitespace<'a>(s: Stream<'a>) -> PResult<'a, char> {
    choice(vec![Box::new(blank), Box::new(cr), Box::new(lf)])(s)
}

/// `#` to end of line (or end of stream).
pub fn comment<'a>(s: Stream<'a>) -> PResult<'a, String> {
    let (_, s) = char('#')(s)?;
    many_chars(any_char_but('\n'))(s)
}

/// Skip whitespace and comments — the separator allowed between any
/// two tokens of the grammar.
pub fn jump<'a>(s: Stream<'a>) -> PResult<'a, ()> {
    skip_many(choice(vec![
        Box::new(|s| whitespace(s).map(|(c, s)| (c.to_string(), s))),
        Box::new(comment),
    ]))(s)
}

/// Run `p`, then skip any trailing whitespace (but not comments —
/// matching the original grammar's `token`, which only eats
/// whitespace; `jump` is the one that also eats comments, and is
/// used between top-level grid/policy sections).
pub fn token<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| {
        let (v, s) = p(s)?;
        let (_, s) = skip_many(whitespace)(s)?;
        Ok((v, s))
    }
}

/// Alias for [`token`] — some grammars prefer this name for
/// non-symbol tokens (numbers, identifiers).
pub fn lexeme<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    token(p)
}

/// A literal punctuation/keyword string, tokenized.
pub fn symbol<'a>(s: &'a str) -> impl Fn(Stream<'a>) -> PResult<'a, &'a str> {
    token(crate::combinators::string(s))
}

pub fn parens<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    between(symbol("("), symbol(")"), p)
}

pub fn squares<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    between(symbol("["), symbol("]"), p)
}

pub fn braces<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    between(symbol("{"), symbol("}"), p)
}

pub fn angles<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    between(symbol("<"), symbol(">"), p)
}

/// `'...'`, single-quoted text with no escape handling (none of the
/// DSL's grammar currently needs one).
pub fn quote<'a>(s: Stream<'a>) -> PResult<'a, String> {
    between(char('\''), char('\''), many_chars(none_of("'")))(s)
}

/// `"..."`, double-quoted text.
pub fn qquote<'a>(s: Stream<'a>) -> PResult<'a, String> {
    between(char('"'), char('"'), many_chars(none_of("\"")))(s)
}

/// Run `p` with leading and trailing `jump` (whitespace + comments) stripped.
pub fn strip<'a, T>(p: impl Fn(Stream<'a>) -> PResult<'a, T>) -> impl Fn(Stream<'a>) -> PResult<'a, T> {
    move |s: Stream<'a>| {
        let (_, s) = jump(s)?;
        let (v, s) = p(s)?;
        let (_, s) = jump(s)?;
        Ok((v, s))
    }
}

/// Succeeds only at end of stream.
pub fn eof<'a>(s: Stream<'a>) -> PResult<'a, ()> {
    if s.is_empty() {
        Ok(((), s))
    } else {
        Err(ParseError::with_expected_got("expected end of input", s, "end-of-stream", s.excerpt(16)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_runs_to_end_of_line() {
        let (c, s) = comment(Stream::new("# hello\nrest")).unwrap();
        assert_eq!(c, " hello");
        assert_eq!(s.rest(), "\nrest");
    }

    #[test]
    fn jump_skips_whitespace_and_comments() {
        let (_, s) = jump(Stream::new("  # a\n\t# b\nkwd")).unwrap();
        assert_eq!(s.rest(), "kwd");
    }

    #[test]
    fn token_eats_trailing_whitespace_only() {
        let (v, s) = token(crate::combinators::string("x"))(Stream::new("x   # c\ny")).unwrap();
        assert_eq!(v, "x");
        // comments are *not* eaten by `token`, only by `jump`.
        assert_eq!(s.rest(), "# c\ny");
    }

    #[test]
    fn squares_parses_bracketed_content() {
        let (v, s) = squares(crate::combinators::string("a"))(Stream::new("[a]rest")).unwrap();
        assert_eq!(v, "a");
        assert_eq!(s.rest(), "rest");
    }

    #[test]
    fn eof_succeeds_only_at_end() {
        assert!(eof(Stream::new("")).is_ok());
        assert!(eof(Stream::new("x")).is_err());
    }
}
