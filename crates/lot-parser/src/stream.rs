use lot_common::Pos;

/// Immutable cursor over the source text.
///
/// Cloning a `Stream` is a pointer-and-two-integers copy — the whole
/// parser kernel threads streams by value, never mutates one in
/// place, and a failed branch simply returns the stream at the
/// failure site so the caller (typically [`crate::choice`]) can pick
/// the alternative that made the most progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream<'a> {
    orig: &'a str,
    rest: &'a str,
    pos: Pos,
}

impl<'a> Stream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { orig: source, rest: source, pos: Pos::start() }
    }

    pub fn orig(&self) -> &'a str {
        self.orig
    }

    /// The remainder of the source yet to be consumed.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consume the current character, advancing line/column per the
    /// `\n`/`\t`/other rules. Panics if called at end of stream —
    /// callers must check [`Stream::peek`] first, which every
    /// combinator in this crate does.
    pub fn advance(&self) -> Self {
        let mut chars = self.rest.chars();
        let c = chars.next().expect("advance called on an empty stream");
        Self { orig: self.orig, rest: chars.as_str(), pos: self.pos.advance(c) }
    }

    /// A short excerpt of the remaining input, for error messages
    /// describing "observed" text; non-printables are left as-is,
    /// escaping happens at render time.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.rest.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stream_starts_at_1_1() {
        let s = Stream::new("abc");
        assert_eq!(s.pos(), Pos { line: 1, column: 1 });
        assert_eq!(s.rest(), "abc");
    }

    #[test]
    fn advance_tracks_newlines() {
        let s = Stream::new("a\nb");
        let s = s.advance();
        let s = s.advance();
        assert_eq!(s.pos(), Pos { line: 2, column: 1 });
        assert_eq!(s.rest(), "b");
    }

    #[test]
    fn advance_tracks_tabs() {
        let s = Stream::new("\tx");
        let s = s.advance();
        assert_eq!(s.pos(), Pos { line: 1, column: 5 });
    }

    #[test]
    fn is_empty_at_eof() {
        let s = Stream::new("a").advance();
        assert!(s.is_empty());
        assert_eq!(s.peek(), None);
    }
}
