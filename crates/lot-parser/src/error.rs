use std::fmt;

use lot_common::{width, Pos};

use crate::stream::Stream;

/// A parse failure, carrying the stream position it occurred at so
/// `choice` can compare alternatives by how far they advanced before
/// failing (see [`crate::combinators::choice`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    reason: String,
    pos: Pos,
    expected: Option<String>,
    observed: Option<String>,
    source: &'a str,
}

impl<'a> ParseError<'a> {
    pub fn new(reason: impl Into<String>, at: Stream<'a>) -> Self {
        Self {
            reason: reason.into(),
            pos: at.pos(),
            expected: None,
            observed: None,
            source: at.orig(),
        }
    }

    pub fn with_expected_got(
        reason: impl Into<String>,
        at: Stream<'a>,
        expected: impl Into<String>,
        observed: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            pos: at.pos(),
            expected: Some(escape(&expected.into())),
            observed: Some(escape(&observed.into())),
            source: at.orig(),
        }
    }

    /// Relabel the expected tag, preserving everything else. Used by
    /// [`crate::combinators::label`].
    pub fn relabel(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(escape(&expected.into()));
        self
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }

    /// Pick whichever of `self`/`other` made more progress into the
    /// stream, keeping `self` on a tie — the exact semantics
    /// `choice` needs for "furthest error wins".
    pub fn furthest(self, other: Self) -> Self {
        if other.pos > self.pos {
            other
        } else {
            self
        }
    }

    /// Render a multi-line diagnostic: the offending line, a caret
    /// under the failing column (aligned using East-Asian display
    /// width so full-width glyphs don't throw off the caret), up to
    /// three lines of trailing context, the reason, and the
    /// expected/observed pair when present.
    pub fn format_error(&self) -> String {
        let lines: Vec<&str> = self.source.split('\n').collect();
        let j = self.pos.line.saturating_sub(1) as usize;
        let line_text = lines.get(j).copied().unwrap_or("");
        let chars_before = self.pos.column.saturating_sub(1) as usize;
        let caret_col = width::str_width(&line_text.chars().take(chars_before).collect::<String>());

        let mut out = String::new();
        out.push_str(&format!("Parse error at line {}, column {}:\n\n", j + 1, self.pos.column));
        out.push_str(&format!("{:>4} | {}\n", j + 1, line_text));
        out.push_str(&format!("{:>4} | {}^\n", "", " ".repeat(caret_col)));
        for k in 1..=3 {
            if let Some(l) = lines.get(j + k) {
                out.push_str(&format!("{:>4} | {}\n", j + k + 1, l));
            }
        }
        out.push('\n');
        out.push_str(&self.reason);
        out.push('\n');
        if let (Some(expected), Some(observed)) = (&self.expected, &self.observed) {
            out.push_str(&format!("Expected '{expected}' but got '{observed}'\n"));
        }
        out
    }
}

/// Escape non-printables the way the diagnostic wants them shown.
fn escape(s: &str) -> String {
    s.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t")
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_error())
    }
}

impl std::error::Error for ParseError<'_> {}
