use std::fmt;

use lot_common::Pos;
use lot_parser::ParseError;

/// Top-level front-end error: either a syntax error from the parser
/// kernel, or a successful parse that didn't consume the whole file.
#[derive(Debug)]
pub enum LotError<'a> {
    Syntax(ParseError<'a>),
    IncompleteParse { pos: Pos, excerpt: String },
}

impl fmt::Display for LotError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::IncompleteParse { pos, excerpt } => {
                write!(f, "Error, incomplete parsing at {pos}: {excerpt}")
            }
        }
    }
}

impl std::error::Error for LotError<'_> {}

impl<'a> From<ParseError<'a>> for LotError<'a> {
    fn from(e: ParseError<'a>) -> Self {
        Self::Syntax(e)
    }
}
