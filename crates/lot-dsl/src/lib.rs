//! LOT front-end: parses a source file into a [`Grid`] and [`Policy`],
//! range-expanding and Cartesian-normalising keywords along the way.

pub mod ast;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod validate;

pub use ast::{Actor, CmpOp, Grid, OEntry, Policy, RawPref};
pub use error::LotError;

use lot_parser::Stream;

/// Parse a complete LOT source file: `grid "---"+ policy`, with
/// whitespace/comments allowed between any two tokens. Fails on
/// syntax error or if the whole input isn't consumed.
pub fn parse_lot(source: &str) -> Result<(Grid, Policy), LotError<'_>> {
    let s = Stream::new(source);
    let (_, s) = lot_parser::jump(s)?;
    let (grid, s) = grammar::grid(s)?;
    let (_, s) = lot_parser::jump(s)?;
    let (_, s) = grammar::bar(s)?;
    let (policy, s) = grammar::policy(s)?;
    let (_, s) = lot_parser::jump(s)?;
    if !s.is_empty() {
        return Err(LotError::IncompleteParse { pos: s.pos(), excerpt: s.excerpt(64) });
    }
    Ok((grid, policy))
}
