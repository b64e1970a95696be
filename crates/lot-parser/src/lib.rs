//! A small, hand-written parser-combinator kernel.
//!
//! Every combinator is a plain function from a [`Stream`] to either
//! `(value, advanced stream)` or a [`ParseError`] carrying the
//! position it got to. Nothing here mutates a stream in place, and
//! [`combinators::choice`] always keeps the error that made the most
//! progress, which is what gives callers actionable messages on
//! ambiguous alternatives.

pub mod combinators;
pub mod error;
pub mod number;
pub mod stream;
pub mod text;

pub use combinators::*;
pub use error::ParseError;
pub use number::*;
pub use stream::Stream;
pub use text::*;
