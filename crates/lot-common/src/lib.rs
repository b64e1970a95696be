//! Shared types for the LOT scheduling DSL: source positions, the
//! flattened tuple-key type used by both grid nodes and policy match
//! keys, and a small display-width helper used when lining up carets
//! under diagnostics.

pub mod key;
pub mod pos;
pub mod width;

pub use key::{any_matches, root_sort_key, Key};
pub use pos::Pos;
