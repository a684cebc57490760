//! Text canonicalization applied before any matching.

mod normalize;

pub use normalize::normalize_text;
