//! Pattern compilation for bad words.
//!
//! `leet` holds the fixed substitution table and the expansion of a word into
//! regex source; `compiler` turns whole word sets into compiled matchers.

pub mod compiler;
pub mod leet;
