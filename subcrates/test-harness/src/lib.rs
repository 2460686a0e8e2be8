//! Shared scaffolding for `fs-embed`'s integration tests:
//! temporary source trees ([`SourceTree`]) and reproducible pseudo-random data.

pub mod error;
pub mod seeded_data;
mod source_tree;

pub use source_tree::SourceTree;
