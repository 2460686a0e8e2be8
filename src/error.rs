//! Error types of all `fs-embed` operations.
//!
//! Generation-time errors ([`FlattenError`], and `GenerationError` with the `codegen` feature)
//! abort the entire generation run. Runtime lookup errors ([`OpenError`]) are meant
//! to be handled by the immediate caller.
//!
//! Running out of data is not an error: [`std::io::Read::read`] returns `Ok(0)` and
//! [`DirectoryBatch::end_of_directory`] is set instead.
//!
//! [`DirectoryBatch::end_of_directory`]: crate::embedded::DirectoryBatch::end_of_directory

mod embedded;
mod flatten;

#[cfg(feature = "codegen")]
mod codegen;

#[cfg(feature = "codegen")]
pub use codegen::*;
pub use embedded::*;
pub use flatten::*;
