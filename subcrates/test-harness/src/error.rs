use std::path::PathBuf;

use thiserror::Error;

/// Main `Error` for use in `fs-embed`'s unit and integration tests.
///
/// Implements `From` for:
/// - [`std::io::Error`].
#[derive(Error, Debug)]
pub enum TestError {
    #[error("std::io::Error")]
    IoError(
        #[from]
        #[source]
        std::io::Error,
    ),

    #[error("source tree entry can not be created on this platform: {}", .path.display())]
    UnsupportedOnPlatform { path: PathBuf },
}

/// A main `Result` type for use in tests (shorthand for the [`TestError`] error).
pub type TestResult<O = ()> = std::result::Result<O, TestError>;
