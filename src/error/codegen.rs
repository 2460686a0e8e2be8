use std::path::PathBuf;

use thiserror::Error;

use super::FlattenError;


/// An error that can occur when generating an embedded module
/// (see [`write_embedded_module`]).
///
///
/// [`write_embedded_module`]: crate::codegen::write_embedded_module
#[derive(Error, Debug)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum GenerationError {
    /// The source directory could not be flattened.
    #[error("failed to flatten source directory")]
    FlattenFailed(
        #[from]
        #[source]
        FlattenError,
    ),

    /// The logical name of the generated module is not a valid Rust identifier.
    #[error("module name is not a valid Rust identifier: {name}")]
    InvalidModuleName {
        /// The rejected name.
        name: String,
    },

    /// The crate path configured for generated code could not be parsed.
    #[error("crate path is not a valid Rust path: {crate_path}")]
    InvalidCratePath {
        /// The rejected crate path.
        crate_path: String,
    },

    /// The generated code could not be parsed back for formatting.
    #[error("failed to parse generated source file")]
    SynParsingError(
        #[from]
        #[source]
        syn::Error,
    ),

    /// The output directory could not be created.
    #[error(
        "unable to create output directory: {}",
        .directory_path.display()
    )]
    UnableToCreateOutputDirectory {
        /// The output directory path.
        directory_path: PathBuf,

        /// IO error describing why the directory could not be created.
        #[source]
        error: std::io::Error,
    },

    /// The output file could not be opened or written to.
    ///
    /// This is also returned when the output file already exists
    /// and overwriting has not been allowed.
    #[error(
        "failed to open or write to output file: {}",
        .output_file_path.display()
    )]
    FailedToWriteOutput {
        /// IO error describing why the output could not be written.
        #[source]
        io_error: std::io::Error,

        /// The output file path.
        output_file_path: PathBuf,
    },
}
