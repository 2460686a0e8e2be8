use std::path::PathBuf;

use thiserror::Error;


/// An error that can occur while walking a source directory tree.
#[derive(Error, Debug)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum WalkError {
    /// The base directory of the walk is not a directory.
    #[error("base path is not a directory: {}", .path.display())]
    NotADirectory {
        /// The base path that was supposed to be a directory.
        path: PathBuf,
    },

    /// A directory inside the tree (or the base directory itself) could not be opened
    /// for reading, or its metadata could not be read.
    ///
    /// The inner [`std::io::Error`] will likely describe a more precise cause of this error.
    #[error("unable to read directory: {}", .directory_path.display())]
    UnableToReadDirectory {
        /// The directory path that could not be read.
        directory_path: PathBuf,

        /// IO error describing why the directory could not be read.
        #[source]
        error: std::io::Error,
    },

    /// A single entry of a directory could not be read, or its metadata could not be read.
    ///
    /// The inner [`std::io::Error`] will likely describe a more precise cause of this error.
    #[error("unable to read entry in directory: {}", .directory_path.display())]
    UnableToReadDirectoryEntry {
        /// Path of the directory whose entry could not be read.
        directory_path: PathBuf,

        /// IO error describing why the directory entry could not be read.
        #[source]
        error: std::io::Error,
    },
}



/// An error that can occur when flattening a source directory
/// (see [`flatten_directory`]).
///
/// All of these are fatal: no partial tree is ever returned.
///
///
/// [`flatten_directory`]: crate::flatten::flatten_directory
#[derive(Error, Debug)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum FlattenError {
    /// The provided source directory path does not exist.
    #[error("source directory does not exist: {}", .directory_path.display())]
    SourceDirectoryNotFound {
        /// Source directory path.
        directory_path: PathBuf,
    },

    /// The provided source path exists, but is not a directory.
    #[error("source path exists, but is not a directory: {}", .path.display())]
    SourcePathNotADirectory {
        /// The source path that was supposed to be a directory.
        path: PathBuf,
    },

    /// The source directory could not be accessed, or its path could not be canonicalized.
    ///
    /// The inner [`std::io::Error`] will likely describe a more precise cause of this error.
    #[error("unable to access source directory: {}", .directory_path.display())]
    UnableToAccessSourceDirectory {
        /// The source directory path we were unable to access.
        directory_path: PathBuf,

        /// IO error describing why the source directory could not be accessed.
        #[source]
        error: std::io::Error,
    },

    /// Walking the source directory tree failed.
    #[error(transparent)]
    WalkFailed(#[from] WalkError),

    /// An entry in the source tree is neither a regular file nor a directory
    /// (e.g. a symbolic link, a socket, a named pipe or a device).
    #[error(
        "unsupported file type: {}, type {}",
        .path.display(),
        .file_type
    )]
    UnsupportedEntryType {
        /// Path of the offending entry.
        path: PathBuf,

        /// Human-readable description of the entry's file type.
        file_type: String,
    },

    /// A file inside the source tree could not be read.
    ///
    /// The inner [`std::io::Error`] will likely describe a more precise cause of this error.
    #[error("unable to read file: {}", .file_path.display())]
    UnableToReadFile {
        /// Path of the file that could not be read.
        file_path: PathBuf,

        /// IO error describing why the file could not be read.
        #[source]
        error: std::io::Error,
    },

    /// An entry's path could not be expressed relative to the source root.
    #[error(
        "unable to compute path of {} relative to {}",
        .path.display(),
        .root_path.display()
    )]
    UnableToResolveRelativePath {
        /// Path of the entry.
        path: PathBuf,

        /// Source root the path was supposed to be inside of.
        root_path: PathBuf,
    },

    /// An entry's path is not valid UTF-8 and can not be used as an embedded name.
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUnicodePath {
        /// The offending path.
        path: PathBuf,
    },

    /// The source tree has more entries than can be indexed.
    #[error("source tree has too many entries to embed ({entry_count})")]
    TooManyEntries {
        /// Number of entries reached when indexing failed.
        entry_count: usize,
    },
}
