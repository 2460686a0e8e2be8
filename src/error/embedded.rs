use std::fmt::{self, Display};

use thiserror::Error;


/// An error that can occur when opening an embedded entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum OpenError {
    /// No embedded entry has exactly this name.
    #[error("embedded entry does not exist: {path}")]
    NotFound {
        /// The name that was looked up.
        path: String,
    },
}

impl From<OpenError> for std::io::Error {
    fn from(error: OpenError) -> Self {
        match error {
            OpenError::NotFound { .. } => {
                std::io::Error::new(std::io::ErrorKind::NotFound, error)
            }
        }
    }
}



/// Which index field of an [`EmbeddedRecord`] an [`InvalidRecordSetError`] refers to.
///
/// [`EmbeddedRecord`]: crate::embedded::EmbeddedRecord
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordIndexField {
    /// The first-child index.
    Child,

    /// The next-sibling index.
    Next,
}

impl Display for RecordIndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIndexField::Child => f.write_str("child"),
            RecordIndexField::Next => f.write_str("next"),
        }
    }
}



/// A record slice does not describe a valid embedded tree
/// (see [`EmbeddedFileSystem::new`]).
///
/// [`EmbeddedFileSystem::new`]: crate::embedded::EmbeddedFileSystem::new
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum InvalidRecordSetError {
    /// A record name does not start with `/`.
    #[error("record name does not start with a slash: {name}")]
    NameNotRooted {
        /// The offending name.
        name: String,
    },

    /// Two consecutive records are not in byte-wise ascending name order.
    #[error("records are not sorted by name: {previous_name} is followed by {name}")]
    NotSorted {
        /// Name of the earlier record.
        previous_name: String,

        /// Name of the record that should have come first.
        name: String,
    },

    /// Two records share the same name.
    #[error("duplicate record name: {name}")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// A `child` or `next` index points outside the record slice.
    #[error(
        "{field} index {index} of record {name} is out of bounds (there are {record_count} records)"
    )]
    IndexOutOfBounds {
        /// Name of the record with the bad index.
        name: String,

        /// Which index field is out of bounds.
        field: RecordIndexField,

        /// The out-of-bounds index.
        index: u32,

        /// Total number of records.
        record_count: usize,
    },

    /// A record that is not a directory has a child.
    #[error("record is not a directory, but has a child: {name}")]
    ChildOfNonDirectory {
        /// Name of the offending record.
        name: String,
    },

    /// A directory record has non-empty content.
    #[error("directory record has content: {name}")]
    DirectoryWithContent {
        /// Name of the offending record.
        name: String,
    },

    /// A record is the target of more than one `child`/`next` index.
    ///
    /// Such a record would either appear in several directories,
    /// or close a sibling chain into a loop.
    #[error("record is linked from more than one other record: {name}")]
    RecordLinkedMoreThanOnce {
        /// Name of the record that is linked more than once.
        name: String,
    },
}
