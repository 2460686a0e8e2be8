use super::{EmbeddedRecord, FileMode};


/// Metadata of a single embedded entry, as returned by [`EmbeddedFile::metadata`]
/// and [`EmbeddedFile::read_children`].
///
/// [`EmbeddedFile::metadata`]: super::EmbeddedFile::metadata
/// [`EmbeddedFile::read_children`]: super::EmbeddedFile::read_children
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryMetadata<'a> {
    name: &'a str,

    size_bytes: u64,

    mode: FileMode,
}

impl<'a> EntryMetadata<'a> {
    pub(crate) fn from_record(record: &EmbeddedRecord<'a>) -> Self {
        Self {
            name: record.base_name(),
            size_bytes: record.content.len() as u64,
            mode: record.mode,
        }
    }

    /// Returns the base name of the entry (the last path segment, `/` for the root directory).
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the content length in bytes. Always zero for directories.
    pub fn len(&self) -> u64 {
        self.size_bytes
    }

    /// Returns `true` if the entry has no content.
    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }

    /// Returns the [`FileMode`] of the entry.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Returns `true` if the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}



/// How many directory entries a single [`EmbeddedFile::read_children`] call may return.
///
/// [`EmbeddedFile::read_children`]: super::EmbeddedFile::read_children
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum ReadChildrenLimit {
    /// Return all remaining entries.
    #[default]
    Unlimited,

    /// Return at most `maximum_entries` entries.
    ///
    /// A `maximum_entries` of `0` behaves like [`ReadChildrenLimit::Unlimited`].
    AtMost {
        /// Maximum number of entries returned.
        maximum_entries: usize,
    },
}

impl ReadChildrenLimit {
    /// Returns the effective upper bound, `None` meaning unbounded.
    pub(crate) fn effective_maximum(self) -> Option<usize> {
        match self {
            ReadChildrenLimit::Unlimited => None,
            ReadChildrenLimit::AtMost { maximum_entries: 0 } => None,
            ReadChildrenLimit::AtMost { maximum_entries } => Some(maximum_entries),
        }
    }
}

/// Converts a signed count: zero or negative means [`ReadChildrenLimit::Unlimited`].
impl From<i64> for ReadChildrenLimit {
    fn from(count: i64) -> Self {
        if count <= 0 {
            return ReadChildrenLimit::Unlimited;
        }

        ReadChildrenLimit::AtMost {
            maximum_entries: usize::try_from(count).unwrap_or(usize::MAX),
        }
    }
}



/// Result of a single [`EmbeddedFile::read_children`] call.
///
/// [`EmbeddedFile::read_children`]: super::EmbeddedFile::read_children
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DirectoryBatch<'a> {
    /// Entries read in this call, in sibling order.
    pub entries: Vec<EntryMetadata<'a>>,

    /// Set when a bounded read ran out of entries before reaching its limit.
    /// The `entries` are still valid (and possibly empty).
    ///
    /// Unbounded reads and reads on non-directories never set this flag.
    pub end_of_directory: bool,
}

impl<'a> DirectoryBatch<'a> {
    /// Returns the number of entries in this batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this batch contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the base names of the entries in this batch.
    pub fn names(&self) -> Vec<&'a str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    /// Consumes the batch and returns its entries.
    pub fn into_entries(self) -> Vec<EntryMetadata<'a>> {
        self.entries
    }
}
