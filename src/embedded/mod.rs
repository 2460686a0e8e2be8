//! The runtime half of `fs-embed`: a read-only, in-memory file system
//! backed by a flat, name-sorted array of [`EmbeddedRecord`]s.
//!
//! <br>
//!
//! ##### Feature Overview
//!
//! | | <span style="font-weight:normal"><i>returns</i></span> |
//! |-----------------------------------------|:-----------------------------:|
//! | [`EmbeddedFileSystem::open`]            | [`EmbeddedFile`] <br><sup style="text-align: right">(or [`OpenError`])</sup> |
//! | [`EmbeddedFile::metadata`]              | [`EntryMetadata`] |
//! | [`EmbeddedFile::read_children`]         | [`DirectoryBatch`] |
//! | [`EmbeddedFileSystem::read`]            | `&[u8]` <br><sup style="text-align: right">(or [`OpenError`])</sup> |
//!
//! File contents are read through the [`std::io::Read`], [`std::io::BufRead`]
//! and [`std::io::Seek`] implementations on [`EmbeddedFile`].
//!
//!
//! # Record layout
//! A tree is stored as a single slice of records, sorted byte-wise by their `/`-rooted name.
//! Parent-child relationships are not expressed with pointers, but with indices into
//! that same slice: each directory points to its first child through [`EmbeddedRecord::child`],
//! and each child points to its next sibling through [`EmbeddedRecord::next`].
//!
//! ```md
//! index  name        child    next
//! 0      /           Some(1)  None
//! 1      /a.txt      None     Some(2)
//! 2      /b          Some(3)  None
//! 3      /b/c.txt    None     None
//! ```
//!
//! [`OpenError`]: crate::error::OpenError

use crate::error::{InvalidRecordSetError, OpenError, RecordIndexField};

mod file;
mod listing;

pub use file::*;
pub use listing::*;



/// Index of another record in the same record slice.
///
/// `None` is the "no such record" sentinel: a directory without children,
/// or the last sibling in a directory.
pub type EntryIndex = Option<u32>;


/// The kind of an embedded entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FileMode {
    /// A directory. Directories never have content.
    Directory,

    /// A regular file that had its owner-executable bit set on the source file system.
    Executable,

    /// A regular file.
    Regular,
}

impl FileMode {
    /// Returns `true` if this is [`FileMode::Directory`].
    #[inline]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is either [`FileMode::Executable`] or [`FileMode::Regular`].
    #[inline]
    pub const fn is_file(self) -> bool {
        !self.is_dir()
    }

    /// Unix permission bits the entry is presented with:
    /// `0o755` for directories and executables, `0o644` for regular files.
    pub const fn permissions(self) -> u32 {
        match self {
            FileMode::Directory | FileMode::Executable => 0o755,
            FileMode::Regular => 0o644,
        }
    }
}



/// A single embedded file or directory.
///
/// Generated code constructs these as `static` data, which is why all fields are public.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EmbeddedRecord<'a> {
    /// Slash-separated path from the tree root, always starting with `/`.
    /// The root directory itself is named `/`.
    pub name: &'a str,

    /// File contents. Empty for directories.
    pub content: &'a [u8],

    /// Kind of entry.
    pub mode: FileMode,

    /// Index of the first child (directories only).
    pub child: EntryIndex,

    /// Index of the next sibling inside the same parent directory.
    pub next: EntryIndex,
}

impl<'a> EmbeddedRecord<'a> {
    /// Returns the last segment of this record's name (`/` for the root).
    pub fn base_name(&self) -> &'a str {
        base_name_of(self.name)
    }
}

pub(crate) fn base_name_of(name: &str) -> &str {
    if name == "/" {
        return name;
    }

    let trimmed_name = name.trim_end_matches('/');
    match trimmed_name.rsplit_once('/') {
        Some((_, base_name)) => base_name,
        None => trimmed_name,
    }
}



/// A read-only file system embedded in program data.
///
/// This is a thin view over a slice of [`EmbeddedRecord`]s that must be sorted by name
/// and have consistent `child`/`next` indices. Generated modules build it with
/// [`from_sorted_records`][Self::from_sorted_records]; record sets assembled
/// at runtime should go through [`new`][Self::new], which checks those invariants.
///
/// The structure holds no mutable state, so it can be shared freely between threads.
/// Per-reader state (read position, directory cursor) lives in each [`EmbeddedFile`].
#[derive(Clone, Copy, Debug)]
pub struct EmbeddedFileSystem<'a> {
    records: &'a [EmbeddedRecord<'a>],
}

impl<'a> EmbeddedFileSystem<'a> {
    /// Wraps a record slice without validating it.
    ///
    /// The slice is expected to be sorted byte-wise by name with all `child` and `next` indices
    /// pointing inside the slice. Lookups on an unsorted slice can miss existing entries;
    /// out-of-bounds indices end directory listings early, but never panic.
    pub const fn from_sorted_records(records: &'a [EmbeddedRecord<'a>]) -> Self {
        Self { records }
    }

    /// Wraps a record slice after checking that it forms a valid embedded tree:
    /// - every name starts with `/`,
    /// - names are strictly increasing (sorted, no duplicates),
    /// - every `child` and `next` index is inside the slice,
    /// - no record is linked to from more than one place (which rules out looping sibling chains),
    /// - only directories have children, and directories have no content.
    pub fn new(records: &'a [EmbeddedRecord<'a>]) -> Result<Self, InvalidRecordSetError> {
        validate_records(records)?;

        Ok(Self { records })
    }

    /// Returns the number of embedded entries (files and directories, the root included).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no embedded entries at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the underlying, name-sorted record slice.
    pub fn records(&self) -> &'a [EmbeddedRecord<'a>] {
        self.records
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.records
            .binary_search_by(|record| record.name.cmp(name))
            .ok()
    }

    /// Opens the entry with the exact given `/`-rooted `name`.
    ///
    /// No normalization is performed: `/css/` will not find `/css`,
    /// and `css/style.css` will not find `/css/style.css`.
    ///
    /// The returned handle starts reading at the beginning of the content and,
    /// for directories, listing at the first child.
    pub fn open(&self, name: &str) -> Result<EmbeddedFile<'a>, OpenError> {
        let Some(index) = self.position_of(name) else {
            return Err(OpenError::NotFound {
                path: name.to_string(),
            });
        };

        Ok(EmbeddedFile::new(self.records, index))
    }

    /// Returns `true` if an entry with the exact given name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Returns the entire content of the entry with the given name.
    /// Directories have empty content.
    pub fn read(&self, name: &str) -> Result<&'a [u8], OpenError> {
        let Some(index) = self.position_of(name) else {
            return Err(OpenError::NotFound {
                path: name.to_string(),
            });
        };

        Ok(self.records[index].content)
    }
}


fn validate_index(
    records: &[EmbeddedRecord<'_>],
    record: &EmbeddedRecord<'_>,
    index: EntryIndex,
    field: RecordIndexField,
) -> Result<(), InvalidRecordSetError> {
    let Some(index) = index else {
        return Ok(());
    };

    if index as usize >= records.len() {
        return Err(InvalidRecordSetError::IndexOutOfBounds {
            name: record.name.to_string(),
            field,
            index,
            record_count: records.len(),
        });
    }

    Ok(())
}

fn validate_records(records: &[EmbeddedRecord<'_>]) -> Result<(), InvalidRecordSetError> {
    for (position, record) in records.iter().enumerate() {
        if !record.name.starts_with('/') {
            return Err(InvalidRecordSetError::NameNotRooted {
                name: record.name.to_string(),
            });
        }

        if position > 0 {
            let previous = &records[position - 1];

            if previous.name == record.name {
                return Err(InvalidRecordSetError::DuplicateName {
                    name: record.name.to_string(),
                });
            } else if previous.name > record.name {
                return Err(InvalidRecordSetError::NotSorted {
                    previous_name: previous.name.to_string(),
                    name: record.name.to_string(),
                });
            }
        }

        validate_index(records, record, record.child, RecordIndexField::Child)?;
        validate_index(records, record, record.next, RecordIndexField::Next)?;

        if record.mode.is_dir() {
            if !record.content.is_empty() {
                return Err(InvalidRecordSetError::DirectoryWithContent {
                    name: record.name.to_string(),
                });
            }
        } else if record.child.is_some() {
            return Err(InvalidRecordSetError::ChildOfNonDirectory {
                name: record.name.to_string(),
            });
        }
    }

    // Each record has at most one incoming link, so every sibling chain
    // that starts at a `child` index ends in `None`.
    let mut is_linked = vec![false; records.len()];

    for record in records {
        for index in [record.child, record.next].into_iter().flatten() {
            let position = index as usize;

            if is_linked[position] {
                return Err(InvalidRecordSetError::RecordLinkedMoreThanOnce {
                    name: records[position].name.to_string(),
                });
            }

            is_linked[position] = true;
        }
    }

    Ok(())
}



#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;


    const fn directory(
        name: &'static str,
        child: EntryIndex,
        next: EntryIndex,
    ) -> EmbeddedRecord<'static> {
        EmbeddedRecord {
            name,
            content: b"",
            mode: FileMode::Directory,
            child,
            next,
        }
    }

    const fn regular(
        name: &'static str,
        content: &'static [u8],
        next: EntryIndex,
    ) -> EmbeddedRecord<'static> {
        EmbeddedRecord {
            name,
            content,
            mode: FileMode::Regular,
            child: None,
            next,
        }
    }


    static SAMPLE_RECORDS: [EmbeddedRecord<'static>; 4] = [
        directory("/", Some(1), None),
        regular("/a.txt", b"hi", Some(2)),
        directory("/b", Some(3), None),
        regular("/b/c.txt", b"yo", None),
    ];

    static SAMPLE: EmbeddedFileSystem<'static> =
        EmbeddedFileSystem::from_sorted_records(&SAMPLE_RECORDS);


    #[test]
    fn base_name_is_last_segment() {
        assert_eq!(base_name_of("/"), "/");
        assert_eq!(base_name_of("/a.txt"), "a.txt");
        assert_eq!(base_name_of("/css/style.css"), "style.css");
        assert_eq!(base_name_of("/css/"), "css");
    }

    #[test]
    fn permissions_follow_mode() {
        assert_eq!(FileMode::Directory.permissions(), 0o755);
        assert_eq!(FileMode::Executable.permissions(), 0o755);
        assert_eq!(FileMode::Regular.permissions(), 0o644);
    }

    #[test]
    fn static_sample_is_valid() {
        assert!(EmbeddedFileSystem::new(&SAMPLE_RECORDS).is_ok());
        assert_eq!(SAMPLE.len(), 4);
        assert!(!SAMPLE.is_empty());
    }

    #[test]
    fn open_finds_exact_names_only() {
        assert!(SAMPLE.open("/").is_ok());
        assert!(SAMPLE.open("/b/c.txt").is_ok());

        assert_matches!(
            SAMPLE.open("/b/"),
            Err(OpenError::NotFound { path }) if path == "/b/"
        );
        assert_matches!(SAMPLE.open("b"), Err(OpenError::NotFound { .. }));
        assert_matches!(SAMPLE.open("/a"), Err(OpenError::NotFound { .. }));
        assert_matches!(SAMPLE.open(""), Err(OpenError::NotFound { .. }));
    }

    #[test]
    fn read_returns_whole_content() {
        assert_eq!(SAMPLE.read("/a.txt").unwrap(), b"hi");
        assert_eq!(SAMPLE.read("/b").unwrap(), b"");
        assert!(SAMPLE.read("/missing").is_err());

        assert!(SAMPLE.exists("/b/c.txt"));
        assert!(!SAMPLE.exists("/c.txt"));
    }

    #[test]
    fn validation_rejects_unsorted_records() {
        let records = [
            directory("/", Some(2), None),
            regular("/b", b"", None),
            regular("/a", b"", Some(1)),
        ];

        assert_matches!(
            EmbeddedFileSystem::new(&records),
            Err(InvalidRecordSetError::NotSorted { previous_name, name })
                if previous_name == "/b" && name == "/a"
        );
    }

    #[test]
    fn validation_rejects_duplicates() {
        let records = [
            directory("/", Some(1), None),
            regular("/a", b"", Some(2)),
            regular("/a", b"", None),
        ];

        assert_matches!(
            EmbeddedFileSystem::new(&records),
            Err(InvalidRecordSetError::DuplicateName { name }) if name == "/a"
        );
    }

    #[test]
    fn validation_rejects_dangling_indices() {
        let records = [directory("/", Some(7), None)];

        assert_matches!(
            EmbeddedFileSystem::new(&records),
            Err(InvalidRecordSetError::IndexOutOfBounds {
                field: RecordIndexField::Child,
                index: 7,
                record_count: 1,
                ..
            })
        );
    }

    #[test]
    fn validation_rejects_malformed_entries() {
        let unrooted = [directory("/", None, None), regular("a", b"", None)];
        assert_matches!(
            EmbeddedFileSystem::new(&unrooted),
            Err(InvalidRecordSetError::NameNotRooted { .. })
        );

        let directory_with_content = [EmbeddedRecord {
            name: "/",
            content: b"nope",
            mode: FileMode::Directory,
            child: None,
            next: None,
        }];
        assert_matches!(
            EmbeddedFileSystem::new(&directory_with_content),
            Err(InvalidRecordSetError::DirectoryWithContent { .. })
        );

        let file_with_child = [directory("/", Some(1), None), EmbeddedRecord {
            name: "/a",
            content: b"",
            mode: FileMode::Regular,
            child: Some(0),
            next: None,
        }];
        assert_matches!(
            EmbeddedFileSystem::new(&file_with_child),
            Err(InvalidRecordSetError::ChildOfNonDirectory { name }) if name == "/a"
        );
    }

    #[test]
    fn validation_rejects_looping_sibling_chains() {
        let self_loop = [directory("/", Some(1), None), regular("/a", b"", Some(1))];
        assert_matches!(
            EmbeddedFileSystem::new(&self_loop),
            Err(InvalidRecordSetError::RecordLinkedMoreThanOnce { name }) if name == "/a"
        );

        let longer_loop = [
            directory("/", Some(1), None),
            regular("/a", b"", Some(2)),
            regular("/b", b"", Some(3)),
            regular("/c", b"", Some(1)),
        ];
        assert_matches!(
            EmbeddedFileSystem::new(&longer_loop),
            Err(InvalidRecordSetError::RecordLinkedMoreThanOnce { name }) if name == "/a"
        );
    }

    #[test]
    fn validation_rejects_shared_children() {
        let records = [
            directory("/", Some(1), None),
            directory("/a", Some(3), Some(2)),
            directory("/b", Some(3), None),
            regular("/b/c", b"", None),
        ];

        assert_matches!(
            EmbeddedFileSystem::new(&records),
            Err(InvalidRecordSetError::RecordLinkedMoreThanOnce { name }) if name == "/b/c"
        );
    }
}
