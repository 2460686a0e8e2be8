//! Flattening a directory tree on disk into an index-linked sequence of entries.
//!
//! [`flatten_directory`] walks the source directory once (see [`DepthFirstWalker`])
//! and assigns every visited entry the next sequential index. Each directory
//! remembers the indices of its children; once the walk has finished, these lists
//! are turned into singly-linked sibling chains (`child` points to the first child,
//! `next` to the following sibling).
//!
//! The resulting [`FlattenedTree`] is in walk order and still uses absolute paths.
//! To embed it, convert it with [`FlattenedTree::into_sorted`], which assigns the final
//! `/`-rooted names, sorts by name and remaps all indices to the sorted positions.
//!
//! [`DepthFirstWalker`]: crate::walk::DepthFirstWalker

use std::{
    collections::HashMap,
    fs::{FileType, Metadata},
    path::{Path, PathBuf},
};

use_enabled_fs_module!();

use crate::{
    embedded::{EntryIndex, FileMode},
    error::FlattenError,
    walk::{DepthFirstWalker, WalkOptions},
};

mod sorted;
pub use sorted::*;



/// A single file or directory of a [`FlattenedTree`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlattenedEntry {
    path: PathBuf,

    mode: FileMode,

    content: Vec<u8>,

    children: Vec<u32>,

    child: EntryIndex,

    next: EntryIndex,
}

impl FlattenedEntry {
    /// Returns the absolute path of this entry on the source file system.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the mode of this entry.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Returns the contents of this entry (empty for directories).
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the walk-order indices of all children of this entry.
    pub fn children(&self) -> &[u32] {
        &self.children
    }

    /// Returns the walk-order index of the first child.
    pub fn child(&self) -> EntryIndex {
        self.child
    }

    /// Returns the walk-order index of the next sibling.
    pub fn next(&self) -> EntryIndex {
        self.next
    }
}



/// A directory tree flattened in walk order (see [`flatten_directory`]).
///
/// The first entry is always the root directory.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlattenedTree {
    root_path: PathBuf,

    entries: Vec<FlattenedEntry>,
}

impl FlattenedTree {
    /// Returns the canonicalized path of the source directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns all entries in walk order.
    pub fn entries(&self) -> &[FlattenedEntry] {
        &self.entries
    }

    /// Returns the number of entries (the root directory included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    ///
    /// This can only be the case for a tree that was not produced by [`flatten_directory`],
    /// as the root directory is always recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}



/// Ensures the source directory exists and is a directory,
/// then returns its canonicalized path.
fn validate_source_directory_path(source_directory_path: &Path) -> Result<PathBuf, FlattenError> {
    // `try_exists` keeps permission and other IO errors distinct from "not found".
    match source_directory_path.try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(FlattenError::SourceDirectoryNotFound {
                directory_path: source_directory_path.to_path_buf(),
            });
        }
        Err(error) => {
            return Err(FlattenError::UnableToAccessSourceDirectory {
                directory_path: source_directory_path.to_path_buf(),
                error,
            });
        }
    }

    if !source_directory_path.is_dir() {
        return Err(FlattenError::SourcePathNotADirectory {
            path: source_directory_path.to_path_buf(),
        });
    }

    let canonicalized_path = fs::canonicalize(source_directory_path).map_err(|error| {
        FlattenError::UnableToAccessSourceDirectory {
            directory_path: source_directory_path.to_path_buf(),
            error,
        }
    })?;

    Ok(simplify_canonical_path(canonicalized_path))
}


cfg_if::cfg_if! {
    if #[cfg(feature = "dunce")] {
        /// Strips Windows' UNC prefix from a canonicalized path, if the path can be
        /// represented without it (e.g. `\\?\C:\foo -> C:\foo`). No-op on other platforms.
        pub(crate) fn simplify_canonical_path(path: PathBuf) -> PathBuf {
            dunce::simplified(&path).to_path_buf()
        }
    } else {
        pub(crate) fn simplify_canonical_path(path: PathBuf) -> PathBuf {
            path
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        use std::os::unix::fs::{FileTypeExt, PermissionsExt};

        fn describe_special_file_type(file_type: FileType) -> Option<&'static str> {
            if file_type.is_fifo() {
                Some("named pipe")
            } else if file_type.is_socket() {
                Some("socket")
            } else if file_type.is_block_device() {
                Some("block device")
            } else if file_type.is_char_device() {
                Some("character device")
            } else {
                None
            }
        }

        fn has_owner_executable_bit(metadata: &Metadata) -> bool {
            metadata.permissions().mode() & 0o100 != 0
        }
    } else {
        fn describe_special_file_type(_file_type: FileType) -> Option<&'static str> {
            None
        }

        fn has_owner_executable_bit(_metadata: &Metadata) -> bool {
            false
        }
    }
}

fn describe_file_type(file_type: FileType) -> String {
    if file_type.is_symlink() {
        return "symbolic link".to_string();
    }

    match describe_special_file_type(file_type) {
        Some(description) => description.to_string(),
        None => format!("{:?}", file_type),
    }
}

/// Classifies an entry, rejecting anything that is not a regular file or a directory.
fn file_mode_for_entry(path: &Path, metadata: &Metadata) -> Result<FileMode, FlattenError> {
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        Ok(FileMode::Directory)
    } else if file_type.is_file() {
        if has_owner_executable_bit(metadata) {
            Ok(FileMode::Executable)
        } else {
            Ok(FileMode::Regular)
        }
    } else {
        Err(FlattenError::UnsupportedEntryType {
            path: path.to_path_buf(),
            file_type: describe_file_type(file_type),
        })
    }
}


/// Turns every entry's list of children into a chain of `next` indices.
fn link_siblings(entries: &mut [FlattenedEntry]) {
    for parent_position in 0..entries.len() {
        let children = std::mem::take(&mut entries[parent_position].children);

        for (child_position, child_index) in children.iter().enumerate() {
            entries[*child_index as usize].next = children.get(child_position + 1).copied();
        }

        let parent = &mut entries[parent_position];
        parent.child = children.first().copied();
        parent.children = children;
    }
}



/// Walks `source_directory_path` and flattens it into a [`FlattenedTree`].
///
/// Entries are recorded in depth-first pre-order, with each directory's entries
/// in byte-wise file name order. Entries whose name starts with `.` are skipped
/// entirely, including everything beneath hidden directories.
///
/// The whole operation fails (and nothing is returned) if any entry is neither
/// a regular file nor a directory, or if anything can not be read.
pub fn flatten_directory<P>(source_directory_path: P) -> Result<FlattenedTree, FlattenError>
where
    P: AsRef<Path>,
{
    let root_path = validate_source_directory_path(source_directory_path.as_ref())?;

    log::debug!("Flattening directory \"{}\".", root_path.display());


    let walker = DepthFirstWalker::new(
        root_path.clone(),
        WalkOptions {
            yield_base_directory: true,
            skip_hidden_entries: true,
        },
    );

    let mut entries: Vec<FlattenedEntry> = Vec::new();
    let mut index_by_path: HashMap<PathBuf, u32> = HashMap::new();

    for walk_entry_result in walker {
        let (entry_path, entry_metadata) = walk_entry_result?.into_path_and_metadata();

        let mode = file_mode_for_entry(&entry_path, &entry_metadata)?;

        let entry_index =
            u32::try_from(entries.len()).map_err(|_| FlattenError::TooManyEntries {
                entry_count: entries.len(),
            })?;

        let content = match mode {
            FileMode::Directory => Vec::new(),
            FileMode::Executable | FileMode::Regular => {
                fs::read(&entry_path).map_err(|error| FlattenError::UnableToReadFile {
                    file_path: entry_path.clone(),
                    error,
                })?
            }
        };

        log::trace!(
            "Recorded entry #{} \"{}\" ({:?}, {} bytes).",
            entry_index,
            entry_path.display(),
            mode,
            content.len()
        );


        if let Some(parent_index) = entry_path
            .parent()
            .and_then(|parent_path| index_by_path.get(parent_path))
        {
            entries[*parent_index as usize].children.push(entry_index);
        }

        if mode.is_dir() {
            index_by_path.insert(entry_path.clone(), entry_index);
        }

        entries.push(FlattenedEntry {
            path: entry_path,
            mode,
            content,
            children: Vec::new(),
            child: None,
            next: None,
        });
    }


    link_siblings(&mut entries);

    log::debug!(
        "Flattened {} entries from \"{}\".",
        entries.len(),
        root_path.display()
    );

    Ok(FlattenedTree { root_path, entries })
}



#[cfg(test)]
mod test {
    use super::*;

    fn entry(path: &str, mode: FileMode, children: Vec<u32>) -> FlattenedEntry {
        FlattenedEntry {
            path: PathBuf::from(path),
            mode,
            content: Vec::new(),
            children,
            child: None,
            next: None,
        }
    }

    #[test]
    fn sibling_lists_become_chains() {
        let mut entries = vec![
            entry("/r", FileMode::Directory, vec![1, 2, 4]),
            entry("/r/a", FileMode::Regular, vec![]),
            entry("/r/b", FileMode::Directory, vec![3]),
            entry("/r/b/c", FileMode::Regular, vec![]),
            entry("/r/d", FileMode::Directory, vec![]),
        ];

        link_siblings(&mut entries);

        assert_eq!(entries[0].child(), Some(1));
        assert_eq!(entries[0].next(), None);

        assert_eq!(entries[1].next(), Some(2));
        assert_eq!(entries[2].next(), Some(4));
        assert_eq!(entries[4].next(), None);

        assert_eq!(entries[2].child(), Some(3));
        assert_eq!(entries[3].next(), None);

        assert_eq!(entries[4].child(), None);
        assert_eq!(entries[0].children(), &[1, 2, 4]);
    }
}
