//! Deterministic, depth-first directory walking.
//!
//! [`DepthFirstWalker`] visits a directory tree in pre-order: every directory is yielded
//! before its contents, and the entries of each directory are visited in byte-wise
//! order of their file names. Symbolic links are never followed; they are yielded
//! with their own (non-followed) metadata, so callers can tell them apart from
//! regular files and directories.

use std::{
    cmp::Ordering,
    ffi::OsString,
    fs::Metadata,
    path::{Path, PathBuf},
};

use_enabled_fs_module!();

use crate::error::WalkError;



/// Options that influence [`DepthFirstWalker`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WalkOptions {
    /// Whether to have the iterator yield the base directory
    /// as its first item or not.
    pub yield_base_directory: bool,

    /// If enabled, entries whose file name starts with `.` are neither yielded
    /// nor descended into. The base directory is never skipped.
    pub skip_hidden_entries: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            yield_base_directory: true,
            skip_hidden_entries: true,
        }
    }
}



/// Describes the depth of a walked entry, relative to the base directory.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WalkEntryDepth {
    /// The given entry is the base directory of the walk.
    BaseDirectory,

    /// The given entry is at `depth` levels under the base directory.
    AtDepth {
        /// 0 means the entry is a direct descendant of the base directory,
        /// 1 means it is a grandchild, and so on.
        depth: usize,
    },
}

impl WalkEntryDepth {
    /// Returns a [`WalkEntryDepth`] that is one level deeper than the current one.
    fn plus_one_level(self) -> Self {
        match self {
            WalkEntryDepth::BaseDirectory => WalkEntryDepth::AtDepth { depth: 0 },
            WalkEntryDepth::AtDepth { depth } => WalkEntryDepth::AtDepth { depth: depth + 1 },
        }
    }
}

impl PartialOrd for WalkEntryDepth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WalkEntryDepth {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (WalkEntryDepth::BaseDirectory, WalkEntryDepth::BaseDirectory) => Ordering::Equal,
            (WalkEntryDepth::BaseDirectory, WalkEntryDepth::AtDepth { .. }) => Ordering::Less,
            (WalkEntryDepth::AtDepth { .. }, WalkEntryDepth::BaseDirectory) => Ordering::Greater,
            (
                WalkEntryDepth::AtDepth { depth: left_depth },
                WalkEntryDepth::AtDepth { depth: right_depth },
            ) => left_depth.cmp(right_depth),
        }
    }
}



/// A directory walk entry.
#[derive(Debug)]
pub struct WalkEntry {
    path: PathBuf,

    metadata: Metadata,

    depth: WalkEntryDepth,
}

impl WalkEntry {
    #[inline]
    fn new(path: PathBuf, metadata: Metadata, depth: WalkEntryDepth) -> Self {
        Self {
            path,
            metadata,
            depth,
        }
    }

    /// Returns the depth of the entry inside the walked tree.
    pub fn depth(&self) -> WalkEntryDepth {
        self.depth
    }

    /// Returns the [`Path`] of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the [`Metadata`] of the entry. Symbolic links are not followed.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consumes `self` and returns the path ([`PathBuf`])
    /// and the [`Metadata`] of the entry.
    pub fn into_path_and_metadata(self) -> (PathBuf, Metadata) {
        (self.path, self.metadata)
    }
}



struct PendingDirectory {
    directory_path: PathBuf,

    directory_depth: WalkEntryDepth,
}



/// A depth-first, pre-order directory walker.
///
/// This call will not interact with the filesystem yet. Iterate over the walker
/// (or call [`into_iter`][`Self::into_iter`]) to start walking.
pub struct DepthFirstWalker {
    base_path: PathBuf,

    options: WalkOptions,
}

impl DepthFirstWalker {
    /// Initializes the walker.
    pub fn new<P>(base_directory_path: P, options: WalkOptions) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            base_path: base_directory_path.into(),
            options,
        }
    }
}

impl IntoIterator for DepthFirstWalker {
    type IntoIter = DepthFirstWalkIter;
    type Item = Result<WalkEntry, WalkError>;

    fn into_iter(self) -> Self::IntoIter {
        DepthFirstWalkIter {
            base_directory: self.base_path,
            has_processed_base_directory: false,
            options: self.options,
            directory_to_expand: None,
            pending_entries: Vec::new(),
            has_failed: false,
        }
    }
}



/// Iterator returned by [`DepthFirstWalker::into_iter`].
///
/// After the first error, the iterator is exhausted.
pub struct DepthFirstWalkIter {
    base_directory: PathBuf,

    has_processed_base_directory: bool,

    options: WalkOptions,

    /// A directory that was just yielded and whose entries
    /// have not been read yet.
    directory_to_expand: Option<PendingDirectory>,

    /// Entries waiting to be yielded. The *last* element is yielded next.
    pending_entries: Vec<WalkEntry>,

    has_failed: bool,
}

impl DepthFirstWalkIter {
    fn is_hidden(file_name: &OsString) -> bool {
        file_name.to_string_lossy().starts_with('.')
    }

    /// Reads all entries of `directory` and pushes them onto the pending stack
    /// so that they are popped in ascending file name order.
    fn expand_directory(&mut self, directory: PendingDirectory) -> Result<(), WalkError> {
        log::trace!(
            "Reading directory \"{}\".",
            directory.directory_path.display()
        );

        let directory_iterator = fs::read_dir(&directory.directory_path).map_err(|error| {
            WalkError::UnableToReadDirectory {
                directory_path: directory.directory_path.clone(),
                error,
            }
        })?;


        let mut directory_entries = Vec::new();

        for raw_entry_result in directory_iterator {
            let raw_entry = raw_entry_result.map_err(|error| {
                WalkError::UnableToReadDirectoryEntry {
                    directory_path: directory.directory_path.clone(),
                    error,
                }
            })?;

            let file_name = raw_entry.file_name();
            if self.options.skip_hidden_entries && Self::is_hidden(&file_name) {
                log::trace!(
                    "Skipping hidden entry \"{}\".",
                    raw_entry.path().display()
                );
                continue;
            }

            let entry_path = raw_entry.path();
            let entry_metadata = fs::symlink_metadata(&entry_path).map_err(|error| {
                WalkError::UnableToReadDirectoryEntry {
                    directory_path: directory.directory_path.clone(),
                    error,
                }
            })?;

            directory_entries.push((file_name, entry_path, entry_metadata));
        }


        // Descending order, because the stack is popped from the back.
        directory_entries.sort_unstable_by(|(left_name, ..), (right_name, ..)| {
            right_name.cmp(left_name)
        });

        let entry_depth = directory.directory_depth.plus_one_level();
        self.pending_entries.extend(
            directory_entries
                .into_iter()
                .map(|(_, path, metadata)| WalkEntry::new(path, metadata, entry_depth)),
        );

        Ok(())
    }

    fn process_base_directory(&mut self) -> Result<Option<WalkEntry>, WalkError> {
        let base_directory_metadata =
            fs::symlink_metadata(&self.base_directory).map_err(|error| {
                WalkError::UnableToReadDirectory {
                    directory_path: self.base_directory.clone(),
                    error,
                }
            })?;

        if !base_directory_metadata.is_dir() {
            return Err(WalkError::NotADirectory {
                path: self.base_directory.clone(),
            });
        }

        self.directory_to_expand = Some(PendingDirectory {
            directory_path: self.base_directory.clone(),
            directory_depth: WalkEntryDepth::BaseDirectory,
        });

        if self.options.yield_base_directory {
            return Ok(Some(WalkEntry::new(
                self.base_directory.clone(),
                base_directory_metadata,
                WalkEntryDepth::BaseDirectory,
            )));
        }

        Ok(None)
    }

    fn next_entry(&mut self) -> Result<Option<WalkEntry>, WalkError> {
        if !self.has_processed_base_directory {
            self.has_processed_base_directory = true;

            if let Some(base_entry) = self.process_base_directory()? {
                return Ok(Some(base_entry));
            }
        }

        if let Some(directory) = self.directory_to_expand.take() {
            self.expand_directory(directory)?;
        }

        let Some(next_entry) = self.pending_entries.pop() else {
            return Ok(None);
        };

        if next_entry.metadata.is_dir() {
            self.directory_to_expand = Some(PendingDirectory {
                directory_path: next_entry.path.clone(),
                directory_depth: next_entry.depth,
            });
        }

        Ok(Some(next_entry))
    }
}

impl Iterator for DepthFirstWalkIter {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_failed {
            return None;
        }

        match self.next_entry() {
            Ok(entry) => entry.map(Ok),
            Err(error) => {
                self.has_failed = true;
                Some(Err(error))
            }
        }
    }
}



#[cfg(test)]
mod test {
    use std::fs;

    use super::*;


    fn walk_relative_paths(base: &Path, options: WalkOptions) -> Vec<(String, WalkEntryDepth)> {
        DepthFirstWalker::new(base, options)
            .into_iter()
            .map(|entry| {
                let entry = entry.unwrap();
                let relative = entry
                    .path()
                    .strip_prefix(base)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");

                (relative, entry.depth())
            })
            .collect()
    }


    #[test]
    fn walks_in_pre_order_sorted_by_name() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let base = temporary_directory.path();

        fs::create_dir_all(base.join("b/d")).unwrap();
        fs::write(base.join("b/d/e.txt"), b"e").unwrap();
        fs::write(base.join("b/c.txt"), b"c").unwrap();
        fs::write(base.join("a.txt"), b"a").unwrap();
        fs::write(base.join("z.txt"), b"z").unwrap();
        fs::write(base.join(".hidden"), b"h").unwrap();
        fs::create_dir(base.join(".git")).unwrap();
        fs::write(base.join(".git/config"), b"g").unwrap();


        let walked = walk_relative_paths(base, WalkOptions::default());
        let walked_paths: Vec<&str> = walked.iter().map(|(path, _)| path.as_str()).collect();

        assert_eq!(
            walked_paths,
            vec!["", "a.txt", "b", "b/c.txt", "b/d", "b/d/e.txt", "z.txt"]
        );

        assert_eq!(walked[0].1, WalkEntryDepth::BaseDirectory);
        assert_eq!(walked[1].1, WalkEntryDepth::AtDepth { depth: 0 });
        assert_eq!(walked[5].1, WalkEntryDepth::AtDepth { depth: 2 });
    }

    #[test]
    fn hidden_entries_can_be_included() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let base = temporary_directory.path();

        fs::write(base.join(".hidden"), b"h").unwrap();
        fs::write(base.join("visible"), b"v").unwrap();

        let walked = walk_relative_paths(
            base,
            WalkOptions {
                yield_base_directory: false,
                skip_hidden_entries: false,
            },
        );
        let walked_paths: Vec<&str> = walked.iter().map(|(path, _)| path.as_str()).collect();

        assert_eq!(walked_paths, vec![".hidden", "visible"]);
    }

    #[test]
    fn non_directory_base_is_an_error() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let file_path = temporary_directory.path().join("file.txt");
        fs::write(&file_path, b"x").unwrap();

        let mut iterator = DepthFirstWalker::new(&file_path, WalkOptions::default()).into_iter();

        assert!(matches!(
            iterator.next(),
            Some(Err(WalkError::NotADirectory { .. }))
        ));
        assert!(iterator.next().is_none());
    }

    #[test]
    fn depth_ordering() {
        assert!(WalkEntryDepth::BaseDirectory < WalkEntryDepth::AtDepth { depth: 0 });
        assert!(WalkEntryDepth::AtDepth { depth: 0 } < WalkEntryDepth::AtDepth { depth: 3 });
    }
}
