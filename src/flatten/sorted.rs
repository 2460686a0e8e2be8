use std::path::{Path, PathBuf};

use path_slash::PathExt;

use super::FlattenedTree;
use crate::{
    embedded::{EmbeddedRecord, EntryIndex, FileMode},
    error::FlattenError,
};


/// An owned, embeddable record of a [`SortedTree`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SortedRecord {
    name: String,

    content: Vec<u8>,

    mode: FileMode,

    child: EntryIndex,

    next: EntryIndex,
}

impl SortedRecord {
    /// Returns the `/`-rooted name of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contents of the record (empty for directories).
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the mode of the record.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Returns the sorted-order index of the first child.
    pub fn child(&self) -> EntryIndex {
        self.child
    }

    /// Returns the sorted-order index of the next sibling.
    pub fn next(&self) -> EntryIndex {
        self.next
    }

    /// Returns a borrowed [`EmbeddedRecord`] view of this record.
    pub fn as_embedded(&self) -> EmbeddedRecord<'_> {
        EmbeddedRecord {
            name: &self.name,
            content: &self.content,
            mode: self.mode,
            child: self.child,
            next: self.next,
        }
    }
}



/// A flattened tree in its final, embeddable form: `/`-rooted names,
/// sorted byte-wise by name, with `child` and `next` pointing at sorted positions.
///
/// Sibling chains keep the order they had in the walk.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SortedTree {
    root_path: PathBuf,

    records: Vec<SortedRecord>,
}

impl SortedTree {
    /// Returns the canonicalized path of the source directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns all records, sorted by name.
    pub fn entries(&self) -> &[SortedRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns borrowed [`EmbeddedRecord`]s, ready to be passed to
    /// [`EmbeddedFileSystem::new`].
    ///
    /// [`EmbeddedFileSystem::new`]: crate::embedded::EmbeddedFileSystem::new
    pub fn records(&self) -> Vec<EmbeddedRecord<'_>> {
        self.records.iter().map(SortedRecord::as_embedded).collect()
    }
}



/// Computes the `/`-rooted embedded name of `path` (the root itself becomes `/`).
pub(crate) fn embedded_name_for_path(path: &Path, root_path: &Path) -> Result<String, FlattenError> {
    let relative_path =
        path.strip_prefix(root_path)
            .map_err(|_| FlattenError::UnableToResolveRelativePath {
                path: path.to_path_buf(),
                root_path: root_path.to_path_buf(),
            })?;

    let slashed_relative_path =
        relative_path
            .to_slash()
            .ok_or_else(|| FlattenError::NonUnicodePath {
                path: path.to_path_buf(),
            })?;

    Ok(format!("/{}", slashed_relative_path.trim_matches('/')))
}


impl FlattenedTree {
    /// Converts the walk-order tree into its embeddable form.
    ///
    /// Every entry gets its `/`-rooted name, entries are sorted byte-wise by name,
    /// and all `child`/`next` indices are remapped so that they keep pointing
    /// at the same entries after sorting.
    pub fn into_sorted(self) -> Result<SortedTree, FlattenError> {
        let FlattenedTree { root_path, entries } = self;

        let mut named_entries = entries
            .into_iter()
            .enumerate()
            .map(|(walk_index, entry)| {
                embedded_name_for_path(entry.path(), &root_path)
                    .map(|name| (walk_index, name, entry))
            })
            .collect::<Result<Vec<_>, _>>()?;

        named_entries.sort_by(|(_, left_name, _), (_, right_name, _)| left_name.cmp(right_name));


        let mut sorted_position_of = vec![0u32; named_entries.len()];
        for (sorted_position, (walk_index, ..)) in named_entries.iter().enumerate() {
            // `flatten_directory` guarantees the entry count fits into an `u32`.
            sorted_position_of[*walk_index] = sorted_position as u32;
        }

        let remap = |index: EntryIndex| index.map(|index| sorted_position_of[index as usize]);

        let records: Vec<SortedRecord> = named_entries
            .into_iter()
            .map(|(_, name, entry)| SortedRecord {
                name,
                child: remap(entry.child),
                next: remap(entry.next),
                content: entry.content,
                mode: entry.mode,
            })
            .collect();

        log::debug!(
            "Sorted {} records from \"{}\".",
            records.len(),
            root_path.display()
        );

        Ok(SortedTree { root_path, records })
    }
}
