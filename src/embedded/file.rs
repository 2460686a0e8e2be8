use std::io::{self, BufRead, Read, Seek, SeekFrom};

use super::{DirectoryBatch, EmbeddedRecord, EntryIndex, EntryMetadata, ReadChildrenLimit};


/// An open handle to an embedded file or directory.
///
/// Obtained from [`EmbeddedFileSystem::open`]. Each handle carries its own
/// content read position and directory listing cursor, which is why reading
/// and listing require `&mut self`. Open a separate handle per reader.
///
/// [`EmbeddedFileSystem::open`]: super::EmbeddedFileSystem::open
#[derive(Clone, Debug)]
pub struct EmbeddedFile<'a> {
    records: &'a [EmbeddedRecord<'a>],

    index: usize,

    position: u64,

    directory_cursor: EntryIndex,
}

impl<'a> EmbeddedFile<'a> {
    pub(super) fn new(records: &'a [EmbeddedRecord<'a>], index: usize) -> Self {
        Self {
            records,
            index,
            position: 0,
            directory_cursor: records[index].child,
        }
    }

    /// Returns the record this handle refers to.
    pub fn record(&self) -> &'a EmbeddedRecord<'a> {
        &self.records[self.index]
    }

    /// Returns the full `/`-rooted name of the entry.
    pub fn path(&self) -> &'a str {
        self.record().name
    }

    /// Returns the entry's base name, size and mode.
    pub fn metadata(&self) -> EntryMetadata<'a> {
        EntryMetadata::from_record(self.record())
    }

    /// Returns the entire content, independent of the current read position.
    pub fn contents(&self) -> &'a [u8] {
        self.record().content
    }

    fn remaining_content(&self) -> &'a [u8] {
        let content = self.contents();
        let start = usize::try_from(self.position)
            .unwrap_or(usize::MAX)
            .min(content.len());

        &content[start..]
    }

    /// Reads the next entries of this directory.
    ///
    /// Entries are returned in sibling order, continuing from where the previous call
    /// on this handle stopped. Calling this on a file returns an empty batch.
    ///
    /// With a bounded `limit`, a batch that could not be filled completely
    /// has [`DirectoryBatch::end_of_directory`] set. An unbounded read
    /// returns everything that is left and never sets it.
    pub fn read_children(&mut self, limit: ReadChildrenLimit) -> DirectoryBatch<'a> {
        if !self.record().mode.is_dir() {
            return DirectoryBatch::default();
        }

        let maximum_entries = limit.effective_maximum();
        // A directory can not have more children than there are records.
        let mut entries =
            Vec::with_capacity(maximum_entries.unwrap_or(0).min(self.records.len()));

        while let Some(cursor) = self.directory_cursor {
            if maximum_entries.is_some_and(|maximum| entries.len() >= maximum) {
                return DirectoryBatch {
                    entries,
                    end_of_directory: false,
                };
            }

            // An out-of-bounds index can only come from unvalidated records,
            // treat it as the end of the sibling chain.
            let Some(child_record) = self.records.get(cursor as usize) else {
                self.directory_cursor = None;
                break;
            };

            entries.push(EntryMetadata::from_record(child_record));
            self.directory_cursor = child_record.next;
        }

        let end_of_directory = match maximum_entries {
            Some(maximum) => entries.len() < maximum,
            None => false,
        };

        DirectoryBatch {
            entries,
            end_of_directory,
        }
    }

    /// Closes the handle. All embedded data is static, so there is nothing to release;
    /// this may be called any number of times.
    pub fn close(&mut self) {}
}


impl<'a> Read for EmbeddedFile<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining_content();
        let bytes_to_copy = remaining.len().min(buf.len());

        buf[..bytes_to_copy].copy_from_slice(&remaining[..bytes_to_copy]);
        self.position += bytes_to_copy as u64;

        Ok(bytes_to_copy)
    }
}

impl<'a> BufRead for EmbeddedFile<'a> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.remaining_content())
    }

    fn consume(&mut self, amount: usize) {
        let consumable = self.remaining_content().len().min(amount);
        self.position += consumable as u64;
    }
}

impl<'a> Seek for EmbeddedFile<'a> {
    fn seek(&mut self, position: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match position {
            SeekFrom::Start(offset) => {
                self.position = offset;
                return Ok(offset);
            }
            SeekFrom::End(offset) => (self.contents().len() as u64, offset),
            SeekFrom::Current(offset) => (self.position, offset),
        };

        match base.checked_add_signed(offset) {
            Some(new_position) => {
                self.position = new_position;
                Ok(new_position)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
