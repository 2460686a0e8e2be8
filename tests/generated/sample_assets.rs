//! @generated
//!
//! Embedded file system `sample_assets`, generated by `fs-embed`
//! (4 entries, 4 B of file content).
//!
//! The full file tree is as follows:
//! ```md
//! .
//! |-- a.txt (2 B)
//! |-- b/
//! |   |-- c.txt (2 B)
//! ```
//!
//! <sup>DO NOT MODIFY THIS FILE. INSTEAD, MODIFY THE SOURCE DIRECTORY
//! AND REGENERATE THIS FILE by running the following in this file's directory:</sup>
//!
//! ```sh
//! fs-embed "../assets" . sample_assets
//! ```


use ::fs_embed::embedded::{EmbeddedFileSystem, EmbeddedRecord, FileMode};
/// Root of the embedded `sample_assets` file system. Open entries by their `/`-rooted names, e.g. `ROOT.open("/")`.
pub static ROOT: EmbeddedFileSystem<'static> = EmbeddedFileSystem::from_sorted_records(
    &RECORDS,
);
static RECORDS: [EmbeddedRecord<'static>; 4] = [
    EmbeddedRecord {
        name: "/",
        content: b"",
        mode: FileMode::Directory,
        child: Some(1),
        next: None,
    },
    EmbeddedRecord {
        name: "/a.txt",
        content: b"hi",
        mode: FileMode::Regular,
        child: None,
        next: Some(2),
    },
    EmbeddedRecord {
        name: "/b",
        content: b"",
        mode: FileMode::Directory,
        child: Some(3),
        next: None,
    },
    EmbeddedRecord {
        name: "/b/c.txt",
        content: b"yo",
        mode: FileMode::Regular,
        child: None,
        next: None,
    },
];
