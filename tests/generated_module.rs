//! Exercises a module in exactly the shape `fs-embed` generates,
//! as a consumer crate would use it.

use std::io::Read;

use fs_embed::embedded::{EmbeddedFileSystem, FileMode, ReadChildrenLimit};

#[path = "generated/sample_assets.rs"]
mod sample_assets;


#[test]
pub fn generated_records_are_valid() {
    EmbeddedFileSystem::new(sample_assets::ROOT.records())
        .expect("generated record set failed validation");

    assert_eq!(sample_assets::ROOT.len(), 4);
}


#[test]
pub fn generated_root_serves_files_and_listings() -> std::io::Result<()> {
    let mut content = String::new();
    sample_assets::ROOT
        .open("/b/c.txt")?
        .read_to_string(&mut content)?;
    assert_eq!(content, "yo");

    let mut root = sample_assets::ROOT.open("/")?;

    let first_batch = root.read_children(ReadChildrenLimit::AtMost { maximum_entries: 1 });
    assert_eq!(first_batch.names(), ["a.txt"]);
    assert!(!first_batch.end_of_directory);

    let second_batch = root.read_children(ReadChildrenLimit::AtMost { maximum_entries: 1 });
    assert_eq!(second_batch.names(), ["b"]);
    assert!(second_batch.entries[0].is_dir());

    let last_batch = root.read_children(ReadChildrenLimit::AtMost { maximum_entries: 1 });
    assert!(last_batch.is_empty());
    assert!(last_batch.end_of_directory);


    let a_txt = sample_assets::ROOT.open("/a.txt")?.metadata();
    assert_eq!(a_txt.name(), "a.txt");
    assert_eq!(a_txt.len(), 2);
    assert_eq!(a_txt.mode(), FileMode::Regular);

    assert!(sample_assets::ROOT.open("/.hidden").is_err());

    Ok(())
}
