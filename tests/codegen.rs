#![cfg(feature = "codegen")]

use assert_matches::assert_matches;
use fs_embed::{
    codegen::{generate_module_source, write_embedded_module, CodegenOptions},
    error::{FlattenError, GenerationError},
    flatten::flatten_directory,
};
use fs_embed_test_harness::{error::TestResult, SourceTree};


fn sample_source_tree() -> TestResult<SourceTree> {
    SourceTree::new()?
        .with_file("a.txt", "hi")?
        .with_file("b/c.txt", "yo")?
        .with_file(".hidden", "junk")
}


#[test]
pub fn write_embedded_module_emits_a_parsable_module() -> TestResult {
    let tree = sample_source_tree()?;
    let output_directory_path = tree.scratch_path().join("assets");

    let generated_module = write_embedded_module(
        tree.path(),
        &output_directory_path,
        None,
        &CodegenOptions::default(),
    )
    .unwrap_or_else(|error| panic!("write_embedded_module unexpectedly failed with Err: {}", error));

    assert_eq!(generated_module.module_name, "assets");
    assert_eq!(generated_module.entry_count, 4);
    assert_eq!(
        generated_module.output_file_path,
        output_directory_path.join("assets.rs")
    );


    let generated_source = std::fs::read_to_string(&generated_module.output_file_path)?;

    assert!(generated_source.starts_with("//! @generated"));
    assert!(generated_source.contains("fs-embed \"../root\" . assets"));
    assert!(generated_source.contains("use ::fs_embed::embedded::{EmbeddedFileSystem, EmbeddedRecord, FileMode};"));
    assert!(generated_source.contains("pub static ROOT: EmbeddedFileSystem<'static>"));
    assert!(generated_source.contains("[EmbeddedRecord<'static>; 4]"));

    for expected_fragment in ["\"/\"", "\"/a.txt\"", "\"/b\"", "\"/b/c.txt\"", "b\"hi\"", "b\"yo\""] {
        assert!(
            generated_source.contains(expected_fragment),
            "generated source is missing {}",
            expected_fragment
        );
    }

    assert!(!generated_source.contains("hidden"));
    assert!(!generated_source.contains("junk"));

    syn::parse_file(&generated_source).expect("generated source is not valid Rust");

    Ok(())
}


#[test]
pub fn write_embedded_module_respects_overwrite_option() -> TestResult {
    let tree = sample_source_tree()?;
    let output_directory_path = tree.scratch_path().join("out");

    write_embedded_module(
        tree.path(),
        &output_directory_path,
        Some("web_assets"),
        &CodegenOptions::default(),
    )
    .expect("initial generation failed");

    assert!(output_directory_path.join("web_assets.rs").is_file());


    assert_matches!(
        write_embedded_module(
            tree.path(),
            &output_directory_path,
            Some("web_assets"),
            &CodegenOptions::default(),
        ),
        Err(GenerationError::FailedToWriteOutput { .. })
    );

    write_embedded_module(
        tree.path(),
        &output_directory_path,
        Some("web_assets"),
        &CodegenOptions {
            overwrite_existing_file: true,
            ..Default::default()
        },
    )
    .expect("generation with overwriting enabled failed");

    Ok(())
}


#[test]
#[cfg(unix)]
pub fn write_embedded_module_writes_nothing_for_unsupported_entries() -> TestResult {
    let tree = sample_source_tree()?.with_socket("b/app.sock")?;
    let output_directory_path = tree.scratch_path().join("assets");

    assert_matches!(
        write_embedded_module(
            tree.path(),
            &output_directory_path,
            None,
            &CodegenOptions::default(),
        ),
        Err(GenerationError::FlattenFailed(
            FlattenError::UnsupportedEntryType { .. }
        ))
    );

    assert!(!output_directory_path.exists());

    Ok(())
}


#[test]
pub fn write_embedded_module_rejects_invalid_names() -> TestResult {
    let tree = sample_source_tree()?;

    assert_matches!(
        write_embedded_module(
            tree.path(),
            tree.scratch_path().join("out"),
            Some("fn"),
            &CodegenOptions::default(),
        ),
        Err(GenerationError::InvalidModuleName { name }) if name == "fn"
    );

    Ok(())
}


#[test]
pub fn generate_module_source_uses_configured_crate_path() -> TestResult {
    let tree = sample_source_tree()?;
    let sorted_tree = flatten_directory(tree.path())
        .expect("failed to flatten source tree")
        .into_sorted()
        .expect("failed to sort flattened tree");

    let generated_source = generate_module_source(
        &sorted_tree,
        "assets",
        "fs-embed ../root . assets",
        &CodegenOptions {
            crate_path: "::my_crate::fs_embed".to_string(),
            ..Default::default()
        },
    )
    .expect("failed to generate module source");

    assert!(generated_source.contains("use ::my_crate::fs_embed::embedded::"));


    assert_matches!(
        generate_module_source(
            &sorted_tree,
            "assets",
            "fs-embed ../root . assets",
            &CodegenOptions {
                crate_path: "not a path".to_string(),
                ..Default::default()
            },
        ),
        Err(GenerationError::InvalidCratePath { crate_path }) if crate_path == "not a path"
    );

    Ok(())
}
