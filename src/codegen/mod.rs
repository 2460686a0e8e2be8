//! Emitting a flattened tree as a Rust module.
//!
//! The generated module contains a single `pub static ROOT: EmbeddedFileSystem<'static>`,
//! backed by a `static` array of [`EmbeddedRecord`]s with all file contents inlined
//! as byte string literals:
//!
//! ```ignore
//! // src/assets.rs (generated by `fs-embed ./public ./src assets`)
//! pub static ROOT: EmbeddedFileSystem<'static> = EmbeddedFileSystem::from_sorted_records(&RECORDS);
//!
//! static RECORDS: [EmbeddedRecord<'static>; 3] = [
//!     EmbeddedRecord { name: "/", content: b"", mode: FileMode::Directory, child: Some(1), next: None },
//!     // ...
//! ];
//! ```
//!
//! Use [`write_embedded_module`] from a build script or the `fs-embed` command-line tool,
//! or [`generate_module_source`] to obtain the source text without writing it anywhere.
//!
//! [`EmbeddedRecord`]: crate::embedded::EmbeddedRecord

use std::{
    io::{prelude::Write, BufWriter},
    path::{Component, Path, PathBuf},
};

use heck::ToSnakeCase;
use path_slash::PathExt;
use proc_macro2::{Literal, TokenStream};
use quote::quote;

use_enabled_fs_module!();

use crate::{
    embedded::{EntryIndex, FileMode},
    error::GenerationError,
    flatten::{flatten_directory, simplify_canonical_path, SortedRecord, SortedTree},
};

mod documentation;
use documentation::construct_module_documentation;



/// Options that influence code generation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodegenOptions {
    /// Path under which generated code refers to this crate.
    ///
    /// Defaults to `::fs_embed`. Change this if the crate is renamed in your `Cargo.toml`
    /// or re-exported from another crate.
    pub crate_path: String,

    /// Whether to overwrite an existing output file.
    /// If disabled, an existing output file results in
    /// [`GenerationError::FailedToWriteOutput`].
    pub overwrite_existing_file: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            crate_path: "::fs_embed".to_string(),
            overwrite_existing_file: false,
        }
    }
}



/// Description of a generated module, as returned by [`write_embedded_module`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GeneratedModule {
    /// Name of the generated module (also the file stem of `output_file_path`).
    pub module_name: String,

    /// Path of the written source file.
    pub output_file_path: PathBuf,

    /// Number of embedded entries, the root directory included.
    pub entry_count: usize,
}



/// Determines the logical name of the generated module: `name` if provided,
/// otherwise the base name of the output directory. Either way, the name is
/// converted to snake case and must be a valid Rust identifier.
pub fn resolve_module_name(
    output_directory_path: &Path,
    name: Option<&str>,
) -> Result<String, GenerationError> {
    let raw_name = match name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => output_directory_path
            .file_name()
            .map(|file_name| file_name.to_string_lossy().to_string())
            .unwrap_or_default(),
    };

    let module_name = raw_name.to_snake_case();

    if syn::parse_str::<syn::Ident>(&module_name).is_err() {
        return Err(GenerationError::InvalidModuleName { name: raw_name });
    }

    Ok(module_name)
}


/// Computes `to` relative to `from`, both being absolute (or both relative) paths.
fn relative_path_between(from: &Path, to: &Path) -> Option<PathBuf> {
    if from.is_absolute() != to.is_absolute() {
        return None;
    }

    let from_components: Vec<Component> = from.components().collect();
    let to_components: Vec<Component> = to.components().collect();

    let common_prefix_length = from_components
        .iter()
        .zip(to_components.iter())
        .take_while(|(left, right)| left == right)
        .count();

    // Different prefixes (e.g. Windows drives) can not be bridged with `..`.
    if common_prefix_length == 0 && from.is_absolute() {
        return None;
    }

    let mut relative_path = PathBuf::new();
    for _ in common_prefix_length..from_components.len() {
        relative_path.push("..");
    }
    for component in &to_components[common_prefix_length..] {
        relative_path.push(component.as_os_str());
    }

    if relative_path.as_os_str().is_empty() {
        relative_path.push(".");
    }

    Some(relative_path)
}


fn regeneration_command(
    source_directory_path: &Path,
    output_directory_path: &Path,
    module_name: &str,
) -> String {
    let input_path = relative_path_between(output_directory_path, source_directory_path)
        .unwrap_or_else(|| source_directory_path.to_path_buf());

    let input_path = input_path
        .to_slash()
        .map(|path| path.to_string())
        .unwrap_or_else(|| input_path.display().to_string());

    format!("fs-embed \"{}\" . {}", input_path, module_name)
}



fn entry_index_tokens(index: EntryIndex) -> TokenStream {
    match index {
        Some(index) => {
            let index_literal = Literal::u32_unsuffixed(index);
            quote! { Some(#index_literal) }
        }
        None => quote! { None },
    }
}

fn record_tokens(record: &SortedRecord) -> TokenStream {
    let name = record.name();
    let content = Literal::byte_string(record.content());

    let mode = match record.mode() {
        FileMode::Directory => quote! { FileMode::Directory },
        FileMode::Executable => quote! { FileMode::Executable },
        FileMode::Regular => quote! { FileMode::Regular },
    };

    let child = entry_index_tokens(record.child());
    let next = entry_index_tokens(record.next());

    quote! {
        EmbeddedRecord {
            name: #name,
            content: #content,
            mode: #mode,
            child: #child,
            next: #next,
        }
    }
}


/// Generates the full source text of an embedded module for `tree`.
///
/// `regeneration_command` is placed in the module documentation
/// as the command to run to refresh the module.
pub fn generate_module_source(
    tree: &SortedTree,
    module_name: &str,
    regeneration_command: &str,
    options: &CodegenOptions,
) -> Result<String, GenerationError> {
    let crate_path: syn::Path = syn::parse_str(&options.crate_path).map_err(|_| {
        GenerationError::InvalidCratePath {
            crate_path: options.crate_path.clone(),
        }
    })?;

    let module_documentation =
        construct_module_documentation(tree, module_name, regeneration_command);


    let record_count = Literal::usize_unsuffixed(tree.len());
    let records = tree.entries().iter().map(record_tokens);

    let root_documentation = format!(
        " Root of the embedded `{}` file system. Open entries by their `/`-rooted names, \
        e.g. `ROOT.open(\"/\")`.",
        module_name
    );

    let generated_module_code = quote! {
        use #crate_path::embedded::{EmbeddedFileSystem, EmbeddedRecord, FileMode};

        #[doc = #root_documentation]
        pub static ROOT: EmbeddedFileSystem<'static> =
            EmbeddedFileSystem::from_sorted_records(&RECORDS);

        static RECORDS: [EmbeddedRecord<'static>; #record_count] = [
            #(#records),*
        ];
    };


    let file_without_top_comment = syn::parse_file(&generated_module_code.to_string())?;
    let formatted_file_without_top_comment = prettyplease::unparse(&file_without_top_comment);

    Ok(format!(
        "{}\n\n\n{}",
        module_documentation, formatted_file_without_top_comment
    ))
}



fn write_output_file(
    output_file_path: &Path,
    contents: &str,
    overwrite_existing_file: bool,
) -> Result<(), GenerationError> {
    let map_io_error = |io_error: std::io::Error| GenerationError::FailedToWriteOutput {
        io_error,
        output_file_path: output_file_path.to_path_buf(),
    };


    let mut buffered_file = {
        let file = match overwrite_existing_file {
            true => fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(output_file_path)
                .map_err(map_io_error)?,
            false => fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(output_file_path)
                .map_err(map_io_error)?,
        };

        BufWriter::new(file)
    };


    buffered_file
        .write_all(contents.as_bytes())
        .map_err(map_io_error)?;

    let mut file = buffered_file
        .into_inner()
        .map_err(|error| map_io_error(error.into_error()))?;

    file.flush().map_err(map_io_error)?;

    Ok(())
}


/// Flattens `source_directory_path` and writes it as an embedded module
/// to `<output_directory_path>/<module name>.rs`.
///
/// The module name is resolved with [`resolve_module_name`]. The output directory
/// is created if it does not exist. Generation either completes fully or fails
/// before the output file is touched; a source tree with unsupported entries
/// never produces an output file.
pub fn write_embedded_module<S, O>(
    source_directory_path: S,
    output_directory_path: O,
    name: Option<&str>,
    options: &CodegenOptions,
) -> Result<GeneratedModule, GenerationError>
where
    S: AsRef<Path>,
    O: AsRef<Path>,
{
    let output_directory_path = output_directory_path.as_ref();
    let module_name = resolve_module_name(output_directory_path, name)?;

    let sorted_tree = flatten_directory(source_directory_path.as_ref())?.into_sorted()?;


    fs::create_dir_all(output_directory_path).map_err(|error| {
        GenerationError::UnableToCreateOutputDirectory {
            directory_path: output_directory_path.to_path_buf(),
            error,
        }
    })?;

    let canonical_output_directory_path =
        fs::canonicalize(output_directory_path).map_err(|error| {
            GenerationError::UnableToCreateOutputDirectory {
                directory_path: output_directory_path.to_path_buf(),
                error,
            }
        })?;

    let canonical_output_directory_path = simplify_canonical_path(canonical_output_directory_path);


    let command = regeneration_command(
        sorted_tree.root_path(),
        &canonical_output_directory_path,
        &module_name,
    );

    let module_source = generate_module_source(&sorted_tree, &module_name, &command, options)?;


    let output_file_path = output_directory_path.join(format!("{}.rs", module_name));

    log::debug!(
        "Writing embedded module \"{}\" ({} entries) to \"{}\".",
        module_name,
        sorted_tree.len(),
        output_file_path.display()
    );

    write_output_file(
        &output_file_path,
        &module_source,
        options.overwrite_existing_file,
    )?;


    Ok(GeneratedModule {
        module_name,
        output_file_path,
        entry_count: sorted_tree.len(),
    })
}



#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn module_name_defaults_to_output_directory() {
        assert_eq!(
            resolve_module_name(Path::new("/project/src/public"), None).unwrap(),
            "public"
        );
        assert_eq!(
            resolve_module_name(Path::new("/project/src/static-assets"), Some("")).unwrap(),
            "static_assets"
        );
        assert_eq!(
            resolve_module_name(Path::new("/project/src/public"), Some("WebAssets")).unwrap(),
            "web_assets"
        );
    }

    #[test]
    fn module_name_must_be_an_identifier() {
        assert_matches!(
            resolve_module_name(Path::new("/project/src/public"), Some("mod")),
            Err(GenerationError::InvalidModuleName { name }) if name == "mod"
        );
        assert_matches!(
            resolve_module_name(Path::new("/"), None),
            Err(GenerationError::InvalidModuleName { .. })
        );
    }

    #[test]
    fn relative_paths_climb_out_of_the_output_directory() {
        assert_eq!(
            relative_path_between(Path::new("/project/src/public"), Path::new("/project/assets")),
            Some(PathBuf::from("../../assets"))
        );
        assert_eq!(
            relative_path_between(Path::new("/project"), Path::new("/project/assets")),
            Some(PathBuf::from("assets"))
        );
        assert_eq!(
            relative_path_between(Path::new("/project"), Path::new("/project")),
            Some(PathBuf::from("."))
        );
        assert_eq!(
            relative_path_between(Path::new("relative"), Path::new("/absolute")),
            None
        );
    }

    #[test]
    fn index_tokens() {
        assert_eq!(entry_index_tokens(None).to_string(), "None");
        assert_eq!(
            entry_index_tokens(Some(12)).to_string().replace(' ', ""),
            "Some(12)"
        );
    }
}
