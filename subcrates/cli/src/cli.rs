use std::path::PathBuf;

use clap::Parser;

/// Embeds a directory tree into a generated Rust module.
#[derive(Parser, Debug)]
#[command(version, about)]
pub(crate) struct CliArguments {
    /// Directory to embed. Hidden entries (names starting with `.`) are skipped.
    #[arg(value_name = "INPUT_DIR")]
    pub(crate) input_directory_path: PathBuf,

    /// Directory to write `<NAME>.rs` into. Created if it does not exist.
    #[arg(value_name = "OUTPUT_DIR")]
    pub(crate) output_directory_path: PathBuf,

    /// Name of the generated module. Defaults to the base name of OUTPUT_DIR.
    #[arg(value_name = "NAME")]
    pub(crate) name: Option<String>,

    #[arg(long = "overwrite-existing-file")]
    pub(crate) overwrite_existing_file: bool,

    /// Path under which the generated module refers to the `fs-embed` crate.
    #[arg(long = "crate-path", default_value = "::fs_embed")]
    pub(crate) crate_path: String,
}
