use clap::Parser;
use cli::CliArguments;
use fs_embed::codegen::{write_embedded_module, CodegenOptions};
use miette::{miette, Context, Result};

mod cli;


fn initialize_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}


fn main() -> Result<()> {
    initialize_logging();

    let cli_arguments = CliArguments::parse();

    if !cli_arguments.input_directory_path.is_dir() {
        return Err(miette!(
            "The provided input path is not a directory: {}",
            cli_arguments.input_directory_path.display()
        ));
    }


    let options = CodegenOptions {
        crate_path: cli_arguments.crate_path,
        overwrite_existing_file: cli_arguments.overwrite_existing_file,
    };

    let generated_module = write_embedded_module(
        &cli_arguments.input_directory_path,
        &cli_arguments.output_directory_path,
        cli_arguments.name.as_deref(),
        &options,
    )
    .wrap_err_with(|| {
        miette!(
            "Failed to embed {}.",
            cli_arguments.input_directory_path.display()
        )
    })?;


    log::info!(
        "Embedded {} entries from {} as module `{}` ({}).",
        generated_module.entry_count,
        cli_arguments.input_directory_path.display(),
        generated_module.module_name,
        generated_module.output_file_path.display()
    );

    Ok(())
}
