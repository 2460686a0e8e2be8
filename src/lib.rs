//! Embed a directory tree into your program as a small, read-only, in-memory file system,
//! so static assets can be served without touching the disk at runtime.
//!
//!
//! # How it works
//! At build time, a source directory is [flattened][flatten::flatten_directory] into a single
//! sequence of entries whose parent/child/sibling relationships are plain indices into that same
//! sequence. The sequence is [sorted][flatten::FlattenedTree::into_sorted] by name (with the
//! indices remapped accordingly) and [emitted][codegen::write_embedded_module] as a Rust module
//! containing nothing but `static` data.
//!
//! At runtime, the generated `ROOT` [`EmbeddedFileSystem`] answers two kinds of queries:
//! - [`open`][EmbeddedFileSystem::open] an entry by its exact `/`-rooted name (a binary search), and
//! - [`read_children`][EmbeddedFile::read_children] of a directory, following its sibling chain.
//!
//! Hidden entries (names starting with `.`) are never embedded. Anything that is not a regular
//! file or a directory (symbolic links, sockets, pipes, devices) aborts generation.
//!
//! <br>
//!
//! # Feature flags
//! - `codegen` (*enabled by default*): enables the [`codegen`] module, which emits
//!   the Rust source of an embedded module. Crates that only *use* generated modules
//!   can disable default features.
//! - `dunce` (*enabled by default*): enables the optional [`dunce`](../dunce/index.html) support:
//!   This automatically strips Windows' UNC paths if they can be represented
//!   using the usual type of path (e.g. `\\?\C:\foo -> C:\foo`), which keeps
//!   paths in error messages and generated documentation readable.
//!   This crate only has an effect when compiling for Windows targets.
//! - `fs-err` (*disabled by default*): enables the optional [`fs-err`](../fs_err/index.html) support,
//!   which enables more helpful error messages for underlying IO errors.
//! - `miette` (*disabled by default*): derives `miette::Diagnostic` on all [error types](crate::error).
//!
//!
//! <br>
//!
//! # Examples
//!
//! Flattening a directory and querying it in-process, without generating any code:
//! ```no_run
//! # use std::io::Read;
//! # use fs_embed::embedded::{EmbeddedFileSystem, ReadChildrenLimit};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sorted_tree = fs_embed::flatten::flatten_directory("./public")?.into_sorted()?;
//!
//! let records = sorted_tree.records();
//! let file_system = EmbeddedFileSystem::new(&records)?;
//!
//! let mut index_html = String::new();
//! file_system.open("/index.html")?.read_to_string(&mut index_html)?;
//!
//! let mut css_directory = file_system.open("/css")?;
//! for entry in css_directory.read_children(ReadChildrenLimit::Unlimited).entries {
//!     println!("{} ({} bytes)", entry.name(), entry.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Generating an embedded module into `./src/assets/public.rs`:
//! ```no_run
//! # use fs_embed::codegen::CodegenOptions;
//! # fn main() -> Result<(), fs_embed::error::GenerationError> {
//! let generated = fs_embed::codegen::write_embedded_module(
//!     "./public",
//!     "./src/assets",
//!     Some("public"),
//!     &CodegenOptions {
//!         overwrite_existing_file: true,
//!         ..Default::default()
//!     },
//! )?;
//!
//! println!("Embedded {} entries.", generated.entry_count);
//! # Ok(())
//! # }
//! ```
//!
//! [`EmbeddedFileSystem`]: crate::embedded::EmbeddedFileSystem
//! [EmbeddedFileSystem::open]: crate::embedded::EmbeddedFileSystem::open
//! [EmbeddedFile::read_children]: crate::embedded::EmbeddedFile::read_children

#![warn(missing_docs)]


/// This brings in the README's doctests (and is present only when testing).
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;


#[macro_use]
mod macros;

#[cfg(feature = "codegen")]
pub mod codegen;
pub mod embedded;
pub mod error;
pub mod flatten;
pub mod walk;
