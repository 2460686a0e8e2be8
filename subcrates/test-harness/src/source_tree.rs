use std::{
    fs::{self, OpenOptions},
    io::{prelude::Write, BufWriter},
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{error::TestResult, seeded_data::seeded_random_bytes};


/// A directory tree to embed, created inside a fresh temporary directory.
///
/// The tree itself lives in a `root` subdirectory of the temporary directory,
/// so it has a predictable, non-hidden name. Everything is removed on drop.
///
/// ```no_run
/// # use fs_embed_test_harness::{error::TestResult, SourceTree};
/// # fn main() -> TestResult {
/// let tree = SourceTree::new()?
///     .with_file("a.txt", "hi")?
///     .with_file("b/c.txt", "yo")?;
///
/// assert!(tree.path().join("b").is_dir());
/// # Ok(())
/// # }
/// ```
pub struct SourceTree {
    temporary_directory: TempDir,

    root_path: PathBuf,
}

impl SourceTree {
    /// Creates an empty source tree.
    pub fn new() -> TestResult<Self> {
        let temporary_directory = tempfile::tempdir()?;

        let root_path = temporary_directory.path().join("root");
        fs::create_dir(&root_path)?;

        Ok(Self {
            temporary_directory,
            root_path,
        })
    }

    /// Returns the path of the tree's root directory.
    pub fn path(&self) -> &Path {
        &self.root_path
    }

    /// Returns the path of the temporary directory that contains the root directory.
    /// Useful as a place for generated output that must not end up inside the tree.
    pub fn scratch_path(&self) -> &Path {
        self.temporary_directory.path()
    }

    /// Returns the absolute path of `relative_path` inside the tree,
    /// creating any missing parent directories.
    fn prepare_path(&self, relative_path: &str) -> TestResult<PathBuf> {
        let full_path = self.root_path.join(relative_path);

        if let Some(parent_path) = full_path.parent() {
            fs::create_dir_all(parent_path)?;
        }

        Ok(full_path)
    }

    /// Adds a file (and any missing parent directories) with the given content.
    pub fn with_file<C>(self, relative_path: &str, content: C) -> TestResult<Self>
    where
        C: AsRef<[u8]>,
    {
        let file_path = self.prepare_path(relative_path)?;

        let mut buffered_file_writer = {
            let file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(file_path)?;

            BufWriter::new(file)
        };

        buffered_file_writer.write_all(content.as_ref())?;

        let mut file = buffered_file_writer
            .into_inner()
            .map_err(|error| error.into_error())?;
        file.flush()?;

        Ok(self)
    }

    /// Adds a file filled with `size_bytes` of seeded pseudo-random data.
    pub fn with_random_file(
        self,
        relative_path: &str,
        seed: u64,
        size_bytes: usize,
    ) -> TestResult<Self> {
        self.with_file(relative_path, seeded_random_bytes(seed, size_bytes))
    }

    /// Adds an (empty) directory, along with any missing parent directories.
    pub fn with_directory(self, relative_path: &str) -> TestResult<Self> {
        fs::create_dir_all(self.root_path.join(relative_path))?;

        Ok(self)
    }

    /// Adds a file with the owner's executable bit set (mode `0o755`).
    ///
    /// Fails with [`TestError::UnsupportedOnPlatform`][crate::error::TestError::UnsupportedOnPlatform] on non-Unix platforms.
    pub fn with_executable_file<C>(self, relative_path: &str, content: C) -> TestResult<Self>
    where
        C: AsRef<[u8]>,
    {
        let tree = self.with_file(relative_path, content)?;
        let file_path = tree.root_path.join(relative_path);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            fs::set_permissions(file_path, fs::Permissions::from_mode(0o755))?;
            Ok(tree)
        }

        #[cfg(not(unix))]
        {
            Err(crate::error::TestError::UnsupportedOnPlatform { path: file_path })
        }
    }

    /// Adds a symbolic link at `relative_path` pointing to `target`.
    ///
    /// Fails with [`TestError::UnsupportedOnPlatform`][crate::error::TestError::UnsupportedOnPlatform] on non-Unix platforms.
    pub fn with_symlink<T>(self, relative_path: &str, target: T) -> TestResult<Self>
    where
        T: AsRef<Path>,
    {
        let link_path = self.prepare_path(relative_path)?;

        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link_path)?;
            Ok(self)
        }

        #[cfg(not(unix))]
        {
            let _ = target;
            Err(crate::error::TestError::UnsupportedOnPlatform { path: link_path })
        }
    }

    /// Adds a Unix domain socket. The socket file outlives the listener.
    ///
    /// Fails with [`TestError::UnsupportedOnPlatform`][crate::error::TestError::UnsupportedOnPlatform] on non-Unix platforms.
    pub fn with_socket(self, relative_path: &str) -> TestResult<Self> {
        let socket_path = self.prepare_path(relative_path)?;

        #[cfg(unix)]
        {
            drop(std::os::unix::net::UnixListener::bind(socket_path)?);
            Ok(self)
        }

        #[cfg(not(unix))]
        {
            Err(crate::error::TestError::UnsupportedOnPlatform { path: socket_path })
        }
    }
}
