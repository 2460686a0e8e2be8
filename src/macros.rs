/// Imports (`use`s) `fs` for the walker, the flattener and the source emitter.
///
/// With the `fs-err` feature enabled, this imports [`fs_err as fs`](https://docs.rs/fs-err),
/// whose IO errors mention the path they failed on. Otherwise it imports [`std::fs`].
///
/// Expands to
/// ```no_run
/// #[cfg(not(feature = "fs-err"))]
/// use std::fs;
///
/// #[cfg(feature = "fs-err")]
/// use fs_err as fs;
/// ```
macro_rules! use_enabled_fs_module {
    () => {
        #[cfg(not(feature = "fs-err"))]
        use std::fs;

        #[cfg(feature = "fs-err")]
        use fs_err as fs;
    };
}
