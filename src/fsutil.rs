//! File-system helpers for the logging facade.

use std::fs;
use std::path::Path;

use crate::error::CreateDirError;

/// Create `path` and every missing ancestor, applying `mode` to newly
/// created segments.
///
/// Already-existing segments are tolerated; the permission bits of
/// existing directories are left untouched. On non-Unix platforms `mode`
/// has no effect.
///
/// # Errors
///
/// Returns [`CreateDirError`] when a segment cannot be created (permission
/// denied, a non-directory in the way, ...).
pub fn ensure_dir(path: &Path, mode: u32) -> Result<(), CreateDirError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path).map_err(|source| CreateDirError {
        path: path.to_path_buf(),
        source,
    })
}
