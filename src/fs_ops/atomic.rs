//! Atomic rename helper.
//! - Performs a same-directory rename and maps failures to `CullError::RenameFailed`.
//! - On Unix, best-effort fsync of the containing directory after the rename.

use std::fs;
use std::path::Path;

use crate::errors::CullError;

pub fn try_atomic_rename(src: &Path, dst: &Path) -> Result<(), CullError> {
    fs::rename(src, dst).map_err(|source| CullError::RenameFailed {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;

    // Unix: fsync the directory to persist the rename (best-effort).
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
