//! Filesystem helpers.

use crate::error::{DmriError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Creates `path` and any missing parents.
///
/// An existing directory is left untouched, so repeated calls succeed.
///
/// # Errors
///
/// Returns [`DmriError::Io`] if the directory cannot be created, including
/// when `path` (or a parent) is an existing regular file.
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| DmriError::io(path, e))?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}
