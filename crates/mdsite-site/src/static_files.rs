//! Static asset copying
//!
//! Mirrors a directory of static files (stylesheets, images, ...) into the
//! output directory, starting from an empty destination.

use crate::{Result, SiteError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replace the contents of `destination` with a recursive copy of `source`
///
/// The destination is emptied first (or created; a plain file in its place
/// is removed). Returns the destination paths of all copied files.
pub fn copy_static(source: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(SiteError::DirectoryNotFound(source.to_path_buf()));
    }

    if destination.is_dir() {
        fs::remove_dir_all(destination)?;
    } else if destination.exists() {
        fs::remove_file(destination)?;
    }
    fs::create_dir_all(destination)?;

    let mut copied = Vec::new();
    copy_dir_recursive(source, destination, &mut copied)?;
    Ok(copied)
}

fn copy_dir_recursive(source: &Path, destination: &Path, copied: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = destination.join(entry.file_name());

        if src_path.is_file() {
            fs::copy(&src_path, &dest_path)?;
            debug!("Copied {} -> {}", src_path.display(), dest_path.display());
            copied.push(dest_path);
        } else if src_path.is_dir() {
            fs::create_dir_all(&dest_path)?;
            copy_dir_recursive(&src_path, &dest_path, copied)?;
        }
    }

    Ok(())
}
