//! Installed theme discovery.

use std::path::Path;

use crate::SiteError;

/// Names of the theme folders installed under `root`.
///
/// Folders whose name contains `base` (any case) hold shared assets, not a
/// selectable theme, and are skipped. Names are returned sorted.
///
/// # Errors
///
/// Returns [`SiteError::ThemeRootNotFound`] if `root` is not a directory and
/// [`SiteError::Io`] if it cannot be listed.
pub fn theme_folders(root: &Path) -> Result<Vec<String>, SiteError> {
    if !root.is_dir() {
        return Err(SiteError::ThemeRootNotFound(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_lowercase().contains("base") {
            continue;
        }
        folders.push(name);
    }
    folders.sort();

    tracing::debug!(root = %root.display(), count = folders.len(), "Found themes");
    Ok(folders)
}
