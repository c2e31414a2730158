use crate::upload::error::PickError;
use crate::upload::types::SelectedFile;
use ignore::Walk;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Every regular file under `folder`, honouring `.gitignore` and hidden-file
/// rules the same way `git` would.
pub fn collect_folder(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in Walk::new(folder) {
        match entry {
            Ok(entry) => {
                if entry.path().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => warn!("Error walking {}: {}", folder.display(), e),
        }
    }
    files
}

/// Reads metadata for each path. Unreadable paths are returned separately so
/// the rest of the selection still goes through.
pub fn read_selection<I, P>(paths: I) -> (Vec<SelectedFile>, Vec<PickError>)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut selected = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        match SelectedFile::from_path(path.as_ref()) {
            Ok(file) => selected.push(file),
            Err(e) => {
                warn!("Skipping selection: {}", e);
                errors.push(e);
            }
        }
    }

    (selected, errors)
}
