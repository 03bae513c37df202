//! Destination directory provisioning

use crate::filesystem::{EntryKind, FilesystemOperations};
use crate::Result;
use fitsprep_errors::PlatformError;
use std::path::{Path, PathBuf};

/// A directory that exists and is empty after provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedDir {
    pub path: PathBuf,
    /// Entries that were removed to empty it
    pub removed_entries: usize,
}

/// Ensure `base/<name>` exists and is empty for every name.
///
/// Existing directories keep their identity and lose their contents;
/// symlinks inside them are unlinked, never followed. Anything that is not a
/// directory sitting at one of the names is an error. Siblings of the named
/// directories are left alone.
///
/// # Errors
///
/// Returns `PlatformError::NotADirectory` when a name is taken by a
/// non-directory, or the underlying I/O failure otherwise.
pub fn provision(
    fs: &dyn FilesystemOperations,
    base: &Path,
    names: &[&str],
) -> Result<Vec<ProvisionedDir>> {
    let mut provisioned = Vec::with_capacity(names.len());

    for name in names {
        let path = base.join(name);
        let removed_entries = match fs.entry_kind(&path) {
            EntryKind::Missing => {
                fs.create_dir_all(&path)?;
                0
            }
            EntryKind::Directory => empty_directory(fs, &path)?,
            EntryKind::Symlink if fs.is_dir(&path) => empty_directory(fs, &path)?,
            _ => {
                return Err(PlatformError::NotADirectory {
                    path: path.display().to_string(),
                })
            }
        };

        tracing::debug!(path = %path.display(), removed_entries, "provisioned directory");
        provisioned.push(ProvisionedDir {
            path,
            removed_entries,
        });
    }

    Ok(provisioned)
}

fn empty_directory(fs: &dyn FilesystemOperations, dir: &Path) -> Result<usize> {
    let entries = fs.list_dir(dir)?;
    for entry in &entries {
        match fs.entry_kind(entry) {
            EntryKind::Directory => fs.remove_dir_all(entry)?,
            EntryKind::Missing => {}
            _ => fs.remove_file(entry)?,
        }
    }
    Ok(entries.len())
}
