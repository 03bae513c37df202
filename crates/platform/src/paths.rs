//! Collision-safe destination naming

use crate::filesystem::FilesystemOperations;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Return `destination` if nothing exists there, otherwise the first free
/// `<stem>_<n><.ext>` sibling with `n >= 1`.
///
/// Best effort: no lock is taken, so a concurrent writer can still claim the
/// returned name before the caller does. Copies open the destination with
/// `create_new` so such a race fails instead of overwriting.
pub fn unique_path(fs: &dyn FilesystemOperations, destination: &Path) -> PathBuf {
    if fs.entry_kind(destination) == crate::EntryKind::Missing {
        return destination.to_path_buf();
    }

    let stem = destination.file_stem().unwrap_or_default();
    let extension = destination.extension();
    let parent = destination.parent().unwrap_or_else(|| Path::new(""));

    let mut counter: u64 = 1;
    loop {
        let candidate = parent.join(suffixed(stem, counter, extension));
        if fs.entry_kind(&candidate) == crate::EntryKind::Missing {
            return candidate;
        }
        counter += 1;
    }
}

/// `<stem>_<n>[.<ext>]`, keeping non-UTF-8 bytes intact
fn suffixed(stem: &OsStr, counter: u64, extension: Option<&OsStr>) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("_{counter}"));
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }
    name
}
