//! Filesystem operations used by a reorganization run

use fitsprep_errors::PlatformError;
use std::path::{Path, PathBuf};

/// What a path points at, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    Directory,
    Symlink,
    Other,
}

/// Trait for the filesystem operations the engine needs
///
/// All operations block the calling thread until complete.
pub trait FilesystemOperations: Send + Sync {
    /// Check if a path exists (following symlinks)
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a directory (following symlinks)
    fn is_dir(&self, path: &Path) -> bool;

    /// Kind of the entry at `path` itself
    fn entry_kind(&self, path: &Path) -> EntryKind;

    /// Immediate children of a directory, sorted by file name
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PlatformError>;

    /// Create directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<(), PlatformError>;

    /// Remove directory and all contents
    fn remove_dir_all(&self, path: &Path) -> Result<(), PlatformError>;

    /// Remove a single file or symlink
    fn remove_file(&self, path: &Path) -> Result<(), PlatformError>;

    /// Copy file contents, permissions and access/modification times.
    /// Fails if `dst` already exists.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64, PlatformError>;

    /// Move a file, falling back to copy + delete when a rename would
    /// cross devices
    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), PlatformError>;
}
