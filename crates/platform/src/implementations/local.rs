//! std-backed filesystem implementation

use crate::filesystem::{EntryKind, FilesystemOperations};
use fitsprep_errors::PlatformError;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Filesystem operations against the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn copy_preserving(src: &Path, dst: &Path) -> io::Result<u64> {
        let mut reader = File::open(src)?;
        let metadata = reader.metadata()?;
        let mut writer = OpenOptions::new().write(true).create_new(true).open(dst)?;

        let result: io::Result<u64> = (|| {
            let bytes = io::copy(&mut reader, &mut writer)?;
            let mut times = FileTimes::new().set_modified(metadata.modified()?);
            if let Ok(accessed) = metadata.accessed() {
                times = times.set_accessed(accessed);
            }
            writer.set_times(times)?;
            writer.set_permissions(metadata.permissions())?;
            Ok(bytes)
        })();

        if result.is_err() {
            drop(writer);
            let _ = fs::remove_file(dst);
        }
        result
    }
}

impl FilesystemOperations for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn entry_kind(&self, path: &Path) -> EntryKind {
        match fs::symlink_metadata(path) {
            Ok(meta) => {
                let file_type = meta.file_type();
                if file_type.is_symlink() {
                    EntryKind::Symlink
                } else if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                }
            }
            Err(_) => EntryKind::Missing,
        }
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PlatformError> {
        let entries = fs::read_dir(path).map_err(|e| PlatformError::from_io("read_dir", path, &e))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PlatformError::from_io("read_dir", path, &e))?;
            children.push(entry.path());
        }
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PlatformError> {
        fs::create_dir_all(path).map_err(|e| PlatformError::from_io("create_dir_all", path, &e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), PlatformError> {
        fs::remove_dir_all(path).map_err(|e| PlatformError::from_io("remove_dir_all", path, &e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), PlatformError> {
        fs::remove_file(path).map_err(|e| PlatformError::from_io("remove_file", path, &e))
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64, PlatformError> {
        let start = Instant::now();
        let bytes =
            Self::copy_preserving(src, dst).map_err(|e| PlatformError::from_io("copy", src, &e))?;
        tracing::trace!(
            source = %src.display(),
            destination = %dst.display(),
            bytes,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "copied file"
        );
        Ok(bytes)
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), PlatformError> {
        match fs::rename(src, dst) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                tracing::debug!(
                    source = %src.display(),
                    destination = %dst.display(),
                    "rename crosses devices, falling back to copy and delete"
                );
                self.copy_file(src, dst)?;
                self.remove_file(src)
            }
            Err(e) => Err(PlatformError::from_io("rename", src, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn copy_refuses_existing_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.fits");
        let dst = temp.path().join("b.fits");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        let err = LocalFilesystem.copy_file(&src, &dst).unwrap_err();
        assert!(matches!(err, PlatformError::FilesystemOperationFailed { .. }));
        assert_eq!(fs::read(&dst).unwrap(), b"old");
    }

    #[test]
    fn copy_preserves_modification_time() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.fits");
        let dst = temp.path().join("b.fits");
        fs::write(&src, b"payload").unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(stamp)
            .unwrap();

        let bytes = LocalFilesystem.copy_file(&src, &dst).unwrap();
        assert_eq!(bytes, 7);
        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), stamp);
    }

    #[test]
    fn list_dir_is_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(temp.path().join(name), b"").unwrap();
        }
        let names: Vec<_> = LocalFilesystem
            .list_dir(temp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn entry_kind_reports_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            LocalFilesystem.entry_kind(&temp.path().join("nope")),
            EntryKind::Missing
        );
        assert_eq!(LocalFilesystem.entry_kind(temp.path()), EntryKind::Directory);
    }
}
