//! Inputs of a single run

use fitsprep_errors::ReorgError;
use fitsprep_types::TransferMode;
use std::path::{Path, PathBuf};

/// One reorganization request; not persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub root: PathBuf,
    /// Lights directory relative to `root`; `.` means the root itself
    pub lights_dir: PathBuf,
    pub mode: TransferMode,
    /// Overrides the name derived from `root`
    pub session_name: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, lights_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lights_dir: lights_dir.into(),
            mode: TransferMode::Copy,
            session_name: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TransferMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = Some(name.into());
        self
    }

    /// Directory that holds the light frames, with `.` components removed
    #[must_use]
    pub fn lights_root(&self) -> PathBuf {
        normalize(&self.root.join(&self.lights_dir))
    }

    /// Explicit name, or the final component of the root
    ///
    /// # Errors
    ///
    /// Returns `SessionNameUnavailable` when the root has no usable final
    /// component, as for `/`.
    pub fn resolved_name(&self) -> Result<String, ReorgError> {
        if let Some(name) = self.session_name.as_deref().filter(|n| !n.is_empty()) {
            return Ok(name.to_string());
        }

        let root = normalize(&self.root);
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .or_else(|| {
                // `..` and friends only have a name once resolved
                std::fs::canonicalize(&root)
                    .ok()
                    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ReorgError::SessionNameUnavailable {
                path: self.root.display().to_string(),
            })
    }
}

/// Drop `.` components so paths built from `.` compare equal to their
/// plain counterparts
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_root_basename() {
        let session = Session::new("/data/2024-01-05_M31", ".");
        assert_eq!(session.resolved_name().unwrap(), "2024-01-05_M31");
    }

    #[test]
    fn explicit_name_wins() {
        let session = Session::new("/data/raw", ".").with_session_name("m42");
        assert_eq!(session.resolved_name().unwrap(), "m42");
    }

    #[test]
    fn dot_lights_dir_is_the_root() {
        let session = Session::new("/data/m31", ".");
        assert_eq!(session.lights_root(), PathBuf::from("/data/m31"));
    }

    #[test]
    fn filesystem_root_has_no_name() {
        let session = Session::new("/", ".");
        assert!(session.resolved_name().is_err());
    }
}
