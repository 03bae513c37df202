//! Frame discovery and classification

use fitsprep_types::{CandidateFrame, FrameCategory};
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::{DirEntry, WalkDir};

/// Camera subdirectories of a calibration category that are descended into
static CAMERA_DIR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^cam_0.*$"));

/// Light frames whose names start with these (any case) are never transferred
pub const EXCLUDED_LIGHT_PREFIXES: [&str; 2] = ["failed", "stacked"];

/// Whether a first-level calibration subdirectory belongs to the primary camera
#[must_use]
pub fn is_camera_dir(name: &str) -> bool {
    CAMERA_DIR.as_ref().is_ok_and(|re| re.is_match(name))
}

/// Whether a light frame is excluded by name
#[must_use]
pub fn is_excluded_light(file_name: &OsStr) -> bool {
    let lower = file_name.to_string_lossy().to_lowercase();
    EXCLUDED_LIGHT_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Every file under `root` with the given extension, at any depth.
///
/// Lazy and single-pass. Entries are visited sorted by file name at every
/// level and symlinks are followed, so a file reachable twice is yielded
/// twice. Unreadable entries are logged and skipped.
pub fn find_frames(root: &Path, extension: &str) -> impl Iterator<Item = PathBuf> {
    walk(root, extension, Vec::new())
}

fn walk(root: &Path, extension: &str, prune: Vec<PathBuf>) -> impl Iterator<Item = PathBuf> {
    let extension = extension.to_string();
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            let pruned = entry.depth() > 0
                && entry.file_type().is_dir()
                && prune.iter().any(|p| p == entry.path());
            if pruned {
                tracing::debug!(path = %entry.path().display(), "pruned directory");
            }
            !pruned
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(move |entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == OsStr::new(&extension))
        })
        .map(DirEntry::into_path)
}

/// Yields candidate frames per category
#[derive(Debug, Clone)]
pub struct FrameClassifier {
    extension: String,
    prune: Vec<PathBuf>,
}

impl FrameClassifier {
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            prune: Vec::new(),
        }
    }

    /// Directories the light walk never enters
    #[must_use]
    pub fn with_pruned(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.prune.extend(dirs);
        self
    }

    /// Light frames under `lights_root`, minus name-excluded ones
    pub fn lights(&self, lights_root: &Path) -> impl Iterator<Item = CandidateFrame> {
        walk(lights_root, &self.extension, self.prune.clone())
            .filter_map(|path| CandidateFrame::new(path, FrameCategory::Light))
            .filter(|frame| {
                let excluded = is_excluded_light(&frame.file_name);
                if excluded {
                    tracing::debug!(path = %frame.path.display(), "excluded light frame by name");
                }
                !excluded
            })
    }

    /// Calibration frames under the camera subdirectories of `category_dir`
    pub fn calibration(
        &self,
        category_dir: &Path,
        category: FrameCategory,
    ) -> impl Iterator<Item = CandidateFrame> {
        let camera_dirs: Vec<PathBuf> = WalkDir::new(category_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(
                        category = %category,
                        error = %err,
                        "skipping unreadable camera directory entry"
                    );
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .filter(|entry| {
                let matched = entry.file_name().to_str().is_some_and(is_camera_dir);
                if !matched {
                    tracing::debug!(
                        category = %category,
                        path = %entry.path().display(),
                        "skipping non-camera directory"
                    );
                }
                matched
            })
            .map(DirEntry::into_path)
            .collect();

        let extension = self.extension.clone();
        camera_dirs
            .into_iter()
            .flat_map(move |dir| find_frames(&dir, &extension))
            .filter_map(move |path| CandidateFrame::new(path, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn camera_pattern() {
        for name in ["cam_0", "cam_01", "cam_0_test"] {
            assert!(is_camera_dir(name), "{name}");
        }
        for name in ["cam_1", "camera_0", "cam_99", "Cam_0", "xcam_0"] {
            assert!(!is_camera_dir(name), "{name}");
        }
    }

    #[test]
    fn light_exclusion_ignores_case() {
        assert!(is_excluded_light(OsStr::new("failed_001.fits")));
        assert!(is_excluded_light(OsStr::new("STACKED_final.fits")));
        assert!(is_excluded_light(OsStr::new("Failed.fits")));
        assert!(!is_excluded_light(OsStr::new("m31_failed.fits")));
        assert!(!is_excluded_light(OsStr::new("light_001.fits")));
    }

    #[test]
    fn find_frames_matches_extension_case_sensitively() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.fits"));
        touch(&temp.path().join("deep/er/b.fits"));
        touch(&temp.path().join("c.FITS"));
        touch(&temp.path().join("d.fit"));
        touch(&temp.path().join("fits"));

        let found: Vec<_> = find_frames(temp.path(), "fits").collect();
        assert_eq!(
            found,
            vec![temp.path().join("a.fits"), temp.path().join("deep/er/b.fits")]
        );
    }

    #[test]
    fn lights_walk_skips_pruned_directories() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("l1.fits"));
        touch(&temp.path().join("siril-ready/s/lights/l1.fits"));
        touch(&temp.path().join("CALI_FRAME/dark/cam_0/d.fits"));

        let classifier = FrameClassifier::new("fits").with_pruned([
            temp.path().join("siril-ready"),
            temp.path().join("CALI_FRAME"),
        ]);
        let names: Vec<_> = classifier
            .lights(temp.path())
            .map(|f| f.file_name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["l1.fits"]);
    }

    #[test]
    fn calibration_walk_is_sorted_across_cameras() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("cam_02/b.fits"));
        touch(&temp.path().join("cam_01/z.fits"));
        touch(&temp.path().join("cam_01/sub/a.fits"));
        touch(&temp.path().join("cam_1/x.fits"));
        touch(&temp.path().join("loose.fits"));

        let frames: Vec<_> = FrameClassifier::new("fits")
            .calibration(temp.path(), FrameCategory::Flat)
            .collect();
        let paths: Vec<_> = frames.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                temp.path().join("cam_01/sub/a.fits"),
                temp.path().join("cam_01/z.fits"),
                temp.path().join("cam_02/b.fits"),
            ]
        );
        assert!(frames.iter().all(|f| f.category == FrameCategory::Flat));
    }

    #[cfg(unix)]
    #[test]
    fn broken_camera_entry_is_skipped() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("cam_01/a.fits"));
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("cam_00")).unwrap();

        let paths: Vec<_> = FrameClassifier::new("fits")
            .calibration(temp.path(), FrameCategory::Dark)
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec![temp.path().join("cam_01/a.fits")]);
    }
}
