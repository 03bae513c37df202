//! Single-file transfers

use crate::filesystem::FilesystemOperations;
use crate::Result;
use fitsprep_types::TransferMode;
use std::path::Path;

/// Copy or move `src` to `dst` according to `mode`.
///
/// Copies keep contents, permissions and access/modification times. Moves
/// rename where possible.
///
/// # Errors
///
/// Returns the underlying filesystem error; a failed copy leaves no partial
/// destination behind.
pub fn transfer(
    fs: &dyn FilesystemOperations,
    src: &Path,
    dst: &Path,
    mode: TransferMode,
) -> Result<()> {
    match mode {
        TransferMode::Copy => fs.copy_file(src, dst).map(|_| ()),
        TransferMode::Move => fs.move_file(src, dst),
    }
}
