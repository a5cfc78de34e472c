use crate::guard::error::{GuardError, GuardErrorKind};

use soft_canonicalize::soft_canonicalize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};


/// Canonical form of `path`, whose trailing segments need not exist yet.
///
/// Every prefix that exists is resolved by the filesystem, symlinks included;
/// the missing tail is normalized on top of it. Dangling links and existing
/// non-directories used as directories are refused first.
pub(crate) fn canonicalize_lenient(path: &Path) -> Result<PathBuf, GuardError> {
    check_ancestors(path)?;
    soft_canonicalize(path).map_err(|source| GuardError::io(path, source))
}

fn check_ancestors(path: &Path) -> Result<(), GuardError> {
    for (depth, ancestor) in path.ancestors().enumerate() {
        let linked = match fs::symlink_metadata(ancestor) {
            Ok(metadata) => metadata.file_type().is_symlink(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(GuardError::io(ancestor, source)),
        };

        let metadata = match fs::metadata(ancestor) {
            Ok(metadata) => metadata,
            Err(e) if linked && e.kind() == io::ErrorKind::NotFound => {
                return Err(GuardError { kind: GuardErrorKind::DanglingSymlink(ancestor.to_path_buf()) });
            }
            Err(source) => return Err(GuardError::io(ancestor, source)),
        };

        // Only the leaf may be something other than a directory
        if depth > 0 && !metadata.is_dir() {
            return Err(GuardError::io(ancestor, io::Error::from(io::ErrorKind::NotADirectory)));
        }
    }

    Ok(())
}
