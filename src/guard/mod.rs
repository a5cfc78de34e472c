//! Path containment for writes under a trusted base directory.
//!
//! Two independent checks stand between a caller-supplied name and the disk:
//! [`BaseDirectory::authorize`] proves the canonical target is the base or nested
//! under it, and [`ensure_no_parent_segments`] refuses any path still carrying a
//! `..` component at the point of writing.

pub mod error;
mod resolve;

pub use error::{GuardError, GuardErrorKind};

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path, PathBuf};


/// A trusted directory, canonicalized once and reused for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectory {
    root: PathBuf,
}

/// Outcome of a guarded write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub path: PathBuf,
    pub bytes: usize,
    pub checksum: String,
}

impl BaseDirectory {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GuardError> {
        let path = path.as_ref();
        let root = fs::canonicalize(path).map_err(|source| GuardError::io(path, source))?;

        if !root.is_dir() {
            return Err(GuardError { kind: GuardErrorKind::InvalidBaseDirectory(path.to_path_buf()) });
        }

        Ok(BaseDirectory { root })
    }

    /// The canonical base path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` against the base and accept it only if the result is the
    /// base itself or a descendant of it, compared component by component.
    pub fn authorize(&self, name: impl AsRef<Path>) -> Result<PathBuf, GuardError> {
        let resolved = resolve::canonicalize_lenient(&self.root.join(name.as_ref()))?;

        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(GuardError {
                kind: GuardErrorKind::PathTraversal { base: self.root.clone(), resolved },
            })
        }
    }

    /// Write `content` to `name` under the base, creating missing parent
    /// directories on the way.
    pub fn store(&self, name: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<StoredFile, GuardError> {
        let path = self.authorize(name)?;
        ensure_no_parent_segments(&path)?;

        let content = content.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GuardError::io(parent, source))?;
        }
        fs::write(&path, content).map_err(|source| GuardError::io(&path, source))?;

        Ok(StoredFile {
            path,
            bytes: content.len(),
            checksum: checksum(content),
        })
    }
}

/// Resolve `name` under `base`, canonicalizing `base` on this call.
pub fn authorize(base: impl AsRef<Path>, name: impl AsRef<Path>) -> Result<PathBuf, GuardError> {
    BaseDirectory::open(base)?.authorize(name)
}

/// Refuse any path that still holds a `..` component.
///
/// A canonical path never does, so this only fires when a path reached the
/// write without passing through [`BaseDirectory::authorize`].
pub fn ensure_no_parent_segments(path: &Path) -> Result<(), GuardError> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(GuardError { kind: GuardErrorKind::ParentSegment(path.to_path_buf()) });
    }

    Ok(())
}

fn checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
