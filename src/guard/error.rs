use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;


#[derive(Debug)]
#[non_exhaustive]
pub struct GuardError {
    pub kind: GuardErrorKind
}

impl GuardError {
    /// Whether this is a containment rejection rather than an I/O failure.
    pub fn is_traversal(&self) -> bool {
        matches!(
            self.kind,
            GuardErrorKind::PathTraversal { .. }
                | GuardErrorKind::ParentSegment(_)
                | GuardErrorKind::DanglingSymlink(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GuardError { kind: GuardErrorKind::Io { path: path.into(), source } }
    }
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuardError: {}", self.kind)
    }
}

impl Error for GuardError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum GuardErrorKind {
    DanglingSymlink(PathBuf),
    InvalidBaseDirectory(PathBuf),
    Io { path: PathBuf, source: io::Error },
    ParentSegment(PathBuf),
    PathTraversal { base: PathBuf, resolved: PathBuf },
}

impl fmt::Display for GuardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingSymlink(path) => write!(f, "Symlink target cannot be resolved: '{path:?}'"),
            Self::InvalidBaseDirectory(path) => write!(f, "Base directory does not exist or is not a directory: '{path:?}'"),
            Self::Io { path, source } => write!(f, "I/O failure on '{path:?}': {source}"),
            Self::ParentSegment(path) => write!(f, "Path traversal detected: parent segment in '{path:?}'"),
            Self::PathTraversal { base, resolved } => {
                write!(f, "Path traversal detected: '{resolved:?}' escapes '{base:?}'")
            },
        }
    }
}

impl Error for GuardErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}
