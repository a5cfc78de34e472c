use crate::binder::BindError;
use crate::db::EngineError;
use crate::guard::GuardError;

use std::error::Error;
use std::fmt;
use std::path::PathBuf;


#[derive(Debug)]
pub struct CliError {
    pub kind: CliErrorKind
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CliError: {}", self.kind)
    }
}

impl Error for CliError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum CliErrorKind {
    Bind(BindError),
    Engine(EngineError),
    Guard(GuardError),
    IoFileRead { source: std::io::Error, path: PathBuf },
    MissingConnectionString,
    MissingContent,
}

impl fmt::Display for CliErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(error) => write!(f, "{}", error.kind),
            Self::Engine(error) => write!(f, "{}", error.kind),
            Self::Guard(error) => write!(f, "{}", error.kind),
            Self::IoFileRead { path, .. } => write!(f, "Failed to read file: '{path:?}'"),
            Self::MissingConnectionString => write!(f, "A database connection string is required unless --plan is set"),
            Self::MissingContent => write!(f, "Content to store is required: pass --content or --from"),
        }
    }
}

impl Error for CliErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Bind(source) => Some(source),
			Self::Engine(source) => Some(source),
			Self::Guard(source) => Some(source),
			Self::IoFileRead { source, .. } => Some(source),
			_ => None,
		}
	}
}

impl From<BindError> for CliError {
    fn from(error: BindError) -> Self {
        CliError { kind: CliErrorKind::Bind(error) }
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        CliError { kind: CliErrorKind::Engine(error) }
    }
}

impl From<GuardError> for CliError {
    fn from(error: GuardError) -> Self {
        CliError { kind: CliErrorKind::Guard(error) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::BindErrorKind;
    use crate::db::EngineErrorKind;
    use crate::guard::GuardErrorKind;
    use std::{error::Error, io};

    #[test]
    fn cli_error_display_formats_correctly() {
        let path = PathBuf::from("/tmp/content.txt");

        let cases: Vec<(CliErrorKind, &str)> = vec![
            (
                CliErrorKind::Bind(BindError { kind: BindErrorKind::InvalidArgument("empty".into()) }),
                "Invalid argument",
            ),
            (
                CliErrorKind::Engine(EngineError { kind: EngineErrorKind::SQLX(sqlx::Error::RowNotFound) }),
                "no rows returned",
            ),
            (
                CliErrorKind::Guard(GuardError {
                    kind: GuardErrorKind::PathTraversal { base: "/a".into(), resolved: "/b".into() },
                }),
                "Path traversal detected",
            ),
            (
                CliErrorKind::IoFileRead {
                    source: io::Error::new(io::ErrorKind::NotFound, "missing"),
                    path: path.clone(),
                },
                "Failed to read file",
            ),
            (CliErrorKind::MissingConnectionString, "connection string is required"),
            (CliErrorKind::MissingContent, "Content to store is required"),
        ];

        for (kind, expect) in cases {
            let text = kind.to_string();
            assert!(
                text.contains(expect),
                "Expected `{}` in `{}`",
                expect,
                text
            );
        }
    }

    #[test]
    fn cli_error_source_chain_works() {
        let kind = CliErrorKind::IoFileRead {
            source: io::Error::new(io::ErrorKind::Other, "permission denied"),
            path: PathBuf::from("/tmp/content.txt"),
        };
        let src = kind.source().unwrap().to_string();
        assert!(src.contains("permission denied"));
    }

    #[test]
    fn cli_error_from_conversions_work() {
        let bind_err = BindError { kind: BindErrorKind::InvalidArgument("zero".into()) };
        let guard_err = GuardError { kind: GuardErrorKind::ParentSegment("/a/../b".into()) };

        let c1: CliError = bind_err.into();
        let c2: CliError = guard_err.into();

        assert!(matches!(c1.kind, CliErrorKind::Bind(_)));
        assert!(matches!(c2.kind, CliErrorKind::Guard(_)));
    }
}
