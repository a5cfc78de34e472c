use sqlparser::tokenizer::TokenizerError;
use std::error::Error;
use std::fmt;


#[derive(Debug)]
#[non_exhaustive]
pub struct BindError {
    pub kind: BindErrorKind
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindError: {}", self.kind)
    }
}

impl Error for BindError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

impl BindError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        BindError { kind: BindErrorKind::InvalidArgument(msg.into()) }
    }
}

#[derive(Debug)]
pub enum BindErrorKind {
    InvalidArgument(String),
    InvalidPlaceholder(String),
    ParameterCountMismatch {
        label: Option<String>,
        placeholders: usize,
        parameters: usize,
    },
    Tokenizer(TokenizerError),
}

impl fmt::Display for BindErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::InvalidPlaceholder(token) => write!(f, "Invalid placeholder token: '{token}'"),
            Self::ParameterCountMismatch { label, placeholders, parameters } => {
                let label = label.as_deref().unwrap_or("<unlabelled>");
                write!(
                    f,
                    "Parameter count mismatch in query '{label}': {placeholders} placeholder(s), {parameters} bound parameter(s)"
                )
            },
            Self::Tokenizer(e) => write!(f, "Failed to tokenize query text: {e}"),
        }
    }
}

impl Error for BindErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Tokenizer(source) => Some(source),
			_ => None,
		}
	}
}

impl From<TokenizerError> for BindError {
    fn from(error: TokenizerError) -> Self {
        BindError { kind: BindErrorKind::Tokenizer(error) }
    }
}
