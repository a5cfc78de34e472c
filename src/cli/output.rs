use crate::cli::error::{CliError, CliErrorKind};
use serde::Serialize;


#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum CliErrorJson {
    InvalidArgument(String),
    ParameterCountMismatch(String),
    Query(String),
    PathTraversal(String),
    Io(String),
    Usage(String),
}

impl From<&CliError> for CliErrorJson {
    fn from(e: &CliError) -> Self {
        use crate::binder::BindErrorKind;
        use crate::db::EngineErrorKind;

        let message = e.kind.to_string();

        let bind = |kind: &BindErrorKind, message: String| match kind {
            BindErrorKind::InvalidArgument(_) => Self::InvalidArgument(message),
            BindErrorKind::ParameterCountMismatch { .. } => Self::ParameterCountMismatch(message),
            _ => Self::Query(message),
        };

        match &e.kind {
            CliErrorKind::Bind(error) => bind(&error.kind, message),
            CliErrorKind::Engine(error) => match &error.kind {
                EngineErrorKind::Bind(error) => bind(&error.kind, message),
                EngineErrorKind::SQLX(_) => Self::Query(message),
            },
            CliErrorKind::Guard(error) if error.is_traversal() => Self::PathTraversal(message),
            CliErrorKind::Guard(_) => Self::Io(message),
            CliErrorKind::IoFileRead { .. } => Self::Io(message),
            CliErrorKind::MissingConnectionString | CliErrorKind::MissingContent => Self::Usage(message),
        }
    }
}


#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct CommandOutput<T: Serialize> {
    pub command: String,
    pub status: CommandStatus,
    pub data: Option<T>,
    pub error: Option<CliErrorJson>,
}

impl<T: Serialize> CommandOutput<T> {
    pub fn from_result(command: String, result: Result<T, CliError>) -> Self {
        match result {
            Ok(data) => CommandOutput {
                command,
                status: CommandStatus::Success,
                data: Some(data),
                error: None,
            },
            Err(e) => CommandOutput {
                command,
                status: CommandStatus::Error,
                data: None,
                error: Some(CliErrorJson::from(&e)),
            },
        }
    }
}
