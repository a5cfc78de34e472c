use crate::binder::{self, BoundParameters, MembershipClause, PlaceholderStyle};
use crate::cli::error::{CliError, CliErrorKind};
use crate::cli::{Commands, QueryArgs, TargetArgs};
use crate::db::{PostgresExecutor, QueryExecutor, RecordingExecutor};
use crate::guard::BaseDirectory;

use serde_json::{json, Value};
use std::fs;
use std::path::Path;


/// Dispatches a parsed subcommand.
pub async fn run(command: Commands) -> Result<Value, CliError> {
    match command {
        Commands::Clause { count } => clause(count),
        Commands::Query { args } => query(args).await,
        Commands::Authorize { target } => authorize(&target),
        Commands::Store { target, content, from } => {
            let content = match (content, from) {
                (Some(content), _) => content.into_bytes(),
                (None, Some(path)) => read_content(&path)?,
                (None, None) => return Err(CliError { kind: CliErrorKind::MissingContent }),
            };
            store(&target, &content)
        }
    }
}

pub fn clause(count: usize) -> Result<Value, CliError> {
    let clause = binder::build_clause(count)?;
    Ok(json!({ "clause": clause.text(), "placeholders": clause.placeholders() }))
}

/// Assembles, verifies and either plans or executes the statement.
pub async fn query(args: QueryArgs) -> Result<Value, CliError> {
    let membership = MembershipClause::from_values(&args.values)?;
    let leading: BoundParameters = args.leading.into();
    let trailing: BoundParameters = args.trailing.into();

    let mut assembly = binder::assemble_checked(
        &args.prefix,
        &membership,
        &args.suffix,
        &leading,
        &trailing,
    )?;
    if let Some(label) = args.label {
        assembly = assembly.with_label(label);
    }
    tracing::info!(
        "Assembled statement with {} parameter(s), {} in the IN clause",
        assembly.parameters().len(),
        membership.parameters().len()
    );

    if args.plan {
        let mut executor = RecordingExecutor::new(PlaceholderStyle::Numbered);
        executor.execute(&assembly).await?;
        tracing::info!("Planning complete - statement not executed");
        return Ok(json!({ "plan": executor.into_statements() }));
    }

    let conn_str = args
        .db_connection_string
        .ok_or(CliError { kind: CliErrorKind::MissingConnectionString })?;
    let mut executor = PostgresExecutor::connect(&conn_str).await?;

    if args.fetch {
        let rows = executor.fetch_column(&assembly).await?;
        tracing::info!("Fetched {} row(s)", rows.len());
        Ok(json!({ "rows": rows }))
    } else {
        let affected = executor.execute(&assembly).await?;
        tracing::info!("Statement affected {affected} row(s)");
        Ok(json!({ "rows_affected": affected }))
    }
}

pub fn authorize(target: &TargetArgs) -> Result<Value, CliError> {
    let base = BaseDirectory::open(&target.base)?;
    tracing::debug!("Base directory resolved to {:?}", base.path());

    match base.authorize(&target.name) {
        Ok(resolved) => {
            tracing::info!("Accepted {:?} -> {:?}", target.name, resolved);
            Ok(json!({
                "base": base.path().display().to_string(),
                "resolved": resolved.display().to_string(),
            }))
        }
        Err(e) => {
            if e.is_traversal() {
                tracing::warn!("Rejected {:?} under {:?}: {}", target.name, base.path(), e.kind);
            }
            Err(e.into())
        }
    }
}

pub fn store(target: &TargetArgs, content: &[u8]) -> Result<Value, CliError> {
    let base = BaseDirectory::open(&target.base)?;

    let stored = base.store(&target.name, content).inspect_err(|e| {
        if e.is_traversal() {
            tracing::warn!("Refused write of {:?} under {:?}: {}", target.name, base.path(), e.kind);
        }
    })?;
    tracing::info!("Wrote {} byte(s) to {:?}", stored.bytes, stored.path);

    Ok(json!({
        "path": stored.path.display().to_string(),
        "bytes": stored.bytes,
        "checksum": stored.checksum,
    }))
}

fn read_content(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError {
        kind: CliErrorKind::IoFileRead { source, path: path.to_path_buf() },
    })
}
