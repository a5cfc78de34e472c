pub mod error;
mod postgres;
mod recording;

pub use error::{EngineError, EngineErrorKind};
pub use postgres::PostgresExecutor;
pub use recording::RecordingExecutor;

use crate::binder::{BindErrorKind, PlaceholderStyle, QueryAssembly};


/// Runs an assembled statement, binding each parameter to its placeholder by
/// position. Implementations never splice values into the query text.
#[async_trait::async_trait]
pub trait QueryExecutor {
    /// Placeholder spelling the underlying driver understands.
    fn style(&self) -> PlaceholderStyle;
    /// Returns the number of affected rows.
    async fn execute(&mut self, assembly: &QueryAssembly) -> Result<u64, EngineError>;
    /// Returns the first column of every row, as text.
    async fn fetch_column(&mut self, assembly: &QueryAssembly) -> Result<Vec<Option<String>>, EngineError>;
}

/// Verify `assembly` and rewrite it into `style`.
///
/// A misaligned statement is fatal to the operation; it is logged here, at the
/// executor boundary, and handed back to the caller.
pub(crate) fn prepare(assembly: &QueryAssembly, style: PlaceholderStyle) -> Result<QueryAssembly, EngineError> {
    if let Err(e) = assembly.verify() {
        if let BindErrorKind::ParameterCountMismatch { label, placeholders, parameters } = &e.kind {
            tracing::error!(
                query = label.as_deref().unwrap_or("<unlabelled>"),
                expected = *placeholders,
                actual = *parameters,
                "Refusing to execute statement: placeholders and bound parameters disagree"
            );
        }
        return Err(e.into());
    }

    let statement = match style {
        PlaceholderStyle::Numbered => assembly.numbered()?,
        PlaceholderStyle::Positional => assembly.clone(),
    };
    tracing::debug!(
        query = statement.label().unwrap_or("<unlabelled>"),
        parameters = statement.parameters().len(),
        "Prepared statement: {}",
        statement.sql()
    );

    Ok(statement)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{assemble, BoundParameters, MembershipClause};

    #[test]
    fn prepare_rejects_misaligned_statement() {
        let assembly = QueryAssembly::new("SELECT * FROM T WHERE A = ? AND B = ?", vec!["a"].into())
            .with_label("two_slots");

        let err = prepare(&assembly, PlaceholderStyle::Positional).unwrap_err();
        assert!(matches!(
            err.kind,
            EngineErrorKind::Bind(ref b) if matches!(b.kind, BindErrorKind::ParameterCountMismatch { .. })
        ));
    }

    #[test]
    fn prepare_numbers_for_numbered_drivers() {
        let membership = MembershipClause::from_values(["BR1", "BR2"]).unwrap();
        let assembly = assemble(
            "SELECT ID FROM PAYMENTS WHERE TRIM(BRANCH) ",
            &membership,
            "",
            &BoundParameters::new(),
            &BoundParameters::new(),
        );

        let statement = prepare(&assembly, PlaceholderStyle::Numbered).unwrap();
        assert_eq!(statement.sql(), "SELECT ID FROM PAYMENTS WHERE TRIM(BRANCH) IN ($1, $2)");

        let statement = prepare(&assembly, PlaceholderStyle::Positional).unwrap();
        assert_eq!(statement.sql(), "SELECT ID FROM PAYMENTS WHERE TRIM(BRANCH) IN (?, ?)");
    }
}
