use crate::binder::error::BindError;
use crate::binder::placeholder::{self, PlaceholderStyle};
use crate::binder::value::BoundParameters;
use crate::binder::MembershipClause;

use serde::Serialize;


/// Final query text paired with the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAssembly {
    label: Option<String>,
    sql: String,
    parameters: BoundParameters,
    style: PlaceholderStyle,
}

impl QueryAssembly {
    /// Pair already-final text with its parameters.
    pub fn new(sql: impl Into<String>, parameters: BoundParameters) -> Self {
        QueryAssembly {
            label: None,
            sql: sql.into(),
            parameters,
            style: PlaceholderStyle::Positional,
        }
    }

    /// Name the query template, so a mismatch can say which one broke.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &BoundParameters {
        &self.parameters
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    pub fn into_parts(self) -> (String, BoundParameters) {
        (self.sql, self.parameters)
    }

    /// Fail with `ParameterCountMismatch` unless the text binds exactly as many
    /// values as are carried.
    pub fn verify(&self) -> Result<(), BindError> {
        placeholder::verify(&self.sql, self.style, self.parameters.len(), self.label())
    }

    /// The same statement with `?` placeholders rewritten to `$1..$n`.
    pub fn numbered(&self) -> Result<Self, BindError> {
        let sql = match self.style {
            PlaceholderStyle::Positional => placeholder::renumber(&self.sql)?,
            PlaceholderStyle::Numbered => self.sql.clone(),
        };

        Ok(QueryAssembly {
            label: self.label.clone(),
            sql,
            parameters: self.parameters.clone(),
            style: PlaceholderStyle::Numbered,
        })
    }
}

/// Concatenate `prefix + clause + suffix` and order the parameters as
/// `leading`, then the clause's own, then `trailing`.
///
/// `leading` holds every value whose placeholder sits in `prefix`, `trailing`
/// every value whose placeholder sits in `suffix`. The resulting array mirrors
/// placeholder order in the final text, whatever order suits the caller.
pub fn assemble(
    prefix: &str,
    membership: &MembershipClause,
    suffix: &str,
    leading: &BoundParameters,
    trailing: &BoundParameters,
) -> QueryAssembly {
    let clause = membership.clause().text();

    let mut sql = String::with_capacity(prefix.len() + clause.len() + suffix.len());
    sql.push_str(prefix);
    sql.push_str(clause);
    sql.push_str(suffix);

    let mut parameters = BoundParameters::new();
    parameters.extend_from(leading);
    parameters.extend_from(membership.parameters());
    parameters.extend_from(trailing);

    QueryAssembly::new(sql, parameters)
}

/// [`assemble`], then [`QueryAssembly::verify`].
pub fn assemble_checked(
    prefix: &str,
    membership: &MembershipClause,
    suffix: &str,
    leading: &BoundParameters,
    trailing: &BoundParameters,
) -> Result<QueryAssembly, BindError> {
    let assembly = assemble(prefix, membership, suffix, leading, trailing);
    assembly.verify()?;
    Ok(assembly)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{BindErrorKind, BindValue};

    fn texts(params: &BoundParameters) -> Vec<String> {
        params
            .iter()
            .map(|v| match v {
                BindValue::Text(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }

    #[test]
    fn leading_parameters_precede_clause_parameters() {
        let membership = MembershipClause::from_values(["x", "y"]).unwrap();
        let leading: BoundParameters = vec!["d", "s"].into();

        let assembly = assemble(
            "P? Q? WHERE BR ",
            &membership,
            "",
            &leading,
            &BoundParameters::new(),
        );

        assert_eq!(assembly.sql(), "P? Q? WHERE BR IN (?, ?)");
        assert_eq!(texts(assembly.parameters()), vec!["d", "s", "x", "y"]);
        assert!(assembly.verify().is_ok());
    }

    #[test]
    fn parameters_follow_placeholder_layout_on_both_sides() {
        let membership = MembershipClause::from_values([" BR1 ", "BR2"]).unwrap();
        let leading: BoundParameters = vec!["20240101"].into();
        let trailing: BoundParameters = vec!["0042"].into();

        let assembly = assemble_checked(
            "SELECT MSG_KEY FROM HISTO H WHERE H.DAY = ? AND TRIM(H.BRANCH) ",
            &membership,
            " AND H.SEQ = ?",
            &leading,
            &trailing,
        )
        .unwrap();

        assert_eq!(
            assembly.sql(),
            "SELECT MSG_KEY FROM HISTO H WHERE H.DAY = ? AND TRIM(H.BRANCH) IN (?, ?) AND H.SEQ = ?"
        );
        assert_eq!(texts(assembly.parameters()), vec!["20240101", "BR1", "BR2", "0042"]);
    }

    #[test]
    fn checked_assembly_catches_misplaced_parameters() {
        let membership = MembershipClause::from_values(["BR1"]).unwrap();
        let leading: BoundParameters = vec!["day", "seq"].into();

        let err = assemble_checked(
            "SELECT * FROM H WHERE DAY = ? AND BRANCH ",
            &membership,
            "",
            &leading,
            &BoundParameters::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err.kind,
            BindErrorKind::ParameterCountMismatch { placeholders: 2, parameters: 3, .. }
        ));
    }

    #[test]
    fn mismatch_reports_template_label() {
        let assembly = QueryAssembly::new("DELETE FROM T WHERE ID = ?", BoundParameters::new())
            .with_label("purge_out_diff");

        let err = assembly.verify().unwrap_err();
        assert!(err.to_string().contains("purge_out_diff"));
    }

    #[test]
    fn numbered_form_keeps_parameters_and_checks_out() {
        let membership = MembershipClause::from_values(["BR1", "BR2"]).unwrap();
        let leading: BoundParameters = vec!["d"].into();
        let trailing: BoundParameters = vec![7i64].into();

        let assembly = assemble_checked(
            "UPDATE M SET STATUS = 'FAILED?' WHERE DAY = ? AND BRANCH ",
            &membership,
            " AND SEQ > ?",
            &leading,
            &trailing,
        )
        .unwrap()
        .with_label("update_pending");

        let numbered = assembly.numbered().unwrap();

        assert_eq!(
            numbered.sql(),
            "UPDATE M SET STATUS = 'FAILED?' WHERE DAY = $1 AND BRANCH IN ($2, $3) AND SEQ > $4"
        );
        assert_eq!(numbered.parameters(), assembly.parameters());
        assert_eq!(numbered.style(), PlaceholderStyle::Numbered);
        assert_eq!(numbered.label(), Some("update_pending"));
        assert!(numbered.verify().is_ok());
    }

    #[test]
    fn assembly_is_plain_data() {
        let assembly = QueryAssembly::new("SELECT ?", vec![1i64].into());
        let (sql, params) = assembly.into_parts();
        assert_eq!(sql, "SELECT ?");
        assert_eq!(params.into_vec(), vec![BindValue::Int(1)]);
    }
}
