//! Membership-clause parameter binding.
//!
//! A runtime-sized list of values becomes two things that never meet until the
//! driver binds them: an `IN (?, ?, ...)` fragment made only of placeholders, and
//! an ordered array of values. Nothing here ever writes a value into query text.

mod assembly;
pub mod error;
pub mod placeholder;
mod value;

pub use assembly::{assemble, assemble_checked, QueryAssembly};
pub use error::{BindError, BindErrorKind};
pub use placeholder::PlaceholderStyle;
pub use value::{BindValue, BoundParameters};

use placeholder::POSITIONAL;
use serde::Serialize;
use std::fmt;

const SEPARATOR: &str = ", ";


/// An `IN (...)` fragment holding exactly `placeholders()` positional tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    text: String,
    placeholders: usize,
}

impl Clause {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Build `IN (?, ?, ...)` with `count` placeholders.
///
/// An empty membership clause has no sound meaning, so `count == 0` is rejected:
/// the caller decides what an empty list means before getting here.
pub fn build_clause(count: usize) -> Result<Clause, BindError> {
    if count == 0 {
        return Err(BindError::invalid_argument(
            "an IN clause needs at least one placeholder",
        ));
    }

    let text = format!("IN ({})", vec![POSITIONAL; count].join(SEPARATOR));

    Ok(Clause { text, placeholders: count })
}

/// Trim every value and keep input order. No quoting and no escaping.
pub fn to_parameters<I, S>(values: I) -> BoundParameters
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .collect()
}


/// A clause together with the values bound to its own placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipClause {
    clause: Clause,
    parameters: BoundParameters,
}

impl MembershipClause {
    pub fn from_values<I, S>(values: I) -> Result<Self, BindError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parameters = to_parameters(values);
        let clause = build_clause(parameters.len())?;

        Ok(MembershipClause { clause, parameters })
    }

    pub fn clause(&self) -> &Clause {
        &self.clause
    }

    pub fn parameters(&self) -> &BoundParameters {
        &self.parameters
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_clause_with_exact_placeholder_count() {
        let cases: &[(usize, &str)] = &[
            (1, "IN (?)"),
            (2, "IN (?, ?)"),
            (3, "IN (?, ?, ?)"),
        ];

        for (count, expected) in cases {
            let clause = build_clause(*count).unwrap();
            assert_eq!(clause.text(), *expected);
            assert_eq!(clause.placeholders(), *count);
        }
    }

    #[test]
    fn large_clause_has_no_trailing_separator() {
        for count in [10, 257, 1000] {
            let clause = build_clause(count).unwrap();
            let text = clause.text();

            assert!(text.starts_with("IN (") && text.ends_with(')'));
            assert!(!text.ends_with(", )"));
            assert_eq!(text.matches('?').count(), count);
            assert_eq!(text.matches(", ").count(), count - 1);
            assert_eq!(
                placeholder::count(text, PlaceholderStyle::Positional).unwrap(),
                count
            );
        }
    }

    #[test]
    fn zero_count_is_invalid_argument() {
        let err = build_clause(0).unwrap_err();
        assert!(matches!(err.kind, BindErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn to_parameters_trims_and_keeps_order() {
        let params = to_parameters([" A ", "B", "\tC\n"]);
        assert_eq!(
            params.into_vec(),
            vec![
                BindValue::Text("A".into()),
                BindValue::Text("B".into()),
                BindValue::Text("C".into()),
            ]
        );
    }

    #[test]
    fn to_parameters_does_not_escape_values() {
        let hostile = "BR1') OR ('1'='1";
        let params = to_parameters(vec![hostile.to_string()]);
        assert_eq!(params[0], BindValue::Text(hostile.to_string()));
    }

    #[test]
    fn membership_clause_never_contains_values() {
        let values = vec!["BR1", "x'; DROP TABLE payments; --"];
        let membership = MembershipClause::from_values(&values).unwrap();

        assert_eq!(membership.clause().text(), "IN (?, ?)");
        assert_eq!(membership.parameters().len(), 2);
        for value in &values {
            assert!(!membership.clause().text().contains(value));
        }
    }

    #[test]
    fn membership_clause_rejects_empty_list() {
        let values: Vec<String> = vec![];
        let err = MembershipClause::from_values(values).unwrap_err();
        assert!(matches!(err.kind, BindErrorKind::InvalidArgument(_)));
    }
}
