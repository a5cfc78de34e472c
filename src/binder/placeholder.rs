use crate::binder::error::{BindError, BindErrorKind};

use serde::Serialize;
use sqlparser::dialect::{Dialect, GenericDialect, PostgreSqlDialect};
use sqlparser::tokenizer::{Token, Tokenizer};
use std::collections::BTreeSet;

pub static DIALECT_GENERIC: GenericDialect = GenericDialect {};
pub static DIALECT_POSTGRES: PostgreSqlDialect = PostgreSqlDialect {};

/// Positional `?` token emitted by the clause builder.
pub const POSITIONAL: &str = "?";


/// How placeholders are spelled in a query text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?`, bound strictly left to right.
    #[default]
    Positional,
    /// `$1`, `$2`, ... as PostgreSQL expects.
    Numbered,
}

impl PlaceholderStyle {
    fn dialect(&self) -> &'static dyn Dialect {
        match self {
            Self::Positional => &DIALECT_GENERIC,
            Self::Numbered => &DIALECT_POSTGRES,
        }
    }

    fn owns(&self, token: &str) -> bool {
        match self {
            Self::Positional => token.starts_with('?'),
            Self::Numbered => token.starts_with('$'),
        }
    }
}

/// Placeholder tokens of `style` found in `sql`, left to right.
/// Anything inside string literals, quoted identifiers or comments is ignored.
pub fn scan(sql: &str, style: PlaceholderStyle) -> Result<Vec<String>, BindError> {
    let tokens = Tokenizer::new(style.dialect(), sql).tokenize()?;

    Ok(tokens
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(p) if style.owns(&p) => Some(p),
            _ => None,
        })
        .collect())
}

/// Number of distinct bind slots `sql` declares.
pub fn count(sql: &str, style: PlaceholderStyle) -> Result<usize, BindError> {
    let tokens = scan(sql, style)?;

    match style {
        PlaceholderStyle::Positional => Ok(tokens.len()),
        PlaceholderStyle::Numbered => Ok(numbered_indices(&tokens)?.len()),
    }
}

/// Check that `sql` binds exactly `parameters` values.
///
/// Numbered placeholders must cover `1..=parameters` with no gap; they may repeat.
pub fn verify(
    sql: &str,
    style: PlaceholderStyle,
    parameters: usize,
    label: Option<&str>,
) -> Result<(), BindError> {
    let tokens = scan(sql, style)?;

    let (placeholders, aligned) = match style {
        PlaceholderStyle::Positional => (tokens.len(), tokens.len() == parameters),
        PlaceholderStyle::Numbered => {
            let indices = numbered_indices(&tokens)?;
            let contiguous = indices.iter().copied().eq(1..=indices.len());
            (indices.len(), contiguous && indices.len() == parameters)
        }
    };

    if aligned {
        Ok(())
    } else {
        Err(BindError {
            kind: BindErrorKind::ParameterCountMismatch {
                label: label.map(str::to_string),
                placeholders,
                parameters,
            },
        })
    }
}

fn numbered_indices(tokens: &[String]) -> Result<BTreeSet<usize>, BindError> {
    tokens
        .iter()
        .map(|token| {
            token[1..]
                .parse::<usize>()
                .ok()
                .filter(|index| *index > 0)
                .ok_or_else(|| BindError { kind: BindErrorKind::InvalidPlaceholder(token.clone()) })
        })
        .collect()
}

/// Rewrite every `?` placeholder in `sql` into `$1..$n`, left to right.
/// Literals, quoted identifiers and comments are copied through untouched.
pub fn renumber(sql: &str) -> Result<String, BindError> {
    let tokens = Tokenizer::new(&DIALECT_GENERIC, sql).tokenize_with_location()?;

    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut output = String::with_capacity(sql.len() + 8);
    let mut cursor = 0;
    let mut index = 0;

    for located in tokens {
        let Token::Placeholder(p) = &located.token else { continue };
        if !PlaceholderStyle::Positional.owns(p) {
            continue;
        }

        let start = byte_offset(sql, &line_starts, located.span.start.line, located.span.start.column)
            .filter(|offset| sql[*offset..].starts_with(p.as_str()))
            .ok_or_else(|| BindError { kind: BindErrorKind::InvalidPlaceholder(p.clone()) })?;

        index += 1;
        output.push_str(&sql[cursor..start]);
        output.push('$');
        output.push_str(&index.to_string());
        cursor = start + p.len();
    }

    output.push_str(&sql[cursor..]);
    Ok(output)
}

/// Tokenizer locations are 1-based lines and 1-based character columns.
fn byte_offset(sql: &str, line_starts: &[usize], line: u64, column: u64) -> Option<usize> {
    let line_start = *line_starts.get(usize::try_from(line).ok()?.checked_sub(1)?)?;
    let column = usize::try_from(column).ok()?.checked_sub(1)?;

    sql[line_start..]
        .char_indices()
        .nth(column)
        .map(|(i, _)| line_start + i)
}
