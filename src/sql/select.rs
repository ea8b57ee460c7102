use thiserror::Error;

use crate::query::{FilterTree, Literal, SortTerm};

/// Comparison operators the generated filter schema advertises.
pub const COMPARISON_OPS: [&str; 6] = ["_eq", "_gt", "_lt", "_gte", "_lte", "_in"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid sort direction '{0}'")]
    InvalidSortDirection(String),

    #[error("empty IN list for column '{0}'")]
    EmptyInList(String),
}

/// Wrap an identifier in backticks, rejecting anything that is not a bare
/// `[A-Za-z_][A-Za-z0-9_]*` word.
pub fn quote_identifier(identifier: &str) -> Result<String, CompileError> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(CompileError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(format!("`{}`", identifier))
}

/// Mapping from filter operator symbols to SQL comparison operators.
fn sql_operator(op: &str) -> Option<&'static str> {
    let symbol = match op {
        "_ne" => "!=",
        "_gt" => ">",
        "_lt" => "<",
        "_gte" => ">=",
        "_lte" => "<=",
        "_in" => "IN",
        "_eq" => "=",
        _ => return None,
    };
    Some(symbol)
}

/// Builder for one SELECT statement.
///
/// The four `with_*` calls may arrive in any order; the clause order of the
/// built statement is fixed regardless. `build` is pure, so building twice
/// yields identical text.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    table: String,
    filters: FilterTree,
    projection: Vec<String>,
    sort: Vec<SortTerm>,
    pagination: Option<(u64, u64)>,
}

impl SelectBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Translate the filter tree into the WHERE predicate.
    pub fn with_filters(mut self, filters: FilterTree) -> Self {
        self.filters = filters;
        self
    }

    /// Translate requested columns into the select list; empty means `*`.
    pub fn with_projections(mut self, projection: Vec<String>) -> Self {
        self.projection = projection;
        self
    }

    /// Translate sort terms into the ORDER BY clause, precedence preserved.
    pub fn with_sort_criteria(mut self, sort: Vec<SortTerm>) -> Self {
        self.sort = sort;
        self
    }

    /// Translate offset and limit into the pagination clauses. Both are
    /// always rendered once set, zero included.
    pub fn with_pagination(mut self, offset: u64, limit: u64) -> Self {
        self.pagination = Some((offset, limit));
        self
    }

    /// Assemble the statement:
    /// `SELECT <projection> FROM <table> [WHERE ..] [ORDER BY ..] [LIMIT n] [OFFSET n];`
    pub fn build(&self) -> Result<String, CompileError> {
        let projection = if self.projection.is_empty() {
            "*".to_string()
        } else {
            self.projection
                .iter()
                .map(|column| quote_identifier(column))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")
        };

        let mut statement = format!("SELECT {} FROM {}", projection, quote_identifier(&self.table)?);

        let predicate = self.predicate()?;
        if !predicate.is_empty() {
            statement.push_str(" WHERE ");
            statement.push_str(&predicate);
        }

        let sort_order = self.sort_clause()?;
        if !sort_order.is_empty() {
            statement.push_str(" ORDER BY ");
            statement.push_str(&sort_order);
        }

        if let Some((offset, limit)) = self.pagination {
            statement.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        statement.push(';');
        Ok(statement)
    }

    /// Flat AND conjunction over all filter entries. A scalar condition is an
    /// equality; a nested mapping emits one comparison per recognized
    /// operator key. Unrecognized keys are skipped.
    fn predicate(&self) -> Result<String, CompileError> {
        let mut comparisons = Vec::new();

        for (column, condition) in &self.filters {
            let column_sql = quote_identifier(column)?;

            match condition {
                Literal::Object(operators) => {
                    for (op, operand) in operators {
                        let Some(symbol) = sql_operator(op) else {
                            tracing::debug!("Skipping unrecognized filter operator '{}'", op);
                            continue;
                        };

                        if op.as_str() == "_in" {
                            comparisons.push(format!(
                                "{} {} {}",
                                column_sql,
                                symbol,
                                in_list(column, operand)?
                            ));
                        } else if let Some(value) = scalar_literal(operand) {
                            comparisons.push(format!("{} {} {}", column_sql, symbol, value));
                        } else {
                            tracing::debug!(
                                "Skipping non-scalar operand for '{}' on column '{}'",
                                op,
                                column
                            );
                        }
                    }
                }
                scalar => {
                    if let Some(value) = scalar_literal(scalar) {
                        comparisons.push(format!("{} = {}", column_sql, value));
                    } else {
                        tracing::debug!("Skipping non-scalar condition on column '{}'", column);
                    }
                }
            }
        }

        Ok(comparisons.join(" AND "))
    }

    /// Comma-joined `column direction` pairs in caller order. The direction
    /// must be a bare word but is otherwise passed through unexamined.
    fn sort_clause(&self) -> Result<String, CompileError> {
        let mut terms = Vec::with_capacity(self.sort.len());
        for term in &self.sort {
            if !is_bare_word(&term.direction) {
                return Err(CompileError::InvalidSortDirection(term.direction.clone()));
            }
            terms.push(format!("{} {}", quote_identifier(&term.column)?, term.direction));
        }
        Ok(terms.join(", "))
    }
}

/// Render a parenthesized IN operand list. A scalar operand counts as a
/// one-element list; an empty list cannot be expressed in SQL and is an error.
fn in_list(column: &str, operand: &Literal) -> Result<String, CompileError> {
    let values: Vec<String> = match operand {
        Literal::List(items) => items.iter().filter_map(scalar_literal).collect(),
        scalar => scalar_literal(scalar).into_iter().collect(),
    };

    if values.is_empty() {
        return Err(CompileError::EmptyInList(column.to_string()));
    }
    Ok(format!("({})", values.join(", ")))
}

/// Textual form of a scalar literal. String values are quoted and escaped;
/// lists and objects have no scalar form.
fn scalar_literal(literal: &Literal) -> Option<String> {
    let text = match literal {
        Literal::Int(value) => value.to_string(),
        Literal::Float(value) => value.to_string(),
        Literal::Boolean(true) => "TRUE".to_string(),
        Literal::Boolean(false) => "FALSE".to_string(),
        Literal::String(value) => format!("'{}'", escape_string(value)),
        Literal::Null => "NULL".to_string(),
        Literal::List(_) | Literal::Object(_) => return None,
    };
    Some(text)
}

/// Escape a string literal for inclusion between single quotes.
fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}

fn is_bare_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
