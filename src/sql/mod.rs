//! SQL text generation: structured CRUD/join requests in, parameterized SQL
//! plus an ordered binding list out. No I/O happens in this module.

pub mod dml;
pub mod join;
pub mod select;

pub use dml::{
    build_count, build_delete, build_exists, build_insert, build_soft_delete, build_update,
};
pub use join::{JoinClause, JoinType};
pub use select::SelectBuilder;

use crate::error::DataAccessError;
use crate::types::Value;

/// A SQL statement and its positional parameters bundled together.
#[derive(Debug, Clone)]
pub struct QueryAndParams {
    /// The SQL text
    pub sql: String,
    /// The parameters to be bound to the statement, in placeholder order
    pub params: Vec<Value>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given SQL and parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters.
    pub fn new_without_params(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Right-hand side of one condition entry.
#[derive(Debug, Clone)]
pub enum CondValue {
    /// A literal value, bound positionally (or auto-named in join selects).
    Value(Value),
    /// A reference to a named placeholder (e.g. `:age`) supplied separately.
    Param(String),
}

/// An ordered, conjunctive (AND) filter set used to build `WHERE` clauses.
///
/// Keys are either a bare column (`"email"`, compared with `=`) or a column
/// plus operator (`"age >"`, `"u1.id !="`). Entry order is preserved and
/// determines binding order.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    entries: Vec<(String, CondValue)>,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition on `column`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.entries
            .push((column.to_owned(), CondValue::Value(value.into())));
        self
    }

    /// Add a condition whose key embeds the operator, e.g. `"age >"`.
    #[must_use]
    pub fn expr(mut self, column_and_op: &str, value: impl Into<Value>) -> Self {
        self.entries
            .push((column_and_op.to_owned(), CondValue::Value(value.into())));
        self
    }

    /// Add a condition referencing a named placeholder, e.g.
    /// `param("u1.age", ":age")`. Only legal in join selects, where the
    /// placeholder values are supplied alongside the query.
    #[must_use]
    pub fn param(mut self, column_and_op: &str, placeholder: &str) -> Self {
        self.entries.push((
            column_and_op.to_owned(),
            CondValue::Param(placeholder.to_owned()),
        ));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[(String, CondValue)] {
        &self.entries
    }
}

/// Split a condition key into `column <op>` SQL, defaulting the operator
/// to `=` when the key is a bare column name.
fn key_to_expr(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.contains(char::is_whitespace) {
        trimmed.to_owned()
    } else {
        format!("{trimmed} =")
    }
}

/// Render a condition set into WHERE-clause fragments with positional `?`
/// placeholders, appending literal values to `binds` in entry order.
///
/// Named-placeholder entries are rejected here; they are only meaningful in
/// the named-binding join path.
pub(crate) fn render_positional(
    conditions: &Conditions,
    binds: &mut Vec<Value>,
) -> Result<Vec<String>, DataAccessError> {
    let mut fragments = Vec::with_capacity(conditions.len());
    for (key, cond_value) in conditions.entries() {
        match cond_value {
            CondValue::Value(value) => {
                fragments.push(format!("{} ?", key_to_expr(key)));
                binds.push(value.clone());
            }
            CondValue::Param(placeholder) => {
                return Err(DataAccessError::InvalidInput(format!(
                    "named placeholder `{placeholder}` is only supported in join selects"
                )));
            }
        }
    }
    Ok(fragments)
}

/// Render a condition set with named placeholders. Literal values receive
/// generated `:__lit<n>` names appended to `binds`; `Param` entries reference
/// the caller's placeholders verbatim. The double-underscore prefix keeps the
/// generated names out of the namespace callers would plausibly use.
pub(crate) fn render_named(
    conditions: &Conditions,
    binds: &mut Vec<(String, Value)>,
) -> Vec<String> {
    let mut fragments = Vec::with_capacity(conditions.len());
    for (key, cond_value) in conditions.entries() {
        match cond_value {
            CondValue::Value(value) => {
                let name = format!(":__lit{}", binds.len());
                fragments.push(format!("{} {name}", key_to_expr(key)));
                binds.push((name, value.clone()));
            }
            CondValue::Param(placeholder) => {
                let placeholder = normalize_placeholder(placeholder);
                fragments.push(format!("{} {placeholder}", key_to_expr(key)));
            }
        }
    }
    fragments
}

/// Ensure a placeholder carries the `:` prefix the driver expects.
pub(crate) fn normalize_placeholder(name: &str) -> String {
    if name.starts_with(':') {
        name.to_owned()
    } else {
        format!(":{name}")
    }
}

/// The `deleted = 0` filter appended to soft-delete-aware statements.
pub(crate) const SOFT_DELETE_FILTER: &str = "deleted = 0";
