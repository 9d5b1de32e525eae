use crate::error::DataAccessError;
use crate::types::Value;

use super::{Conditions, QueryAndParams, SOFT_DELETE_FILTER, render_positional};

/// Build `INSERT INTO table (cols) VALUES (?, ...)`.
///
/// An empty row is refused before any SQL is produced.
pub fn build_insert(table: &str, row: &[(&str, Value)]) -> Result<QueryAndParams, DataAccessError> {
    if row.is_empty() {
        return Err(DataAccessError::InvalidInput(format!(
            "insert into `{table}` with no columns"
        )));
    }
    let columns: Vec<&str> = row.iter().map(|(name, _)| *name).collect();
    let placeholders = vec!["?"; row.len()].join(", ");
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(", ")
    );
    let params = row.iter().map(|(_, value)| value.clone()).collect();
    Ok(QueryAndParams::new(sql, params))
}

/// Build `UPDATE table SET ... WHERE ...`.
///
/// Both an empty change set and an empty condition set are refused; an
/// unconditional UPDATE is never produced. With `only_active`, the
/// soft-delete filter is ANDed into the WHERE clause.
pub fn build_update(
    table: &str,
    changes: &[(&str, Value)],
    conditions: &Conditions,
    only_active: bool,
) -> Result<QueryAndParams, DataAccessError> {
    if changes.is_empty() {
        return Err(DataAccessError::InvalidInput(format!(
            "update of `{table}` with no changes"
        )));
    }
    if conditions.is_empty() {
        return Err(DataAccessError::InvalidInput(format!(
            "unconditional update of `{table}` refused"
        )));
    }
    let assignments: Vec<String> = changes
        .iter()
        .map(|(name, _)| format!("{name} = ?"))
        .collect();
    let mut params: Vec<Value> = changes.iter().map(|(_, value)| value.clone()).collect();
    let mut fragments = render_positional(conditions, &mut params)?;
    if only_active {
        fragments.push(SOFT_DELETE_FILTER.to_owned());
    }
    let sql = format!(
        "UPDATE {table} SET {} WHERE {}",
        assignments.join(", "),
        fragments.join(" AND ")
    );
    Ok(QueryAndParams::new(sql, params))
}

/// Build `DELETE FROM table WHERE ...` (hard delete).
///
/// An empty condition set is refused; an unconditional DELETE is never
/// produced.
pub fn build_delete(table: &str, conditions: &Conditions) -> Result<QueryAndParams, DataAccessError> {
    if conditions.is_empty() {
        return Err(DataAccessError::InvalidInput(format!(
            "unconditional delete from `{table}` refused"
        )));
    }
    let mut params = Vec::new();
    let fragments = render_positional(conditions, &mut params)?;
    let sql = format!("DELETE FROM {table} WHERE {}", fragments.join(" AND "));
    Ok(QueryAndParams::new(sql, params))
}

/// Build the soft-delete UPDATE for one primary key. The `deleted = 0` guard
/// makes a repeat call affect zero rows rather than fail.
pub fn build_soft_delete(table: &str, id: i64) -> QueryAndParams {
    QueryAndParams::new(
        format!("UPDATE {table} SET deleted = 1 WHERE id = ? AND {SOFT_DELETE_FILTER}"),
        vec![Value::Int(id)],
    )
}

/// Build `SELECT COUNT(*) ...` honoring the soft-delete filter unless
/// `include_deleted` is set.
pub fn build_count(
    table: &str,
    conditions: Option<&Conditions>,
    include_deleted: bool,
) -> Result<QueryAndParams, DataAccessError> {
    let mut params = Vec::new();
    let mut fragments = match conditions {
        Some(conditions) => render_positional(conditions, &mut params)?,
        None => Vec::new(),
    };
    if !include_deleted {
        fragments.push(SOFT_DELETE_FILTER.to_owned());
    }
    let mut sql = format!("SELECT COUNT(*) AS count FROM {table}");
    if !fragments.is_empty() {
        sql.push_str(&format!(" WHERE {}", fragments.join(" AND ")));
    }
    Ok(QueryAndParams::new(sql, params))
}

/// Build the existence probe: `SELECT 1 ... LIMIT 1` rather than a full count.
pub fn build_exists(
    table: &str,
    conditions: &Conditions,
    include_deleted: bool,
) -> Result<QueryAndParams, DataAccessError> {
    let mut params = Vec::new();
    let mut fragments = render_positional(conditions, &mut params)?;
    if !include_deleted {
        fragments.push(SOFT_DELETE_FILTER.to_owned());
    }
    let mut sql = format!("SELECT 1 FROM {table}");
    if !fragments.is_empty() {
        sql.push_str(&format!(" WHERE {}", fragments.join(" AND ")));
    }
    sql.push_str(" LIMIT 1");
    Ok(QueryAndParams::new(sql, params))
}
