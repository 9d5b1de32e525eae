//! ORM facade: the public CRUD/transaction API.
//!
//! [`DataContext`] is an explicit context object constructed once at process
//! start and threaded through call sites; there is no ambient singleton.
//! All operations run on the provider's single connection, so statements
//! issued while a transaction is open participate in it implicitly and
//! nothing auto-commits underneath the caller.

mod tx;

use tracing::debug;

use crate::connection::{ConnectionProvider, DataConfig};
use crate::error::DataAccessError;
use crate::results::{ResultSet, Row};
use crate::sql::{
    Conditions, JoinClause, SelectBuilder, build_count, build_delete, build_exists, build_insert,
    build_soft_delete, build_update, normalize_placeholder,
};
use crate::types::Value;

/// The data access context: one per process, owning the connection provider
/// and the transaction state.
#[derive(Debug)]
pub struct DataContext {
    provider: ConnectionProvider,
    tx_depth: u32,
}

impl DataContext {
    /// Open the configured database and return a ready context.
    ///
    /// # Errors
    /// Returns `DataAccessError::Connection` when the database cannot be
    /// opened.
    pub async fn connect(config: &DataConfig) -> Result<Self, DataAccessError> {
        let provider = ConnectionProvider::connect(config).await?;
        Ok(Self {
            provider,
            tx_depth: 0,
        })
    }

    /// Insert one row; returns the stored row as `{id, ...row}` with the
    /// backend-assigned primary key first.
    ///
    /// # Errors
    /// `InvalidInput` for an empty row; `Query` on constraint violation.
    pub async fn insert(
        &mut self,
        table: &str,
        row: &[(&str, Value)],
    ) -> Result<Row, DataAccessError> {
        let query = build_insert(table, row)?;
        debug!(sql = %query.sql, "insert");
        let outcome = self.provider.execute(query.sql, query.params).await?;
        let mut pairs = Vec::with_capacity(row.len() + 1);
        pairs.push(("id".to_owned(), Value::Int(outcome.last_insert_id)));
        for (name, value) in row {
            pairs.push(((*name).to_owned(), value.clone()));
        }
        Ok(Row::from_pairs(pairs))
    }

    /// Matching rows, soft-delete filtered. Empty vec (never an error) when
    /// nothing matches.
    pub async fn get_where(
        &mut self,
        table: &str,
        conditions: &Conditions,
    ) -> Result<Vec<Row>, DataAccessError> {
        let query = SelectBuilder::new(table).conditions(conditions).build()?;
        debug!(sql = %query.sql, "select");
        let result = self.provider.select(query.sql, query.params).await?;
        Ok(result.rows)
    }

    /// The deleted-inclusive read path; otherwise identical to `get_where`.
    pub async fn get_where_with_deleted(
        &mut self,
        table: &str,
        conditions: &Conditions,
    ) -> Result<Vec<Row>, DataAccessError> {
        let query = SelectBuilder::new(table)
            .conditions(conditions)
            .include_deleted()
            .build()?;
        debug!(sql = %query.sql, "select (including deleted)");
        let result = self.provider.select(query.sql, query.params).await?;
        Ok(result.rows)
    }

    /// All non-deleted rows, optionally paged. An offset without a limit is
    /// rejected as `InvalidInput`.
    pub async fn get_all(
        &mut self,
        table: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<Row>, DataAccessError> {
        let mut builder = SelectBuilder::new(table);
        if let Some(limit) = limit {
            builder = builder.limit(limit);
        }
        if let Some(offset) = offset {
            builder = builder.offset(offset);
        }
        let query = builder.build()?;
        debug!(sql = %query.sql, "select all");
        let result = self.provider.select(query.sql, query.params).await?;
        Ok(result.rows)
    }

    /// Update matching rows; returns the affected-row count. Unconditional
    /// updates are refused before any SQL is sent.
    pub async fn update(
        &mut self,
        table: &str,
        changes: &[(&str, Value)],
        conditions: &Conditions,
    ) -> Result<usize, DataAccessError> {
        let query = build_update(table, changes, conditions, false)?;
        debug!(sql = %query.sql, "update");
        let outcome = self.provider.execute(query.sql, query.params).await?;
        Ok(outcome.rows_affected)
    }

    /// Soft-delete-aware update: only rows with `deleted = 0` are touched.
    pub async fn update_active(
        &mut self,
        table: &str,
        changes: &[(&str, Value)],
        conditions: &Conditions,
    ) -> Result<usize, DataAccessError> {
        let query = build_update(table, changes, conditions, true)?;
        debug!(sql = %query.sql, "update (active only)");
        let outcome = self.provider.execute(query.sql, query.params).await?;
        Ok(outcome.rows_affected)
    }

    /// Hard delete; returns the affected-row count. Unconditional deletes
    /// are refused before any SQL is sent.
    pub async fn delete(
        &mut self,
        table: &str,
        conditions: &Conditions,
    ) -> Result<usize, DataAccessError> {
        let query = build_delete(table, conditions)?;
        debug!(sql = %query.sql, "delete");
        let outcome = self.provider.execute(query.sql, query.params).await?;
        Ok(outcome.rows_affected)
    }

    /// Mark one row deleted by primary key. Returns 0 when the row does not
    /// exist or was already soft-deleted, so a repeat call is not an error.
    pub async fn soft_delete(&mut self, table: &str, id: i64) -> Result<usize, DataAccessError> {
        let query = build_soft_delete(table, id);
        debug!(sql = %query.sql, id, "soft delete");
        let outcome = self.provider.execute(query.sql, query.params).await?;
        Ok(outcome.rows_affected)
    }

    /// Count of matching non-deleted rows.
    pub async fn count(
        &mut self,
        table: &str,
        conditions: Option<&Conditions>,
    ) -> Result<i64, DataAccessError> {
        let query = build_count(table, conditions, false)?;
        debug!(sql = %query.sql, "count");
        let result = self.provider.select(query.sql, query.params).await?;
        let count = result
            .rows
            .first()
            .and_then(|row| row.get("count"))
            .and_then(|value| value.as_int().copied())
            .ok_or_else(|| DataAccessError::Query("count query returned no value".into()))?;
        Ok(count)
    }

    /// Whether any non-deleted row matches; probes with `LIMIT 1` rather
    /// than counting.
    pub async fn exists(
        &mut self,
        table: &str,
        conditions: &Conditions,
    ) -> Result<bool, DataAccessError> {
        let query = build_exists(table, conditions, false)?;
        debug!(sql = %query.sql, "exists");
        let result = self.provider.select(query.sql, query.params).await?;
        Ok(!result.is_empty())
    }

    /// Fully custom multi-table read. `params` supplies named-placeholder
    /// bindings referenced from condition values and join predicates; the
    /// implicit soft-delete filter is not applied here; the caller owns the
    /// predicate text.
    pub async fn select_with_join(
        &mut self,
        base_table: &str,
        joins: &[JoinClause],
        fields: &[&str],
        conditions: &Conditions,
        params: &[(&str, Value)],
    ) -> Result<Vec<Row>, DataAccessError> {
        let (sql, mut binds) = SelectBuilder::new(base_table)
            .fields(fields)
            .joins(joins)
            .conditions(conditions)
            .include_deleted()
            .build_named()?;
        for (name, value) in params {
            binds.push((normalize_placeholder(name), value.clone()));
        }
        debug!(sql = %sql, "join select");
        let result = self.provider.select_named(sql, binds).await?;
        Ok(result.rows)
    }

    /// Escape hatch for raw parameterized SQL. Statements beginning with
    /// `SELECT`/`WITH`/`PRAGMA` run through the query path and return rows;
    /// anything else runs as DML and reports an affected count. Values are
    /// always bound, never interpolated.
    pub async fn run_query(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> Result<ResultSet, DataAccessError> {
        let head = sql.trim_start().to_ascii_lowercase();
        let is_query =
            head.starts_with("select") || head.starts_with("with") || head.starts_with("pragma");
        debug!(sql = %sql, is_query, "raw query");
        if is_query {
            self.provider.select(sql.to_owned(), params.to_vec()).await
        } else {
            let outcome = self.provider.execute(sql.to_owned(), params.to_vec()).await?;
            Ok(ResultSet::from_rows_affected(outcome.rows_affected))
        }
    }

    /// Execute a multi-statement script (no parameters), e.g. compiled DDL.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<(), DataAccessError> {
        self.provider.execute_batch(sql.to_owned()).await
    }

    /// Release the underlying connection; the context is unusable afterward.
    pub fn close(&self) {
        self.provider.close();
    }
}
