use std::sync::mpsc::Receiver;
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use crate::error::DataAccessError;
use crate::results::ResultSet;
use crate::types::Value;

use super::channel::{Command, DmlOutcome};
use super::config::DataConfig;
use super::params::{sqlite_to_value, value_to_sqlite};

pub(super) fn open_connection(config: &DataConfig) -> Result<Connection, DataAccessError> {
    let conn = Connection::open(&config.path)?;
    if let Some(ms) = config.busy_timeout_ms {
        conn.busy_timeout(Duration::from_millis(ms))?;
    }
    debug!(path = %config.path, "opened SQLite connection");
    Ok(conn)
}

/// Worker loop: drain commands until shutdown or every sender is gone.
pub(super) fn run_worker(conn: &Connection, receiver: &Receiver<Command>) {
    for command in receiver.iter() {
        match command {
            Command::ExecuteBatch { sql, respond_to } => {
                let result = conn.execute_batch(&sql).map_err(DataAccessError::from);
                let _ = respond_to.send(result);
            }
            Command::Select {
                sql,
                params,
                respond_to,
            } => {
                let _ = respond_to.send(execute_select(conn, &sql, &params));
            }
            Command::SelectNamed {
                sql,
                params,
                respond_to,
            } => {
                let _ = respond_to.send(execute_select_named(conn, &sql, &params));
            }
            Command::Execute {
                sql,
                params,
                respond_to,
            } => {
                let _ = respond_to.send(execute_dml(conn, &sql, &params));
            }
            Command::Shutdown => break,
        }
    }
    debug!("SQLite worker shutting down");
}

fn execute_select(
    conn: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<ResultSet, DataAccessError> {
    let mut stmt = conn.prepare(sql)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| (*name).to_owned())
        .collect();
    let column_count = column_names.len();

    let converted: Vec<rusqlite::types::Value> = params.iter().map(value_to_sqlite).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(converted))?;

    let mut result_set = ResultSet::with_capacity(8);
    result_set.set_column_names(column_names);
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(sqlite_to_value(row.get_ref(i)?));
        }
        result_set.add_row(values);
    }
    Ok(result_set)
}

fn execute_select_named(
    conn: &Connection,
    sql: &str,
    params: &[(String, Value)],
) -> Result<ResultSet, DataAccessError> {
    let mut stmt = conn.prepare(sql)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| (*name).to_owned())
        .collect();
    let column_count = column_names.len();

    // Bind by name via the raw interface so callers may pass placeholders
    // the statement does not reference (a shared params map).
    for (name, value) in params {
        if let Some(index) = stmt.parameter_index(name)? {
            stmt.raw_bind_parameter(index, value_to_sqlite(value))?;
        }
    }
    let mut rows = stmt.raw_query();

    let mut result_set = ResultSet::with_capacity(8);
    result_set.set_column_names(column_names);
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(sqlite_to_value(row.get_ref(i)?));
        }
        result_set.add_row(values);
    }
    Ok(result_set)
}

fn execute_dml(
    conn: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<DmlOutcome, DataAccessError> {
    let converted: Vec<rusqlite::types::Value> = params.iter().map(value_to_sqlite).collect();
    let rows_affected = conn.execute(sql, rusqlite::params_from_iter(converted))?;
    Ok(DmlOutcome {
        rows_affected,
        last_insert_id: conn.last_insert_rowid(),
    })
}
