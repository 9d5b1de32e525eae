use std::fmt::Write;

use rusqlite::types::{Value as SqliteValue, ValueRef};

use crate::types::Value;

/// Convert a single [`Value`] to a rusqlite value for binding.
///
/// Booleans become 0/1 integers; timestamps are formatted as text in the
/// backend's native `YYYY-MM-DD HH:MM:SS[.fff]` shape.
pub(crate) fn value_to_sqlite(value: &Value) -> SqliteValue {
    match value {
        Value::Int(i) => SqliteValue::Integer(*i),
        Value::Float(f) => SqliteValue::Real(*f),
        Value::Text(s) => SqliteValue::Text(s.clone()),
        Value::Bool(b) => SqliteValue::Integer(i64::from(*b)),
        Value::Timestamp(dt) => {
            let mut formatted = String::with_capacity(32);
            let _ = write!(formatted, "{}", dt.format("%F %T%.f"));
            SqliteValue::Text(formatted)
        }
        Value::Null => SqliteValue::Null,
        Value::Blob(bytes) => SqliteValue::Blob(bytes.clone()),
    }
}

/// Convert a column value coming back from the driver.
///
/// Timestamps arrive as text and stay text; `Value::as_timestamp` parses on
/// demand.
pub(crate) fn sqlite_to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}
