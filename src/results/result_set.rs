use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Value;

use super::row::Row;

/// A result set from a database query.
///
/// Carries the rows returned by a SELECT, or the affected-row count for DML.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub rows: Vec<Row>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: usize,
    /// Column names shared by all rows
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Result set for a DML statement that only reports an affected count.
    #[must_use]
    pub fn from_rows_affected(rows_affected: usize) -> ResultSet {
        ResultSet {
            rows_affected,
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by all rows, building the lookup index.
    pub fn set_column_names(&mut self, column_names: Vec<String>) {
        let index: HashMap<String, usize> = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        self.column_names = Some(Arc::new(column_names));
        self.column_index = Some(Arc::new(index));
    }

    /// Column names for this result set, if any rows were produced.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row of values; `set_column_names` must have been called first.
    pub fn add_row(&mut self, values: Vec<Value>) {
        let names = self
            .column_names
            .clone()
            .unwrap_or_else(|| Arc::new(Vec::new()));
        let index = self
            .column_index
            .clone()
            .unwrap_or_else(|| Arc::new(HashMap::new()));
        self.rows.push(Row::new(names, index, values));
        self.rows_affected = self.rows.len();
    }

    /// Whether the result set holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the result set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
