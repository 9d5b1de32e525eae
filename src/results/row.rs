use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Value;

/// A single result row: an ordered mapping from column name to [`Value`].
///
/// Column names are shared across all rows of one result set to avoid
/// duplicating the header per row; a shared index map makes name lookups
/// cheaper than repeated string comparisons.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across the result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column order
    pub values: Vec<Value>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    pub(crate) fn new(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Build a standalone row from `(column, value)` pairs, preserving order.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        let mut names = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());
        for (position, (name, value)) in pairs.into_iter().enumerate() {
            index.insert(name.clone(), position);
            names.push(name);
            values.push(value);
        }
        Self {
            column_names: Arc::new(names),
            values,
            column_index: Arc::new(index),
        }
    }

    /// Index of a column by name, if present.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    /// Value of a column by name, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.column_index(column).and_then(|i| self.values.get(i))
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}
