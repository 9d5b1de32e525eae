//! Schema blueprint: a fluent, in-memory description of a table's columns
//! and indexes, compiled to DDL statements.

mod blueprint;
mod compile;

pub use blueprint::{Blueprint, ColumnDef, ColumnType};
